//! Minimal perfect hash lookup for word-shaped reserved keywords.
//!
//! Symbol-shaped tokens (`+`, `**`, `<=`, ...) are recognized directly
//! by the expression scanner and never reach this table; this table
//! only covers identifiers that fold to a reserved word once
//! lower-cased (`if`, `IF`, `If` all resolve the same way).

use crate::token::TokenKind;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "or" => TokenKind::Or,
    "and" => TokenKind::And,
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "nan" => TokenKind::Nan,
    "infinity" => TokenKind::Infinity,
    "true" => TokenKind::True,
    "false" => TokenKind::False,
};

/// Looks up `text` as a reserved word, case-insensitively. `text` need
/// not be pre-lowered.
pub fn lookup(text: &str) -> Option<TokenKind> {
    if text.bytes().any(|b| b.is_ascii_uppercase()) {
        let lowered = text.to_ascii_lowercase();
        KEYWORDS.get(lowered.as_str()).copied()
    } else {
        KEYWORDS.get(text).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_case() {
        assert_eq!(lookup("if"), Some(TokenKind::If));
        assert_eq!(lookup("IF"), Some(TokenKind::If));
        assert_eq!(lookup("If"), Some(TokenKind::If));
    }

    #[test]
    fn non_keyword_identifier_misses() {
        assert_eq!(lookup("feedrate"), None);
    }

    #[test]
    fn all_reserved_words_resolve() {
        for (word, expected) in [
            ("or", TokenKind::Or),
            ("and", TokenKind::And),
            ("nan", TokenKind::Nan),
            ("infinity", TokenKind::Infinity),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
            ("else", TokenKind::Else),
        ] {
            assert_eq!(lookup(word), Some(expected));
        }
    }
}
