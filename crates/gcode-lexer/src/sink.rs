use crate::token::TokenKind;

/// Callback surface the lexer drives as tokens complete.
///
/// Every method returns `bool`: `true` to keep scanning normally,
/// `false` to drop the lexer into the `Error` state (it will still
/// absorb input up to the next newline so the caller's buffered chunk
/// is fully consumed, it just stops emitting further tokens for the
/// current statement).
pub trait LexerSink {
    /// A lexical error was detected; `message` is already formatted.
    fn lex_error(&mut self, message: &str) -> bool;

    /// An operator, punctuation mark, or reserved word.
    fn lex_keyword(&mut self, kind: TokenKind) -> bool;

    /// A bare (unquoted) identifier: a command name, a parameter name,
    /// or a function name.
    fn lex_identifier(&mut self, name: &str) -> bool;

    /// String content, from either a quoted literal or an unquoted
    /// argument value.
    fn lex_str_literal(&mut self, text: &str) -> bool;

    /// An integer literal.
    fn lex_int_literal(&mut self, value: i64) -> bool;

    /// A floating-point literal.
    fn lex_float_literal(&mut self, value: f64) -> bool;

    /// Zero-whitespace adjacency between two value-producing tokens;
    /// the parser folds this into a concatenation expression.
    fn lex_bridge(&mut self) -> bool;

    /// End of a statement (a newline, or end of input via `finish`).
    fn lex_end_statement(&mut self) -> bool;
}
