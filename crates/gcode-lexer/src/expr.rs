//! Token scanning inside `{ ... }` expression blocks: identifiers
//! (case-folded against the keyword table), symbols, punctuation, and
//! the entry points into number and string scanning.

use crate::ident::{is_ident_continue, is_ident_start, is_symbol_char};
use crate::keywords;
use crate::lexer::Lexer;
use crate::sink::LexerSink;
use crate::state::{Resume, State};
use crate::token::TokenKind;

impl Lexer {
    pub(crate) fn step_expr_token<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::ExprSkipSpace => self.step_expr_skip_space(byte, sink),
            State::ExprAfterDot => self.step_expr_after_dot(byte, sink),
            State::ExprIdent => self.step_expr_ident(byte, sink),
            State::ExprSymbol => self.step_expr_symbol(byte, sink),
            _ => unreachable!("step_expr_token called with non-expression-token state"),
        }
    }

    fn step_expr_skip_space<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match byte {
            b' ' | b'\t' | b'\r' => {}
            b'\n' => self.enter_error("unterminated expression", sink),
            b'}' => self.exit_expression(sink),
            b'(' => {
                self.paren_depth += 1;
                self.emit_keyword(TokenKind::LParen, sink);
            }
            b')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.emit_keyword(TokenKind::RParen, sink);
            }
            b'[' => self.emit_keyword(TokenKind::LBracket, sink),
            b']' => self.emit_keyword(TokenKind::RBracket, sink),
            b',' => self.emit_keyword(TokenKind::Comma, sink),
            b'.' => {
                self.buf.clear();
                self.buf.push(b'.');
                self.state = State::ExprAfterDot;
            }
            b'"' => self.enter_string(Resume::ExprSkipSpace),
            b'0' => {
                self.reset_number_state();
                self.buf.push(b'0');
                self.state = State::ExprNumberZero;
            }
            b if byte.is_ascii_digit() => {
                self.reset_number_state();
                self.buf.push(b);
                self.int_value = (b - b'0') as i64;
                self.state = State::ExprNumberDecInt;
            }
            b if is_ident_start(b) => {
                self.buf.clear();
                self.buf.push(b.to_ascii_lowercase());
                self.state = State::ExprIdent;
            }
            b if is_symbol_char(b) => {
                self.buf.clear();
                self.buf.push(b);
                self.state = State::ExprSymbol;
            }
            _ => self.enter_error("unexpected character in expression", sink),
        }
    }

    fn step_expr_after_dot<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte.is_ascii_digit() {
            self.reset_number_state();
            self.buf.push(b'.');
            self.buf.push(byte);
            self.state = State::ExprNumberDecFrac;
        } else {
            self.buf.clear();
            self.emit_keyword(TokenKind::Dot, sink);
            self.state = State::ExprSkipSpace;
            self.reprocess(byte, sink);
        }
    }

    fn step_expr_ident<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if is_ident_continue(byte) {
            self.buf.push(byte.to_ascii_lowercase());
            return;
        }
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        match keywords::lookup(&text) {
            Some(kind) => self.emit_keyword(kind, sink),
            None => {
                if !sink.lex_identifier(&text) {
                    self.enter_error("sink rejected identifier token", sink);
                }
            }
        }
        self.state = State::ExprSkipSpace;
        self.reprocess(byte, sink);
    }

    fn step_expr_symbol<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        let first = self.buf[0];
        if let Some(kind) = two_char_symbol(first, byte) {
            self.buf.clear();
            self.emit_keyword(kind, sink);
            self.state = State::ExprSkipSpace;
            return;
        }
        self.buf.clear();
        self.emit_keyword(one_char_symbol(first), sink);
        self.state = State::ExprSkipSpace;
        self.reprocess(byte, sink);
    }

    /// Closes the current `{ ... }` block and resumes whichever
    /// argument-mode state was active before it opened.
    pub(crate) fn exit_expression<S: LexerSink>(&mut self, sink: &mut S) {
        self.emit_keyword(TokenKind::RBrace, sink);
        self.buf.clear();
        self.state = match self.expr_return {
            Resume::TradAfterValue => State::TradAfterValue,
            Resume::ExtAfterValue => State::ExtAfterValue,
            Resume::ExtAfterKey => State::ExtAfterKey,
            Resume::Raw => State::RawValue,
            Resume::ExprSkipSpace => {
                unreachable!("expressions never nest directly inside expressions")
            }
        };
    }
}

fn one_char_symbol(c: u8) -> TokenKind {
    match c {
        b'+' => TokenKind::Plus,
        b'-' => TokenKind::Minus,
        b'*' => TokenKind::Star,
        b'/' => TokenKind::Slash,
        b'%' => TokenKind::Percent,
        b'<' => TokenKind::Lt,
        b'>' => TokenKind::Gt,
        b'=' => TokenKind::Eq,
        b'!' => TokenKind::Not,
        b'~' => TokenKind::Concat,
        _ => unreachable!("not a symbol character: {c}"),
    }
}

fn two_char_symbol(first: u8, second: u8) -> Option<TokenKind> {
    match (first, second) {
        (b'*', b'*') => Some(TokenKind::Power),
        (b'<', b'=') => Some(TokenKind::Lte),
        (b'>', b'=') => Some(TokenKind::Gte),
        _ => None,
    }
}
