//! The incremental scanner itself: state, public push API, and the
//! statement-preamble states (line number, command name, comment,
//! error). Argument-mode scanning lives in [`crate::args`], expression
//! scanning in [`crate::expr`] and [`crate::number`], string literals
//! in [`crate::string_lit`].

use gcode_util::{Position, Span};

use crate::ident::is_ident_start;
use crate::sink::LexerSink;
use crate::state::{ArgMode, Resume, State};
use crate::token::TokenKind;

/// An incremental, push-driven G-code lexer.
///
/// Feed it bytes in any chunking via [`Lexer::scan`]; it calls back
/// into a [`LexerSink`] as tokens complete, carrying all state needed
/// to resume correctly across calls. [`Lexer::finish`] flushes a
/// trailing statement that has no terminating newline.
pub struct Lexer {
    pub(crate) state: State,
    pub(crate) pos: Position,
    pub(crate) token_start: Position,

    /// Reused accumulator for the token currently being scanned.
    pub(crate) buf: Vec<u8>,

    pub(crate) int_value: i64,
    pub(crate) int_overflowed: bool,
    pub(crate) float_value: f64,
    pub(crate) hex_frac_scale: f64,
    pub(crate) exp_negative: bool,
    pub(crate) exp_value: i32,
    pub(crate) exp_digit_count: u32,

    pub(crate) escape_value: u32,
    pub(crate) escape_digit_count: u32,

    pub(crate) paren_depth: u32,
    pub(crate) expr_return: Resume,
    pub(crate) resume: Resume,
    pub(crate) arg_mode: Option<ArgMode>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: State::Newline,
            pos: Position::START,
            token_start: Position::START,
            buf: Vec::with_capacity(128),
            int_value: 0,
            int_overflowed: false,
            float_value: 0.0,
            hex_frac_scale: 1.0,
            exp_negative: false,
            exp_value: 0,
            exp_digit_count: 0,
            escape_value: 0,
            escape_digit_count: 0,
            paren_depth: 0,
            expr_return: Resume::Raw,
            resume: Resume::Raw,
            arg_mode: None,
        }
    }

    /// Returns the lexer to its initial state, discarding any
    /// in-progress token or statement.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The span covering the token currently (or most recently) being
    /// scanned, for diagnostics.
    pub fn location(&self) -> Span {
        Span::new(self.token_start, self.pos)
    }

    /// The argument-parsing mode selected for the statement in
    /// progress, or `None` before a command name has been scanned.
    pub fn arg_mode(&self) -> Option<ArgMode> {
        self.arg_mode
    }

    /// Consumes `buf`, calling back into `sink` as tokens complete.
    /// Safe to call repeatedly with adjacent chunks of a single
    /// logical input stream, split on any boundary.
    pub fn scan<S: LexerSink>(&mut self, buf: &[u8], sink: &mut S) {
        for &byte in buf {
            self.step(byte, sink);
            self.pos.advance(byte);
        }
    }

    /// Flushes a trailing statement with no terminating newline, as if
    /// a single `\n` had been scanned.
    pub fn finish<S: LexerSink>(&mut self, sink: &mut S) {
        if self.state != State::Newline {
            self.step(b'\n', sink);
            self.pos.advance(b'\n');
        }
    }

    /// Re-dispatches `byte` under the lexer's (possibly just-changed)
    /// current state. Used to "put back" a terminator byte that a
    /// state didn't consume, e.g. the non-digit byte that ends a
    /// line-number prefix. Bounded to a handful of calls per input
    /// byte by construction (state transitions form a DAG with no
    /// reprocess cycles), not proportional to input size.
    pub(crate) fn reprocess<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        self.step(byte, sink);
    }

    pub(crate) fn step<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::Newline => self.step_newline(byte, sink),
            State::LineNumberDigits => self.step_line_number_digits(byte, sink),
            State::AfterLineNumber => self.step_after_line_number(byte, sink),
            State::CommandName => self.step_command_name(byte, sink),
            State::Comment => self.step_comment(byte, sink),
            State::Error => self.step_error(byte, sink),

            State::TradSkipSpace
            | State::TradKey
            | State::TradAfterKey
            | State::TradValueStart
            | State::TradValueUnquoted
            | State::TradAfterValue => self.step_traditional(byte, sink),

            State::ExtSkipSpace
            | State::ExtKey
            | State::ExtAfterKey
            | State::ExtValueStart
            | State::ExtValueUnquoted
            | State::ExtAfterValue => self.step_extended(byte, sink),

            State::RawSkipSpace | State::RawValue => self.step_raw(byte, sink),

            State::ExprSkipSpace
            | State::ExprAfterDot
            | State::ExprIdent
            | State::ExprSymbol => self.step_expr_token(byte, sink),

            State::ExprNumberZero
            | State::ExprNumberBin
            | State::ExprNumberOct
            | State::ExprNumberHexInt
            | State::ExprNumberHexFrac
            | State::ExprNumberHexExpSign
            | State::ExprNumberHexExpDigits
            | State::ExprNumberDecInt
            | State::ExprNumberDecFrac
            | State::ExprNumberDecExpSign
            | State::ExprNumberDecExpDigits => self.step_expr_number(byte, sink),

            State::StringNormal
            | State::StringEscape
            | State::StringEscapeHex
            | State::StringEscapeOctal
            | State::StringEscapeU
            | State::StringEscapeUUpper => self.step_string(byte, sink),
        }
    }

    // --- shared helpers used across regions ---

    /// Transitions into the absorbing error state. Per the "token
    /// buffer logically empty on entering Error" invariant, this is
    /// the single choke point every error path routes through.
    pub(crate) fn enter_error<S: LexerSink>(&mut self, message: &str, sink: &mut S) {
        let _ = sink.lex_error(message);
        self.buf.clear();
        self.arg_mode = None;
        self.state = State::Error;
        tracing::debug!(message, "lexer entering error state");
    }

    pub(crate) fn emit_keyword<S: LexerSink>(&mut self, kind: TokenKind, sink: &mut S) {
        if !sink.lex_keyword(kind) {
            self.enter_error("sink rejected keyword token", sink);
        }
    }

    pub(crate) fn emit_identifier<S: LexerSink>(&mut self, sink: &mut S) {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        if !sink.lex_identifier(&text) {
            self.enter_error("sink rejected identifier token", sink);
        }
    }

    pub(crate) fn emit_str<S: LexerSink>(&mut self, sink: &mut S) {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        if !sink.lex_str_literal(&text) {
            self.enter_error("sink rejected string token", sink);
        }
    }

    pub(crate) fn emit_int<S: LexerSink>(&mut self, value: i64, sink: &mut S) {
        self.reset_number_state();
        if !sink.lex_int_literal(value) {
            self.enter_error("sink rejected integer token", sink);
        }
        self.state = State::ExprSkipSpace;
    }

    pub(crate) fn emit_float<S: LexerSink>(&mut self, value: f64, sink: &mut S) {
        self.reset_number_state();
        if !sink.lex_float_literal(value) {
            self.enter_error("sink rejected float token", sink);
        }
        self.state = State::ExprSkipSpace;
    }

    pub(crate) fn reset_number_state(&mut self) {
        self.buf.clear();
        self.int_value = 0;
        self.int_overflowed = false;
        self.float_value = 0.0;
        self.hex_frac_scale = 1.0;
        self.exp_negative = false;
        self.exp_value = 0;
        self.exp_digit_count = 0;
    }

    pub(crate) fn emit_bridge<S: LexerSink>(&mut self, sink: &mut S) {
        if !sink.lex_bridge() {
            self.enter_error("sink rejected bridge token", sink);
        }
    }

    pub(crate) fn emit_end_statement<S: LexerSink>(&mut self, sink: &mut S) {
        self.buf.clear();
        self.arg_mode = None;
        if !sink.lex_end_statement() {
            self.enter_error("sink rejected end-of-statement", sink);
            return;
        }
        self.state = State::Newline;
    }

    /// Enters a `{ ... }` expression block, remembering which
    /// argument-mode state to resume once it closes.
    pub(crate) fn enter_expression<S: LexerSink>(&mut self, expr_return: Resume, sink: &mut S) {
        self.expr_return = expr_return;
        self.paren_depth = 0;
        self.buf.clear();
        self.emit_keyword(TokenKind::LBrace, sink);
        self.state = State::ExprSkipSpace;
    }

    /// Enters a quoted string literal, remembering the state to
    /// resume once the closing quote is scanned.
    pub(crate) fn enter_string(&mut self, resume: Resume) {
        self.resume = resume;
        self.buf.clear();
        self.state = State::StringNormal;
    }

    // --- statement preamble ---

    fn step_newline<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match byte {
            b' ' | b'\t' | b'\r' => {}
            b'\n' => self.emit_end_statement(sink),
            b';' => self.state = State::Comment,
            b'N' | b'n' => {
                self.buf.clear();
                self.state = State::LineNumberDigits;
            }
            b if is_ident_start(b) => {
                self.token_start = self.pos;
                self.buf.clear();
                self.buf.push(b);
                self.state = State::CommandName;
            }
            _ => self.enter_error("expected a command name or line number", sink),
        }
    }

    fn step_line_number_digits<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte.is_ascii_digit() {
            return;
        }
        self.state = State::AfterLineNumber;
        self.reprocess(byte, sink);
    }

    fn step_after_line_number<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match byte {
            b' ' | b'\t' | b'\r' => {}
            b'\n' => self.emit_end_statement(sink),
            b';' => self.state = State::Comment,
            b if is_ident_start(b) => {
                self.token_start = self.pos;
                self.buf.clear();
                self.buf.push(b);
                self.state = State::CommandName;
            }
            _ => self.enter_error("expected a command name after line number", sink),
        }
    }

    fn step_command_name<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match byte {
            b' ' | b'\t' | b'\r' | b'\n' | b';' => {
                self.buf.make_ascii_uppercase();
                let name = String::from_utf8_lossy(&self.buf).into_owned();
                self.emit_identifier(sink);
                self.enter_args(&name);
                self.reprocess(byte, sink);
            }
            b'{' | b'"' => {
                self.enter_error("expressions/strings not allowed in command name", sink)
            }
            b if crate::ident::is_ident_continue(b) => self.buf.push(b),
            _ => self.enter_error("invalid character in command name", sink),
        }
    }

    /// Selects the argument grammar for `name` (already upper-cased)
    /// and moves into its initial scan state.
    fn enter_args(&mut self, name: &str) {
        let mode = classify_arg_mode(name);
        self.arg_mode = Some(mode);
        self.state = match mode {
            ArgMode::Traditional => State::TradSkipSpace,
            ArgMode::Extended => State::ExtSkipSpace,
            ArgMode::Raw => State::RawSkipSpace,
        };
    }
}

/// Classifies an already upper-cased command name into the
/// argument-parsing grammar it selects: `M117`/`ECHO` take the rest of
/// the line verbatim, a letter-then-digits shape (`G1`, `M104`, `T0`)
/// is Traditional, anything else is Extended. Exposed so a downstream
/// parser can re-derive the mode for a statement from its command name
/// alone, since [`crate::LexerSink`] carries no out-of-band state.
pub fn classify_arg_mode(name: &str) -> ArgMode {
    if name == "M117" || name == "ECHO" {
        ArgMode::Raw
    } else if is_traditional_shape(name) {
        ArgMode::Traditional
    } else {
        ArgMode::Extended
    }
}

/// `G1`, `M104`, `T0`: a letter followed by one or more digits.
fn is_traditional_shape(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 1
        && bytes[0].is_ascii_uppercase()
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

impl Lexer {
    fn step_comment<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte == b'\n' {
            self.emit_end_statement(sink);
        }
    }

    fn step_error<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte == b'\n' {
            self.state = State::Newline;
            let _ = sink;
        }
    }
}
