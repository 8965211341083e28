//! Argument scanning for the three modes a command name selects
//! between: Traditional (`G1 X10`), Extended (`KEY=value`), and Raw
//! (`M117 free text`).

use crate::ident::is_space;
use crate::lexer::Lexer;
use crate::sink::LexerSink;
use crate::state::{Resume, State};

impl Lexer {
    // ------------------------------------------------------------------
    // Traditional: `G1 X10 Y20`
    // ------------------------------------------------------------------

    pub(crate) fn step_traditional<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::TradSkipSpace => match byte {
                b' ' | b'\t' | b'\r' => {}
                b'\n' => self.emit_end_statement(sink),
                b';' => self.state = State::Comment,
                _ => {
                    self.state = State::TradKey;
                    self.reprocess(byte, sink);
                }
            },
            State::TradKey => {
                if byte.is_ascii_alphabetic() {
                    self.buf.clear();
                    self.buf.push(byte.to_ascii_uppercase());
                    self.emit_str(sink);
                    self.state = State::TradAfterKey;
                } else {
                    self.enter_error("expected a single-letter argument key", sink);
                }
            }
            State::TradAfterKey => {
                if byte == b'=' {
                    self.state = State::TradValueStart;
                } else {
                    self.state = State::TradValueStart;
                    self.reprocess(byte, sink);
                }
            }
            State::TradValueStart => match byte {
                b' ' | b'\t' | b'\r' | b';' | b'\n' => {
                    self.buf.clear();
                    self.emit_str(sink);
                    self.state = State::TradAfterValue;
                    self.reprocess(byte, sink);
                }
                b'"' => self.enter_string(Resume::TradAfterValue),
                b'{' => self.enter_expression(Resume::TradAfterValue, sink),
                _ => {
                    self.buf.clear();
                    self.buf.push(byte);
                    self.state = State::TradValueUnquoted;
                }
            },
            State::TradValueUnquoted => match byte {
                b' ' | b'\t' | b'\r' | b';' | b'\n' => {
                    self.emit_str(sink);
                    self.state = State::TradAfterValue;
                    self.reprocess(byte, sink);
                }
                b'"' | b'{' => {
                    self.emit_str(sink);
                    self.emit_bridge(sink);
                    self.state = State::TradValueStart;
                    self.reprocess(byte, sink);
                }
                _ => self.buf.push(byte),
            },
            State::TradAfterValue => match byte {
                b' ' | b'\t' | b'\r' => self.state = State::TradSkipSpace,
                b'\n' => self.emit_end_statement(sink),
                b';' => self.state = State::Comment,
                b'"' | b'{' => {
                    self.emit_bridge(sink);
                    self.state = State::TradValueStart;
                    self.reprocess(byte, sink);
                }
                _ => {
                    // No whitespace before the next key: compact
                    // `X10Y20` style arguments are valid Traditional
                    // input, unlike Extended's `=`-delimited fields.
                    self.state = State::TradKey;
                    self.reprocess(byte, sink);
                }
            },
            _ => unreachable!("step_traditional called with non-Traditional state"),
        }
    }

    // ------------------------------------------------------------------
    // Extended: `KEY=value`
    // ------------------------------------------------------------------

    pub(crate) fn step_extended<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::ExtSkipSpace => match byte {
                b' ' | b'\t' | b'\r' => {}
                b'\n' => self.emit_end_statement(sink),
                b';' => self.state = State::Comment,
                _ => {
                    self.buf.clear();
                    self.state = State::ExtKey;
                    self.reprocess(byte, sink);
                }
            },
            State::ExtKey => match byte {
                b if crate::ident::is_ident_continue(b) => self.buf.push(b),
                b'=' => {
                    self.buf.make_ascii_uppercase();
                    self.emit_str(sink);
                    self.state = State::ExtValueStart;
                }
                b if is_space(b) => {
                    self.buf.make_ascii_uppercase();
                    self.emit_str(sink);
                    self.state = State::ExtAfterKey;
                }
                b';' | b'\n' => {
                    self.enter_error("expected '=' after parameter name", sink);
                    self.reprocess(byte, sink);
                }
                b'"' => {
                    self.buf.make_ascii_uppercase();
                    self.emit_str(sink);
                    self.emit_bridge(sink);
                    self.enter_string(Resume::ExtAfterKey);
                }
                b'{' => {
                    self.buf.make_ascii_uppercase();
                    self.emit_str(sink);
                    self.emit_bridge(sink);
                    self.enter_expression(Resume::ExtAfterKey, sink);
                }
                _ => self.enter_error("invalid character in parameter name", sink),
            },
            State::ExtAfterKey => match byte {
                b' ' | b'\t' | b'\r' => {}
                b'=' => self.state = State::ExtValueStart,
                _ => self.enter_error("expected '=' after parameter name", sink),
            },
            State::ExtValueStart => match byte {
                b' ' | b'\t' | b'\r' => {}
                b';' | b'\n' => {
                    self.enter_error("expected '=' after parameter name", sink);
                    self.reprocess(byte, sink);
                }
                b'"' => self.enter_string(Resume::ExtAfterValue),
                b'{' => self.enter_expression(Resume::ExtAfterValue, sink),
                _ => {
                    self.buf.clear();
                    self.buf.push(byte);
                    self.state = State::ExtValueUnquoted;
                }
            },
            State::ExtValueUnquoted => match byte {
                b' ' | b'\t' | b'\r' | b';' | b'\n' => {
                    self.emit_str(sink);
                    self.state = State::ExtAfterValue;
                    self.reprocess(byte, sink);
                }
                b'"' | b'{' => {
                    self.emit_str(sink);
                    self.emit_bridge(sink);
                    self.state = State::ExtValueStart;
                    self.reprocess(byte, sink);
                }
                _ => self.buf.push(byte),
            },
            State::ExtAfterValue => match byte {
                b' ' | b'\t' | b'\r' => self.state = State::ExtSkipSpace,
                b'\n' => self.emit_end_statement(sink),
                b';' => self.state = State::Comment,
                b'"' | b'{' => {
                    self.emit_bridge(sink);
                    self.state = State::ExtValueStart;
                    self.reprocess(byte, sink);
                }
                _ => self.enter_error("internal: unexpected byte after extended value", sink),
            },
            _ => unreachable!("step_extended called with non-Extended state"),
        }
    }

    // ------------------------------------------------------------------
    // Raw: `M117 free text`, `ECHO free text`
    // ------------------------------------------------------------------

    pub(crate) fn step_raw<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::RawSkipSpace => match byte {
                b' ' | b'\t' => {}
                b'\n' => self.emit_end_statement(sink),
                _ => {
                    self.buf.clear();
                    self.state = State::RawValue;
                    self.reprocess(byte, sink);
                }
            },
            State::RawValue => match byte {
                b'\n' => {
                    if !self.buf.is_empty() {
                        self.emit_str(sink);
                    } else {
                        self.buf.clear();
                    }
                    self.emit_end_statement(sink);
                }
                b'"' => {
                    let had_text = !self.buf.is_empty();
                    if had_text {
                        self.emit_str(sink);
                    }
                    if had_text {
                        self.emit_bridge(sink);
                    }
                    self.enter_string(Resume::Raw);
                }
                b'{' => {
                    let had_text = !self.buf.is_empty();
                    if had_text {
                        self.emit_str(sink);
                    }
                    if had_text {
                        self.emit_bridge(sink);
                    }
                    self.enter_expression(Resume::Raw, sink);
                }
                _ => self.buf.push(byte),
            },
            _ => unreachable!("step_raw called with non-Raw state"),
        }
    }
}
