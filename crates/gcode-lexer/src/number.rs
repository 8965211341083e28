//! Numeric literal scanning inside expressions: binary, octal,
//! decimal, and hex integers; decimal and hex floats.
//!
//! Binary and octal literals error on overflow. Decimal and hex
//! literals instead promote to a floating-point value once the
//! running integer accumulator can no longer hold an exact i64 —
//! matching a pre-multiply overflow test (`v > (i64::MAX - d) / base`)
//! rather than relying on wrapping arithmetic.

use crate::lexer::Lexer;
use crate::sink::LexerSink;
use crate::state::State;

fn hex_digit(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'f' => Some((b - b'a' + 10) as u32),
        b'A'..=b'F' => Some((b - b'A' + 10) as u32),
        _ => None,
    }
}

impl Lexer {
    pub(crate) fn step_expr_number<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match self.state {
            State::ExprNumberZero => self.step_number_zero(byte, sink),
            State::ExprNumberBin => self.step_number_radix(byte, sink, 2, "binary"),
            State::ExprNumberOct => self.step_number_radix(byte, sink, 8, "octal"),
            State::ExprNumberHexInt => self.step_number_hex_int(byte, sink),
            State::ExprNumberHexFrac => self.step_number_hex_frac(byte, sink),
            State::ExprNumberHexExpSign => self.step_number_exp_sign(byte, sink, true),
            State::ExprNumberHexExpDigits => self.step_number_exp_digits(byte, sink, true),
            State::ExprNumberDecInt => self.step_number_dec_int(byte, sink),
            State::ExprNumberDecFrac => self.step_number_dec_frac(byte, sink),
            State::ExprNumberDecExpSign => self.step_number_exp_sign(byte, sink, false),
            State::ExprNumberDecExpDigits => self.step_number_exp_digits(byte, sink, false),
            _ => unreachable!("step_expr_number called with non-number state"),
        }
    }

    fn step_number_zero<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        match byte {
            b'b' | b'B' => {
                self.buf.push(byte);
                self.state = State::ExprNumberBin;
            }
            b'x' | b'X' => {
                self.buf.push(byte);
                self.state = State::ExprNumberHexInt;
            }
            b'0'..=b'7' => {
                self.int_value = (byte - b'0') as i64;
                self.buf.push(byte);
                self.state = State::ExprNumberOct;
            }
            b'8' | b'9' => self.enter_error("invalid digit in octal literal", sink),
            b'.' => {
                self.buf.push(b'.');
                self.state = State::ExprNumberDecFrac;
            }
            b'e' | b'E' => {
                self.buf.push(byte);
                self.state = State::ExprNumberDecExpSign;
            }
            _ => {
                self.emit_int(0, sink);
                self.reprocess(byte, sink);
            }
        }
    }

    fn step_number_radix<S: LexerSink>(&mut self, byte: u8, sink: &mut S, radix: i64, name: &str) {
        let digit = match byte {
            b'0'..=b'1' if radix == 2 => Some((byte - b'0') as i64),
            b'0'..=b'7' if radix == 8 => Some((byte - b'0') as i64),
            _ => None,
        };
        if let Some(d) = digit {
            self.buf.push(byte);
            match self
                .int_value
                .checked_mul(radix)
                .and_then(|v| v.checked_add(d))
            {
                Some(v) => self.int_value = v,
                None => self.enter_error(&format!("{name} integer literal overflow"), sink),
            }
            return;
        }
        if byte.is_ascii_digit() {
            self.enter_error(&format!("invalid digit in {name} literal"), sink);
            return;
        }
        let value = self.int_value;
        self.emit_int(value, sink);
        self.reprocess(byte, sink);
    }

    fn step_number_hex_int<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if let Some(d) = hex_digit(byte) {
            self.buf.push(byte);
            self.float_value = self.float_value * 16.0 + d as f64;
            if !self.int_overflowed {
                match self
                    .int_value
                    .checked_mul(16)
                    .and_then(|v| v.checked_add(d as i64))
                {
                    Some(v) => self.int_value = v,
                    None => self.int_overflowed = true,
                }
            }
            return;
        }
        match byte {
            b'.' => {
                self.buf.push(b'.');
                self.hex_frac_scale = 1.0 / 16.0;
                self.state = State::ExprNumberHexFrac;
            }
            b'p' | b'P' => {
                self.buf.push(byte);
                self.state = State::ExprNumberHexExpSign;
            }
            _ => {
                if self.int_overflowed {
                    let v = self.float_value;
                    self.emit_float(v, sink);
                } else {
                    let v = self.int_value;
                    self.emit_int(v, sink);
                }
                self.reprocess(byte, sink);
            }
        }
    }

    fn step_number_hex_frac<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if let Some(d) = hex_digit(byte) {
            self.buf.push(byte);
            self.float_value += d as f64 * self.hex_frac_scale;
            self.hex_frac_scale /= 16.0;
            return;
        }
        match byte {
            b'p' | b'P' => {
                self.buf.push(byte);
                self.state = State::ExprNumberHexExpSign;
            }
            _ => {
                let v = self.float_value;
                self.emit_float(v, sink);
                self.reprocess(byte, sink);
            }
        }
    }

    fn step_number_dec_int<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte.is_ascii_digit() {
            self.buf.push(byte);
            let d = (byte - b'0') as i64;
            if !self.int_overflowed {
                match self.int_value.checked_mul(10).and_then(|v| v.checked_add(d)) {
                    Some(v) => self.int_value = v,
                    None => self.int_overflowed = true,
                }
            }
            return;
        }
        match byte {
            b'.' => {
                self.buf.push(b'.');
                self.state = State::ExprNumberDecFrac;
            }
            b'e' | b'E' => {
                self.buf.push(byte);
                self.state = State::ExprNumberDecExpSign;
            }
            _ => {
                if self.int_overflowed {
                    self.finalize_decimal_float(sink);
                } else {
                    let v = self.int_value;
                    self.emit_int(v, sink);
                }
                self.reprocess(byte, sink);
            }
        }
    }

    fn step_number_dec_frac<S: LexerSink>(&mut self, byte: u8, sink: &mut S) {
        if byte.is_ascii_digit() {
            self.buf.push(byte);
            return;
        }
        match byte {
            b'e' | b'E' => {
                self.buf.push(byte);
                self.state = State::ExprNumberDecExpSign;
            }
            _ => {
                self.finalize_decimal_float(sink);
                self.reprocess(byte, sink);
            }
        }
    }

    fn step_number_exp_sign<S: LexerSink>(&mut self, byte: u8, sink: &mut S, hex: bool) {
        match byte {
            b'-' => {
                self.buf.push(byte);
                self.exp_negative = true;
                self.exp_digit_count = 0;
                self.state = if hex {
                    State::ExprNumberHexExpDigits
                } else {
                    State::ExprNumberDecExpDigits
                };
            }
            b'0'..=b'9' => {
                self.buf.push(byte);
                self.exp_value = (byte - b'0') as i32;
                self.exp_digit_count = 1;
                self.state = if hex {
                    State::ExprNumberHexExpDigits
                } else {
                    State::ExprNumberDecExpDigits
                };
            }
            _ => self.enter_error("empty exponent in numeric literal", sink),
        }
    }

    fn step_number_exp_digits<S: LexerSink>(&mut self, byte: u8, sink: &mut S, hex: bool) {
        if byte.is_ascii_digit() {
            self.buf.push(byte);
            self.exp_value = self
                .exp_value
                .saturating_mul(10)
                .saturating_add((byte - b'0') as i32);
            self.exp_digit_count += 1;
            return;
        }
        if self.exp_digit_count == 0 {
            self.enter_error("empty exponent in numeric literal", sink);
            return;
        }
        if hex {
            let exp = if self.exp_negative {
                -self.exp_value
            } else {
                self.exp_value
            };
            let value = self.float_value * 2f64.powi(exp);
            self.emit_float(value, sink);
        } else {
            self.finalize_decimal_float(sink);
        }
        self.reprocess(byte, sink);
    }

    fn finalize_decimal_float<S: LexerSink>(&mut self, sink: &mut S) {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        let value = text.parse::<f64>().unwrap_or(f64::NAN);
        self.emit_float(value, sink);
    }
}
