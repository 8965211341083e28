//! An incremental, push-driven lexer for extended G-code.
//!
//! Feed bytes in any chunking to [`Lexer::scan`]; it drives a
//! [`LexerSink`] implementation as tokens complete and carries all
//! state needed to resume correctly regardless of where a chunk
//! boundary falls — mid-token, mid-escape, mid-expression. There is
//! no recursive descent here: the scanner is a flat state machine
//! dispatched one byte at a time, so stack depth never grows with
//! input size.
//!
//! A command name picks one of three argument grammars (see
//! [`ArgMode`]) before a single byte of its arguments is scanned:
//! Traditional (`G1 X10 Y20`), Extended (`KEY=value`), or Raw
//! (`M117 free text`). Inside any argument value, a `{ ... }` block
//! switches into a small C-like expression grammar with its own
//! number and string literal scanning.

mod args;
mod expr;
mod ident;
mod keywords;
mod lexer;
mod number;
mod sink;
mod state;
mod string_lit;
mod token;

pub use lexer::{classify_arg_mode, Lexer};
pub use sink::LexerSink;
pub use state::ArgMode;
pub use token::TokenKind;
