//! Reduces one statement's buffered token run into an AST statement
//! node.
//!
//! The grammar has no separate "key = value" production: a statement
//! is just a flat sequence of fields (`statement → (field | expr)*
//! EOL`), and concatenation is purely a property of adjacent fields —
//! every key is paired with its value as a `Concat` field, matching the
//! grammar's own worked example (`G1 X{1+2}` → `concat(str("X"),
//! add(1,2))`).
//!
//! One case does emit a real bridge between the key and what follows:
//! an extended-mode key running straight into `{...}`/`"..."` with no
//! `=` yet seen (`args.rs`'s `ExtKey`). That piece extends the key
//! itself, not the value — the lexer still demands a `=` afterward
//! (`ExtAfterKey`) before any value starts. `reduce_statement` folds
//! bridged pieces onto the key for as long as bridges keep appearing,
//! then parses the real value chain the same way as any other field.

use gcode_ast::{Node, OperatorKind};
use gcode_lexer::{classify_arg_mode, ArgMode, TokenKind};
use gcode_util::Symbol;

use crate::expr::parse_expr;
use crate::token::{Cursor, ParseToken};

/// Turns a statement's token buffer into its AST, or the first
/// structural error encountered while doing so. A malformed statement
/// yields no node at all — matching the source's node-destructor
/// unwind on a failed reduction, Rust just drops the partial tree.
pub(crate) fn reduce_statement(tokens: &[ParseToken]) -> Result<Option<Node>, String> {
    let mut cursor = Cursor::new(tokens);
    let Some(ParseToken::Identifier(name)) = cursor.advance() else {
        // An empty line reaches here as an empty token buffer; the
        // grammar treats it as a no-op, not a statement.
        return Ok(None);
    };
    let name = name.clone();
    let mode = classify_arg_mode(&name);
    let mut fields = Node::parameter(Symbol::intern(&name));
    let mut error = None;

    match mode {
        ArgMode::Traditional | ArgMode::Extended => {
            while !cursor.is_empty() && error.is_none() {
                let key = match cursor.advance() {
                    Some(ParseToken::Str(key)) => key.clone(),
                    _ => {
                        error = Some("expected an argument key".to_string());
                        break;
                    }
                };
                let mut key_node = Node::string(key);
                while cursor.eat_bridge() {
                    let Some(piece) = parse_value_piece(&mut cursor, &mut error) else {
                        break;
                    };
                    key_node = Node::operator(OperatorKind::Concat, vec![key_node, piece]);
                }
                if error.is_some() {
                    break;
                }
                let Some(value) = parse_value_chain(&mut cursor, &mut error) else {
                    break;
                };
                let field = Node::operator(OperatorKind::Concat, vec![key_node, value]);
                fields = fields.add_next(field);
            }
        }
        ArgMode::Raw => {
            if !cursor.is_empty() {
                if let Some(value) = parse_value_chain(&mut cursor, &mut error) {
                    fields = fields.add_next(value);
                }
            }
        }
    }

    match error {
        Some(message) => Err(message),
        None => Ok(Some(Node::statement(Some(fields)))),
    }
}

/// Parses one bridge-joined run of value pieces — a quoted/unquoted
/// string or a `{...}` expression, possibly several chained by
/// adjacency — into a left-associative `Concat` tree.
fn parse_value_chain(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Node> {
    let mut head = parse_value_piece(cursor, error)?;
    while cursor.eat_bridge() {
        let next = parse_value_piece(cursor, error)?;
        head = Node::operator(OperatorKind::Concat, vec![head, next]);
    }
    Some(head)
}

fn parse_value_piece(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Node> {
    match cursor.peek() {
        Some(ParseToken::Str(text)) => {
            let text = text.clone();
            cursor.advance();
            Some(Node::string(text))
        }
        Some(ParseToken::Keyword(TokenKind::LBrace)) => {
            cursor.advance();
            let inner = parse_expr(cursor, 0, error)?;
            if !cursor.eat(TokenKind::RBrace) {
                *error.get_or_insert_with(|| "expected '}' to close expression".to_string());
                return None;
            }
            Some(inner)
        }
        _ => {
            error.get_or_insert_with(|| "expected an argument value".to_string());
            None
        }
    }
}
