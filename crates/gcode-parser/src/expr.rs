//! Pratt-precedence descent over the token run inside a `{ ... }`
//! block, substituting for the source's generated LALR(1) expression
//! productions (sanctioned by the grammar's own design notes: same
//! grammar, precedences, and error-recovery semantics, any parser
//! shape). Binding powers are assigned low-to-high exactly in the
//! order the grammar lists them; see the module-level table below.
//!
//! Postfix `.`/`[...]` lookup, function calls, and the `IF/ELSE`
//! ternary bind tighter than any infix operator, so they're resolved
//! directly against a primary atom rather than through the binding
//! power table — the ternary in particular is listed as the tightest
//! production in the grammar, which only makes sense if it wraps an
//! already-complete atom rather than chaining loosely like a normal
//! binary operator.

use gcode_ast::{Node, OperatorKind};
use gcode_lexer::TokenKind;
use gcode_util::Symbol;

use crate::token::{Cursor, ParseToken};

/// Threshold passed to the right-hand recursion of prefix `NOT`: binds
/// everything from relational operators up, but not `AND`/`OR`.
const NOT_OPERAND_BP: u8 = 30;
/// Threshold for prefix unary minus: binds concat and postfix/atom
/// forms, but stops short of `**` and everything looser — the grammar
/// states unary minus sits *above* `**` in precedence.
const NEG_OPERAND_BP: u8 = 80;

fn infix_binding_power(kind: TokenKind) -> Option<(OperatorKind, u8, u8)> {
    use TokenKind::*;
    Some(match kind {
        Or => (OperatorKind::Or, 10, 11),
        And => (OperatorKind::And, 20, 21),
        Lt => (OperatorKind::Lt, 30, 31),
        Gt => (OperatorKind::Gt, 30, 31),
        Lte => (OperatorKind::Lte, 30, 31),
        Gte => (OperatorKind::Gte, 30, 31),
        Eq => (OperatorKind::Equals, 30, 31),
        Plus => (OperatorKind::Add, 40, 41),
        Minus => (OperatorKind::Subtract, 40, 41),
        Star => (OperatorKind::Multiply, 50, 51),
        Slash => (OperatorKind::Divide, 50, 51),
        Percent => (OperatorKind::Modulus, 50, 51),
        // Right-associative: the right recursion re-enters at the same
        // threshold so a further `**` on the right still binds.
        Power => (OperatorKind::Power, 61, 60),
        Concat => (OperatorKind::Concat, 80, 81),
        _ => return None,
    })
}

/// Parses one expression, consuming operators whose left binding
/// power is at least `min_bp`. Leaves the cursor positioned on the
/// first token it didn't consume (typically the closing `}`, a `)`,
/// a `]`, or a `,`).
pub(crate) fn parse_expr(cursor: &mut Cursor<'_>, min_bp: u8, error: &mut Option<String>) -> Option<Node> {
    let mut lhs = parse_prefix(cursor, error)?;
    loop {
        let kind = match cursor.peek() {
            Some(ParseToken::Keyword(k)) => *k,
            _ => break,
        };
        let Some((op, left_bp, right_bp)) = infix_binding_power(kind) else {
            break;
        };
        if left_bp < min_bp {
            break;
        }
        cursor.advance();
        let rhs = parse_expr(cursor, right_bp, error)?;
        lhs = Node::operator(op, vec![lhs, rhs]);
    }
    Some(lhs)
}

fn parse_prefix(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Node> {
    match cursor.peek() {
        Some(ParseToken::Keyword(TokenKind::Not)) => {
            cursor.advance();
            let operand = parse_expr(cursor, NOT_OPERAND_BP, error)?;
            Some(Node::operator(OperatorKind::Not, vec![operand]))
        }
        Some(ParseToken::Keyword(TokenKind::Minus)) => {
            cursor.advance();
            let operand = parse_expr(cursor, NEG_OPERAND_BP, error)?;
            Some(Node::operator(OperatorKind::Negate, vec![operand]))
        }
        _ => parse_postfix_atom(cursor, error),
    }
}

fn parse_postfix_atom(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Node> {
    let mut atom = parse_atom(cursor, error)?;
    loop {
        match cursor.peek() {
            Some(ParseToken::Keyword(TokenKind::Dot)) => {
                cursor.advance();
                let name = match cursor.advance() {
                    Some(ParseToken::Identifier(name)) => name.clone(),
                    _ => return fail(error, "expected a name after '.'"),
                };
                atom = Node::operator(
                    OperatorKind::Lookup,
                    vec![atom, Node::parameter(Symbol::intern(&name))],
                );
            }
            Some(ParseToken::Keyword(TokenKind::LBracket)) => {
                cursor.advance();
                let index = parse_expr(cursor, 0, error)?;
                if !cursor.eat(TokenKind::RBracket) {
                    return fail(error, "expected ']' to close an indexed lookup");
                }
                atom = Node::operator(OperatorKind::Lookup, vec![atom, index]);
            }
            _ => break,
        }
    }
    if cursor.eat(TokenKind::If) {
        let condition = parse_expr(cursor, 0, error)?;
        if !cursor.eat(TokenKind::Else) {
            return fail(error, "expected 'ELSE' in a conditional expression");
        }
        let else_branch = parse_expr(cursor, 0, error)?;
        atom = Node::operator(OperatorKind::IfElse, vec![condition, atom, else_branch]);
    }
    Some(atom)
}

fn parse_atom(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Node> {
    match cursor.advance() {
        Some(ParseToken::Int(value)) => Some(Node::int(*value)),
        Some(ParseToken::Float(value)) => Some(Node::float(*value)),
        Some(ParseToken::Str(text)) => Some(Node::string(text.clone())),
        Some(ParseToken::Keyword(TokenKind::True)) => Some(Node::bool(true)),
        Some(ParseToken::Keyword(TokenKind::False)) => Some(Node::bool(false)),
        Some(ParseToken::Keyword(TokenKind::Infinity)) => Some(Node::float(f64::INFINITY)),
        Some(ParseToken::Keyword(TokenKind::Nan)) => Some(Node::float(f64::NAN)),
        Some(ParseToken::Keyword(TokenKind::LParen)) => {
            let inner = parse_expr(cursor, 0, error)?;
            if !cursor.eat(TokenKind::RParen) {
                return fail(error, "expected ')' to close a parenthesized expression");
            }
            Some(inner)
        }
        Some(ParseToken::Identifier(name)) => {
            let name = name.clone();
            if cursor.eat(TokenKind::LParen) {
                let args = parse_call_args(cursor, error)?;
                Some(Node::call(Symbol::intern(&name), args))
            } else {
                Some(Node::parameter(Symbol::intern(&name)))
            }
        }
        _ => fail(error, "expected a value in expression"),
    }
}

/// Parses a call's parenthesized, comma-separated argument list; the
/// opening `(` has already been consumed. Returns the sibling-chain
/// head, or `None` for a zero-argument call.
fn parse_call_args(cursor: &mut Cursor<'_>, error: &mut Option<String>) -> Option<Option<Node>> {
    if cursor.eat(TokenKind::RParen) {
        return Some(None);
    }
    let mut head = parse_expr(cursor, 0, error)?;
    while cursor.eat(TokenKind::Comma) {
        let next = parse_expr(cursor, 0, error)?;
        head = head.add_next(next);
    }
    if !cursor.eat(TokenKind::RParen) {
        return fail(error, "expected ')' to close a function call");
    }
    Some(Some(head))
}

fn fail<T>(error: &mut Option<String>, message: &str) -> Option<T> {
    if error.is_none() {
        *error = Some(message.to_string());
    }
    None
}
