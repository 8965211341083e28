//! A push-driven parser for extended G-code, consuming the token
//! stream from [`gcode_lexer::Lexer`] and delivering one AST per
//! statement through a caller-supplied [`StatementSink`].
//!
//! Where the source uses a generated LALR(1) state/value stack, this
//! buffers one statement's tokens at a time and reduces them with a
//! recursive-descent, Pratt-precedence expression parser (see
//! [`expr`]) — a substitution the grammar's own design notes sanction
//! as long as the grammar, precedences, and error-recovery semantics
//! match.

mod expr;
mod reduce;
mod token;

pub use token::ParseToken;

use gcode_ast::Node;
use gcode_lexer::{Lexer, LexerSink, TokenKind};

use reduce::reduce_statement;
use token::ParseToken as PT;

/// Callback surface the parser drives as statements complete.
///
/// Mirrors the source's `error_fn`/`statement_fn` pair passed to
/// `parser_new`. Both return `bool` for symmetry with [`LexerSink`],
/// though nothing in this workspace currently asks the parser to stop
/// early on a sink's refusal beyond what it does by default (continue
/// to the next statement).
pub trait StatementSink {
    /// A lexical or syntactic error was detected; `message` is already
    /// formatted. No statement node is delivered for the line it
    /// occurred on.
    fn error(&mut self, message: &str) -> bool;

    /// One statement's completed AST, ready for the node library's
    /// caller to consume (and eventually delete).
    fn statement(&mut self, node: Node) -> bool;
}

/// An incremental, push-driven G-code parser.
///
/// Owns a [`Lexer`] plus the per-statement token buffer that
/// accumulates as the lexer's sink methods fire. Split into two
/// fields rather than implementing `LexerSink` on `Parser` itself: the
/// lexer's `scan` needs `&mut self` and a separate `&mut dyn
/// LexerSink` at the same time, which a single self-referential impl
/// can't express under the borrow checker.
pub struct Parser<S> {
    lexer: Lexer,
    inner: Inner<S>,
}

impl<S: StatementSink> Parser<S> {
    pub fn new(sink: S) -> Self {
        Self {
            lexer: Lexer::new(),
            inner: Inner {
                sink,
                tokens: Vec::new(),
            },
        }
    }

    /// Forwards to [`Lexer::scan`]; statements complete and reach the
    /// sink synchronously as their terminating newline is consumed.
    pub fn parse(&mut self, buf: &[u8]) {
        self.lexer.scan(buf, &mut self.inner);
    }

    /// Forwards to [`Lexer::finish`], flushing a trailing statement
    /// with no terminating newline.
    pub fn finish(&mut self) {
        self.lexer.finish(&mut self.inner);
    }

    /// Returns the parser to its initial state, discarding any
    /// statement in progress.
    pub fn reset(&mut self) {
        self.lexer.reset();
        self.inner.tokens.clear();
    }

    /// Consumes the parser, handing back the sink.
    pub fn into_sink(self) -> S {
        self.inner.sink
    }
}

/// The `LexerSink` half of [`Parser`]; see its doc comment for why
/// this lives in a separate struct instead of on `Parser` directly.
struct Inner<S> {
    sink: S,
    tokens: Vec<ParseToken>,
}

impl<S: StatementSink> LexerSink for Inner<S> {
    fn lex_error(&mut self, message: &str) -> bool {
        self.tokens.clear();
        self.sink.error(message);
        true
    }

    fn lex_keyword(&mut self, kind: TokenKind) -> bool {
        self.tokens.push(PT::Keyword(kind));
        true
    }

    fn lex_identifier(&mut self, name: &str) -> bool {
        self.tokens.push(PT::Identifier(name.to_string()));
        true
    }

    fn lex_str_literal(&mut self, text: &str) -> bool {
        self.tokens.push(PT::Str(text.to_string()));
        true
    }

    fn lex_int_literal(&mut self, value: i64) -> bool {
        self.tokens.push(PT::Int(value));
        true
    }

    fn lex_float_literal(&mut self, value: f64) -> bool {
        self.tokens.push(PT::Float(value));
        true
    }

    fn lex_bridge(&mut self) -> bool {
        self.tokens.push(PT::Bridge);
        true
    }

    fn lex_end_statement(&mut self) -> bool {
        let tokens = std::mem::take(&mut self.tokens);
        if tokens.is_empty() {
            // An empty line: a no-op per the grammar, not an error.
            return true;
        }
        match reduce_statement(&tokens) {
            Ok(Some(node)) => self.sink.statement(node),
            Ok(None) => true,
            Err(message) => self.sink.error(&message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcode_ast::{siblings, NodeKind, OperatorKind};

    #[derive(Default)]
    struct Collect {
        statements: Vec<Node>,
        errors: Vec<String>,
    }

    impl StatementSink for Collect {
        fn error(&mut self, message: &str) -> bool {
            self.errors.push(message.to_string());
            true
        }

        fn statement(&mut self, node: Node) -> bool {
            self.statements.push(node);
            true
        }
    }

    fn parse(src: &str) -> Collect {
        let mut parser = Parser::new(Collect::default());
        parser.parse(src.as_bytes());
        parser.finish();
        parser.into_sink()
    }

    fn fields_of(node: &Node) -> Vec<&Node> {
        match &node.kind {
            NodeKind::Statement { fields } => siblings(fields.as_ref().unwrap()).collect(),
            other => panic!("expected a statement, got {other:?}"),
        }
    }

    #[test]
    fn traditional_key_and_expr_value_concat_without_a_bridge() {
        let out = parse("G1 X{1+2}\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        assert_eq!(out.statements.len(), 1);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 2);
        match &fields[1].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => {
                assert_eq!(children[0].kind, NodeKind::Str("X".to_string()));
                match &children[1].kind {
                    NodeKind::Operator {
                        kind: OperatorKind::Add,
                        children,
                    } => {
                        assert_eq!(children[0].kind, NodeKind::Int(1));
                        assert_eq!(children[1].kind, NodeKind::Int(2));
                    }
                    other => panic!("expected an add, got {other:?}"),
                }
            }
            other => panic!("expected a concat, got {other:?}"),
        }
    }

    #[test]
    fn traditional_mode_chains_multiple_keys() {
        let out = parse("G1 X10 Y20\n");
        assert!(out.errors.is_empty());
        let fields = fields_of(&out.statements[0]);
        // command name, X-field, Y-field
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn extended_mode_parses_unquoted_value_as_a_string() {
        // Unquoted argument values never lex as numbers — only `{ ... }`
        // expression content does — so `SPEED=0.5` reduces to a string
        // value, not a float.
        let out = parse("SET_FAN_SPEED FAN=f1 SPEED=0.5\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 3);
        match &fields[2].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => {
                assert_eq!(children[0].kind, NodeKind::Str("SPEED".to_string()));
                assert_eq!(children[1].kind, NodeKind::Str("0.5".to_string()));
            }
            other => panic!("expected a concat, got {other:?}"),
        }
    }

    #[test]
    fn raw_mode_keeps_semicolons_in_the_value() {
        let out = parse("M117 hi;there\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].kind, NodeKind::Str("hi;there".to_string()));
    }

    #[test]
    fn unary_minus_binds_tighter_than_power() {
        let out = parse("TEST VAL={-2**2}\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        let value = match &fields[1].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => &children[1],
            other => panic!("expected a concat, got {other:?}"),
        };
        match &value.kind {
            NodeKind::Operator {
                kind: OperatorKind::Power,
                children,
            } => {
                assert!(matches!(
                    children[0].kind,
                    NodeKind::Operator {
                        kind: OperatorKind::Negate,
                        ..
                    }
                ));
                assert_eq!(children[1].kind, NodeKind::Int(2));
            }
            other => panic!("expected power at the top, got {other:?}"),
        }
    }

    #[test]
    fn not_binds_looser_than_relational_but_tighter_than_and() {
        // `NOT` has no word-form spelling in the keyword table (only
        // the generated source's gperf table confirms this): `!` is
        // the only way to spell this prefix operator.
        let out = parse("TEST VAL={!a = b AND c}\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        let value = match &fields[1].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => &children[1],
            other => panic!("expected a concat, got {other:?}"),
        };
        match &value.kind {
            NodeKind::Operator {
                kind: OperatorKind::And,
                children,
            } => match &children[0].kind {
                NodeKind::Operator {
                    kind: OperatorKind::Not,
                    children,
                } => assert!(matches!(
                    children[0].kind,
                    NodeKind::Operator {
                        kind: OperatorKind::Equals,
                        ..
                    }
                )),
                other => panic!("expected not at the left of and, got {other:?}"),
            },
            other => panic!("expected and at the top, got {other:?}"),
        }
    }

    #[test]
    fn ternary_wraps_tighter_than_the_surrounding_concat_operand() {
        let out = parse("TEST VAL={1 IF cond ELSE 2}\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        let value = match &fields[1].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => &children[1],
            other => panic!("expected a concat, got {other:?}"),
        };
        match &value.kind {
            NodeKind::Operator {
                kind: OperatorKind::IfElse,
                children,
            } => {
                assert!(matches!(children[0].kind, NodeKind::Parameter(_)));
                assert_eq!(children[1].kind, NodeKind::Int(1));
                assert_eq!(children[2].kind, NodeKind::Int(2));
            }
            other => panic!("expected an if/else, got {other:?}"),
        }
    }

    #[test]
    fn dot_and_bracket_lookup_and_function_call() {
        let out = parse("TEST A={a.b} B={a[1]} C={f(1,2)}\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 4);
        for field in &fields[1..] {
            match &field.kind {
                NodeKind::Operator {
                    kind: OperatorKind::Concat,
                    ..
                } => {}
                other => panic!("expected a concat, got {other:?}"),
            }
        }
    }

    #[test]
    fn unterminated_string_reports_an_error_and_no_statement() {
        let out = parse("M104 S\"hot\n");
        assert_eq!(out.statements.len(), 0);
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn empty_line_is_a_no_op() {
        let out = parse("\n");
        assert!(out.statements.is_empty());
        assert!(out.errors.is_empty());
    }

    #[test]
    fn comment_only_line_is_a_no_op() {
        let out = parse("; just a comment\nG28\n");
        assert_eq!(out.statements.len(), 1);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0].kind,
            NodeKind::Parameter(gcode_util::Symbol::intern("G28"))
        );
    }

    #[test]
    fn extended_key_bridged_straight_into_an_expression_extends_the_key() {
        let out = parse("SET_FAN_SPEED FAN{1}=f1\n");
        assert!(out.errors.is_empty(), "{:?}", out.errors);
        let fields = fields_of(&out.statements[0]);
        assert_eq!(fields.len(), 2);
        match &fields[1].kind {
            NodeKind::Operator {
                kind: OperatorKind::Concat,
                children,
            } => {
                assert_eq!(children[1].kind, NodeKind::Str("f1".to_string()));
                match &children[0].kind {
                    NodeKind::Operator {
                        kind: OperatorKind::Concat,
                        children: key_children,
                    } => {
                        assert_eq!(key_children[0].kind, NodeKind::Str("FAN".to_string()));
                        assert_eq!(key_children[1].kind, NodeKind::Int(1));
                    }
                    other => panic!("expected the key to be a concat, got {other:?}"),
                }
            }
            other => panic!("expected a concat, got {other:?}"),
        }
    }

    #[test]
    fn extended_key_without_equals_is_a_structural_error() {
        let out = parse("SET_FAN_SPEED FAN\n");
        assert_eq!(out.statements.len(), 0);
        assert_eq!(out.errors.len(), 1);
    }
}
