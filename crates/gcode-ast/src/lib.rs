//! The AST node library consumed by the parser.
//!
//! Nodes form trees linked two ways: a node owns its children (argument
//! lists, operator operands) and, separately, carries an intrusive
//! `next` pointer chaining it to its next *sibling* — the shape a
//! statement's top-level fields and a call's arguments both need.
//! [`add_next`] is the only way to grow a sibling chain; there is no
//! way to inspect or mutate a chain except by walking it front to back.

mod node;

pub use node::{add_next, siblings, Node, NodeError, NodeKind, OperatorKind};
