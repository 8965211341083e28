//! Shared plumbing for the gcode front-end: source positions, string
//! interning, and diagnostic reporting.
//!
//! Every crate in the workspace depends on this one for the types that
//! cross crate boundaries: [`Span`] for locations, [`Symbol`] for
//! cheaply-comparable interned strings, and [`Diagnostic`]/[`Handler`]
//! for structured error reporting.

mod span;
mod symbol;
mod diagnostic;

pub use span::{Position, Span};
pub use symbol::Symbol;
pub use diagnostic::{Diagnostic, Handler, Level};
