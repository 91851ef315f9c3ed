//! Shared types for Wander.
//!
//! This crate defines the Element tree shared by parser and evaluator, the
//! triple-store value model, the scope chain, source spans and the error
//! types of every pipeline stage.

mod bindings;
mod error;
mod span;
pub mod ast;
pub mod graph;

pub use ast::{
    write, Conditional, Element, FunctionCall, IfExpression, Lambda, LetStatement, NativeBody,
    NativeFunction, Script,
};
pub use bindings::{Bindings, ScopeGuard, DEFAULT_CALL_LIMIT};
pub use error::{EvalError, EvalResult, InvalidIdentifier, ParseError, TokenizeError};
pub use graph::{is_identifier_char, Graph, Identifier, Statement, Value};
pub use span::{SourceFile, Span};
