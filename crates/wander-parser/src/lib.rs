//! Wander parser: converts a token stream into a [`Script`](wander_types::Script).

mod parse_expr;
mod parse_stmt;
mod parser;

pub use parse_expr::MAX_NESTING_DEPTH;
pub use parser::parse;
