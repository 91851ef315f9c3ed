use crate::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier text outside the allowed `<...>` character class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier: <{0}>")]
pub struct InvalidIdentifier(pub String);

/// No token recognizer matched at a position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("could not tokenize input at {line}:{column}")]
pub struct TokenizeError {
    /// Character offset of the first unmatched character.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: u32,
    /// 1-based column of `offset`.
    pub column: u32,
}

/// The filtered token stream does not reduce to a complete script.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("could not parse script at token {position}{}", detail(.expected, .nesting_limit))]
pub struct ParseError {
    /// Index of the furthest token reached (after whitespace filtering).
    pub position: usize,
    /// Source span of that token, if the stream did not end first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Grammar alternatives that were attempted at `position`.
    pub expected: Vec<String>,
    /// Set when the script nests deeper than the parser allows.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nesting_limit: Option<usize>,
}

impl ParseError {
    /// The script nests more than `limit` expressions deep at `position`.
    pub fn too_deep(position: usize, span: Option<Span>, limit: usize) -> Self {
        Self {
            position,
            span,
            expected: Vec::new(),
            nesting_limit: Some(limit),
        }
    }
}

fn detail(expected: &[String], nesting_limit: &Option<usize>) -> String {
    if let Some(limit) = nesting_limit {
        format!(", maximum nesting depth is {limit}")
    } else if expected.is_empty() {
        String::new()
    } else {
        format!(", expected one of: {}", expected.join(", "))
    }
}

/// Evaluation error raised by the evaluator or a native function.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalError {
    /// A name was not bound in any frame.
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },

    /// A call targeted something that is not a function.
    #[error("`{name}` is not a function, found {found}")]
    NotCallable { name: String, found: String },

    /// Wrong number of arguments for a function.
    #[error("function `{function}` expects {expected} argument(s), got {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    /// A native function read an argument of the wrong kind.
    #[error("function `{function}` requires {expected} for `{parameter}`, got {found}")]
    WrongArgumentKind {
        function: String,
        parameter: String,
        expected: String,
        found: String,
    },

    /// An `if` condition evaluated to something other than a Boolean.
    #[error("condition must be a Boolean, got {found}")]
    NonBooleanCondition { found: String },

    /// A Seq could not be converted into a statement.
    #[error("invalid statement: {reason}")]
    InvalidStatement { reason: String },

    /// `ensure` received `false` or a non-Boolean.
    #[error("ensure failed")]
    EnsureFailed,

    /// The configured evaluation budget ran out.
    #[error("step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    /// More function calls were active at once than the bindings allow.
    #[error("maximum call depth is {limit}")]
    CallDepthExceeded { limit: usize },

    /// Free-form failure reported by a host-supplied native function.
    #[error("{message}")]
    Native { message: String },
}

impl EvalError {
    pub fn undefined(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into() }
    }

    pub fn wrong_kind(
        function: impl Into<String>,
        parameter: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::WrongArgumentKind {
            function: function.into(),
            parameter: parameter.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_statement(reason: impl Into<String>) -> Self {
        Self::InvalidStatement {
            reason: reason.into(),
        }
    }

    pub fn native(message: impl Into<String>) -> Self {
        Self::Native {
            message: message.into(),
        }
    }
}

/// Result alias for evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
