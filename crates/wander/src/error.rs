use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use wander_types::{EvalError, ParseError, SourceFile, TokenizeError};

/// Failure of any pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "stage", content = "error", rename_all = "lowercase")]
pub enum WanderError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl WanderError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Tokenize(_) => Stage::Tokenize,
            Self::Parse(_) => Stage::Parse,
            Self::Eval(_) => Stage::Eval,
        }
    }
}

/// Pipeline stage, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Tokenize,
    Parse,
    Eval,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tokenize => write!(f, "tokenize"),
            Self::Parse => write!(f, "parse"),
            Self::Eval => write!(f, "eval"),
        }
    }
}

/// A [`WanderError`] resolved against its source text for reporting.
///
/// Evaluation errors carry no source position, so `line`, `column` and
/// `source_line` are only present for tokenize and parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source file name.
    pub file: String,
    pub stage: Stage,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    /// The source line containing the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl Diagnostic {
    pub fn new(error: &WanderError, file: &SourceFile) -> Self {
        let location = match error {
            WanderError::Tokenize(e) => Some((e.line, e.column)),
            WanderError::Parse(e) => {
                let offset = match e.span {
                    Some(span) => span.start,
                    None => file.source.chars().count(),
                };
                Some(file.location(offset))
            }
            WanderError::Eval(_) => None,
        };
        Self {
            file: file.name.clone(),
            stage: error.stage(),
            message: error.to_string(),
            line: location.map(|(line, _)| line),
            column: location.map(|(_, column)| column),
            source_line: location.and_then(|(line, _)| file.line(line).map(str::to_string)),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(
                f,
                "{}:{}:{}: {} error: {}",
                self.file, line, column, self.stage, self.message
            ),
            _ => write!(f, "{}: {} error: {}", self.file, self.stage, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wander_types::Span;

    #[test]
    fn test_tokenize_diagnostic() {
        let file = SourceFile::new("t.wander", "let x = 1\nlet y = @");
        let error = WanderError::from(TokenizeError {
            offset: 18,
            line: 2,
            column: 9,
        });
        let diagnostic = Diagnostic::new(&error, &file);
        assert_eq!(diagnostic.stage, Stage::Tokenize);
        assert_eq!(diagnostic.line, Some(2));
        assert_eq!(diagnostic.column, Some(9));
        assert_eq!(diagnostic.source_line.as_deref(), Some("let y = @"));
        assert_eq!(
            diagnostic.to_string(),
            "t.wander:2:9: tokenize error: could not tokenize input at 2:9"
        );
    }

    #[test]
    fn test_parse_diagnostic_uses_token_span() {
        let file = SourceFile::new("p.wander", "(a b) { a }");
        let error = WanderError::from(ParseError {
            position: 4,
            span: Some(Span::new(6, 7)),
            expected: vec!["`->`".into()],
            nesting_limit: None,
        });
        let diagnostic = Diagnostic::new(&error, &file);
        assert_eq!((diagnostic.line, diagnostic.column), (Some(1), Some(7)));
    }

    #[test]
    fn test_parse_diagnostic_at_end_of_input() {
        let file = SourceFile::new("p.wander", "let x =");
        let error = WanderError::from(ParseError {
            position: 3,
            span: None,
            expected: vec!["expression".into()],
            nesting_limit: None,
        });
        let diagnostic = Diagnostic::new(&error, &file);
        assert_eq!((diagnostic.line, diagnostic.column), (Some(1), Some(8)));
    }

    #[test]
    fn test_eval_diagnostic_has_no_location() {
        let file = SourceFile::new("e.wander", "y");
        let error = WanderError::from(EvalError::undefined("y"));
        let diagnostic = Diagnostic::new(&error, &file);
        assert_eq!(diagnostic.line, None);
        assert_eq!(diagnostic.source_line, None);
        assert_eq!(diagnostic.to_string(), "e.wander: eval error: undefined variable: y");
    }

    #[test]
    fn test_error_json_names_stage() {
        let error = WanderError::from(EvalError::EnsureFailed);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["stage"], "eval");
        assert_eq!(json["error"]["kind"], "ensure_failed");
    }
}
