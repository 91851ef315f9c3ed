//! Tokenizer for the triple-literal text format.
//!
//! Only the lexical layer lives here: identifiers, integers, bytes and
//! strings separated by whitespace and newlines.

use wander_types::TokenizeError;

use crate::nibblers::{
    boxed, bytes, identifier, integer, newline, string, tokenize_with, whitespace, Recognizer,
};
use crate::token::{LigToken, LigTokenKind};

fn recognizers() -> Vec<(LigTokenKind, Recognizer)> {
    vec![
        (LigTokenKind::Identifier, boxed(identifier())),
        (LigTokenKind::Spaces, boxed(whitespace())),
        (LigTokenKind::NewLine, boxed(newline())),
        (LigTokenKind::String, boxed(string())),
        // `0x` must win over the integer `0`.
        (LigTokenKind::Bytes, boxed(bytes())),
        (LigTokenKind::Integer, boxed(integer())),
    ]
}

/// Tokenize triple-literal text completely, or report where lexing stopped.
pub fn tokenize(source: &str) -> Result<Vec<LigToken>, TokenizeError> {
    tokenize_with(&recognizers(), source)
}
