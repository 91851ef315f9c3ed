//! The Wander script lexer: source text to a flat token stream.
//!
//! Recognizers are tried in a fixed order at each position and the first
//! match wins. Comments, whitespace and newlines are kept in the stream;
//! the parser filters them out. Lexing fails on the first position no
//! recognizer matches and never skips input.

use wander_types::TokenizeError;

use crate::nibblers::{
    boxed, comment, identifier, integer, keyword, name, newline, string, tokenize_with,
    whitespace, Recognizer,
};
use crate::token::{Token, TokenKind, KEYWORDS};
use wander_combinators::{take, take_string};

/// The Wander script lexer.
///
/// Holds the ordered recognizer table, built once in [`Lexer::new`] and
/// reused for every call to [`Lexer::tokenize`].
pub struct Lexer {
    recognizers: Vec<(TokenKind, Recognizer)>,
}

impl Lexer {
    pub fn new() -> Self {
        let mut recognizers = vec![
            (TokenKind::Comment, boxed(comment())),
            (TokenKind::NewLine, boxed(newline())),
            (TokenKind::Spaces, boxed(whitespace())),
            (TokenKind::Arrow, boxed(take_string("->"))),
        ];
        // Keywords before `name`, which would also match their spelling.
        recognizers.extend(
            KEYWORDS
                .iter()
                .map(|&(word, kind)| (kind, boxed(keyword(word)))),
        );
        recognizers.extend([
            (TokenKind::Identifier, boxed(identifier())),
            (TokenKind::Integer, boxed(integer())),
            (TokenKind::String, boxed(string())),
            (TokenKind::Name, boxed(name())),
            (TokenKind::OpenBrace, boxed(take('{'))),
            (TokenKind::CloseBrace, boxed(take('}'))),
            (TokenKind::OpenParen, boxed(take('('))),
            (TokenKind::CloseParen, boxed(take(')'))),
            (TokenKind::OpenSquare, boxed(take('['))),
            (TokenKind::CloseSquare, boxed(take(']'))),
            (TokenKind::Comma, boxed(take(','))),
            (TokenKind::Colon, boxed(take(':'))),
            (TokenKind::Equals, boxed(take('='))),
        ]);
        Self { recognizers }
    }

    /// Tokenize `source` completely, or report where lexing stopped.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, TokenizeError> {
        tokenize_with(&self.recognizers, source)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize a Wander script with a fresh [`Lexer`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new().tokenize(source)
}
