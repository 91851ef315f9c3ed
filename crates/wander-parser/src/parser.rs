//! Core parser infrastructure: entry point, token recognizers, error reporting.
//!
//! Grammar productions are plain functions over a `Cursor<Token>` producing
//! `Element`s. A production may leave the cursor mid-way when it fails; it is
//! only ever invoked through `Cursor::attempt` or a combinator, which restore
//! the position.

use wander_combinators::{label, repeat, take_cond, Cursor, Nibbler, NibblerExt};
use wander_lexer::{Token, TokenKind};
use wander_types::{Element, ParseError, Script};

use crate::parse_stmt::element;

/// Parse a token stream into a [`Script`].
///
/// Comment, whitespace and newline tokens are dropped first. The remaining
/// tokens must all be consumed; otherwise the error reports the furthest
/// token reached and what the grammar expected there, or that the script
/// nests deeper than [`MAX_NESTING_DEPTH`](crate::MAX_NESTING_DEPTH).
pub fn parse(tokens: Vec<Token>) -> Result<Script, ParseError> {
    let significant: Vec<Token> = tokens.into_iter().filter(|t| !t.is_trivia()).collect();
    let mut cursor = Cursor::new(significant);
    let elements = cursor.attempt(&repeat(element)).unwrap_or_default();
    if cursor.is_complete() {
        return Ok(Script { elements });
    }
    let position = cursor.furthest();
    if let Some(too_deep) = cursor.too_deep().filter(|t| t.offset >= position) {
        let span = cursor.input().get(too_deep.offset).map(|t| t.span);
        return Err(ParseError::too_deep(too_deep.offset, span, too_deep.limit));
    }
    Err(ParseError {
        position,
        span: cursor.input().get(position).map(|t| t.span),
        expected: cursor.expected().into_iter().map(String::from).collect(),
        nesting_limit: None,
    })
}

// ── Token recognizers ─────────────────────────────────────────────────────────

/// Match one token of `kind`, producing nothing.
pub(crate) fn token(kind: TokenKind) -> impl Fn(&mut Cursor<Token>) -> Option<Vec<Element>> {
    take_cond(move |t: &Token| t.kind == kind).ignore()
}

/// Like [`token`], but records `kind` as expected when it does not match.
pub(crate) fn expect(kind: TokenKind) -> impl Fn(&mut Cursor<Token>) -> Option<Vec<Element>> {
    label(kind.as_str(), token(kind))
}

/// Match one token of `kind` and convert its content into an element.
///
/// Fails without consuming when `build` rejects the content.
pub(crate) fn literal<F>(kind: TokenKind, build: F) -> impl Fn(&mut Cursor<Token>) -> Option<Vec<Element>>
where
    F: Fn(&str) -> Option<Element>,
{
    move |cursor: &mut Cursor<Token>| {
        let token = cursor.peek()?;
        if token.kind != kind {
            return None;
        }
        let element = build(&token.content)?;
        cursor.next();
        Some(vec![element])
    }
}

/// Consume one token of `kind` and return its content.
pub(crate) fn content(cursor: &mut Cursor<Token>, kind: TokenKind) -> Option<String> {
    match cursor.peek() {
        Some(token) if token.kind == kind => {
            let text = token.content.clone();
            cursor.next();
            Some(text)
        }
        _ => None,
    }
}

/// Run `production` and take its single produced element.
pub(crate) fn single<N>(cursor: &mut Cursor<Token>, production: N) -> Option<Element>
where
    N: Nibbler<Token, Element>,
{
    cursor.attempt(&production)?.into_iter().next()
}
