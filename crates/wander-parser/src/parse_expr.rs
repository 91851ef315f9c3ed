//! Expression parsing.
//!
//! Alternatives are tried in a fixed order and the first match wins:
//! if-expression, function call, name, scope, identifier, function
//! definition, string, integer, boolean, seq. A call must be tried before a
//! bare name since both start with a name token.
//!
//! Every expression is one nesting level; input nested deeper than
//! [`MAX_NESTING_DEPTH`] does not parse.

use wander_combinators::{
    between, label, nested, optional, repeat, take_all, take_first, Cursor, Nibbler, NibblerExt,
};
use wander_lexer::{unescape, Token, TokenKind};
use wander_types::{Conditional, Element, FunctionCall, Identifier, IfExpression, Lambda};

use crate::parse_stmt::element;
use crate::parser::{content, expect, literal, single, token};

/// Maximum number of expressions that may enclose one another.
pub const MAX_NESTING_DEPTH: usize = 64;

/// `expression`
pub(crate) fn expression(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    nested(
        MAX_NESTING_DEPTH,
        label(
            "expression",
            take_first((
                if_expression,
                function_call,
                name,
                scope,
                identifier,
                function_definition,
                string,
                integer,
                boolean,
                seq,
            )),
        ),
    )
    .nibble(cursor)
}

// ── Literals ──────────────────────────────────────────────────────────────────

fn name(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    literal(TokenKind::Name, |text| Some(Element::Name(text.to_string()))).nibble(cursor)
}

fn identifier(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    literal(TokenKind::Identifier, |text| {
        Identifier::new(text).ok().map(Element::IdentifierLiteral)
    })
    .nibble(cursor)
}

fn string(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    literal(TokenKind::String, |text| Some(Element::StringLiteral(unescape(text)))).nibble(cursor)
}

/// Integers outside the `i64` range do not parse.
fn integer(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    literal(TokenKind::Integer, |text| {
        text.parse().ok().map(Element::IntegerLiteral)
    })
    .nibble(cursor)
}

fn boolean(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    literal(TokenKind::Boolean, |text| Some(Element::BooleanLiteral(text == "true"))).nibble(cursor)
}

// ── Compound expressions ──────────────────────────────────────────────────────

/// `name "(" (expression ","?)* ")"`
fn function_call(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    let name = content(cursor, TokenKind::Name)?;
    cursor.attempt(&token(TokenKind::OpenParen))?;
    let arguments = cursor.attempt(&repeat(take_all((
        expression,
        optional(token(TokenKind::Comma)),
    ))))?;
    cursor.attempt(&expect(TokenKind::CloseParen))?;
    Some(vec![Element::FunctionCall(FunctionCall { name, arguments })])
}

/// `"{" element* "}"`, producing the block's elements.
pub(crate) fn scope_body(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    between(
        token(TokenKind::OpenBrace),
        repeat(element),
        expect(TokenKind::CloseBrace),
    )
    .nibble(cursor)
}

fn scope(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    scope_body
        .map(|body: Vec<Element>| vec![Element::Scope(body)])
        .nibble(cursor)
}

fn parameter(cursor: &mut Cursor<Token>) -> Option<Vec<String>> {
    content(cursor, TokenKind::Name).map(|name| vec![name])
}

/// `"(" name* ")" "->" scope`
fn function_definition(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    cursor.attempt(&token(TokenKind::OpenParen))?;
    let parameters = cursor.attempt(&repeat(parameter))?;
    cursor.attempt(&expect(TokenKind::CloseParen))?;
    cursor.attempt(&expect(TokenKind::Arrow))?;
    let body = cursor.attempt(&label("scope", scope_body))?;
    Some(vec![Element::Lambda(Lambda { parameters, body })])
}

/// `"[" (expression ("," expression)*)? "]"`
fn seq(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    let items = between(
        token(TokenKind::OpenSquare),
        optional(take_all((
            expression,
            repeat(take_all((token(TokenKind::Comma), expression))),
        ))),
        expect(TokenKind::CloseSquare),
    )
    .nibble(cursor)?;
    Some(vec![Element::Seq(items)])
}

// ── Conditionals ──────────────────────────────────────────────────────────────

/// A condition expression followed by a body expression.
fn conditional(cursor: &mut Cursor<Token>) -> Option<Vec<Conditional>> {
    let condition = single(cursor, expression)?;
    let body = single(cursor, expression)?;
    Some(vec![Conditional { condition, body }])
}

/// `"else" "if" conditional`
fn else_if(cursor: &mut Cursor<Token>) -> Option<Vec<Conditional>> {
    cursor.attempt(&token(TokenKind::Else))?;
    cursor.attempt(&token(TokenKind::If))?;
    cursor.attempt(&conditional)
}

/// `"else" expression`
fn else_branch(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    cursor.attempt(&token(TokenKind::Else))?;
    cursor.attempt(&expression)
}

/// `"if" conditional else-if* else-branch?`
fn if_expression(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    cursor.attempt(&token(TokenKind::If))?;
    let if_conditional = cursor.attempt(&conditional)?.into_iter().next()?;
    let else_ifs = cursor.attempt(&repeat(else_if))?;
    let else_body = single(cursor, optional(else_branch)).map(Box::new);
    Some(vec![Element::IfExpression(IfExpression {
        if_conditional: Box::new(if_conditional),
        else_ifs,
        else_body,
    })])
}
