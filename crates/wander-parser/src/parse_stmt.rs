//! Element and let-statement parsing.

use wander_combinators::{take_first, Cursor, Nibbler};
use wander_lexer::{Token, TokenKind};
use wander_types::{Element, LetStatement};

use crate::parse_expr::expression;
use crate::parser::{content, expect, single, token};

/// `element = expression | let-statement`
pub(crate) fn element(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    take_first((expression, let_statement)).nibble(cursor)
}

/// `"let" name "=" expression`
fn let_statement(cursor: &mut Cursor<Token>) -> Option<Vec<Element>> {
    cursor.attempt(&token(TokenKind::Let))?;
    let name = match content(cursor, TokenKind::Name) {
        Some(name) => name,
        None => {
            cursor.expect(TokenKind::Name.as_str());
            return None;
        }
    };
    cursor.attempt(&expect(TokenKind::Equals))?;
    let value = single(cursor, expression)?;
    Some(vec![Element::LetStatement(LetStatement {
        name,
        value: Box::new(value),
    })])
}
