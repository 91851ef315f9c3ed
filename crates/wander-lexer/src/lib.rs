//! Wander lexers: convert source text into token streams.
//!
//! [`tokenize`] handles the scripting language; [`lig::tokenize`] handles
//! the triple-literal format. Both are built from `wander-combinators`.

pub mod lexer;
pub mod lig;
mod nibblers;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use nibblers::{is_name_char, unescape};
pub use token::{LigToken, LigTokenKind, Token, TokenKind, KEYWORDS};
