//! Token types for the Wander lexers.
//!
//! Defines [`TokenKind`] covering every lexeme of the script grammar and
//! [`Token`], which pairs a kind with its text and source [`Span`]. The
//! triple-literal lexer reuses [`Token`] with its own kind enum.

use std::fmt;
use wander_types::Span;

/// Reserved words and the token each lexes to. A name spelled like one of
/// these is never a `Name` token.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("let", TokenKind::Let),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("true", TokenKind::Boolean),
    ("false", TokenKind::Boolean),
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token.
///
/// `content` is the matched text, except for bracketed identifiers and
/// strings where it is the text between the delimiters (strings are still
/// escaped; see [`crate::unescape`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K = TokenKind> {
    pub kind: K,
    pub content: String,
    pub span: Span,
}

impl<K> Token<K> {
    pub fn new(kind: K, content: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            content: content.into(),
            span,
        }
    }
}

impl Token<TokenKind> {
    /// Returns `true` for tokens the parser never sees.
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind of the Wander script language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ── Trivia ───────────────────────────────────────────────

    /// `-- text` up to the end of the line
    Comment,
    /// `\n` or `\r\n`
    NewLine,
    /// Run of spaces and tabs
    Spaces,

    // ── Keywords ─────────────────────────────────────────────

    Let,
    If,
    Else,
    /// `true` or `false`
    Boolean,

    // ── Literals ─────────────────────────────────────────────

    /// `<...>`
    Identifier,
    /// Optional `-` followed by digits
    Integer,
    /// `"..."`
    String,
    /// Bare variable or function name
    Name,

    // ── Punctuation ──────────────────────────────────────────

    /// `->`
    Arrow,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenSquare,
    /// `]`
    CloseSquare,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `=`
    Equals,
}

impl TokenKind {
    /// Returns `true` for comments, whitespace and newlines.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::NewLine | TokenKind::Spaces)
    }

    /// Short description used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::NewLine => "newline",
            TokenKind::Spaces => "whitespace",
            TokenKind::Let => "`let`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::Boolean => "boolean",
            TokenKind::Identifier => "identifier",
            TokenKind::Integer => "integer",
            TokenKind::String => "string",
            TokenKind::Name => "name",
            TokenKind::Arrow => "`->`",
            TokenKind::OpenBrace => "`{`",
            TokenKind::CloseBrace => "`}`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenSquare => "`[`",
            TokenKind::CloseSquare => "`]`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Equals => "`=`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds of the triple-literal format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LigTokenKind {
    /// `<...>`, content without the brackets
    Identifier,
    /// Run of spaces and tabs
    Spaces,
    /// `\n` or `\r\n`
    NewLine,
    /// `"..."`, content without the quotes
    String,
    /// `0x` followed by hex digits, content including the prefix
    Bytes,
    /// Optional `-` followed by digits
    Integer,
}

/// A token of the triple-literal format.
pub type LigToken = Token<LigTokenKind>;
