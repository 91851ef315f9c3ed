//! Character-level recognizers shared by the script and triple-literal lexers.

use wander_combinators::{
    between, not_followed_by, optional, repeat, take, take_all, take_characters, take_cond,
    take_first, take_string, take_while, Cursor, Nibbler,
};
use wander_types::{is_identifier_char, SourceFile, Span, TokenizeError};

use crate::token::Token;

/// A boxed character recognizer, stored in a lexer's ordered table.
pub(crate) type Recognizer = Box<dyn Nibbler<char, char>>;

pub(crate) fn boxed<N: Nibbler<char, char> + 'static>(nibbler: N) -> Recognizer {
    Box::new(nibbler)
}

/// Returns `true` for characters that may continue a name.
pub fn is_name_char(c: &char) -> bool {
    c.is_ascii_alphanumeric() || *c == '_'
}

pub(crate) fn whitespace() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_characters(&[' ', '\t'])
}

pub(crate) fn newline() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_first((take('\n'), take_string("\r\n")))
}

pub(crate) fn comment() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_all((
        take_string("--"),
        repeat(take_cond(|c: &char| !matches!(*c, '\n' | '\r'))),
    ))
}

/// A reserved word, only when not immediately followed by a name character.
pub(crate) fn keyword(word: &'static str) -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_all((take_string(word), not_followed_by(take_cond(is_name_char))))
}

pub(crate) fn name() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_all((
        take_cond(|c: &char| c.is_ascii_alphabetic() || *c == '_'),
        repeat(take_cond(is_name_char)),
    ))
}

/// `<...>`, producing the text between the brackets.
pub(crate) fn identifier() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    between(
        take('<'),
        take_while(|c: &char| is_identifier_char(*c)),
        take('>'),
    )
}

pub(crate) fn integer() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_all((
        optional(take('-')),
        take_while(|c: &char| c.is_ascii_digit()),
    ))
}

pub(crate) fn bytes() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_all((
        take_string("0x"),
        take_while(|c: &char| c.is_ascii_hexdigit()),
    ))
}

fn hex_digit() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_cond(|c: &char| c.is_ascii_hexdigit())
}

/// String body: unescaped characters outside 0x00-0x1F, `"` and `\`,
/// or one of the escapes `\\ \" \/ \b \f \n \r \t \uXXXX`.
pub(crate) fn string_content() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    let plain = take_cond(|c: &char| !matches!(*c, '"' | '\\') && u32::from(*c) > 0x1F);
    let escape = take_all((
        take('\\'),
        take_first((
            take_cond(|c: &char| matches!(*c, '\\' | '"' | '/' | 'b' | 'f' | 'n' | 'r' | 't')),
            take_all((take('u'), hex_digit(), hex_digit(), hex_digit(), hex_digit())),
        )),
    ));
    repeat(take_first((plain, escape)))
}

/// `"..."`, producing the still-escaped text between the quotes.
pub(crate) fn string() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    between(take('"'), string_content(), take('"'))
}

/// Apply an ordered recognizer table until the input is exhausted.
///
/// Fails with the position of the first character no recognizer matches.
pub(crate) fn tokenize_with<K: Copy>(
    recognizers: &[(K, Recognizer)],
    source: &str,
) -> Result<Vec<Token<K>>, TokenizeError> {
    let mut cursor = Cursor::from(source);
    let mut tokens = Vec::new();
    while !cursor.is_complete() {
        let start = cursor.offset();
        let matched = recognizers.iter().find_map(|(kind, recognizer)| {
            cursor
                .attempt(recognizer.as_ref())
                .map(|chars| (*kind, chars))
        });
        match matched {
            Some((kind, chars)) if cursor.offset() > start => {
                let content: String = chars.into_iter().collect();
                tokens.push(Token::new(kind, content, Span::new(start, cursor.offset())));
            }
            _ => return Err(error_at(source, start)),
        }
    }
    Ok(tokens)
}

fn error_at(source: &str, offset: usize) -> TokenizeError {
    let (line, column) = SourceFile::new("", source).location(offset);
    TokenizeError {
        offset,
        line,
        column,
    }
}

/// Decode the escapes of validated string-token content.
///
/// `\u` escapes naming a surrogate decode to U+FFFD.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
