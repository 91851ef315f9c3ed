//! The [`Nibbler`] abstraction and its combinators.
//!
//! A nibbler looks at a [`Cursor`] and either consumes a prefix of the
//! remaining input, returning the values it produced, or reports no match
//! and leaves the cursor exactly where it found it.
//!
//! Combinators are ordinary values built once and reused; constructing a
//! grammar does not allocate per attempt.

use crate::cursor::Cursor;

/// A recognizer over input elements `I` producing results of type `O`.
pub trait Nibbler<I, O> {
    /// Try to consume a prefix of the remaining input.
    ///
    /// Implementations must not move the cursor when they return `None`.
    fn nibble(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>>;
}

impl<I, O, F> Nibbler<I, O> for F
where
    F: Fn(&mut Cursor<I>) -> Option<Vec<O>>,
{
    fn nibble(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>> {
        self(cursor)
    }
}

/// Adapters available on every nibbler.
pub trait NibblerExt<I, O>: Nibbler<I, O> + Sized {
    /// Transform the produced results of a successful match.
    fn map<P, F>(self, f: F) -> impl Fn(&mut Cursor<I>) -> Option<Vec<P>>
    where
        F: Fn(Vec<O>) -> Vec<P>,
    {
        move |cursor: &mut Cursor<I>| cursor.attempt(&self).map(&f)
    }

    /// Match, then discard whatever was produced.
    fn ignore<P>(self) -> impl Fn(&mut Cursor<I>) -> Option<Vec<P>> {
        move |cursor: &mut Cursor<I>| cursor.attempt(&self).map(|_| Vec::new())
    }
}

impl<I, O, N: Nibbler<I, O>> NibblerExt<I, O> for N {}

// ══════════════════════════════════════════════════════════════════════════════
// Single-element recognizers
// ══════════════════════════════════════════════════════════════════════════════

/// Match exactly one element equal to `expected`.
pub fn take<I>(expected: I) -> impl Fn(&mut Cursor<I>) -> Option<Vec<I>>
where
    I: PartialEq + Clone,
{
    take_cond(move |item: &I| *item == expected)
}

/// Match exactly one element satisfying `predicate`.
pub fn take_cond<I, P>(predicate: P) -> impl Fn(&mut Cursor<I>) -> Option<Vec<I>>
where
    I: Clone,
    P: Fn(&I) -> bool,
{
    move |cursor: &mut Cursor<I>| match cursor.peek() {
        Some(item) if predicate(item) => {
            let item = item.clone();
            cursor.next();
            Some(vec![item])
        }
        _ => None,
    }
}

/// Match one or more consecutive elements satisfying `predicate`.
pub fn take_while<I, P>(predicate: P) -> impl Fn(&mut Cursor<I>) -> Option<Vec<I>>
where
    I: Clone,
    P: Fn(&I) -> bool,
{
    move |cursor: &mut Cursor<I>| {
        let mut taken = Vec::new();
        while let Some(item) = cursor.peek() {
            if !predicate(item) {
                break;
            }
            taken.push(item.clone());
            cursor.next();
        }
        if taken.is_empty() {
            None
        } else {
            Some(taken)
        }
    }
}

/// Match the literal text `expected`, character by character.
pub fn take_string(expected: &'static str) -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    move |cursor: &mut Cursor<char>| {
        let start = cursor.offset();
        for ch in expected.chars() {
            if cursor.peek() != Some(&ch) {
                cursor.reset(start);
                return None;
            }
            cursor.next();
        }
        Some(expected.chars().collect())
    }
}

/// Match one or more characters drawn from `allowed`.
pub fn take_characters(
    allowed: &'static [char],
) -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
    take_while(move |ch: &char| allowed.contains(ch))
}

// ══════════════════════════════════════════════════════════════════════════════
// Composition
// ══════════════════════════════════════════════════════════════════════════════

/// A fixed group of nibblers that must all match, in order.
///
/// Implemented for tuples of up to sixteen nibblers with a common output.
pub trait Sequence<I, O> {
    fn nibble_all(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>>;
}

/// A fixed group of alternatives tried in order.
///
/// Implemented for tuples of up to sixteen nibblers with a common output.
pub trait Choice<I, O> {
    fn nibble_first(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>>;
}

macro_rules! impl_tuples {
    ($($name:ident),+) => {
        impl<I, O, $($name: Nibbler<I, O>),+> Sequence<I, O> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn nibble_all(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>> {
                let ($($name,)+) = self;
                let mut results = Vec::new();
                $( results.extend(cursor.attempt($name)?); )+
                Some(results)
            }
        }

        impl<I, O, $($name: Nibbler<I, O>),+> Choice<I, O> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn nibble_first(&self, cursor: &mut Cursor<I>) -> Option<Vec<O>> {
                let ($($name,)+) = self;
                $(
                    if let Some(results) = cursor.attempt($name) {
                        return Some(results);
                    }
                )+
                None
            }
        }
    };
}

impl_tuples!(A);
impl_tuples!(A, B);
impl_tuples!(A, B, C);
impl_tuples!(A, B, C, D);
impl_tuples!(A, B, C, D, E);
impl_tuples!(A, B, C, D, E, F);
impl_tuples!(A, B, C, D, E, F, G);
impl_tuples!(A, B, C, D, E, F, G, H);
impl_tuples!(A, B, C, D, E, F, G, H, J);
impl_tuples!(A, B, C, D, E, F, G, H, J, K);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L, M);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L, M, N);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L, M, N, P);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L, M, N, P, Q);
impl_tuples!(A, B, C, D, E, F, G, H, J, K, L, M, N, P, Q, R);

/// Sequence: every nibbler must match in order; results are concatenated.
///
/// If any member fails the whole sequence fails and the cursor returns to
/// where the sequence started.
pub fn take_all<I, O, S>(sequence: S) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    S: Sequence<I, O>,
{
    move |cursor: &mut Cursor<I>| {
        let start = cursor.offset();
        let results = sequence.nibble_all(cursor);
        if results.is_none() {
            cursor.reset(start);
        }
        results
    }
}

/// Ordered alternation: the first alternative that matches wins.
///
/// Alternatives that share a prefix must be ordered from most to least
/// specific, e.g. keyword literals before a generic name recognizer.
pub fn take_first<I, O, C>(choices: C) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    C: Choice<I, O>,
{
    move |cursor: &mut Cursor<I>| choices.nibble_first(cursor)
}

/// Zero or one match. Never fails.
pub fn optional<I, O, N>(nibbler: N) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    N: Nibbler<I, O>,
{
    move |cursor: &mut Cursor<I>| Some(cursor.attempt(&nibbler).unwrap_or_default())
}

/// Zero or more matches, greedy. Never fails.
///
/// Stops at the first position where `nibbler` fails, or after a match
/// that consumed nothing.
pub fn repeat<I, O, N>(nibbler: N) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    N: Nibbler<I, O>,
{
    move |cursor: &mut Cursor<I>| {
        let mut results = Vec::new();
        loop {
            let before = cursor.offset();
            match cursor.attempt(&nibbler) {
                Some(found) => {
                    results.extend(found);
                    if cursor.offset() == before {
                        break;
                    }
                }
                None => break,
            }
        }
        Some(results)
    }
}

/// Delimited span: `open`, then `inner`, then `close`.
///
/// Only the results of `inner` are kept. Fails (without consuming) when
/// the input ends before `close`, or when `inner` fails.
pub fn between<I, A, O, B, L, N, R>(
    open: L,
    inner: N,
    close: R,
) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    L: Nibbler<I, A>,
    N: Nibbler<I, O>,
    R: Nibbler<I, B>,
{
    move |cursor: &mut Cursor<I>| {
        let start = cursor.offset();
        let results = cursor.attempt(&open).and_then(|_| {
            let results = cursor.attempt(&inner)?;
            cursor.attempt(&close)?;
            Some(results)
        });
        if results.is_none() {
            cursor.reset(start);
        }
        results
    }
}

/// Negative lookahead: succeeds, consuming nothing, when `nibbler` would
/// not match here.
pub fn not_followed_by<I, O, P, N>(nibbler: N) -> impl Fn(&mut Cursor<I>) -> Option<Vec<P>>
where
    N: Nibbler<I, O>,
{
    move |cursor: &mut Cursor<I>| {
        if cursor.check(&nibbler) {
            None
        } else {
            Some(Vec::new())
        }
    }
}

/// Name a nibbler for diagnostics.
///
/// When `nibbler` fails, `name` is recorded on the cursor as expected at
/// the failing position.
pub fn label<I, O, N>(name: &'static str, nibbler: N) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    N: Nibbler<I, O>,
{
    move |cursor: &mut Cursor<I>| {
        let results = cursor.attempt(&nibbler);
        if results.is_none() {
            cursor.expect(name);
        }
        results
    }
}

/// Run `nibbler` one nesting level deeper.
///
/// Fails without consuming input once `limit` levels are entered; the
/// cursor records the first such refusal in [`Cursor::too_deep`].
pub fn nested<I, O, N>(limit: usize, nibbler: N) -> impl Fn(&mut Cursor<I>) -> Option<Vec<O>>
where
    N: Nibbler<I, O>,
{
    move |cursor: &mut Cursor<I>| {
        if !cursor.enter(limit) {
            return None;
        }
        let results = cursor.attempt(&nibbler);
        cursor.leave();
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit() -> impl Fn(&mut Cursor<char>) -> Option<Vec<char>> {
        take_cond(|c: &char| c.is_ascii_digit())
    }

    #[test]
    fn test_take_matches_single_element() {
        let mut c = Cursor::from("ab");
        assert_eq!(c.attempt(&take('a')), Some(vec!['a']));
        assert_eq!(c.attempt(&take('a')), None);
        assert_eq!(c.offset(), 1);
    }

    #[test]
    fn test_take_string_partial_match_restores() {
        let mut c = Cursor::from("lex");
        assert_eq!(take_string("let").nibble(&mut c), None);
        assert_eq!(c.offset(), 0);
        assert_eq!(take_string("le").nibble(&mut c), Some(vec!['l', 'e']));
        assert_eq!(c.offset(), 2);
    }

    #[test]
    fn test_take_while_requires_one() {
        let mut c = Cursor::from("x12");
        assert_eq!(take_while(|c: &char| c.is_ascii_digit()).nibble(&mut c), None);
        c.next();
        assert_eq!(
            take_while(|c: &char| c.is_ascii_digit()).nibble(&mut c),
            Some(vec!['1', '2'])
        );
        assert!(c.is_complete());
    }

    #[test]
    fn test_take_characters() {
        let mut c = Cursor::from(" \t x");
        assert_eq!(
            take_characters(&[' ', '\t']).nibble(&mut c),
            Some(vec![' ', '\t', ' '])
        );
        assert_eq!(c.peek(), Some(&'x'));
    }

    #[test]
    fn test_take_all_concatenates() {
        let mut c = Cursor::from("a1b");
        let n = take_all((take('a'), digit(), take('b')));
        assert_eq!(n.nibble(&mut c), Some(vec!['a', '1', 'b']));
    }

    #[test]
    fn test_take_all_aborts_partway_without_consuming() {
        let mut c = Cursor::from("a1c");
        let n = take_all((take('a'), digit(), take('b')));
        assert_eq!(n.nibble(&mut c), None);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_take_first_is_ordered() {
        let n = take_first((take_string("le"), take_string("let")));
        let mut c = Cursor::from("let");
        assert_eq!(n.nibble(&mut c), Some(vec!['l', 'e']));

        let n = take_first((take_string("let"), take_string("le")));
        let mut c = Cursor::from("let");
        assert_eq!(n.nibble(&mut c), Some(vec!['l', 'e', 't']));
    }

    #[test]
    fn test_take_first_failed_branches_do_not_consume() {
        let n = take_first((take_all((take('a'), take('b'))), take('a')));
        let mut c = Cursor::from("ac");
        assert_eq!(n.nibble(&mut c), Some(vec!['a']));
        assert_eq!(c.offset(), 1);
    }

    #[test]
    fn test_optional_never_fails() {
        let mut c = Cursor::from("x");
        assert_eq!(optional(take('-')).nibble(&mut c), Some(vec![]));
        assert_eq!(c.offset(), 0);
        let mut c = Cursor::from("-");
        assert_eq!(optional(take('-')).nibble(&mut c), Some(vec!['-']));
    }

    #[test]
    fn test_repeat_is_greedy_and_stops_at_first_miss() {
        let mut c = Cursor::from("123a4");
        assert_eq!(repeat(digit()).nibble(&mut c), Some(vec!['1', '2', '3']));
        assert_eq!(c.offset(), 3);
        assert_eq!(repeat(digit()).nibble(&mut c), Some(vec![]));
        assert_eq!(c.offset(), 3);
    }

    #[test]
    fn test_repeat_stops_on_zero_width_match() {
        let mut c = Cursor::from("abc");
        assert_eq!(repeat(optional(take('z'))).nibble(&mut c), Some(vec![]));
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_between_keeps_inner_only() {
        let n = between(take('<'), take_while(|c: &char| c.is_alphabetic()), take('>'));
        let mut c = Cursor::from("<abc>");
        assert_eq!(n.nibble(&mut c), Some(vec!['a', 'b', 'c']));
        assert!(c.is_complete());
    }

    #[test]
    fn test_between_unterminated_restores() {
        let n = between(take('<'), take_while(|c: &char| c.is_alphabetic()), take('>'));
        let mut c = Cursor::from("<abc");
        assert_eq!(n.nibble(&mut c), None);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_between_inner_failure_restores() {
        let n = between(take('<'), take_while(|c: &char| c.is_alphabetic()), take('>'));
        let mut c = Cursor::from("<>");
        assert_eq!(n.nibble(&mut c), None);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_not_followed_by() {
        let keyword = take_all((
            take_string("if"),
            not_followed_by(take_cond(|c: &char| c.is_alphanumeric())),
        ));
        assert_eq!(keyword.nibble(&mut Cursor::from("if x")), Some(vec!['i', 'f']));
        let mut c = Cursor::from("iffy");
        assert_eq!(keyword.nibble(&mut c), None);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_map_and_ignore() {
        let number = take_while(|c: &char| c.is_ascii_digit())
            .map(|chars: Vec<char>| vec![chars.into_iter().collect::<String>()]);
        let mut c = Cursor::from("42");
        assert_eq!(number.nibble(&mut c), Some(vec!["42".to_string()]));

        let spaces = take_characters(&[' ']).ignore::<String>();
        let mut c = Cursor::from("  ");
        assert_eq!(spaces.nibble(&mut c), Some(vec![]));
        assert!(c.is_complete());
    }

    #[test]
    fn test_label_records_expectation() {
        let n = take_all((take('a'), label("digit", digit())));
        let mut c = Cursor::from("ax");
        assert_eq!(n.nibble(&mut c), None);
        assert_eq!(c.furthest(), 1);
        assert_eq!(c.expected(), vec!["digit"]);
    }

    #[test]
    fn test_recursive_function_nibbler() {
        // parens = "(" parens ")" | "x"
        fn parens(cursor: &mut Cursor<char>) -> Option<Vec<char>> {
            take_first((between(take('('), parens, take(')')), take('x'))).nibble(cursor)
        }
        assert_eq!(parens(&mut Cursor::from("((x))")), Some(vec!['x']));
        let mut c = Cursor::from("((x)");
        assert_eq!(c.attempt(&parens), None);
        assert_eq!(c.offset(), 0);
    }

    #[test]
    fn test_nested_refuses_past_limit() {
        fn parens(cursor: &mut Cursor<char>) -> Option<Vec<char>> {
            nested(
                3,
                take_first((between(take('('), parens, take(')')), take('x'))),
            )
            .nibble(cursor)
        }
        let mut c = Cursor::from("((x))");
        assert_eq!(parens(&mut c), Some(vec!['x']));
        assert_eq!(c.depth(), 0);
        assert_eq!(c.too_deep(), None);

        let mut c = Cursor::from("(((x)))");
        assert_eq!(c.attempt(&parens), None);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.depth(), 0);
        assert_eq!(c.too_deep().map(|t| (t.offset, t.limit)), Some((3, 3)));
    }
}
