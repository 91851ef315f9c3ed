//! Backtracking recognizer combinators for Wander.
//!
//! Every tokenizer and grammar in the workspace is assembled from the
//! pieces in this crate:
//!
//! - [`Cursor`] tracks a position in an input sequence and supports
//!   save/restore for backtracking.
//! - [`Nibbler`] is anything that can attempt to consume a prefix of the
//!   remaining input, producing an ordered list of results.
//! - The free functions in [`nibbler`] compose nibblers: sequence
//!   ([`take_all`]), ordered alternation ([`take_first`]), [`optional`],
//!   [`repeat`], predicate match ([`take_cond`]), delimited spans
//!   ([`between`]) and literal matches ([`take`], [`take_string`]).
//!   [`nested`] bounds how deeply a recursive grammar may descend.
//!
//! A failed attempt never moves the cursor. That guarantee holds for every
//! combinator here and is preserved by composition.

pub mod cursor;
pub mod nibbler;

pub use cursor::{Cursor, TooDeep};
pub use nibbler::{
    between, label, nested, not_followed_by, optional, repeat, take, take_all, take_characters,
    take_cond, take_first, take_string, take_while, Choice, Nibbler, NibblerExt, Sequence,
};
