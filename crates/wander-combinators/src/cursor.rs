//! Position tracker over an input sequence.

use crate::nibbler::Nibbler;

/// A cursor over a sequence of input elements (characters or tokens).
///
/// Besides the current offset the cursor remembers the furthest offset at
/// which a labelled recognizer failed, together with the labels that were
/// expected there. Grammars use this to report *where* and *what* went
/// wrong instead of an undifferentiated "no match".
///
/// It also counts how deeply [`nested`](crate::nested) recognizers are
/// currently entered, so recursive grammars can refuse input that would
/// otherwise exhaust the stack.
#[derive(Debug, Clone)]
pub struct Cursor<I> {
    input: Vec<I>,
    offset: usize,
    furthest: usize,
    expected: Vec<&'static str>,
    depth: usize,
    too_deep: Option<TooDeep>,
}

/// Where a nesting limit was first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooDeep {
    pub offset: usize,
    pub limit: usize,
}

impl<I> Cursor<I> {
    /// Create a cursor positioned at the start of `input`.
    pub fn new(input: Vec<I>) -> Self {
        Self {
            input,
            offset: 0,
            furthest: 0,
            expected: Vec::new(),
            depth: 0,
            too_deep: None,
        }
    }

    // ── Position ──────────────────────────────────────────────────────────

    /// Current offset into the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the cursor back (or forward) to a previously saved offset.
    pub fn reset(&mut self, offset: usize) {
        self.offset = offset.min(self.input.len());
    }

    /// Returns `true` once every element has been consumed.
    pub fn is_complete(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Total number of elements in the input.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Returns `true` if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The full input sequence.
    pub fn input(&self) -> &[I] {
        &self.input
    }

    // ── Element access ────────────────────────────────────────────────────

    /// The current element, without advancing.
    pub fn peek(&self) -> Option<&I> {
        self.input.get(self.offset)
    }

    /// Consume and return the current element.
    pub fn next(&mut self) -> Option<&I> {
        let item = self.input.get(self.offset)?;
        self.offset += 1;
        Some(item)
    }

    // ── Backtracking ──────────────────────────────────────────────────────

    /// Run `nibbler` at the current position.
    ///
    /// On success the cursor is left after the matched prefix. On failure
    /// the cursor is restored to where it was before the attempt.
    pub fn attempt<O, N>(&mut self, nibbler: &N) -> Option<Vec<O>>
    where
        N: Nibbler<I, O> + ?Sized,
    {
        let start = self.offset;
        let result = nibbler.nibble(self);
        if result.is_none() {
            self.offset = start;
        }
        result
    }

    /// Returns `true` if `nibbler` would match here. Never consumes input.
    pub fn check<O, N>(&mut self, nibbler: &N) -> bool
    where
        N: Nibbler<I, O> + ?Sized,
    {
        let start = self.offset;
        let matched = nibbler.nibble(self).is_some();
        self.offset = start;
        matched
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// Record that `label` was expected at the current offset.
    ///
    /// Only labels at the furthest offset seen so far are kept.
    pub fn expect(&mut self, label: &'static str) {
        if self.offset > self.furthest {
            self.furthest = self.offset;
            self.expected.clear();
        }
        if self.offset == self.furthest && !self.expected.contains(&label) {
            self.expected.push(label);
        }
    }

    /// The furthest offset at which a labelled recognizer failed.
    pub fn furthest(&self) -> usize {
        self.furthest.max(self.offset)
    }

    /// Labels expected at [`Cursor::furthest`], sorted and de-duplicated.
    pub fn expected(&self) -> Vec<&'static str> {
        if self.offset > self.furthest {
            return Vec::new();
        }
        let mut labels = self.expected.clone();
        labels.sort_unstable();
        labels
    }

    // ── Nesting ───────────────────────────────────────────────────────────

    /// Enter one nesting level. Returns `false`, and remembers the current
    /// offset, when `limit` levels are already entered.
    pub fn enter(&mut self, limit: usize) -> bool {
        if self.depth >= limit {
            if self.too_deep.is_none() {
                self.too_deep = Some(TooDeep {
                    offset: self.offset,
                    limit,
                });
            }
            return false;
        }
        self.depth += 1;
        true
    }

    /// Leave a level entered with [`Cursor::enter`].
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The first place a nesting limit refused to go deeper, if any.
    pub fn too_deep(&self) -> Option<TooDeep> {
        self.too_deep
    }
}

impl From<&str> for Cursor<char> {
    fn from(text: &str) -> Self {
        Cursor::new(text.chars().collect())
    }
}
