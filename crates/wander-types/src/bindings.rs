//! Lexical scope chain for the Wander evaluator.

use indexmap::IndexMap;
use std::ops::{Deref, DerefMut};

use crate::ast::Element;
use crate::error::{EvalError, EvalResult};

/// A single scope level. Insertion order is kept for `names()`.
#[derive(Debug, Clone, Default)]
struct Frame {
    bindings: IndexMap<String, Element>,
}

/// Stack of frames mapping names to Elements.
///
/// Lookups search from the innermost frame outward. `bind` always writes
/// the innermost frame, so a nested scope can shadow an outer name without
/// touching it. The outermost (global) frame is never popped.
///
/// Bindings also carry the evaluation budget: a step counter with an
/// optional limit, and the number of function calls currently active.
#[derive(Debug, Clone)]
pub struct Bindings {
    frames: Vec<Frame>,
    steps: u64,
    step_limit: Option<u64>,
    calls: usize,
    call_limit: usize,
}

/// Active calls allowed unless [`Bindings::with_call_limit`] says otherwise.
pub const DEFAULT_CALL_LIMIT: usize = 128;

impl Bindings {
    /// Create bindings with one empty global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            steps: 0,
            step_limit: None,
            calls: 0,
            call_limit: DEFAULT_CALL_LIMIT,
        }
    }

    /// Create bindings that fail evaluation after `limit` steps.
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Allow at most `limit` function calls to be active at once.
    pub fn with_call_limit(mut self, limit: usize) -> Self {
        self.call_limit = limit;
        self
    }

    /// Push a new innermost frame.
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame.
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Push a frame that is popped when the guard is dropped,
    /// including on early return through `?`.
    pub fn scope(&mut self) -> ScopeGuard<'_> {
        self.push_scope();
        ScopeGuard {
            bindings: self,
            call: false,
        }
    }

    /// Push the frame for one function call.
    ///
    /// Fails with `CallDepthExceeded` when the call limit is already
    /// reached. The call is counted until the guard is dropped.
    pub fn call_scope(&mut self) -> EvalResult<ScopeGuard<'_>> {
        if self.calls >= self.call_limit {
            return Err(EvalError::CallDepthExceeded {
                limit: self.call_limit,
            });
        }
        self.calls += 1;
        self.push_scope();
        Ok(ScopeGuard {
            bindings: self,
            call: true,
        })
    }

    /// Function calls currently active.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Run `f` with the innermost frame hidden.
    ///
    /// Native functions use this so the names they bind for their own
    /// arguments are not visible to the code they evaluate. The frame is
    /// put back before returning. The global frame is never hidden.
    pub fn in_enclosing_scope<T>(&mut self, f: impl FnOnce(&mut Bindings) -> T) -> T {
        if self.frames.len() < 2 {
            return f(self);
        }
        let hidden = self.frames.pop();
        let result = f(self);
        self.frames.extend(hidden);
        result
    }

    /// Number of frames, including the global one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind `name` in the innermost frame, replacing any existing binding
    /// in that frame.
    pub fn bind(&mut self, name: impl Into<String>, value: Element) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.into(), value);
        }
    }

    /// Look up a name, searching from innermost to outermost frame.
    pub fn lookup(&self, name: &str) -> Option<&Element> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.bindings.get(name))
    }

    /// Read a bound value, failing with `UndefinedVariable`.
    pub fn read(&self, name: &str) -> EvalResult<Element> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::undefined(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// All visible names, innermost frame first, shadowed names once.
    pub fn names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for frame in self.frames.iter().rev() {
            for name in frame.bindings.keys() {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                }
            }
        }
        seen
    }

    /// Count one evaluation step against the configured limit.
    pub fn tick(&mut self) -> EvalResult<()> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => Err(EvalError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Steps counted so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

/// A pushed frame, popped again on drop.
pub struct ScopeGuard<'a> {
    bindings: &'a mut Bindings,
    call: bool,
}

impl Deref for ScopeGuard<'_> {
    type Target = Bindings;

    fn deref(&self) -> &Bindings {
        self.bindings
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Bindings {
        self.bindings
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.bindings.pop_scope();
        if self.call {
            self.bindings.calls -= 1;
        }
    }
}
