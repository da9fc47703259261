//! Array iterator protocol implementation
//!
//! This module implements:
//! - Iterator protocol result objects (`{ value, done }`)
//! - `%ArrayIteratorPrototype%` iterators over TypedArray views
//!   (`values()`, `keys()`, `entries()`)
//!
//! An [`ArrayIterator`] is an explicit two-state machine. While `Active` it
//! re-reads the view's effective length on every call to `next()`; once it
//! reaches `Exhausted` it stays there and every further call returns
//! `{ value: undefined, done: true }`.

use crate::typed_arrays::TypedArray;
use crate::value::{JsError, JsResult, JsValue};

/// Iterator result object { value, done }
#[derive(Debug, Clone, PartialEq)]
pub struct IteratorResult {
    /// The value returned by the iterator
    pub value: JsValue,
    /// Whether the iterator is exhausted
    pub done: bool,
}

impl IteratorResult {
    /// Create a new iterator result with a value
    pub fn value(v: JsValue) -> Self {
        IteratorResult {
            value: v,
            done: false,
        }
    }

    /// Create a done iterator result
    pub fn done() -> Self {
        IteratorResult {
            value: JsValue::undefined(),
            done: true,
        }
    }
}

/// What an array iterator yields for each index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayIteratorKind {
    /// The index itself
    Keys,
    /// The element at the index
    Values,
    /// `[index, element]` pairs
    Entries,
}

/// How `next()` reacts to a view whose buffer was detached mid-iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetachPolicy {
    /// Treat the detached view as having length 0 and finish quietly
    #[default]
    Terminate,
    /// Throw a TypeError from the first `next()` that observes the
    /// detachment, then finish
    Throw,
}

/// Iterator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// More elements may be produced
    Active,
    /// Terminal; `next()` always returns a done result
    Exhausted,
}

/// Iterator over a TypedArray view
///
/// The iterator holds its own handle to the view, so it stays usable after
/// the caller's handle is dropped. Detaching the underlying buffer is the
/// only thing that cuts iteration short.
#[derive(Debug, Clone)]
pub struct ArrayIterator {
    view: TypedArray,
    kind: ArrayIteratorKind,
    policy: DetachPolicy,
    index: usize,
    state: IteratorState,
}

impl ArrayIterator {
    /// Create a new active iterator positioned at index 0
    pub fn new(view: &TypedArray, kind: ArrayIteratorKind, policy: DetachPolicy) -> Self {
        ArrayIterator {
            view: view.clone(),
            kind,
            policy,
            index: 0,
            state: IteratorState::Active,
        }
    }

    /// Get the current state
    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Index of the next element to read
    pub fn index(&self) -> usize {
        self.index
    }

    /// What this iterator yields
    pub fn kind(&self) -> ArrayIteratorKind {
        self.kind
    }

    /// The detachment policy this iterator was created with
    pub fn policy(&self) -> DetachPolicy {
        self.policy
    }

    /// %ArrayIteratorPrototype%.next()
    ///
    /// Never fails under [`DetachPolicy::Terminate`].
    pub fn next(&mut self) -> JsResult<IteratorResult> {
        if self.state == IteratorState::Exhausted {
            return Ok(IteratorResult::done());
        }

        // Liveness is re-derived on every call, never cached.
        let detached = self.view.is_detached();

        if detached && self.policy == DetachPolicy::Throw {
            self.finish("detached");
            tracing::warn!(index = self.index, "array iterator observed a detached buffer");
            return Err(JsError::type_error(
                "TypedArray is backed by a detached ArrayBuffer",
            ));
        }

        if self.index >= self.view.length() {
            self.finish(if detached { "detached" } else { "exhausted" });
            return Ok(IteratorResult::done());
        }

        let index = self.index;
        let value = match self.kind {
            ArrayIteratorKind::Keys => JsValue::number(index as f64),
            ArrayIteratorKind::Values | ArrayIteratorKind::Entries => {
                let Some(element) = self.view.element_at(index) else {
                    self.finish("detached");
                    return Ok(IteratorResult::done());
                };
                if self.kind == ArrayIteratorKind::Values {
                    element.into()
                } else {
                    JsValue::array_from(vec![JsValue::number(index as f64), element.into()])
                }
            }
        };

        self.index += 1;
        Ok(IteratorResult::value(value))
    }

    fn finish(&mut self, reason: &'static str) {
        self.state = IteratorState::Exhausted;
        tracing::trace!(index = self.index, reason, "array iterator exhausted");
    }
}
