//! The build context (C7): per-definition-attempt scratch storage.
//!
//! There are two acceptable backtracking strategies for the scratch bag;
//! this implementation takes the "reset wholesale on backtrack" strategy —
//! each definition attempt in [`super::engine`] constructs a fresh
//! `BuildContext` and simply drops it on failure, so [`Disposer`] carries no
//! state of its own. It still exists, and `put` still returns one, so
//! callers written against the disposer-per-put contract compile unchanged
//! if a future version needs finer-grained rollback.
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Returned by [`BuildContext::put`]. Inert under the wholesale-reset
/// backtracking strategy; kept so call sites read as self-documenting.
pub struct Disposer(());

/// A mutable, string-keyed bag of values local to one definition attempt.
/// Dynamically typed ("map<string, any> with typed read
/// accessors") — the simplest of the two strategies the design notes list,
/// and the one that matches the source most directly.
#[derive(Default)]
pub struct BuildContext {
    values: RefCell<HashMap<String, Rc<dyn Any>>>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, overwriting any previous value there.
    pub fn put<T: 'static>(&self, key: impl Into<String>, value: T) -> Disposer {
        self.values.borrow_mut().insert(key.into(), Rc::new(value));
        Disposer(())
    }

    /// Read a clone of the value stored under `key`, or `None` if absent or
    /// stored under a different type.
    pub fn get<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.values
            .borrow()
            .get(key)
            .and_then(|v| v.downcast_ref::<T>())
            .cloned()
    }

    /// Read the `Rc` stored under `key` directly, avoiding a clone of the
    /// payload. Useful when actions accumulate into a shared `RefCell<Vec<_>>`.
    pub fn get_rc<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.values.borrow().get(key).cloned().and_then(|v| v.downcast::<T>().ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}
