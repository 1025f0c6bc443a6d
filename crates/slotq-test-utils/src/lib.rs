//! Test utilities for slotq development.
//!
//! Provides [`Tracker`], a shared counter of element constructions and
//! drops, and [`Tracked`], the instrumented value it hands out. Together
//! they let tests assert that a queue drops every element exactly once
//! and that a panicking `Clone` leaks nothing.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    created: Cell<usize>,
    dropped: Cell<usize>,
    clones: Cell<usize>,
    /// Clones still allowed before the next one panics; `None` = unlimited.
    clone_budget: Cell<Option<usize>>,
}

/// Shared construction/drop ledger for [`Tracked`] values.
///
/// Cloning the tracker yields another handle to the same ledger.
#[derive(Clone, Default)]
pub struct Tracker {
    counts: Rc<Counts>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its construction and drop are recorded here.
    pub fn track<V>(&self, value: V) -> Tracked<V> {
        self.counts.created.set(self.counts.created.get() + 1);
        Tracked {
            value,
            counts: Rc::clone(&self.counts),
        }
    }

    /// Values constructed so far, including clones.
    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    /// Values dropped so far.
    pub fn dropped(&self) -> usize {
        self.counts.dropped.get()
    }

    /// Values constructed and not yet dropped.
    ///
    /// Panics if more values were dropped than created (a double drop).
    pub fn live(&self) -> usize {
        let created = self.created();
        let dropped = self.dropped();
        assert!(
            dropped <= created,
            "double drop: {dropped} drops for {created} values"
        );
        created - dropped
    }

    /// Successful `Tracked::clone` calls so far.
    pub fn clones(&self) -> usize {
        self.counts.clones.get()
    }

    /// Allow `n` more clones, then panic on the next one.
    pub fn fail_clones_after(&self, n: usize) {
        self.counts.clone_budget.set(Some(n));
    }

    /// Lift any clone limit.
    pub fn allow_all_clones(&self) {
        self.counts.clone_budget.set(None);
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("created", &self.created())
            .field("dropped", &self.dropped())
            .field("clones", &self.clones())
            .finish()
    }
}

/// A value whose lifecycle is recorded by a [`Tracker`].
pub struct Tracked<V> {
    value: V,
    counts: Rc<Counts>,
}

impl<V> Tracked<V> {
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: Clone> Clone for Tracked<V> {
    fn clone(&self) -> Self {
        match self.counts.clone_budget.get() {
            Some(0) => panic!("clone budget exhausted"),
            Some(n) => self.counts.clone_budget.set(Some(n - 1)),
            None => {}
        }
        let value = self.value.clone();
        self.counts.created.set(self.counts.created.get() + 1);
        self.counts.clones.set(self.counts.clones.get() + 1);
        Self {
            value,
            counts: Rc::clone(&self.counts),
        }
    }
}

impl<V> Drop for Tracked<V> {
    fn drop(&mut self) {
        self.counts.dropped.set(self.counts.dropped.get() + 1);
    }
}

impl<V: PartialEq> PartialEq for Tracked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Tracked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_construction_and_drop() {
        let tracker = Tracker::new();
        let a = tracker.track(1);
        let b = a.clone();
        assert_eq!(tracker.created(), 2);
        assert_eq!(tracker.clones(), 1);
        drop(a);
        assert_eq!(tracker.live(), 1);
        drop(b);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn clone_budget_panics_when_exhausted() {
        let tracker = Tracker::new();
        let a = tracker.track(String::from("x"));
        tracker.fail_clones_after(1);
        let _ok = a.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| a.clone()));
        assert!(result.is_err());
        assert_eq!(tracker.clones(), 1);

        tracker.allow_all_clones();
        let _again = a.clone();
        assert_eq!(tracker.clones(), 2);
    }
}
