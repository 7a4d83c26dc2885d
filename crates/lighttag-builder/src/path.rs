//! The set of types currently being expanded.
//!
//! `ExpansionPath` is a multiset: the same type may legitimately be entered
//! again further down (an F-bounded parameter reached through its own bound),
//! and leaving the inner occurrence must not forget the outer one.
//!
//! # Debug-mode safety
//!
//! In debug builds, dropping a path that still has entries panics, catching
//! an `enter` without its matching `leave`. Prefer [`ExpansionPath::scope`],
//! which always pairs them.

use rustc_hash::FxHashMap;
use std::hash::Hash;

pub struct ExpansionPath<T: Hash + Eq + Clone> {
    active: FxHashMap<T, u32>,
    depth: u32,
}

impl<T: Hash + Eq + Clone> Default for ExpansionPath<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone> ExpansionPath<T> {
    pub fn new() -> Self {
        Self {
            active: FxHashMap::default(),
            depth: 0,
        }
    }

    pub fn enter(&mut self, ty: &T) {
        *self.active.entry(ty.clone()).or_insert(0) += 1;
        self.depth += 1;
    }

    /// Must be called exactly once after every [`enter`](Self::enter).
    pub fn leave(&mut self, ty: &T) {
        match self.active.get_mut(ty) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.active.remove(ty);
            }
            None => debug_assert!(
                false,
                "ExpansionPath::leave() called for a type that is not on the path"
            ),
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` with `ty` on the path.
    pub fn scope<R>(&mut self, ty: &T, f: impl FnOnce(&mut Self) -> R) -> R {
        self.enter(ty);
        let result = f(self);
        self.leave(ty);
        result
    }

    #[inline]
    pub fn contains(&self, ty: &T) -> bool {
        self.active.contains_key(ty)
    }

    /// Number of active entries, counting repeats.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Nesting level below the root expansion; names lambda parameters.
    #[inline]
    pub fn level(&self) -> u32 {
        self.depth.saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl<T: Hash + Eq + Clone> Drop for ExpansionPath<T> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        if !std::thread::panicking() && !self.active.is_empty() {
            panic!(
                "ExpansionPath dropped with {} active entries; enter() without leave()",
                self.active.len()
            );
        }
    }
}
