//! Collaborator containers that receive `Map` views.
//!
//! The views (`keys`, `keys_as_set`, `values`) are built by appending into
//! a freshly defaulted container. Any container that implements one of
//! these traits can be the target of the generic `*_into` builders.

use core::hash::{BuildHasher, Hash};
use std::collections::{BTreeSet, VecDeque};

/// Ordered, duplicate-permitting, appendable sequence.
pub trait OrderedSequence<T>: Default {
    /// Push `item` at the end; iteration yields items in append order.
    fn append(&mut self, item: T);

    /// Hint that `additional` more items are about to be appended.
    fn reserve_hint(&mut self, _additional: usize) {}
}

/// Unique-element collection; no order guarantee is assumed.
pub trait UniqueSet<T>: Default {
    /// Insert `item`, returning true if it was not already present.
    fn insert(&mut self, item: T) -> bool;
}

impl<T> OrderedSequence<T> for Vec<T> {
    #[inline]
    fn append(&mut self, item: T) {
        self.push(item);
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<T> OrderedSequence<T> for VecDeque<T> {
    #[inline]
    fn append(&mut self, item: T) {
        self.push_back(item);
    }

    fn reserve_hint(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<T, S> UniqueSet<T> for hashbrown::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    fn insert(&mut self, item: T) -> bool {
        hashbrown::HashSet::insert(self, item)
    }
}

impl<T, S> UniqueSet<T> for std::collections::HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    #[inline]
    fn insert(&mut self, item: T) -> bool {
        std::collections::HashSet::insert(self, item)
    }
}

impl<T: Ord> UniqueSet<T> for BTreeSet<T> {
    #[inline]
    fn insert(&mut self, item: T) -> bool {
        BTreeSet::insert(self, item)
    }
}
