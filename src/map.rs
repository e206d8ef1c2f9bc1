//! Map: a hash table with lookup-with-default, predicate removal, take,
//! and change-counting bulk union/difference.

use crate::collab::{OrderedSequence, UniqueSet};
use crate::release::Release;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::{self, HashMap};
use hashbrown::HashSet;
use log::trace;
use std::collections::hash_map::RandomState;

pub struct Map<K, V, S = RandomState> {
    pub(crate) inner: HashMap<K, V, S>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertError {
    DuplicateKey,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey => f.write_str("key already present in map"),
        }
    }
}

impl std::error::Error for InsertError {}

impl<K, V> Map<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            inner: HashMap::with_hasher(hasher),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            inner: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub(crate) fn from_inner(inner: HashMap<K, V, S>) -> Self {
        Self { inner }
    }

    /// Give up the wrapper and return the underlying table.
    pub fn into_inner(self) -> HashMap<K, V, S> {
        self.inner
    }

    pub fn hasher(&self) -> &S {
        self.inner.hasher()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
    pub fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.contains_key(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get_mut(q)
    }

    /// Insert `key -> value` only if `key` is absent. Returns whether a new
    /// entry was created; an existing value is left untouched and `value`
    /// is dropped.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.try_insert(key, value).is_ok()
    }

    /// Like [`Map::insert`] but returns the freshly stored value.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<&mut V, InsertError> {
        match self.inner.entry(key) {
            hash_map::Entry::Occupied(_) => Err(InsertError::DuplicateKey),
            hash_map::Entry::Vacant(v) => Ok(v.insert(value)),
        }
    }

    /// Overwrite-or-insert. Returns the value that was replaced, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Mutable subscript: the entry for `key`, created with `V::default()`
    /// when absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.inner.entry(key).or_default()
    }

    /// The stored value for `key` and `true`, or `default` and `false`.
    /// Never mutates the map.
    pub fn value<Q>(&self, key: &Q, default: V) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        match self.inner.get(key) {
            Some(v) => (v.clone(), true),
            None => (default, false),
        }
    }

    pub fn value_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone + Default,
    {
        self.value(key, V::default()).0
    }

    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(key).is_some()
    }

    /// Remove `key`, moving its value into `out`. When `key` is absent,
    /// `out` is reset to `V::default()` and `false` is returned.
    pub fn remove_into<Q>(&mut self, key: &Q, out: &mut V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Default,
    {
        match self.inner.remove(key) {
            Some(v) => {
                *out = v;
                true
            }
            None => {
                *out = V::default();
                false
            }
        }
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove_entry(key)
    }

    /// Erase every entry whose key satisfies `pred`; returns the number
    /// erased. `pred` sees each key exactly once.
    pub fn remove_if<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let before = self.inner.len();
        // retain advances past a slot before erasing it.
        self.inner.retain(|k, _| !pred(k));
        let removed = before - self.inner.len();
        trace!("remove_if: erased {removed} of {before} entries");
        removed
    }

    /// Remove `key` and hand its value to the caller.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.remove(key)
    }

    /// `take` with an explicit presence flag; absent keys yield `V::default()`.
    pub fn take_or_default<Q>(&mut self, key: &Q) -> (V, bool)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Default,
    {
        let mut out = V::default();
        let ok = self.remove_into(key, &mut out);
        (out, ok)
    }

    /// Move all entries out, leaving `self` empty with the same hasher.
    pub fn take_all(&mut self) -> Self
    where
        S: Clone,
    {
        let hasher = self.inner.hasher().clone();
        let inner = core::mem::replace(&mut self.inner, HashMap::with_hasher(hasher));
        Self::from_inner(inner)
    }

    /// Drain the map, releasing every value exactly once. Returns the
    /// number of values released.
    pub fn release_all(&mut self) -> usize
    where
        V: Release,
    {
        let mut released = 0;
        for (_k, v) in self.inner.drain() {
            v.release();
            released += 1;
        }
        trace!("release_all: released {released} values");
        released
    }

    /// Merge `other` into `self`; `other` wins on key collision.
    pub fn unite<S2>(&mut self, other: &Map<K, V, S2>) -> &mut Self
    where
        K: Clone,
        V: Clone,
        S2: BuildHasher,
    {
        for (k, v) in other.inner.iter() {
            match self.inner.get_mut(k) {
                Some(cur) => cur.clone_from(v),
                None => {
                    self.inner.insert(k.clone(), v.clone());
                }
            }
        }
        trace!("unite: merged {} entries", other.len());
        self
    }

    /// Merge `other` into `self`, writing only entries that are absent or
    /// hold a different value. Returns how many entries were written.
    pub fn unite_counted<S2>(&mut self, other: &Map<K, V, S2>) -> usize
    where
        K: Clone,
        V: Clone + PartialEq,
        S2: BuildHasher,
    {
        let mut changed = 0;
        for (k, v) in other.inner.iter() {
            match self.inner.get_mut(k) {
                Some(cur) if *cur == *v => {}
                Some(cur) => {
                    cur.clone_from(v);
                    changed += 1;
                }
                None => {
                    self.inner.insert(k.clone(), v.clone());
                    changed += 1;
                }
            }
        }
        trace!("unite_counted: {changed} of {} entries changed", other.len());
        changed
    }

    /// Combined form: without a counter this is [`Map::unite`]; with one it
    /// is [`Map::unite_counted`] and the change count is added to `*count`.
    pub fn unite_with<S2>(
        &mut self,
        other: &Map<K, V, S2>,
        count: Option<&mut usize>,
    ) -> &mut Self
    where
        K: Clone,
        V: Clone + PartialEq,
        S2: BuildHasher,
    {
        match count {
            Some(c) => {
                *c += self.unite_counted(other);
                self
            }
            None => self.unite(other),
        }
    }

    /// Merge by moving `other`'s entries in; `other` wins on collision.
    pub fn unite_owned<S2>(&mut self, other: Map<K, V, S2>) -> &mut Self
    where
        S2: BuildHasher,
    {
        let n = other.inner.len();
        self.inner.extend(other.inner);
        trace!("unite_owned: moved {n} entries");
        self
    }

    /// Erase every key present in `other`. `other`'s values are ignored.
    pub fn subtract<V2, S2>(&mut self, other: &Map<K, V2, S2>) -> &mut Self
    where
        S2: BuildHasher,
    {
        let before = self.inner.len();
        for k in other.inner.keys() {
            self.inner.remove(k);
        }
        trace!(
            "subtract: erased {} entries for {} keys",
            before - self.inner.len(),
            other.len()
        );
        self
    }

    /// Erase each key yielded by `keys`; returns how many were present.
    pub fn subtract_keys<'q, Q, I>(&mut self, keys: I) -> usize
    where
        K: Borrow<Q>,
        Q: 'q + ?Sized + Hash + Eq,
        I: IntoIterator<Item = &'q Q>,
    {
        let removed = keys
            .into_iter()
            .filter(|q| self.inner.remove(*q).is_some())
            .count();
        trace!("subtract_keys: erased {removed} entries");
        removed
    }

    /// Snapshot of all keys in table order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys_into()
    }

    /// Snapshot of all keys as a set sharing this map's hasher.
    pub fn keys_as_set(&self) -> HashSet<K, S>
    where
        K: Clone,
        S: Clone,
    {
        let mut set =
            HashSet::with_capacity_and_hasher(self.inner.len(), self.inner.hasher().clone());
        set.extend(self.inner.keys().cloned());
        set
    }

    /// Snapshot of all values in the same order as [`Map::keys`].
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values_into()
    }

    pub fn keys_into<C>(&self) -> C
    where
        K: Clone,
        C: OrderedSequence<K>,
    {
        let mut out = C::default();
        out.reserve_hint(self.inner.len());
        for k in self.inner.keys() {
            out.append(k.clone());
        }
        out
    }

    pub fn keys_into_set<C>(&self) -> C
    where
        K: Clone,
        C: UniqueSet<K>,
    {
        let mut out = C::default();
        for k in self.inner.keys() {
            out.insert(k.clone());
        }
        out
    }

    pub fn values_into<C>(&self) -> C
    where
        V: Clone,
        C: OrderedSequence<V>,
    {
        let mut out = C::default();
        out.reserve_hint(self.inner.len());
        for v in self.inner.values() {
            out.append(v.clone());
        }
        out
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }
    pub fn iter_mut(&mut self) -> hash_map::IterMut<'_, K, V> {
        self.inner.iter_mut()
    }
    pub fn keys_iter(&self) -> hash_map::Keys<'_, K, V> {
        self.inner.keys()
    }
    pub fn values_iter(&self) -> hash_map::Values<'_, K, V> {
        self.inner.values()
    }
    pub fn values_mut(&mut self) -> hash_map::ValuesMut<'_, K, V> {
        self.inner.values_mut()
    }
    pub fn drain(&mut self) -> hash_map::Drain<'_, K, V> {
        self.inner.drain()
    }
}
