//! Standard trait and operator impls for `Map`.
//!
//! `+=`/`-=` are `unite`/`subtract`; the binary `+`/`-` on references
//! copy the left operand first and leave both operands untouched.

use crate::map::Map;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::{Add, AddAssign, Index, Sub, SubAssign};
use hashbrown::hash_map::{self, HashMap};
use std::collections::hash_map::RandomState;

impl<K, V, S> Default for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for Map<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        Self::from_inner(self.inner.clone())
    }
}

impl<K, V, S> fmt::Debug for Map<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

// Content equality; iteration order and hasher state do not matter.
impl<K, V, S> PartialEq for Map<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V, S> Eq for Map<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for Map<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Read-only subscript.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present; check `contains_key` first.
    fn index(&self, key: &Q) -> &V {
        self.get(key)
            .expect("Map index: key must be present (use `get` or `value` for fallible lookup)")
    }
}

impl<K, V, S> Extend<(K, V)> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Overwrite-or-insert each pair, like `unite_owned`.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_inner(HashMap::from_iter(iter))
    }
}

impl<K, V, S> From<HashMap<K, V, S>> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn from(inner: HashMap<K, V, S>) -> Self {
        Self::from_inner(inner)
    }
}

impl<K, V, S> From<std::collections::HashMap<K, V, S>> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    fn from(std_map: std::collections::HashMap<K, V, S>) -> Self {
        let mut inner =
            HashMap::with_capacity_and_hasher(std_map.len(), std_map.hasher().clone());
        inner.extend(std_map);
        Self::from_inner(inner)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Map<K, V, RandomState>
where
    K: Eq + Hash,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K, V, S> IntoIterator for Map<K, V, S> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a Map<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut Map<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = hash_map::IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter_mut()
    }
}

impl<K, V, S, S2> AddAssign<&Map<K, V, S2>> for Map<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn add_assign(&mut self, rhs: &Map<K, V, S2>) {
        self.unite(rhs);
    }
}

impl<K, V, S, V2, S2> SubAssign<&Map<K, V2, S2>> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn sub_assign(&mut self, rhs: &Map<K, V2, S2>) {
        self.subtract(rhs);
    }
}

impl<K, V, S, S2> Add<&Map<K, V, S2>> for &Map<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = Map<K, V, S>;

    fn add(self, rhs: &Map<K, V, S2>) -> Map<K, V, S> {
        let mut out = self.clone();
        out.unite(rhs);
        out
    }
}

impl<K, V, S, S2> Add<&Map<K, V, S2>> for Map<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
    S2: BuildHasher,
{
    type Output = Map<K, V, S>;

    fn add(mut self, rhs: &Map<K, V, S2>) -> Map<K, V, S> {
        self.unite(rhs);
        self
    }
}

impl<K, V, S, V2, S2> Sub<&Map<K, V2, S2>> for &Map<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = Map<K, V, S>;

    fn sub(self, rhs: &Map<K, V2, S2>) -> Map<K, V, S> {
        let mut out = self.clone();
        out.subtract(rhs);
        out
    }
}

impl<K, V, S, V2, S2> Sub<&Map<K, V2, S2>> for Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
    S2: BuildHasher,
{
    type Output = Map<K, V, S>;

    fn sub(mut self, rhs: &Map<K, V2, S2>) -> Map<K, V, S> {
        self.subtract(rhs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(entries: &[(&'static str, i32)]) -> Map<&'static str, i32> {
        entries.iter().copied().collect()
    }

    /// Invariant: the binary operators leave both operands unmodified.
    #[test]
    fn binary_operators_do_not_mutate_operands() {
        let a = m(&[("a", 1), ("b", 2)]);
        let b = m(&[("b", 5), ("c", 3)]);
        let sum = &a + &b;
        let diff = &a - &b;
        assert_eq!(sum, m(&[("a", 1), ("b", 5), ("c", 3)]));
        assert_eq!(diff, m(&[("a", 1)]));
        assert_eq!(a, m(&[("a", 1), ("b", 2)]));
        assert_eq!(b, m(&[("b", 5), ("c", 3)]));
    }

    #[test]
    fn compound_assignment_and_owned_operands() {
        let mut a = m(&[("a", 1)]);
        a += &m(&[("a", 2), ("b", 2)]);
        assert_eq!(a, m(&[("a", 2), ("b", 2)]));
        a -= &m(&[("a", 0)]);
        assert_eq!(a, m(&[("b", 2)]));

        let c = a + &m(&[("z", 26)]) - &m(&[("b", 0)]);
        assert_eq!(c, m(&[("z", 26)]));
    }

    /// Equality ignores insertion order.
    #[test]
    fn equality_is_by_content() {
        let x = m(&[("a", 1), ("b", 2), ("c", 3)]);
        let y = m(&[("c", 3), ("b", 2), ("a", 1)]);
        assert_eq!(x, y);
        assert_ne!(x, m(&[("a", 1), ("b", 2)]));
        assert_ne!(x, m(&[("a", 1), ("b", 2), ("c", 4)]));
    }

    #[test]
    fn index_present_key() {
        let x: Map<String, i32> = Map::from([("k".to_string(), 3)]);
        assert_eq!(x["k"], 3);
    }

    /// Invariant: read-only subscript on an absent key is a contract
    /// violation and panics.
    #[test]
    #[should_panic(expected = "key must be present")]
    fn index_absent_key_panics() {
        let x: Map<String, i32> = Map::new();
        let _ = x["missing"];
    }

    #[test]
    fn conversions_round_trip_contents() {
        let mut std_map = std::collections::HashMap::new();
        std_map.insert(1u8, 'a');
        std_map.insert(2u8, 'b');
        let x: Map<u8, char> = Map::from(std_map);
        assert_eq!(x.len(), 2);

        let inner = x.clone().into_inner();
        let y: Map<u8, char> = Map::from(inner);
        assert_eq!(x, y);

        let mut pairs: Vec<(u8, char)> = y.into_iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn extend_overwrites_and_iter_mut_updates() {
        let mut x = m(&[("a", 1)]);
        x.extend([("a", 10), ("b", 20)]);
        for (_k, v) in &mut x {
            *v += 1;
        }
        let total: i32 = (&x).into_iter().map(|(_, v)| *v).sum();
        assert_eq!(total, 32);
        assert_eq!(format!("{:?}", m(&[("a", 1)])), r#"{"a": 1}"#);
    }
}
