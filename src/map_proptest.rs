#![cfg(test)]

// Model-based property tests for Map kept inside the crate so they can
// reach the table directly.

use crate::map::Map;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink toward earlier keys. Values are
// drawn from a narrow range so counted unites regularly see equal values.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, u8),
    Set(usize, u8),
    Remove(usize),
    Take(usize),
    Value(usize, u8),
    RemoveIf(usize),
    Unite(Vec<(usize, u8)>),
    UniteCounted(Vec<(usize, u8)>),
    Subtract(Vec<usize>),
    Views,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let val = 0u8..4;
        let pairs = proptest::collection::vec((idx.clone(), val.clone()), 0..6);
        let op = prop_oneof![
            (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), val.clone()).prop_map(|(i, v)| Op::Set(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Take),
            (idx.clone(), val.clone()).prop_map(|(i, d)| Op::Value(i, d)),
            (0usize..5).prop_map(Op::RemoveIf),
            pairs.clone().prop_map(Op::Unite),
            pairs.prop_map(Op::UniteCounted),
            proptest::collection::vec(idx.clone(), 0..6).prop_map(Op::Subtract),
            Just(Op::Views),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn build<S: BuildHasher + Default>(pool: &[String], pairs: &[(usize, u8)]) -> Map<Key, u8, S> {
    pairs.iter().map(|&(i, v)| (key_from(pool, i), v)).collect()
}

fn snapshot<S: BuildHasher>(m: &Map<Key, u8, S>) -> BTreeMap<Key, u8> {
    m.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

// Drives one scenario against both Map and a std HashMap model.
//
// Invariants exercised:
// - `insert` never overwrites and reports creation; `set` overwrites.
// - `value` returns the default and `false` for absent keys, no mutation.
// - `take`/`remove` erase exactly the named key and agree with the model.
// - `remove_if` count equals the number of matching keys; no survivor matches.
// - `unite` makes the other map win; `unite_counted` counts exactly the
//   absent-or-different entries and the result equals a plain unite.
// - `subtract` erases exactly the other map's keys.
// - Views have `len()` entries and keys/values align by position.
fn run_scenario<S>(pool: Vec<String>, ops: Vec<Op>) -> Result<(), TestCaseError>
where
    S: BuildHasher + Default + Clone,
{
    let mut sut: Map<Key, u8, S> = Map::default();
    let mut model: HashMap<Key, u8> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = key_from(&pool, i);
                let fresh = !model.contains_key(&k);
                prop_assert_eq!(sut.insert(k.clone(), v), fresh);
                model.entry(k).or_insert(v);
            }
            Op::Set(i, v) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.set(k.clone(), v), model.insert(k, v));
            }
            Op::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(k.0.as_str()), model.remove(&k).is_some());
            }
            Op::Take(i) => {
                let k = key_from(&pool, i);
                let before = sut.len();
                let got = sut.take(&k);
                prop_assert_eq!(got, model.remove(&k));
                prop_assert_eq!(sut.len(), before - usize::from(got.is_some()));
                prop_assert!(!sut.contains_key(&k));
            }
            Op::Value(i, d) => {
                let k = key_from(&pool, i);
                let before = sut.len();
                let expected = match model.get(&k) {
                    Some(&v) => (v, true),
                    None => (d, false),
                };
                prop_assert_eq!(sut.value(&k, d), expected);
                prop_assert_eq!(sut.len(), before);
            }
            Op::RemoveIf(m) => {
                let pred = |k: &Key| k.0.len() % 5 == m;
                let expected = model.keys().filter(|k| pred(*k)).count();
                prop_assert_eq!(sut.remove_if(pred), expected);
                model.retain(|k, _| !pred(k));
                prop_assert!(sut.keys_iter().all(|k| !pred(k)));
            }
            Op::Unite(pairs) => {
                let other: Map<Key, u8, S> = build(&pool, &pairs);
                let other_before = snapshot(&other);
                sut.unite(&other);
                for (k, v) in other.iter() {
                    model.insert(k.clone(), *v);
                }
                prop_assert_eq!(snapshot(&other), other_before);
            }
            Op::UniteCounted(pairs) => {
                let other: Map<Key, u8, S> = build(&pool, &pairs);
                let expected = other
                    .iter()
                    .filter(|(k, v)| model.get(*k) != Some(*v))
                    .count();
                prop_assert_eq!(sut.unite_counted(&other), expected);
                for (k, v) in other.iter() {
                    model.insert(k.clone(), *v);
                }
                // Merging again is a no-op.
                prop_assert_eq!(sut.unite_counted(&other), 0);
            }
            Op::Subtract(idxs) => {
                let other: Map<Key, (), S> =
                    idxs.iter().map(|&i| (key_from(&pool, i), ())).collect();
                sut.subtract(&other);
                for k in other.keys_iter() {
                    model.remove(k);
                }
                prop_assert!(other.keys_iter().all(|k| !sut.contains_key(k)));
            }
            Op::Views => {
                let keys = sut.keys();
                let values = sut.values();
                let set = sut.keys_as_set();
                prop_assert_eq!(keys.len(), sut.len());
                prop_assert_eq!(values.len(), sut.len());
                prop_assert_eq!(set.len(), sut.len());
                for (k, v) in keys.iter().zip(values.iter()) {
                    prop_assert_eq!(sut.get(k), Some(v));
                }
                let from_keys: BTreeSet<_> = keys.into_iter().collect();
                let from_set: BTreeSet<_> = set.into_iter().collect();
                prop_assert_eq!(from_keys, from_set);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let expected: BTreeMap<Key, u8> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(snapshot(&sut), expected);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario::<std::collections::hash_map::RandomState>(pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution
// during unite/subtract/remove_if.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario::<ConstBuildHasher>(pool, ops)?;
    }
}
