//! ext-hashmap: a hash map that layers a few operations with pinned-down
//! semantics over a general-purpose table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep hashing, probing and resizing in `hashbrown` and add only
//!   the operations whose semantics need pinning down.
//! - Layers:
//!   - `hashbrown::HashMap<K, V, S>`: storage, delegated to directly.
//!   - `Map<K, V, S>`: value-add layer; lookup-with-default, predicate
//!     removal, take, change-counting unite, subtract, and views.
//!
//! Constraints
//! - No locking and no atomics. `Map` is `Send`/`Sync` whenever the
//!   table is; sharing across threads needs external synchronization
//!   such as `Arc<Mutex<Map<_, _>>>`.
//! - Unique keys by `K: Eq`; no iteration order is promised, and any
//!   mutation may reorder the remaining entries.
//! - Absence is reported through `Option`, `bool`, or a `(V, bool)` pair.
//!   The read-only `Index` on an absent key is a caller bug and panics.
//!
//! Unite semantics
//! - `unite` always writes: for each `(k, v)` of the other map,
//!   `self[k] = v`.
//! - `unite_counted` writes only entries that are absent or hold a value
//!   `!=` the incoming one and returns how many it wrote. Merging the same
//!   map twice reports zero the second time.
//! - `unite_with(other, Some(&mut n))` is the combined form; it adds to
//!   `n` rather than resetting it.
//!
//! Bulk passes
//! - `remove_if`, `unite*`, `subtract*`, `release_all` and the view
//!   builders each make one pass over a table. Passes that mutate hold
//!   `&mut self`, so user code running inside them cannot reach the map.
//!   The view builders hold `&self` and allow nested shared reads.
//! - Predicate removal goes through the table's `retain`, which never
//!   touches a slot after erasing it.
//!
//! Owned resources
//! - Values that own something implement `Release`. Dropping the map
//!   releases them as usual; `release_all` is the explicit draining form
//!   and releases each value exactly once.
//!
//! Notes and non-goals
//! - No custom hashing, collision policy or resize strategy.
//! - Views (`keys`, `keys_as_set`, `values`) are fresh snapshots; later
//!   mutation of the map never shows through them.

mod collab;
mod map;
mod map_proptest;
mod ops;
mod release;

// Public surface
pub use collab::{OrderedSequence, UniqueSet};
pub use map::{InsertError, Map};
pub use release::Release;
