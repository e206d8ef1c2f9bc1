//! Owning handles stored as map values.
//!
//! A value that owns an external resource implements [`Release`]. The map
//! never releases anything on its own initiative beyond ordinary drop;
//! `Map::release_all` is the explicit bulk form that drains the map and
//! releases each value exactly once.

use std::rc::Rc;
use std::sync::Arc;

/// A value that owns a resource which can be given back.
pub trait Release {
    /// Consume the handle and release what it owns.
    fn release(self);
}

impl<T: ?Sized> Release for Box<T> {
    #[inline]
    fn release(self) {
        drop(self);
    }
}

impl<T: ?Sized> Release for Rc<T> {
    #[inline]
    fn release(self) {
        drop(self);
    }
}

impl<T: ?Sized> Release for Arc<T> {
    #[inline]
    fn release(self) {
        drop(self);
    }
}

impl<R: Release> Release for Option<R> {
    #[inline]
    fn release(self) {
        if let Some(r) = self {
            r.release();
        }
    }
}
