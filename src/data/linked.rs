//! Entities viewed together with the snapshot that owns them.

use std::fmt;
use std::ops::Deref;

use super::list::Named;
use super::nag::Nag;

/// An entity borrowed alongside its owning [`Nag`].
///
/// Entities store no references to each other; relationships (a host's
/// services, a group's members) are resolved by name through the root. A
/// `Linked` carries the root so those relationships read as methods on the
/// entity. It dereferences to the entity itself.
pub struct Linked<'a, T> {
    nag: &'a Nag,
    entity: &'a T,
}

impl<'a, T> Linked<'a, T> {
    pub(crate) fn new(nag: &'a Nag, entity: &'a T) -> Self {
        Self { nag, entity }
    }

    /// The snapshot this entity belongs to.
    pub fn nag(&self) -> &'a Nag {
        self.nag
    }

    /// The entity, with the snapshot's lifetime.
    pub fn get(&self) -> &'a T {
        self.entity
    }

    /// Whether both views point at the same entity instance.
    pub fn same(&self, other: &Linked<'_, T>) -> bool {
        std::ptr::eq(self.entity, other.entity)
    }
}

impl<T> Clone for Linked<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Linked<'_, T> {}

impl<T> Deref for Linked<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.entity
    }
}

impl<T: fmt::Debug> fmt::Debug for Linked<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity.fmt(f)
    }
}

impl<T> PartialEq for Linked<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<T> Eq for Linked<'_, T> {}

impl<T: Named> Named for Linked<'_, T> {
    const KIND: &'static str = T::KIND;

    fn name(&self) -> &str {
        self.entity.name()
    }
}
