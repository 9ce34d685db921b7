//! Name-keyed ordered collections.

use std::ops::Deref;

use crate::error::{Error, Result};

/// An entity with a lookup name.
pub trait Named {
    /// Kind label used in error messages.
    const KIND: &'static str;

    fn name(&self) -> &str;
}

/// An ordered collection with name lookups.
///
/// Lookups are strict: no match is `Ok(None)`, more than one match is an
/// [`Error::AmbiguousName`]. There is no first-match fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct NagList<T> {
    items: Vec<T>,
}

impl<T> NagList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Named> NagList<T> {
    /// Position of the single item named `name`.
    pub fn position_by_name(&self, name: &str) -> Result<Option<usize>> {
        let mut matches = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.name() == name)
            .map(|(index, _)| index);

        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(index), None) => Ok(Some(index)),
            (Some(_), Some(_)) => Err(Error::ambiguous(T::KIND, name)),
        }
    }

    /// The single item named `name`.
    pub fn by_name(&self, name: &str) -> Result<Option<&T>> {
        Ok(self.position_by_name(name)?.map(|index| &self.items[index]))
    }

    /// All names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name()).collect()
    }
}

impl<T> Default for NagList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for NagList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> FromIterator<T> for NagList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> From<Vec<T>> for NagList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for NagList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a NagList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str);

    impl Named for Item {
        const KIND: &'static str = "item";

        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_first() {
        let list: NagList<Item> = vec![Item("obj1"), Item("obj2")].into();
        assert_eq!(list.first(), Some(&Item("obj1")));
        assert!(NagList::<Item>::new().first().is_none());
    }

    #[test]
    fn test_names_in_order() {
        let list: NagList<Item> = vec![Item("obj1"), Item("obj2")].into();
        assert_eq!(list.names(), vec!["obj1", "obj2"]);
    }

    #[test]
    fn test_by_name() {
        let list: NagList<Item> = vec![Item("obj1"), Item("obj2")].into();
        assert_eq!(list.by_name("obj2").unwrap(), Some(&Item("obj2")));
        assert_eq!(list.position_by_name("obj1").unwrap(), Some(0));
    }

    #[test]
    fn test_by_name_not_found() {
        let list: NagList<Item> = vec![Item("obj1")].into();
        assert!(list.by_name("unknown").unwrap().is_none());
    }

    #[test]
    fn test_by_name_ambiguous() {
        let list: NagList<Item> = vec![Item("same"), Item("other"), Item("same")].into();
        match list.by_name("same") {
            Err(Error::AmbiguousName { kind, name }) => {
                assert_eq!(kind, "item");
                assert_eq!(name, "same");
            }
            other => panic!("expected ambiguous name, got {other:?}"),
        }
        // Unrelated lookups still work
        assert!(list.by_name("other").unwrap().is_some());
    }

    #[test]
    fn test_slice_operations() {
        let mut list = NagList::new();
        list.push(Item("obj1"));
        list.push(Item("obj2"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], Item("obj2"));
        let names: Vec<&str> = list.iter().map(|i| i.0).collect();
        assert_eq!(names, vec!["obj1", "obj2"]);
    }
}
