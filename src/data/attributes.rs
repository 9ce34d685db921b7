//! Attribute storage shared by every entity.

use nagwatch_types::Value;
use tracing::warn;

use crate::source::{Field, Record};

/// Ordered side bag for fields that have no typed slot on an entity.
///
/// Inserting an existing key replaces its value in place, so the order is the
/// order in which keys were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Something materialized from snapshot records.
///
/// Known keys populate typed fields; everything else goes to the entity's
/// [`Attributes`] bag. Nothing is ever rejected.
pub trait Entity {
    /// Apply one parsed field.
    ///
    /// Typed string fields take [`Field::raw`] so names keep their exact text.
    fn set_attribute(&mut self, field: Field);

    /// Flat listing of typed fields followed by side-bag fields.
    ///
    /// Nested collections and links to other entities are not included.
    fn attributes(&self) -> Vec<(&str, Value)>;

    /// Apply every field of a record, in order.
    fn apply(&mut self, record: Record) {
        for field in record {
            self.set_attribute(field);
        }
    }
}

/// Store `value` in an integer field, or in the side bag if it is not numeric.
pub(crate) fn set_int(
    kind: &'static str,
    slot: &mut i64,
    extra: &mut Attributes,
    key: String,
    value: Value,
) {
    match value.as_i64() {
        Some(i) => *slot = i,
        None => {
            warn!(kind, key = %key, value = %value, "non-numeric value for typed field");
            extra.insert(key, value);
        }
    }
}
