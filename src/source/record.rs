//! Key/value record parsing for block bodies.

use nagwatch_types::Value;

/// One parsed line: the lower-cased key, the trimmed source text of the value
/// and its coerced form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub raw: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            key: key.into(),
            value: Value::coerce(raw),
            raw: raw.to_string(),
        }
    }
}

/// Ordered key/value pairs parsed from one block body.
///
/// Keys are lower-cased; values are coerced with [`Value::coerce`] and the
/// source text is kept alongside. No schema is applied here, unknown keys are
/// kept as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Parse a block body using `delimiter` between key and value.
    ///
    /// Blank lines and lines starting with `#` are skipped. Each remaining line
    /// is split at the first delimiter; a line without one becomes a key with
    /// an empty value.
    pub fn parse(body: &str, delimiter: char) -> Self {
        let fields = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                let (key, value) = line.split_once(delimiter).unwrap_or((line, ""));
                Field::new(key.trim().to_lowercase(), value)
            })
            .collect();
        Self { fields }
    }

    /// Value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.field(key).map(|f| &f.value)
    }

    /// The first field named `key`, including its source text.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|f| (f.key.as_str(), &f.value))
    }
}

impl IntoIterator for Record {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
