//! crates/logging/src/field.rs
//! Typed key/value context attached to log entries.

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use serde_json::{Map, Number, Value};

/// Value carried by a [`Field`].
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// UTF-8 text.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number. Non-finite values are encoded as strings.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Elapsed time, encoded in fractional seconds.
    Duration(Duration),
    /// Rendered error message.
    Error(String),
}

/// One structured key/value pair.
///
/// # Examples
///
/// ```
/// use logging::Field;
///
/// let fields = [Field::string("user", "ada"), Field::int("attempt", 3)];
/// assert_eq!(fields[0].key(), "user");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: Cow<'static, str>,
    value: FieldValue,
}

impl Field {
    /// Builds a field from any key and value.
    pub fn new(key: impl Into<Cow<'static, str>>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Text field.
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    /// Signed integer field.
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    /// Unsigned integer field.
    pub fn uint(key: impl Into<Cow<'static, str>>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint(value))
    }

    /// Floating point field.
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    /// Boolean field.
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    /// Duration field.
    pub fn duration(key: impl Into<Cow<'static, str>>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    /// Field holding the `Display` rendering of `value`.
    pub fn display(key: impl Into<Cow<'static, str>>, value: &dyn fmt::Display) -> Self {
        Self::string(key, value.to_string())
    }

    /// Field holding the `Debug` rendering of `value`.
    pub fn debug(key: impl Into<Cow<'static, str>>, value: &dyn fmt::Debug) -> Self {
        Self::string(key, format!("{value:?}"))
    }

    /// Error field under the conventional `error` key.
    pub fn error(err: &dyn std::error::Error) -> Self {
        Self::named_error("error", err)
    }

    /// Error field under a custom key.
    pub fn named_error(key: impl Into<Cow<'static, str>>, err: &dyn std::error::Error) -> Self {
        Self::new(key, FieldValue::Error(err.to_string()))
    }

    /// Field key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Field value.
    #[must_use]
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    fn json_value(&self) -> Value {
        match &self.value {
            FieldValue::String(s) | FieldValue::Error(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Uint(u) => Value::from(*u),
            FieldValue::Float(f) => Number::from_f64(*f)
                .map_or_else(|| Value::String(f.to_string()), Value::Number),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Duration(d) => Number::from_f64(d.as_secs_f64())
                .map_or_else(|| Value::String(format!("{d:?}")), Value::Number),
        }
    }
}

/// Encodes `fields` as one JSON object, later keys overriding earlier ones.
///
/// Returns `None` when there is nothing to encode.
pub(crate) fn encode_fields<'a, I>(fields: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Field>,
{
    let mut map = Map::new();
    for field in fields {
        map.insert(field.key().to_owned(), field.json_value());
    }
    if map.is_empty() {
        return None;
    }
    serde_json::to_string(&Value::Object(map)).ok()
}
