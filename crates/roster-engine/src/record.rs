//! The record abstraction the engine operates on.
//!
//! A [`Record`] is a structural mapping from field name to [`Value`]. The
//! engine never learns what a record means (member, player, tournament); it
//! only asks for fields by name.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::value::{FieldValue, Number, Value};

/// One row of a listing.
///
/// Implementations must expose the same set of field names for every record
/// within one collection.
///
/// This trait is usually derived with `#[derive(Record)]` from
/// `roster-macros`, but it is easy to implement by hand:
///
/// ```
/// use roster_engine::{Record, Value};
///
/// struct District {
///     name: String,
///     clubs: u32,
/// }
///
/// impl Record for District {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::from(self.name.as_str()),
///             "clubs" => Value::Number(self.clubs.into()),
///             _ => Value::None,
///         }
///     }
///
///     fn field_names(&self) -> Vec<&str> {
///         vec!["name", "clubs"]
///     }
/// }
///
/// let d = District { name: "Warangal".into(), clubs: 14 };
/// assert_eq!(d.field("clubs").to_string(), "14");
/// assert_eq!(d.field("unknown"), Value::None);
/// ```
pub trait Record {
    /// Returns the raw stored value of a field, or [`Value::None`] if the
    /// record has no such field.
    fn field(&self, name: &str) -> Value<'_>;

    /// Returns the names of all fields this record exposes.
    fn field_names(&self) -> Vec<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        (**self).field_names()
    }
}

impl Record for BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, FieldValue::as_value)
    }

    fn field_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl<S: BuildHasher> Record for HashMap<String, FieldValue, S> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::None, FieldValue::as_value)
    }

    fn field_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

/// A dynamically shaped record, as decoded from a JSON listing response.
///
/// ```
/// use roster_engine::{Record, Row};
///
/// let row: Row = serde_json::from_str(r#"{"name": "Player A", "age": 17}"#).unwrap();
/// assert_eq!(row.field("name").to_string(), "Player A");
/// assert_eq!(row.field_names(), vec!["age", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, FieldValue>);

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row::default()
    }

    /// Adds a field, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(field.into(), value.into())
    }

    /// Returns the stored value of a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Iterates over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the row, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, FieldValue> {
        self.0
    }
}

impl Record for Row {
    fn field(&self, name: &str) -> Value<'_> {
        self.0.field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        self.0.field_names()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row(iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

impl From<BTreeMap<String, FieldValue>> for Row {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        Row(map)
    }
}

/// Conversion from a struct field into a [`Value`].
///
/// `#[derive(Record)]` calls this for every non-skipped field, so any field
/// type used in a derived record must implement it.
pub trait ToValue {
    /// Borrows the field as a value.
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self.as_str()))
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self.as_ref()))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! number_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_to_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ToValue for Number {
    fn to_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl ToValue for FieldValue {
    fn to_value(&self) -> Value<'_> {
        self.as_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::None, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}
