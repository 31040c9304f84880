//! Presence-aware fields for partial updates
//!
//! A JSON update body has three states per field: the key is absent, the key
//! is `null`, or the key carries a value. `Option<T>` folds the first two
//! together, so update payloads use [`Patch<T>`] with `#[serde(default)]`.

use crate::error::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Tri-state field of an update payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Key absent, leave the stored field alone
    #[default]
    Missing,
    /// Explicit `null`, clear the stored field
    Null,
    /// New value
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// The new value, if one was supplied
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(f(v)),
        }
    }

    /// Reject an explicit `null` for a field that cannot be cleared.
    pub fn require_not_null(&self, field: &str) -> Result<(), AppError> {
        match self {
            Patch::Null => Err(AppError::validation(format!("{} cannot be null", field))
                .with_detail("field", field)),
            _ => Ok(()),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only called when the key is present; absence is handled by `#[serde(default)]`
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Value(v) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

/// Sparse document of fields to merge into a stored record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchDoc(Map<String, Value>);

impl PatchDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a patch field into the document unless it is missing
    pub fn field<T: Serialize>(mut self, key: &str, patch: &Patch<T>) -> Self {
        match patch {
            Patch::Missing => {}
            Patch::Null => {
                self.0.insert(key.to_string(), Value::Null);
            }
            Patch::Value(v) => {
                self.0.insert(key.to_string(), to_value(v));
            }
        }
        self
    }

    /// Unconditionally set a field
    pub fn set(mut self, key: &str, value: impl Serialize) -> Self {
        self.0.insert(key.to_string(), to_value(&value));
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

// Plain data (strings, numbers, unit enums) never fails to convert
fn to_value<T: Serialize + ?Sized>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}
