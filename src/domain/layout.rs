//! Document layout snapshot
//!
//! A [`Layout`] is the opaque document snapshot handed to the storage
//! transport. The orchestrator only needs three things from it: a shallow
//! merge with caller overrides, an emptiness check and a stable JSON
//! rendering. Everything else about its shape belongs to the format's export
//! function and to the layout mapper.

use super::errors::ExportError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document layout snapshot (a JSON object)
///
/// Keys are kept in sorted order, so [`Layout::to_json`] is stable for equal
/// layouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(Map<String, Value>);

impl Layout {
    /// Creates an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a layout from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialization`] for malformed JSON and
    /// [`ExportError::Validation`] when the document is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    /// Returns `true` when the layout has no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a top-level entry
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts or replaces a top-level entry
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Mutable access to the underlying JSON object
    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// Returns a new layout with `overrides` shallow-merged on top of `self`.
    ///
    /// Top-level keys from `overrides` replace those of `self`; nested values
    /// are not merged. `self` is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use layout_export::domain::Layout;
    /// use serde_json::json;
    ///
    /// let current = Layout::try_from(json!({"a": "b"})).unwrap();
    /// let overrides = Layout::try_from(json!({"foo": "bar"})).unwrap();
    ///
    /// let merged = current.merged(&overrides);
    /// assert_eq!(merged.to_json().unwrap(), r#"{"a":"b","foo":"bar"}"#);
    /// assert_eq!(current, Layout::try_from(json!({"a": "b"})).unwrap());
    /// ```
    pub fn merged(&self, overrides: &Layout) -> Layout {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        Layout(merged)
    }

    /// Serializes the layout as compact JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Map<String, Value>> for Layout {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Layout {
    type Error = ExportError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ExportError::Validation(format!(
                "Layout must be a JSON object, got: {other}"
            ))),
        }
    }
}

impl From<Layout> for Value {
    fn from(layout: Layout) -> Self {
        Value::Object(layout.0)
    }
}
