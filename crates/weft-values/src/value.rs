/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime value and template data types.
//!
//! This module defines the value variants the render core operates on and
//! the per-render variable bindings ([`TemplateData`]).
//!
//! **Important**: coercions are strict. A function that requires a boolean
//! does not accept text, and vice versa; mismatches surface as
//! [`DataError`] so the render boundary can classify them distinctly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::error::DataError;

/// A piece of text with an optional declared direction.
///
/// An absent direction means "unknown — estimate from content" (see
/// [`estimate_dir`](crate::estimate_dir)). A declared direction always
/// overrides estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    content: String,
    dir: Option<Dir>,
}

impl TextValue {
    /// Create a text value with no declared direction.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            dir: None,
        }
    }

    /// Create a text value with a declared direction.
    pub fn with_dir(content: impl Into<String>, dir: Dir) -> Self {
        Self {
            content: content.into(),
            dir: Some(dir),
        }
    }

    /// The text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The declared direction, if any.
    pub fn dir(&self) -> Option<Dir> {
        self.dir
    }
}

/// A runtime value.
///
/// This is the slice of the full value lattice the render core consumes;
/// the complete model (numbers, lists, maps, sanitized content kinds)
/// lives with the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A text value, possibly with a declared direction.
    Text(TextValue),

    /// A boolean value.
    Bool(bool),

    /// A null/missing value.
    Null,
}

impl Value {
    /// Create a text value with no declared direction.
    pub fn text(content: impl Into<String>) -> Self {
        Value::Text(TextValue::new(content))
    }

    /// View this value as text.
    ///
    /// Fails with a [`DataError`] for non-text values.
    pub fn as_text(&self) -> Result<&TextValue, DataError> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(DataError::new(format!(
                "expected a text value, got {}",
                other.type_name()
            ))),
        }
    }

    /// Coerce this value to a boolean.
    ///
    /// Fails with a [`DataError`] for non-boolean values.
    pub fn coerce_bool(&self) -> Result<bool, DataError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(DataError::new(format!(
                "expected a boolean value, got {}",
                other.type_name()
            ))),
        }
    }

    /// Render this value as output text.
    ///
    /// - Text: the content as-is
    /// - Bool: "true" or "false"
    /// - Null: ""
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Text(text) => text.content().to_owned(),
            Value::Bool(true) => "true".to_owned(),
            Value::Bool(false) => "false".to_owned(),
            Value::Null => String::new(),
        }
    }

    /// The name of this value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Null => "null",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<TextValue> for Value {
    fn from(text: TextValue) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(content: &str) -> Self {
        Value::text(content)
    }
}

impl From<String> for Value {
    fn from(content: String) -> Self {
        Value::text(content)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = DataError;

    fn try_from(json: &serde_json::Value) -> Result<Self, DataError> {
        match json {
            serde_json::Value::String(s) => Ok(Value::text(s.as_str())),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Null => Ok(Value::Null),
            other => Err(DataError::new(format!(
                "unsupported value in template data: {other}"
            ))),
        }
    }
}

/// Variable bindings for one render.
///
/// Owned by a single render call; renders never share data.
#[derive(Debug, Clone, Default)]
pub struct TemplateData {
    variables: HashMap<String, Value>,
}

impl TemplateData {
    /// Create empty template data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Get a variable binding.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    /// Build template data from a JSON object.
    ///
    /// Fails with a [`DataError`] when the JSON value is not an object or
    /// contains a value the model cannot represent.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, DataError> {
        let object = json
            .as_object()
            .ok_or_else(|| DataError::new("template data must be a JSON object"))?;

        let mut data = Self::new();
        for (key, value) in object {
            data.variables.insert(key.clone(), Value::try_from(value)?);
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_value_dir() {
        assert_eq!(TextValue::new("a").dir(), None);
        assert_eq!(TextValue::with_dir("a", Dir::Rtl).dir(), Some(Dir::Rtl));
    }

    #[test]
    fn test_as_text() {
        let value = Value::text("hello");
        assert_eq!(value.as_text().unwrap().content(), "hello");

        let err = Value::Bool(true).as_text().unwrap_err();
        assert_eq!(err.message(), "expected a text value, got bool");
    }

    #[test]
    fn test_coerce_bool_is_strict() {
        assert!(Value::Bool(true).coerce_bool().unwrap());
        assert!(!Value::Bool(false).coerce_bool().unwrap());

        // Text never coerces to bool, not even "true".
        assert!(Value::text("true").coerce_bool().is_err());
        assert!(Value::Null.coerce_bool().is_err());
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(Value::text("hi").coerce_string(), "hi");
        assert_eq!(Value::Bool(true).coerce_string(), "true");
        assert_eq!(Value::Bool(false).coerce_string(), "false");
        assert_eq!(Value::Null.coerce_string(), "");
    }

    #[test]
    fn test_from_json_object() {
        let json = serde_json::json!({
            "name": "Alice",
            "flag": true,
            "missing": null,
        });
        let data = TemplateData::from_json(&json).unwrap();

        assert_eq!(data.get("name"), Some(&Value::text("Alice")));
        assert_eq!(data.get("flag"), Some(&Value::Bool(true)));
        assert_eq!(data.get("missing"), Some(&Value::Null));
        assert_eq!(data.get("absent"), None);
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(TemplateData::from_json(&serde_json::json!("scalar")).is_err());
        assert!(TemplateData::from_json(&serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_from_json_rejects_unrepresentable_values() {
        let json = serde_json::json!({ "n": 42 });
        let err = TemplateData::from_json(&json).unwrap_err();
        assert!(err.message().contains("unsupported value"));
    }
}
