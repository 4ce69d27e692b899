//! Canonical label values and their order-independent serialization.
//!
//! A [`Label`] is the content a vertex is keyed by. Equality of labels is
//! defined purely by their canonical serialization: two labels with the same
//! canonical string are the same identity everywhere in the library, no
//! matter how the in-memory values were constructed.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

use crate::errors::GravaError;

/// A structured value usable as vertex content.
///
/// Mappings are stored in a [`BTreeMap`], so key order is normalized at
/// construction and canonical serialization is order-independent for free.
/// Numbers are [`serde_json::Number`], which keeps integers exact and admits
/// only finite floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// The absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A finite number (integer or float).
    Number(Number),
    /// A string.
    Text(String),
    /// An ordered sequence of labels.
    Sequence(Vec<Label>),
    /// A string-keyed mapping, sorted lexicographically by key.
    Mapping(BTreeMap<String, Label>),
}

impl Label {
    /// Bridges an arbitrary serializable value into the label model.
    ///
    /// Custom caller types supply their own canonical form through their
    /// [`Serialize`] implementation. Fails with the `Serialization` family
    /// when the value cannot be represented (serializer error, non-string
    /// map key).
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, GravaError> {
        let value = serde_json::to_value(value).map_err(|err| {
            GravaError::serialization("unserializable-label", err.to_string())
        })?;
        Ok(Self::from_value(value))
    }

    /// Converts a JSON value into a label, normalizing mapping key order.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Label::Null,
            Value::Bool(flag) => Label::Bool(flag),
            Value::Number(number) => Label::Number(number),
            Value::String(text) => Label::Text(text),
            Value::Array(items) => {
                Label::Sequence(items.into_iter().map(Label::from_value).collect())
            }
            Value::Object(entries) => Label::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Label::from_value(value)))
                    .collect(),
            ),
        }
    }

    /// Converts the label back into a JSON value with sorted mapping keys.
    pub fn to_value(&self) -> Value {
        match self {
            Label::Null => Value::Null,
            Label::Bool(flag) => Value::Bool(*flag),
            Label::Number(number) => Value::Number(number.clone()),
            Label::Text(text) => Value::String(text.clone()),
            Label::Sequence(items) => Value::Array(items.iter().map(Label::to_value).collect()),
            Label::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }

    /// Creates a numeric label from a float, rejecting non-finite values.
    pub fn from_f64(value: f64) -> Result<Self, GravaError> {
        Number::from_f64(value).map(Label::Number).ok_or_else(|| {
            GravaError::serialization(
                "non-finite-number",
                "labels admit only finite numeric values",
            )
            .with_context("value", value)
        })
    }

    /// Returns the canonical serialization of this label.
    ///
    /// Compact JSON with lexicographically sorted mapping keys. This string
    /// is the sole notion of label identity in the library.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Label::Null => out.push_str("null"),
            Label::Bool(true) => out.push_str("true"),
            Label::Bool(false) => out.push_str("false"),
            Label::Number(number) => out.push_str(&number.to_string()),
            Label::Text(text) => write_escaped(text, out),
            Label::Sequence(items) => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push(',');
                    }
                    item.write_canonical(out);
                }
                out.push(']');
            }
            Label::Mapping(entries) => {
                out.push('{');
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        out.push(',');
                    }
                    write_escaped(key, out);
                    out.push(':');
                    value.write_canonical(out);
                }
                out.push('}');
            }
        }
    }
}

/// Returns whether a value can be represented as a [`Label`].
///
/// Agrees exactly with [`Label::from_serialize`]: true iff canonicalization
/// would succeed.
pub fn is_serializable<T: Serialize>(value: &T) -> bool {
    Label::from_serialize(value).is_ok()
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        Label::Bool(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Number(Number::from(value))
    }
}

impl From<u64> for Label {
    fn from(value: u64) -> Self {
        Label::Number(Number::from(value))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<Vec<Label>> for Label {
    fn from(value: Vec<Label>) -> Self {
        Label::Sequence(value)
    }
}

impl From<BTreeMap<String, Label>> for Label {
    fn from(value: BTreeMap<String, Label>) -> Self {
        Label::Mapping(value)
    }
}

fn write_escaped(text: &str, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}
