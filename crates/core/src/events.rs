//! Event shapes recognized by partition key derivation.
//!
//! Events arrive as arbitrary JSON. Rather than probing the value at every
//! decision point, it is classified once into [`Event`], a closed set of
//! shapes that the deriver matches on exhaustively.

use serde_json::{Map, Value};

use crate::limits::PARTITION_KEY_FIELD;

/// The shape of an event, borrowed from its JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// `null`, `false`, numeric zero, or the empty string.
    Absent,
    /// A non-empty string.
    Text(&'a str),
    /// A non-zero number.
    Number,
    /// The boolean `true`.
    Boolean,
    /// An array (empty arrays included).
    List,
    /// A mapping whose `partitionKey` field is truthy.
    Keyed {
        record: &'a Map<String, Value>,
        partition_key: &'a Value,
    },
    /// A mapping without a usable `partitionKey`.
    Record(&'a Map<String, Value>),
}

impl<'a> Event<'a> {
    /// Classifies a JSON value.
    pub fn classify(value: &'a Value) -> Self {
        if !is_truthy(value) {
            return Self::Absent;
        }

        match value {
            Value::Null => Self::Absent,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(text) => Self::Text(text),
            Value::Array(_) => Self::List,
            Value::Object(record) => match record.get(PARTITION_KEY_FIELD) {
                Some(partition_key) if is_truthy(partition_key) => Self::Keyed {
                    record,
                    partition_key,
                },
                _ => Self::Record(record),
            },
        }
    }

    /// Returns a short name for the shape, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Keyed { .. } => "keyed",
            Self::Record(_) => "record",
        }
    }
}

/// Returns whether a JSON value counts as present.
///
/// `null`, `false`, zero (either sign), and `""` are falsy. Empty arrays and
/// empty objects are truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
