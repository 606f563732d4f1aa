//! Typed views over the API's JSON responses.
//!
//! List endpoints answer with `{"data": [ {...}, ... ]}`. Rather than
//! indexing into `serde_json::Value` and hoping keys exist, responses are
//! unpacked into [`Record`]s whose accessors report a [`ShapeError`] when the
//! payload does not look the way we expect.

use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON response did not have the expected structure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The response was not an object with a `data` array.
    #[error("expected a {{\"data\": [...]}} envelope, got {found}")]
    MissingEnvelope { found: &'static str },
    /// An element of the `data` array was not an object.
    #[error("list element {index} is {found}, expected an object")]
    NotAnObject { index: usize, found: &'static str },
    /// A record lacked a field.
    #[error("record is missing field `{field}`")]
    MissingField { field: String },
    /// A record field held the wrong JSON type.
    #[error("field `{field}` is {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Names the JSON type of a value, for error messages.
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One object from a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw access to a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a string field, failing if it is missing or not a string.
    pub fn str_field(&self, field: &str) -> Result<&str, ShapeError> {
        match self.0.get(field) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(ShapeError::WrongType {
                field: field.to_string(),
                expected: "a string",
                found: kind_of(other),
            }),
            None => Err(ShapeError::MissingField {
                field: field.to_string(),
            }),
        }
    }

    /// Returns a non-negative integer field.
    pub fn u64_field(&self, field: &str) -> Result<u64, ShapeError> {
        let value = self.0.get(field).ok_or_else(|| ShapeError::MissingField {
            field: field.to_string(),
        })?;
        value.as_u64().ok_or_else(|| ShapeError::WrongType {
            field: field.to_string(),
            expected: "an unsigned integer",
            found: kind_of(value),
        })
    }

    /// The record's `id`.
    pub fn id(&self) -> Result<u64, ShapeError> {
        self.u64_field("id")
    }

    /// The record's `name`.
    pub fn name(&self) -> Result<&str, ShapeError> {
        self.str_field("name")
    }

    /// True if `field` is a string equal to `value`, ignoring case.
    ///
    /// Missing or non-string fields never match.
    pub fn field_matches(&self, field: &str, value: &str) -> bool {
        self.str_field(field)
            .is_ok_and(|actual| actual.to_lowercase() == value.to_lowercase())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Unpacks a `{"data": [...]}` list response into records.
pub fn records_from_envelope(response: Value) -> Result<Vec<Record>, ShapeError> {
    let found = kind_of(&response);
    let Value::Object(mut envelope) = response else {
        return Err(ShapeError::MissingEnvelope { found });
    };
    let items = match envelope.remove("data") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) => Vec::new(),
        Some(other) => {
            return Err(ShapeError::MissingEnvelope {
                found: kind_of(&other),
            });
        }
        None => {
            return Err(ShapeError::MissingEnvelope {
                found: "an object without `data`",
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            other => Err(ShapeError::NotAnObject {
                index,
                found: kind_of(&other),
            }),
        })
        .collect()
}

/// Field holding the API's `"<client> - <project>"` name.
pub const CLIENT_PROJECT_FIELD: &str = "client_project_name";

/// A project as returned by the `projects` resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub client_project_name: Option<String>,
}

impl TryFrom<&Record> for Project {
    type Error = ShapeError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let client_project_name = match record.get(CLIENT_PROJECT_FIELD) {
            None | Some(Value::Null) => None,
            Some(_) => Some(record.str_field(CLIENT_PROJECT_FIELD)?.to_string()),
        };
        Ok(Self {
            id: record.id()?,
            name: record.name()?.to_string(),
            client_project_name,
        })
    }
}
