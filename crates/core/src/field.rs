//! Field schema: typed, positioned fields on blueprints and contracts.

use serde::{Deserialize, Serialize};
use time::macros::format_description;

use crate::error::ValidationError;
use crate::id::new_id;

/// Position a new field is placed at when none is given.
pub const DEFAULT_POSITION: FieldPosition = FieldPosition { x: 50.0, y: 50.0 };

/// The input kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Date,
    Checkbox,
    Signature,
}

impl FieldType {
    pub const ALL: [FieldType; 4] = [
        FieldType::Text,
        FieldType::Date,
        FieldType::Checkbox,
        FieldType::Signature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Checkbox => "checkbox",
            FieldType::Signature => "signature",
        }
    }

    /// The value a freshly snapshotted contract field starts with.
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldType::Checkbox => FieldValue::Flag(false),
            FieldType::Text | FieldType::Date | FieldType::Signature => {
                FieldValue::Text(String::new())
            }
        }
    }

    /// Check that `value` fits this field type.
    ///
    /// Checkboxes hold booleans, everything else holds strings. A date
    /// may be empty (not filled in yet) or a `YYYY-MM-DD` calendar date.
    pub fn check_value(&self, field_id: &str, value: &FieldValue) -> Result<(), ValidationError> {
        match (self, value) {
            (FieldType::Checkbox, FieldValue::Flag(_)) => Ok(()),
            (FieldType::Text | FieldType::Signature, FieldValue::Text(_)) => Ok(()),
            (FieldType::Date, FieldValue::Text(s)) => {
                if s.is_empty() || is_calendar_date(s) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidDate {
                        field_id: field_id.to_string(),
                        value: s.clone(),
                    })
                }
            }
            _ => Err(ValidationError::ValueTypeMismatch {
                field_id: field_id.to_string(),
                expected: *self,
            }),
        }
    }
}

fn is_calendar_date(s: &str) -> bool {
    time::Date::parse(s, format_description!("[year]-[month]-[day]")).is_ok()
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form layout coordinate. Not checked against any canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPosition {
    pub x: f64,
    pub y: f64,
}

impl FieldPosition {
    /// Both coordinates are finite, so they survive a JSON round trip.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for FieldPosition {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}

/// A field declared on a blueprint.
///
/// The `id` is assigned once when the field is created and is carried
/// unchanged into every contract snapshot taken from the blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub position: FieldPosition,
}

impl BlueprintField {
    /// Create a field with a fresh id at [`DEFAULT_POSITION`].
    pub fn new(label: impl Into<String>, field_type: FieldType) -> Result<Self, ValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::MissingFieldLabel);
        }
        Ok(BlueprintField {
            id: new_id(),
            label,
            field_type,
            position: DEFAULT_POSITION,
        })
    }

    pub fn at(mut self, position: FieldPosition) -> Self {
        self.position = position;
        self
    }
}

/// A filled-in value. Serialized untagged: a plain JSON string or boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// A contract's copy of a blueprint field plus its current value.
///
/// This is a snapshot: later edits to the blueprint do not reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub position: FieldPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

impl ContractField {
    /// Copy a blueprint field and give it the default value for its type.
    pub fn snapshot(field: &BlueprintField) -> Self {
        ContractField {
            id: field.id.clone(),
            label: field.label.clone(),
            field_type: field.field_type,
            position: field.position,
            value: Some(field.field_type.default_value()),
        }
    }
}
