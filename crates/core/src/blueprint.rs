//! Blueprints: reusable contract templates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{RecordKind, ValidationError};
use crate::field::{BlueprintField, ContractField};
use crate::id::new_id;
use crate::timestamp::Timestamp;

/// A named, ordered set of typed fields that contracts are created from.
///
/// Invariant: field ids are unique within the blueprint. Name and fields
/// are replaced wholesale on edit; `id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub fields: Vec<BlueprintField>,
    pub created_at: Timestamp,
}

impl Blueprint {
    /// Build a new blueprint with a fresh id, stamped now.
    pub fn new(name: impl Into<String>, fields: Vec<BlueprintField>) -> Result<Self, ValidationError> {
        let blueprint = Blueprint {
            id: new_id(),
            name: name.into(),
            fields,
            created_at: Timestamp::now(),
        };
        blueprint.validate()?;
        Ok(blueprint)
    }

    /// Check the blueprint invariants: a non-blank name, labelled fields
    /// at finite positions, and no two fields sharing an id.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName {
                kind: RecordKind::Blueprint,
            });
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.label.trim().is_empty() {
                return Err(ValidationError::MissingFieldLabel);
            }
            if !field.position.is_finite() {
                return Err(ValidationError::InvalidPosition {
                    field_id: field.id.clone(),
                });
            }
            if !seen.insert(field.id.as_str()) {
                return Err(ValidationError::DuplicateFieldId {
                    field_id: field.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn field(&self, field_id: &str) -> Option<&BlueprintField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Append a field, keeping field ids unique.
    pub fn add_field(&mut self, field: BlueprintField) -> Result<(), ValidationError> {
        if self.field(&field.id).is_some() {
            return Err(ValidationError::DuplicateFieldId { field_id: field.id });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Remove a field by id, returning it if it was present.
    pub fn remove_field(&mut self, field_id: &str) -> Option<BlueprintField> {
        let pos = self.fields.iter().position(|f| f.id == field_id)?;
        Some(self.fields.remove(pos))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Copy every field into a contract field carrying its default value.
    pub fn snapshot_fields(&self) -> Vec<ContractField> {
        self.fields.iter().map(ContractField::snapshot).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldPosition, FieldType, FieldValue};

    #[test]
    fn new_requires_a_name() {
        let err = Blueprint::new("   ", vec![]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingName {
                kind: RecordKind::Blueprint
            }
        );
    }

    #[test]
    fn duplicate_field_ids_are_rejected() {
        let f = BlueprintField::new("Signer", FieldType::Text).unwrap();
        let err = Blueprint::new("NDA", vec![f.clone(), f.clone()]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateFieldId { field_id: f.id });
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let f = BlueprintField::new("Signer", FieldType::Text)
                .unwrap()
                .at(FieldPosition { x: bad, y: 10.0 });
            let err = Blueprint::new("NDA", vec![f.clone()]).unwrap_err();
            assert_eq!(err, ValidationError::InvalidPosition { field_id: f.id });
        }

        let mut bp = Blueprint::new("NDA", vec![]).unwrap();
        bp.fields.push(
            BlueprintField::new("Date", FieldType::Date)
                .unwrap()
                .at(FieldPosition { x: 0.0, y: f64::NAN }),
        );
        assert!(matches!(
            bp.validate(),
            Err(ValidationError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn add_and_remove_fields() {
        let mut bp = Blueprint::new("NDA", vec![]).unwrap();
        let f = BlueprintField::new("Signer", FieldType::Signature).unwrap();
        let id = f.id.clone();
        bp.add_field(f.clone()).unwrap();
        assert!(bp.add_field(f).is_err());
        assert_eq!(bp.fields.len(), 1);
        assert_eq!(bp.remove_field(&id).map(|f| f.label), Some("Signer".to_string()));
        assert!(bp.remove_field(&id).is_none());
    }

    #[test]
    fn snapshot_preserves_order_and_ids() {
        let a = BlueprintField::new("Agree", FieldType::Checkbox).unwrap();
        let b = BlueprintField::new("Start", FieldType::Date).unwrap();
        let bp = Blueprint::new("Lease", vec![a.clone(), b.clone()]).unwrap();
        let snap = bp.snapshot_fields();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0].id, a.id);
        assert_eq!(snap[0].value, Some(FieldValue::Flag(false)));
        assert_eq!(snap[1].id, b.id);
        assert_eq!(snap[1].value, Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let bp = Blueprint::new("NDA", vec![]).unwrap();
        let json = serde_json::to_value(&bp).unwrap();
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["name"], "NDA");
        assert_eq!(json["fields"], serde_json::json!([]));
    }
}
