//! Destination ontology: canonical field names and their declared types.
//!
//! A [`Schema`] is loaded once from a JSON definition and treated as
//! immutable from then on; the cleaner and mapper borrow it, they never
//! copy or mutate it.
//!
//! The JSON form has a single `fields` section. Each entry is either a bare
//! type tag or an object carrying enum choices:
//!
//! ```json
//! {
//!   "fields": {
//!     "property_id": "float",
//!     "year_ending": "date",
//!     "facility_type": { "type": "enum", "values": ["Commercial", "Residential"] },
//!     "address_line_1": "string"
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Declared type of a destination field.
///
/// `Text` is the default for anything without a typed coercion; the tags
/// `"string"` and `"default"` are accepted as aliases in definitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    #[serde(alias = "string", alias = "default")]
    Text,
    Float,
    Date,
    Bool,
    Enum,
}

/// One field's declaration: type tag plus, for enums, the ordered set of
/// allowed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldDefRepr", into = "FieldDefRepr")]
pub struct FieldDef {
    pub field_type: FieldType,
    pub choices: Vec<String>,
}

impl FieldDef {
    pub fn typed(field_type: FieldType) -> Self {
        Self {
            field_type,
            choices: Vec::new(),
        }
    }

    pub fn enumerated(choices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            field_type: FieldType::Enum,
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

/// Wire form: either a bare tag (`"float"`) or `{"type": ..., "values": [...]}`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldDefRepr {
    Tag(FieldType),
    Full {
        #[serde(rename = "type")]
        field_type: FieldType,
        #[serde(default)]
        values: Vec<String>,
    },
}

impl From<FieldDefRepr> for FieldDef {
    fn from(repr: FieldDefRepr) -> Self {
        match repr {
            FieldDefRepr::Tag(field_type) => FieldDef::typed(field_type),
            FieldDefRepr::Full { field_type, values } => FieldDef {
                field_type,
                choices: values,
            },
        }
    }
}

impl From<FieldDef> for FieldDefRepr {
    fn from(def: FieldDef) -> Self {
        if def.choices.is_empty() {
            FieldDefRepr::Tag(def.field_type)
        } else {
            FieldDefRepr::Full {
                field_type: def.field_type,
                values: def.choices,
            }
        }
    }
}

/// The destination field set for one output dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: BTreeMap<String, FieldDef>,
}

impl Schema {
    pub fn from_fields(fields: BTreeMap<String, FieldDef>) -> Self {
        Self { fields }
    }

    /// Parses a JSON schema definition (see the module docs for the format).
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        serde_json::from_str(text).map_err(ModelError::SchemaDefinition)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields.get(field).map(|def| def.field_type)
    }

    /// Allowed choices for an enum field; `None` for unknown or non-enum fields.
    pub fn enum_choices(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).and_then(|def| {
            (def.field_type == FieldType::Enum).then_some(def.choices.as_slice())
        })
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields_of_type(&self, field_type: FieldType) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(move |(_, def)| def.field_type == field_type)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{
        "fields": {
            "property_id": "float",
            "year_ending": "date",
            "occupied": "bool",
            "facility_type": { "type": "enum", "values": ["Commercial", "Residential"] },
            "address_line_1": "string",
            "name": "default"
        }
    }"#;

    #[test]
    fn parses_tags_and_enum_objects() {
        let schema = Schema::from_json_str(DEFINITION).unwrap();
        assert_eq!(schema.field_type("property_id"), Some(FieldType::Float));
        assert_eq!(schema.field_type("year_ending"), Some(FieldType::Date));
        assert_eq!(schema.field_type("occupied"), Some(FieldType::Bool));
        assert_eq!(schema.field_type("address_line_1"), Some(FieldType::Text));
        assert_eq!(schema.field_type("name"), Some(FieldType::Text));
        assert_eq!(
            schema.enum_choices("facility_type").unwrap(),
            &["Commercial".to_string(), "Residential".to_string()]
        );
        assert_eq!(schema.enum_choices("property_id"), None);
    }

    #[test]
    fn typed_subsets_are_disjoint() {
        let schema = Schema::from_json_str(DEFINITION).unwrap();
        let floats: Vec<&str> = schema.fields_of_type(FieldType::Float).collect();
        let dates: Vec<&str> = schema.fields_of_type(FieldType::Date).collect();
        assert_eq!(floats, vec!["property_id"]);
        assert_eq!(dates, vec!["year_ending"]);
        assert!(floats.iter().all(|f| !dates.contains(f)));
    }

    #[test]
    fn rejects_unknown_type_tag() {
        let result = Schema::from_json_str(r#"{"fields": {"x": "complex"}}"#);
        assert!(result.is_err());
    }
}
