//! Data-described parameter schemas.
//!
//! A [`Schema`] is an ordered list of [`Field`]s. The same description drives
//! input validation (see [`Schema::validate`]) and the JSON Schema advertised
//! to MCP clients (see [`Schema::to_json_schema`]).

mod validate;

use serde_json::{json, Map, Value};

pub use validate::{SchemaError, Violation};

/// Shape and refinement of a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    /// Absolute URL: must carry a scheme and a host
    Url,
    Boolean,
    /// Integer no smaller than `min`
    Integer { min: i64 },
    StringList,
    EnumList {
        variants: &'static [&'static str],
        non_empty: bool,
    },
    /// Object whose values are all strings
    StringMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl Field {
    pub fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            description,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::String, description)
    }

    pub fn url(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Url, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean, description)
    }

    pub fn integer(name: &'static str, min: i64, description: &'static str) -> Self {
        Self::new(name, FieldKind::Integer { min }, description)
    }

    pub fn string_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::StringList, description)
    }

    pub fn enum_list(
        name: &'static str,
        variants: &'static [&'static str],
        description: &'static str,
    ) -> Self {
        Self::new(
            name,
            FieldKind::EnumList {
                variants,
                non_empty: false,
            },
            description,
        )
    }

    pub fn string_map(name: &'static str, description: &'static str) -> Self {
        Self::new(name, FieldKind::StringMap, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Require at least one element (enum lists only).
    pub fn non_empty(mut self) -> Self {
        if let FieldKind::EnumList { non_empty, .. } = &mut self.kind {
            *non_empty = true;
        }
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = match &self.kind {
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Url => json!({ "type": "string", "format": "uri" }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::Integer { min } => json!({ "type": "integer", "minimum": min }),
            FieldKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
            FieldKind::EnumList {
                variants,
                non_empty,
            } => {
                let mut list = json!({
                    "type": "array",
                    "items": { "type": "string", "enum": variants },
                });
                if *non_empty {
                    list["minItems"] = json!(1);
                }
                list
            }
            FieldKind::StringMap => {
                json!({ "type": "object", "additionalProperties": { "type": "string" } })
            }
        };

        schema["description"] = Value::String(self.description.to_string());
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Ordered field list describing a tool's parameters
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// JSON Schema object for `tools/list`
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.to_string(), field.json_schema()))
            .collect();

        let required: Vec<Value> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| Value::String(field.name.to_string()))
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }
}
