use serde_json::{Map, Value};

use super::{Field, FieldKind, Schema};

const ROOT_PATH: &str = "<root>";

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path, e.g. `formats.1` or `headers.X-Token`
    pub path: String,
    pub message: String,
}

/// Every violation found in one input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Input validation failed:{}", format_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<Violation>,
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("\n{}: {}", violation.path, violation.message))
        .collect()
}

impl SchemaError {
    fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    /// Typed conversion failed after the schema accepted the input.
    pub fn from_serde(error: serde_json::Error) -> Self {
        Self::single(ROOT_PATH, error.to_string())
    }
}

impl Schema {
    /// Validate `input`, returning an object that holds only declared fields with
    /// defaults filled in.
    ///
    /// Every field is checked; the error carries all violations, not just the first.
    pub fn validate(&self, input: &Value) -> Result<Value, SchemaError> {
        let object = match input {
            Value::Object(object) => object,
            other => {
                return Err(SchemaError::single(
                    ROOT_PATH,
                    format!("Expected object, received {}", type_name(other)),
                ));
            }
        };

        let mut output = Map::new();
        let mut violations = Vec::new();

        for field in self.fields() {
            match object.get(field.name).filter(|value| !value.is_null()) {
                Some(value) => {
                    let before = violations.len();
                    check_value(field, value, field.name, &mut violations);
                    if violations.len() == before {
                        output.insert(field.name.to_string(), normalize(field, value));
                    }
                }
                None => {
                    if let Some(default) = &field.default {
                        output.insert(field.name.to_string(), default.clone());
                    } else if field.required {
                        violations.push(Violation {
                            path: field.name.to_string(),
                            message: "Required".to_string(),
                        });
                    }
                }
            }
        }

        for key in object.keys() {
            if !self.fields().iter().any(|field| field.name == key.as_str()) {
                log::debug!("Ignoring unknown parameter '{key}'");
            }
        }

        if violations.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(SchemaError { violations })
        }
    }
}

fn check_value(field: &Field, value: &Value, path: &str, violations: &mut Vec<Violation>) {
    let mut reject = |path: String, message: String| violations.push(Violation { path, message });

    match &field.kind {
        FieldKind::String => {
            if !value.is_string() {
                reject(path.to_string(), expected("string", value));
            }
        }
        FieldKind::Url => match value.as_str() {
            Some(raw) if is_absolute_url(raw) => {}
            Some(_) => reject(path.to_string(), "Invalid url".to_string()),
            None => reject(path.to_string(), expected("string", value)),
        },
        FieldKind::Boolean => {
            if !value.is_boolean() {
                reject(path.to_string(), expected("boolean", value));
            }
        }
        FieldKind::Integer { min } => match as_integer(value) {
            Some(number) if number < *min => reject(path.to_string(), below_minimum(*min)),
            Some(_) => {}
            None if value.is_number() => {
                reject(path.to_string(), "Expected integer, received float".to_string())
            }
            None => reject(path.to_string(), expected("integer", value)),
        },
        FieldKind::StringList => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        reject(format!("{path}.{index}"), expected("string", item));
                    }
                }
            }
            None => reject(path.to_string(), expected("array", value)),
        },
        FieldKind::EnumList {
            variants,
            non_empty,
        } => match value.as_array() {
            Some(items) => {
                if *non_empty && items.is_empty() {
                    reject(
                        path.to_string(),
                        "Array must contain at least 1 element(s)".to_string(),
                    );
                }
                for (index, item) in items.iter().enumerate() {
                    match item.as_str() {
                        Some(s) if variants.iter().any(|v| *v == s) => {}
                        Some(s) => reject(format!("{path}.{index}"), invalid_enum(variants, s)),
                        None => reject(format!("{path}.{index}"), expected("string", item)),
                    }
                }
            }
            None => reject(path.to_string(), expected("array", value)),
        },
        FieldKind::StringMap => match value.as_object() {
            Some(entries) => {
                for (key, entry) in entries {
                    if !entry.is_string() {
                        reject(format!("{path}.{key}"), expected("string", entry));
                    }
                }
            }
            None => reject(path.to_string(), expected("object", value)),
        },
    }
}

fn is_absolute_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok_and(|parsed| parsed.has_host())
}

/// Integer value of `value`; floats count only with no fractional part.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
        _ => None,
    }
}

/// Accepted value as stored in the output; whole floats become integers.
fn normalize(field: &Field, value: &Value) -> Value {
    match (&field.kind, value) {
        (FieldKind::Integer { .. }, Value::Number(number)) if number.is_f64() => {
            as_integer(value).map(Value::from).unwrap_or_else(|| value.clone())
        }
        _ => value.clone(),
    }
}

fn below_minimum(min: i64) -> String {
    match min {
        1 => "Number must be greater than 0".to_string(),
        _ => format!("Number must be greater than or equal to {min}"),
    }
}

fn invalid_enum(variants: &[&str], received: &str) -> String {
    let expected = variants
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("Invalid enum value. Expected {expected}, received '{received}'")
}

fn expected(kind: &str, received: &Value) -> String {
    format!("Expected {kind}, received {}", type_name(received))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
