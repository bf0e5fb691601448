use serde_json::{Map, Value};
use crate::storage::parser::primitive_string;

/// Outcome of validating override JSON: one message per violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Structural checks run on override JSON before it is saved or applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetValidator;

impl DatasetValidator {
    pub fn new() -> Self {
        DatasetValidator
    }

    /// Blank input is valid (it clears the override). Every violation found is
    /// reported, not just the first.
    pub fn validate(&self, json: &str) -> ValidationResult {
        if json.trim().is_empty() {
            return ValidationResult::default();
        }

        let root: Value = match serde_json::from_str(json) {
            Ok(root) => root,
            Err(e) => {
                return ValidationResult { errors: vec![format!("JSON parse error: {e}")] };
            }
        };
        let Some(obj) = root.as_object() else {
            return ValidationResult { errors: vec!["root must be a JSON object".to_string()] };
        };

        let mut errors = Vec::new();
        let has_version = obj.get("version")
            .and_then(primitive_string)
            .is_some_and(|v| !v.trim().is_empty());
        if !has_version {
            errors.push("missing required field: version".to_string());
        }
        match obj.get("meta") {
            None | Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(_) => errors.push("meta must be an object".to_string()),
        }
        validate_array(obj, "terms", "koName", &mut errors);
        validate_array(obj, "words", "koName", &mut errors);
        validate_array(obj, "domains", "name", &mut errors);

        ValidationResult { errors }
    }
}

fn validate_array(obj: &Map<String, Value>, field: &str, required_key: &str, errors: &mut Vec<String>) {
    let items = match obj.get(field) {
        None | Some(Value::Null) => return,
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(format!("{field} must be an array"));
            return;
        }
    };

    for (index, item) in items.iter().enumerate() {
        let Some(element) = item.as_object() else {
            errors.push(format!("{field}[{index}] must be an object"));
            continue;
        };
        let has_key = element.get(required_key)
            .and_then(primitive_string)
            .is_some_and(|v| !v.trim().is_empty());
        if !has_key {
            errors.push(format!("{field}[{index}] is missing required field {required_key}"));
        }
    }
}
