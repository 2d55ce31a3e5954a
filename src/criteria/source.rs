use std::path::Path;

use serde_json::{Map, Value};

use crate::criteria::aliases::{document_keys, normalize_key};
use crate::criteria::{CriteriaCategory, CriteriaSource, SourceError};

/// Publishes nothing, so every category resolves to its built-in default.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCriteriaSource;

impl CriteriaSource for BuiltinCriteriaSource {
    fn fetch(&self, _category: CriteriaCategory) -> Result<Option<Value>, SourceError> {
        Ok(None)
    }
}

/// Criteria extracted upstream into one JSON document. A document that
/// failed to parse still loads: every category then reports the error.
#[derive(Debug, Clone)]
pub struct JsonCriteriaSource {
    document: Result<Map<String, Value>, String>,
}

impl JsonCriteriaSource {
    pub fn from_value(value: Value) -> Self {
        let document = match value {
            Value::Object(map) => Ok(map),
            other => Err(format!(
                "expected a JSON object at the document root, found {}",
                crate::input::fields::type_name(&other)
            )),
        };
        Self { document }
    }

    pub fn from_json_str(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(e) => Self {
                document: Err(e.to_string()),
            },
        }
    }

    pub fn from_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json_str(&raw),
            Err(e) => Self {
                document: Err(format!("{}: {e}", path.display())),
            },
        }
    }
}

impl CriteriaSource for JsonCriteriaSource {
    fn fetch(&self, category: CriteriaCategory) -> Result<Option<Value>, SourceError> {
        let map = self
            .document
            .as_ref()
            .map_err(|e| SourceError::Parse(e.clone()))?;
        let keys = document_keys(category);
        for (key, value) in map {
            let normalized = normalize_key(key);
            if keys.contains(&normalized.as_str()) {
                if value.is_null() {
                    return Ok(None);
                }
                return Ok(Some(value.clone()));
            }
        }
        Ok(None)
    }
}
