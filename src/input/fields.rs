use serde::Serialize;
use serde_json::{Map, Value};

/// A field that was present upstream but could not be read as the expected
/// type. The field is treated as absent; the error is kept for the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: expected {expected}, found {found}")]
pub struct SignalShapeError {
    pub field: String,
    pub expected: &'static str,
    pub found: String,
}

/// Two aliases carried different values for the same field. The first one
/// read is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasConflict {
    pub field: String,
    pub ignored_source: String,
    pub kept: String,
    pub ignored: String,
}

#[derive(Debug, Default)]
pub struct ShapeLog {
    errors: Vec<SignalShapeError>,
    conflicts: Vec<AliasConflict>,
}

impl ShapeLog {
    pub fn push(&mut self, field: String, expected: &'static str, found: &Value) {
        self.errors.push(SignalShapeError {
            field,
            expected,
            found: describe(found),
        });
    }

    pub fn conflict(&mut self, field: String, ignored_source: String, kept: String, ignored: String) {
        crate::warn!("alias conflict on {field}: kept {kept}, ignored {ignored} from {ignored_source}");
        self.conflicts.push(AliasConflict {
            field,
            ignored_source,
            kept,
            ignored,
        });
    }

    pub fn into_parts(self) -> (Vec<SignalShapeError>, Vec<AliasConflict>) {
        (self.errors, self.conflicts)
    }
}

pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn describe(value: &Value) -> String {
    match value {
        Value::Number(n) => format!("number {n}"),
        Value::String(s) if s.chars().count() <= 24 => format!("string {s:?}"),
        other => type_name(other).to_string(),
    }
}

/// One named object inside an upstream payload.
#[derive(Debug, Clone)]
pub struct Section<'v> {
    name: String,
    map: &'v Map<String, Value>,
}

impl<'v> Section<'v> {
    pub fn root(map: &'v Map<String, Value>) -> Self {
        Self {
            name: String::new(),
            map,
        }
    }

    /// First present alias that holds an object; `null` counts as absent.
    pub fn child(&self, names: &[&str], log: &mut ShapeLog) -> Option<Section<'v>> {
        let (key, value) = self.find(names, log)?;
        match value {
            Value::Object(map) => Some(Section {
                name: self.label(key),
                map,
            }),
            other => {
                log.push(self.label(key), "object", other);
                None
            }
        }
    }

    pub fn number(&self, keys: &[&str], log: &mut ShapeLog) -> Option<f64> {
        let (key, value) = self.find(keys, log)?;
        match value.as_f64() {
            Some(v) if v.is_finite() => Some(v),
            _ => {
                log.push(self.label(key), "number", value);
                None
            }
        }
    }

    pub fn non_negative(&self, keys: &[&str], log: &mut ShapeLog) -> Option<f64> {
        let (key, value) = self.find(keys, log)?;
        match value.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => {
                log.push(self.label(key), "non-negative number", value);
                None
            }
        }
    }

    pub fn percent_score(&self, keys: &[&str], log: &mut ShapeLog) -> Option<f64> {
        let (key, value) = self.find(keys, log)?;
        match value.as_f64() {
            Some(v) if (0.0..=100.0).contains(&v) => Some(v),
            _ => {
                log.push(self.label(key), "number in 0..=100", value);
                None
            }
        }
    }

    /// A count, given either as a non-negative integer or as a list.
    pub fn count(&self, keys: &[&str], log: &mut ShapeLog) -> Option<u32> {
        let (key, value) = self.find(keys, log)?;
        match value {
            Value::Array(items) => u32::try_from(items.len()).ok(),
            Value::Number(_) => match whole_number(value).and_then(|v| u32::try_from(v).ok()) {
                Some(v) => Some(v),
                None => {
                    log.push(self.label(key), "non-negative integer or list", value);
                    None
                }
            },
            other => {
                log.push(self.label(key), "non-negative integer or list", other);
                None
            }
        }
    }

    pub fn trl(&self, keys: &[&str], log: &mut ShapeLog) -> Option<u8> {
        let (key, value) = self.find(keys, log)?;
        match whole_number(value) {
            Some(v @ 1..=9) => u8::try_from(v).ok(),
            _ => {
                log.push(self.label(key), "integer TRL in 1..=9", value);
                None
            }
        }
    }

    pub fn text(&self, keys: &[&str], log: &mut ShapeLog) -> Option<String> {
        let (key, value) = self.find(keys, log)?;
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::String(_) => None,
            other => {
                log.push(self.label(key), "string", other);
                None
            }
        }
    }

    /// A list of labels. An object is read as a checklist: keys whose value
    /// is truthy are kept, in key order.
    pub fn list(&self, keys: &[&str], log: &mut ShapeLog) -> Option<Vec<String>> {
        let (key, value) = self.find(keys, log)?;
        match value {
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
                        Value::String(_) => {}
                        Value::Object(obj) => match list_item_label(obj) {
                            Some(label) => out.push(label),
                            None => log.push(format!("{}[{i}]", self.label(key)), "string", item),
                        },
                        other => log.push(format!("{}[{i}]", self.label(key)), "string", other),
                    }
                }
                Some(out)
            }
            Value::Object(map) => Some(
                map.iter()
                    .filter(|(_, v)| truthy(v))
                    .map(|(k, _)| k.trim().to_string())
                    .collect(),
            ),
            other => {
                log.push(self.label(key), "list of strings", other);
                None
            }
        }
    }

    /// First alias holding a non-null value. Later aliases that disagree
    /// with it are logged as conflicts.
    fn find<'k>(&self, keys: &[&'k str], log: &mut ShapeLog) -> Option<(&'k str, &'v Value)> {
        let mut found: Option<(&'k str, &'v Value)> = None;
        for key in keys {
            let Some(v) = self.map.get(*key) else {
                continue;
            };
            if v.is_null() {
                continue;
            }
            match found {
                None => found = Some((*key, v)),
                Some((first, kept)) if kept != v => {
                    log.conflict(self.label(first), self.label(key), describe(kept), describe(v));
                }
                Some(_) => {}
            }
        }
        found
    }

    fn label(&self, key: &str) -> String {
        if self.name.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.name, key)
        }
    }
}

// Patent and funding-history entries arrive as objects; any descriptive
// string field stands in for the entry.
fn list_item_label(obj: &Map<String, Value>) -> Option<String> {
    for key in ["name", "title", "stage", "type", "description"] {
        if let Some(Value::String(s)) = obj.get(key) {
            if !s.trim().is_empty() {
                return Some(s.trim().to_string());
            }
        }
    }
    if obj.is_empty() {
        None
    } else {
        Some(String::from("(unnamed)"))
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Non-negative integers, including floats such as `7.0` with no fraction.
fn whole_number(value: &Value) -> Option<u64> {
    if let Some(v) = value.as_u64() {
        return Some(v);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u64)
}

