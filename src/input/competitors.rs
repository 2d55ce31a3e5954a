use serde::Serialize;
use serde_json::Value;

use crate::input::fields::type_name;
use crate::model::thresholds::ComparisonMode;

/// A competitor that passed validation: it has a usable name.
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    pub name: String,
    pub signals: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompetitorOutcome {
    pub competitors: Vec<Competitor>,
    pub declared_mode: Option<String>,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorSummary {
    pub validated: usize,
    pub rejected: usize,
    pub names: Vec<String>,
}

impl CompetitorOutcome {
    pub fn summary(&self) -> CompetitorSummary {
        CompetitorSummary {
            validated: self.competitors.len(),
            rejected: self.rejected,
            names: self.competitors.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComparisonModeError {
    #[error("competitor outcome must be a JSON object, found {0}")]
    Malformed(&'static str),
    #[error("unknown comparison mode {0:?}")]
    Unknown(String),
    #[error("declared comparison mode {declared} contradicts {validated} validated competitor(s)")]
    Mismatch {
        declared: &'static str,
        validated: usize,
    },
}

/// Reads `{competitors: [{name, signals?}], comparison_mode?}`. Entries
/// without a non-empty name are dropped and counted.
pub fn parse_competitor_outcome(value: &Value) -> Result<CompetitorOutcome, ComparisonModeError> {
    let map = match value {
        Value::Null => return Ok(CompetitorOutcome::default()),
        Value::Object(map) => map,
        other => return Err(ComparisonModeError::Malformed(type_name(other))),
    };

    let mut outcome = CompetitorOutcome::default();
    match map.get("competitors").or_else(|| map.get("경쟁사")) {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                match validate_competitor(item) {
                    Some(competitor) => outcome.competitors.push(competitor),
                    None => {
                        crate::warn!("competitor entry {idx} has no usable name; dropped");
                        outcome.rejected += 1;
                    }
                }
            }
        }
        Some(other) => {
            crate::warn!(
                "competitors: expected a list, found {}; treated as empty",
                type_name(other)
            );
        }
    }

    outcome.declared_mode = match map.get("comparison_mode") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => return Err(ComparisonModeError::Unknown(other.to_string())),
    };

    Ok(outcome)
}

fn validate_competitor(item: &Value) -> Option<Competitor> {
    let obj = item.as_object()?;
    let name = obj
        .get("name")
        .or_else(|| obj.get("기업명"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    let signals = obj.get("signals").cloned().unwrap_or(Value::Null);
    Some(Competitor {
        name: name.to_string(),
        signals,
    })
}

pub fn parse_mode(raw: &str) -> Option<ComparisonMode> {
    match raw.trim().to_lowercase().as_str() {
        "absolute" | "절대" | "절대평가" => Some(ComparisonMode::Absolute),
        "relative" | "상대" | "상대평가" => Some(ComparisonMode::Relative),
        _ => None,
    }
}

/// The mode follows the validated competitor count. A declared mode must
/// agree with it.
pub fn resolve_comparison_mode(
    outcome: &CompetitorOutcome,
) -> Result<ComparisonMode, ComparisonModeError> {
    let derived = if outcome.competitors.is_empty() {
        ComparisonMode::Absolute
    } else {
        ComparisonMode::Relative
    };
    let Some(raw) = outcome.declared_mode.as_deref() else {
        return Ok(derived);
    };
    let declared = parse_mode(raw).ok_or_else(|| ComparisonModeError::Unknown(raw.to_string()))?;
    if declared != derived {
        return Err(ComparisonModeError::Mismatch {
            declared: declared.as_str(),
            validated: outcome.competitors.len(),
        });
    }
    Ok(derived)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/competitors.rs"]
mod tests;
