use std::path::{Path, PathBuf};

use serde_json::Value;

pub mod competitors;
pub mod fields;
pub mod schemas;

use competitors::{CompetitorOutcome, parse_competitor_outcome};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("malformed signal payload: expected a JSON object or null, found {found}")]
    MalformedPayload { found: &'static str },
    #[error("invalid competitor outcome: {0}")]
    Competitors(#[from] competitors::ComparisonModeError),
}

/// Files a single `run` reads. Only the signal payload is required.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub signals: PathBuf,
    pub criteria: Option<PathBuf>,
    pub competitors: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct InputBundle {
    pub payload: Value,
    pub competitors: CompetitorOutcome,
}

pub fn load_inputs(paths: &InputPaths) -> Result<InputBundle, InputError> {
    let payload = read_json(&paths.signals)?;
    crate::info!("loaded signal payload: {}", paths.signals.display());

    let competitors = match paths.competitors.as_deref() {
        Some(path) => {
            let raw = read_json(path)?;
            let outcome = parse_competitor_outcome(&raw)?;
            crate::info!(
                "loaded competitor outcome: {} validated, {} rejected",
                outcome.competitors.len(),
                outcome.rejected
            );
            outcome
        }
        None => CompetitorOutcome::default(),
    };

    Ok(InputBundle {
        payload,
        competitors,
    })
}

pub fn read_json(path: &Path) -> Result<Value, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
