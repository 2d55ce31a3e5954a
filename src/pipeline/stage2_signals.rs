use serde_json::Value;

use crate::criteria::LoadedCriteria;
use crate::input::InputError;
use crate::input::schemas::{IngestionNotes, normalize_payload};
use crate::model::signals::CandidateSignals;
use crate::model::stage::{Degradation, DegradationKind, EvaluationStage};

#[derive(Debug, Clone)]
pub struct Stage2Inputs<'a> {
    pub payload: &'a Value,
    /// Used when the payload does not name the company itself.
    pub fallback_name: Option<&'a str>,
    pub criteria: &'a LoadedCriteria,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage2Output {
    pub signals: CandidateSignals,
    pub notes: IngestionNotes,
    pub degradations: Vec<Degradation>,
}

pub fn run_stage2(inputs: &Stage2Inputs<'_>) -> Result<Stage2Output, InputError> {
    let normalized = normalize_payload(inputs.payload)?;
    let mut signals = normalized.signals;
    if signals.name.is_none() {
        signals.name = inputs.fallback_name.map(str::to_string);
    }
    let candidate = signals.candidate_id().to_string();

    let mut degradations = inputs.criteria.degradations(&candidate);
    for err in &normalized.notes.shape_errors {
        crate::warn!(
            "candidate={} stage={} field={}: {}; treated as absent",
            candidate,
            EvaluationStage::SignalsNormalized,
            err.field,
            err
        );
        degradations.push(Degradation {
            kind: DegradationKind::SignalShape,
            candidate: candidate.clone(),
            stage: EvaluationStage::SignalsNormalized,
            field: err.field.clone(),
            detail: err.to_string(),
        });
    }

    Ok(Stage2Output {
        signals,
        notes: normalized.notes,
        degradations,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_signals.rs"]
mod tests;
