use serde::Serialize;

/// Evaluation states in the only order they may be visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStage {
    Idle,
    CriteriaLoaded,
    SignalsNormalized,
    SubScored,
    Aggregated,
    Classified,
    Rationaled,
    Done,
}

impl EvaluationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationStage::Idle => "idle",
            EvaluationStage::CriteriaLoaded => "criteria_loaded",
            EvaluationStage::SignalsNormalized => "signals_normalized",
            EvaluationStage::SubScored => "sub_scored",
            EvaluationStage::Aggregated => "aggregated",
            EvaluationStage::Classified => "classified",
            EvaluationStage::Rationaled => "rationaled",
            EvaluationStage::Done => "done",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            EvaluationStage::Idle => Some(EvaluationStage::CriteriaLoaded),
            EvaluationStage::CriteriaLoaded => Some(EvaluationStage::SignalsNormalized),
            EvaluationStage::SignalsNormalized => Some(EvaluationStage::SubScored),
            EvaluationStage::SubScored => Some(EvaluationStage::Aggregated),
            EvaluationStage::Aggregated => Some(EvaluationStage::Classified),
            EvaluationStage::Classified => Some(EvaluationStage::Rationaled),
            EvaluationStage::Rationaled => Some(EvaluationStage::Done),
            EvaluationStage::Done => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    ConfigDefaulted,
    SignalShape,
}

/// A recovered error: the evaluation went on, but not on the input it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    pub kind: DegradationKind,
    pub candidate: String,
    pub stage: EvaluationStage,
    pub field: String,
    pub detail: String,
}

impl std::fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
