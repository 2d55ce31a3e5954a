use serde::Serialize;

use crate::model::criteria::{BerkusCategory, ScorecardCategory};
use crate::model::thresholds::ComparisonMode;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BerkusLine {
    pub category: BerkusCategory,
    pub cap: u64,
    pub fraction: f64,
    pub allocation: f64,
    pub basis: &'static str,
}

/// `raw` is percent of peer average on a 0–150 scale; `normalized` is 0–100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardLine {
    pub category: ScorecardCategory,
    pub raw: f64,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
    pub basis: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthLabel {
    Excellent,
    Good,
    Warning,
    Critical,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthOutcome {
    pub rate: Option<f64>,
    pub label: GrowthLabel,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PmfState {
    #[serde(rename = "APMF")]
    Achieved,
    #[serde(rename = "BPMF")]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmfOutcome {
    pub achieved: bool,
    pub count: usize,
    pub score: f64,
    pub state: PmfState,
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurvivalTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalOutcome {
    pub runway_months: Option<u32>,
    pub tier: SurvivalTier,
}

/// Output of the methodology scorers, before any weighting profile applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScores {
    pub berkus: f64,
    pub berkus_detail: Vec<BerkusLine>,
    pub scorecard: f64,
    pub scorecard_detail: Vec<ScorecardLine>,
    pub growth: GrowthOutcome,
    pub pmf: PmfOutcome,
    pub survival: SurvivalOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorAdjustment {
    pub strengths: usize,
    pub weaknesses: usize,
    pub fraction: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub berkus: f64,
    pub scorecard: f64,
    pub growth: GrowthOutcome,
    pub pmf: PmfOutcome,
    #[serde(rename = "final")]
    pub final_score: f64,
    pub profile: ComparisonMode,
    pub solo_final: f64,
    pub adjustment: Option<CompetitorAdjustment>,
    pub berkus_detail: Vec<BerkusLine>,
    pub scorecard_detail: Vec<ScorecardLine>,
}
