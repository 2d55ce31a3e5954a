pub mod json;

use serde::Serialize;

use crate::criteria::LoadedCriteria;
use crate::input::competitors::{CompetitorOutcome, CompetitorSummary};
use crate::input::schemas::IngestionNotes;
use crate::model::decision::{Decision, Grade, RiskLevel};
use crate::model::scores::ScoreBreakdown;
use crate::model::signals::CandidateSignals;
use crate::model::thresholds::ComparisonMode;
use crate::pipeline::RunOutcome;

pub const TOOL_NAME: &str = "kira-dealgrade";

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_hash: Option<String>,
}

/// The `evaluation.json` document. Field names are a stable contract with
/// downstream renderers; unknown values serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport<'a> {
    pub tool: ToolInfo,
    pub candidate: &'a str,
    pub comparison_mode: ComparisonMode,
    pub score_breakdown: &'a ScoreBreakdown,
    pub decision: &'a Decision,
    pub criteria: &'a LoadedCriteria,
    pub ingestion: IngestionReport<'a>,
    pub competitors: CompetitorsReport<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport<'a> {
    pub signals: &'a CandidateSignals,
    #[serde(flatten)]
    pub notes: &'a IngestionNotes,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorsReport<'a> {
    #[serde(flatten)]
    pub summary: CompetitorSummary,
    pub evaluations: Vec<CompetitorEntry<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorEntry<'a> {
    pub name: &'a str,
    pub final_score: Option<f64>,
    pub grade: Option<Grade>,
    pub risk: Option<RiskLevel>,
    pub error: Option<String>,
}

pub fn build_report<'a>(
    run: &'a RunOutcome,
    criteria: &'a LoadedCriteria,
    competitors: &CompetitorOutcome,
    git_hash: Option<String>,
) -> EvaluationReport<'a> {
    let evaluations = run
        .competitors
        .iter()
        .map(|c| match &c.result {
            Ok(eval) => CompetitorEntry {
                name: &c.name,
                final_score: Some(eval.breakdown.final_score),
                grade: Some(eval.decision.grade),
                risk: Some(eval.decision.risk),
                error: None,
            },
            Err(e) => CompetitorEntry {
                name: &c.name,
                final_score: None,
                grade: None,
                risk: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    EvaluationReport {
        tool: ToolInfo {
            name: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            git_hash,
        },
        candidate: &run.candidate.candidate,
        comparison_mode: run.mode,
        score_breakdown: &run.candidate.breakdown,
        decision: &run.candidate.decision,
        criteria,
        ingestion: IngestionReport {
            signals: &run.candidate.signals,
            notes: &run.candidate.notes,
        },
        competitors: CompetitorsReport {
            summary: competitors.summary(),
            evaluations,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
