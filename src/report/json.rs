use serde_json::json;

use crate::report::{EvaluationReport, TOOL_NAME};

pub const EVALUATION_FILE: &str = "evaluation.json";
pub const PIPELINE_STEP_FILE: &str = "pipeline_step.json";

pub fn render_evaluation_json(report: &EvaluationReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Aggregator contract: where the artifacts are and the headline numbers.
pub fn render_pipeline_step_json(report: &EvaluationReport<'_>) -> serde_json::Result<String> {
    let step = json!({
        "tool": TOOL_NAME,
        "mode": "pipeline",
        "artifacts": {
            "evaluation": EVALUATION_FILE,
        },
        "key_metrics": {
            "candidate": report.candidate,
            "comparison_mode": report.comparison_mode,
            "final_score": report.score_breakdown.final_score,
            "grade": report.decision.grade,
            "risk": report.decision.risk,
            "degraded": report.decision.degraded,
        },
    });
    serde_json::to_string_pretty(&step)
}
