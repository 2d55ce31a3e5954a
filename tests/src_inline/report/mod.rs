use std::sync::Arc;

use serde_json::{Value, json};

use super::*;
use crate::input::competitors::parse_competitor_outcome;
use crate::pipeline::Evaluator;
use crate::pipeline::run_evaluation;
use crate::report::json::{render_evaluation_json, render_pipeline_step_json};

fn payload() -> Value {
    json!({
        "profile": {"name": "Acme"},
        "space": {"trl_level": 8, "patent_count": "several"},
        "comparison": {"our_strengths": ["price", "speed"], "our_weaknesses": []}
    })
}

#[test]
fn test_report_contract_fields() {
    let criteria = Arc::new(LoadedCriteria::builtin());
    let evaluator = Evaluator::new(Arc::clone(&criteria));
    let competitors = parse_competitor_outcome(&json!({
        "competitors": [{"name": "Rival"}, {"name": ""}]
    }))
    .unwrap();
    let payload = payload();
    let run = run_evaluation(&evaluator, &payload, &competitors).unwrap();
    let report = build_report(&run, &criteria, &competitors, None);

    let doc: Value = serde_json::from_str(&render_evaluation_json(&report).unwrap()).unwrap();
    assert_eq!(doc["tool"]["name"], TOOL_NAME);
    assert!(doc["tool"]["git_hash"].is_null());
    assert_eq!(doc["comparison_mode"], "relative");
    assert_eq!(doc["score_breakdown"]["profile"], "relative");
    assert!(doc["score_breakdown"]["adjustment"]["fraction"].is_number());
    assert_eq!(doc["score_breakdown"]["berkus_detail"].as_array().unwrap().len(), 5);
    assert_eq!(doc["score_breakdown"]["scorecard_detail"].as_array().unwrap().len(), 7);

    assert_eq!(doc["decision"]["degraded"], true);
    assert_eq!(doc["decision"]["degradations"][0]["kind"], "signal_shape");
    assert_eq!(doc["decision"]["degradations"][0]["stage"], "signals_normalized");
    assert!(doc["ingestion"]["signals"]["patent_count"].is_null());
    assert_eq!(doc["ingestion"]["schemas"][0], "pipeline_state");
    assert_eq!(doc["ingestion"]["shape_errors"][0]["field"], "space.patent_count");

    assert_eq!(doc["criteria"]["provenance"][0]["category"], "berkus");
    assert_eq!(doc["criteria"]["provenance"][0]["status"], "builtin");
    assert_eq!(doc["criteria"]["config"]["berkus"]["sound_idea"], 500000);

    assert_eq!(doc["competitors"]["validated"], 1);
    assert_eq!(doc["competitors"]["rejected"], 1);
    assert_eq!(doc["competitors"]["evaluations"][0]["name"], "Rival");
    assert!(doc["competitors"]["evaluations"][0]["error"].is_null());
}

#[test]
fn test_pipeline_step_metrics() {
    let criteria = Arc::new(LoadedCriteria::builtin());
    let evaluator = Evaluator::new(Arc::clone(&criteria));
    let competitors = CompetitorOutcome::default();
    let payload = payload();
    let run = run_evaluation(&evaluator, &payload, &competitors).unwrap();
    let report = build_report(&run, &criteria, &competitors, None);

    let step: Value = serde_json::from_str(&render_pipeline_step_json(&report).unwrap()).unwrap();
    assert_eq!(step["mode"], "pipeline");
    assert_eq!(step["key_metrics"]["comparison_mode"], "absolute");
    assert_eq!(step["key_metrics"]["degraded"], true);
    assert_eq!(
        step["key_metrics"]["grade"],
        run.candidate.decision.grade.as_str()
    );
}
