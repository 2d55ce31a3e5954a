use super::*;
use crate::model::flags::RiskFactor;
use crate::model::stage::{DegradationKind, EvaluationStage};

fn entry(item: ChecklistItem, met: bool, observed: Option<&str>) -> ChecklistEntry {
    ChecklistEntry {
        item,
        met,
        observed: observed.map(str::to_string),
    }
}

fn class(grade: Grade, raw_grade: Grade, risk: RiskLevel, raw_risk: RiskLevel) -> Classification {
    Classification {
        raw_grade,
        grade,
        raw_risk,
        risk,
        risk_factors: Vec::new(),
        warning_triggers: 0,
        downgraded: grade != raw_grade,
    }
}

fn full_checklist(met: bool) -> Vec<ChecklistEntry> {
    crate::model::flags::checklist_order()
        .iter()
        .map(|&item| entry(item, met, Some("1")))
        .collect()
}

#[test]
fn test_reasons_open_with_grade_and_truncate() {
    let c = class(Grade::S, Grade::S, RiskLevel::Low, RiskLevel::Low);
    let checklist = full_checklist(true);
    let out = run_stage6(&Stage6Inputs {
        final_score: 98.8,
        classification: &c,
        checklist: &checklist,
        degradations: &[],
        max_lines: 5,
    });
    assert_eq!(out.reasons.len(), 5);
    assert!(out.reasons[0].contains("98.8"));
    assert!(out.reasons[1].starts_with("Commercially mature technology"));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_missing_values_render_as_na() {
    let c = class(Grade::D, Grade::D, RiskLevel::High, RiskLevel::High);
    let checklist = vec![entry(ChecklistItem::TechnologyMaturity, false, None)];
    let out = run_stage6(&Stage6Inputs {
        final_score: 11.4,
        classification: &c,
        checklist: &checklist,
        degradations: &[],
        max_lines: 5,
    });
    assert_eq!(out.reasons.len(), 1);
    assert_eq!(out.warnings.len(), 2);
    assert_eq!(out.warnings[1], "Technology not yet mature (TRL N/A)");
}

#[test]
fn test_downgrade_opening_names_both_grades() {
    let mut c = class(Grade::B, Grade::A, RiskLevel::High, RiskLevel::Low);
    c.warning_triggers = 4;
    let out = run_stage6(&Stage6Inputs {
        final_score: 80.0,
        classification: &c,
        checklist: &[],
        degradations: &[],
        max_lines: 5,
    });
    assert_eq!(
        out.warnings[0],
        "High risk: 4 warning signals lowered the grade from A to B"
    );
}

#[test]
fn test_medium_risk_counts_factors() {
    let mut c = class(Grade::B, Grade::B, RiskLevel::Medium, RiskLevel::Medium);
    c.risk_factors = vec![
        RiskFactor::NoPatents,
        RiskFactor::SmallMarket,
        RiskFactor::WeakPmf,
    ];
    let out = run_stage6(&Stage6Inputs {
        final_score: 65.0,
        classification: &c,
        checklist: &[],
        degradations: &[],
        max_lines: 5,
    });
    assert_eq!(out.warnings, vec!["Medium risk: 3 risk factor(s) identified".to_string()]);
}

#[test]
fn test_degradation_line_always_kept() {
    let c = class(Grade::D, Grade::D, RiskLevel::High, RiskLevel::High);
    let checklist = full_checklist(false);
    let degradations = vec![Degradation {
        kind: DegradationKind::SignalShape,
        candidate: "acme".to_string(),
        stage: EvaluationStage::SignalsNormalized,
        field: "space.trl_level".to_string(),
        detail: "space.trl_level: expected integer TRL in 1..=9, found string \"x\"".to_string(),
    }];
    let out = run_stage6(&Stage6Inputs {
        final_score: 10.0,
        classification: &c,
        checklist: &checklist,
        degradations: &degradations,
        max_lines: 5,
    });
    assert_eq!(out.warnings.len(), 5);
    assert_eq!(
        out.warnings[4],
        "Evaluated on degraded input: 1 substitution(s) (space.trl_level)"
    );
}
