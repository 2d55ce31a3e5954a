use std::sync::Arc;

use serde_json::json;

use super::loader::{normalize_berkus, normalize_scorecard};
use super::*;
use crate::model::criteria::{BERKUS_TOTAL, BerkusCategory, ScorecardCategory};
use crate::model::stage::DegradationKind;
use crate::model::thresholds::{GradeTable, WeightingProfile};

fn load(doc: serde_json::Value) -> LoadedCriteria {
    load_criteria(&JsonCriteriaSource::from_value(doc))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_builtin_criteria_all_builtin() {
    let loaded = LoadedCriteria::builtin();
    assert_eq!(loaded.provenance.len(), CriteriaCategory::ALL.len());
    assert!(
        loaded
            .provenance
            .iter()
            .all(|p| p.provenance == Provenance::Builtin)
    );
    assert_eq!(loaded.config.berkus.total(), BERKUS_TOTAL);
    assert!(approx(loaded.config.scorecard.total(), 1.0));
    assert!(loaded.degradations("acme").is_empty());
}

#[test]
fn test_berkus_exact_total_is_sourced() {
    let loaded = load(json!({
        "berkus": {
            "sound_idea": 500000,
            "prototype": 500000,
            "quality_team": 500000,
            "strategic_relationships": 500000,
            "product_rollout": 500000
        }
    }));
    assert_eq!(
        loaded.provenance_of(CriteriaCategory::Berkus),
        Some(&Provenance::Sourced)
    );
    assert_eq!(
        loaded.provenance_of(CriteriaCategory::Scorecard),
        Some(&Provenance::Builtin)
    );
}

#[test]
fn test_berkus_rescaled_residue_on_largest() {
    let (caps, provenance) = normalize_berkus([1.0, 1.0, 1.0, 1.0, 2.0]).unwrap();
    assert_eq!(caps.total(), BERKUS_TOTAL);
    assert_eq!(caps.get(BerkusCategory::SoundIdea), 416_667);
    assert_eq!(caps.get(BerkusCategory::ProductRollout), 833_332);
    assert_eq!(
        provenance,
        Provenance::Rescaled {
            original_total: 6.0
        }
    );
}

#[test]
fn test_berkus_zero_total_rejected() {
    let err = normalize_berkus([0.0; 5]).unwrap_err();
    assert_eq!(err, ConfigValidationError::ZeroTotal { category: "berkus" });
}

#[test]
fn test_scorecard_rescaled_to_unit_sum() {
    let (weights, provenance) =
        normalize_scorecard([0.6, 0.5, 0.3, 0.2, 0.2, 0.1, 0.1]).unwrap();
    assert!(approx(weights.total(), 1.0));
    assert!(approx(weights.get(ScorecardCategory::Management), 0.3));
    match provenance {
        Provenance::Rescaled { original_total } => assert!(approx(original_total, 2.0)),
        other => panic!("expected rescaled, got {other:?}"),
    }
}

#[test]
fn test_scorecard_within_tolerance_is_sourced() {
    let (weights, provenance) =
        normalize_scorecard([0.30, 0.25, 0.15, 0.10, 0.10, 0.05, 0.05]).unwrap();
    assert_eq!(provenance, Provenance::Sourced);
    assert!(approx(weights.get(ScorecardCategory::Opportunity), 0.25));
}

#[test]
fn test_overflowing_totals_rejected() {
    assert_eq!(
        normalize_scorecard([1e308, 1e308, 0.1, 0.1, 0.1, 0.1, 0.1]).unwrap_err(),
        ConfigValidationError::OverflowingTotal {
            category: "scorecard"
        }
    );
    assert_eq!(
        normalize_berkus([1e308, 1e308, 1.0, 1.0, 1.0]).unwrap_err(),
        ConfigValidationError::OverflowingTotal { category: "berkus" }
    );
}

#[test]
fn test_overflowing_totals_fall_back_to_defaults() {
    let loaded = load(json!({
        "scorecard": {
            "management": 1e308,
            "opportunity": 1e308,
            "product": 0.15,
            "competitive_environment": 0.10,
            "marketing": 0.10,
            "need_for_funding": 0.05,
            "other": 0.05
        },
        "berkus": {
            "sound_idea": 1e308,
            "prototype": 1e308,
            "quality_team": 500000,
            "strategic_relationships": 500000,
            "product_rollout": 500000
        }
    }));
    let builtin = LoadedCriteria::builtin().config;
    assert!(matches!(
        loaded.provenance_of(CriteriaCategory::Scorecard),
        Some(Provenance::Defaulted { .. })
    ));
    assert!(matches!(
        loaded.provenance_of(CriteriaCategory::Berkus),
        Some(Provenance::Defaulted { .. })
    ));
    assert_eq!(loaded.config.scorecard, builtin.scorecard);
    assert_eq!(loaded.config.berkus, builtin.berkus);
    assert!(approx(loaded.config.scorecard.total(), 1.0));
    assert_eq!(loaded.degradations("acme").len(), 2);
}

#[test]
fn test_negative_weight_defaults_only_that_category() {
    let loaded = load(json!({
        "scorecard": {
            "management": -0.1,
            "opportunity": 0.25,
            "product": 0.15,
            "competitive_environment": 0.10,
            "marketing": 0.10,
            "need_for_funding": 0.05,
            "other": 0.05
        },
        "grades": {"S": 85, "A": 70, "B": 55, "C": 40}
    }));
    assert!(matches!(
        loaded.provenance_of(CriteriaCategory::Scorecard),
        Some(Provenance::Defaulted { .. })
    ));
    assert_eq!(loaded.config.scorecard, LoadedCriteria::builtin().config.scorecard);
    assert_eq!(
        loaded.provenance_of(CriteriaCategory::Grades),
        Some(&Provenance::Sourced)
    );
    assert_eq!(loaded.config.grades.s, 85.0);
}

#[test]
fn test_unordered_grades_recorded_as_degradation() {
    let loaded = load(json!({"grades": {"S": 50, "A": 75, "B": 60, "C": 45}}));
    let degradations = loaded.degradations("acme");
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].kind, DegradationKind::ConfigDefaulted);
    assert_eq!(degradations[0].field, "grades");
    assert_eq!(degradations[0].candidate, "acme");
    assert_eq!(loaded.config.grades, GradeTable::default_v1());
}

#[test]
fn test_growth_thresholds_missing_entry() {
    let loaded = load(json!({"growth_thresholds": {"excellent": 0.2, "good": 0.1}}));
    match loaded.provenance_of(CriteriaCategory::GrowthThresholds) {
        Some(Provenance::Defaulted { reason }) => assert!(reason.contains("missing entry warning")),
        other => panic!("expected defaulted, got {other:?}"),
    }
}

#[test]
fn test_malformed_document_defaults_everything() {
    let loaded = load_criteria(&JsonCriteriaSource::from_json_str("{not json"));
    assert!(
        loaded
            .provenance
            .iter()
            .all(|p| p.provenance.is_default_substitution())
    );
    assert_eq!(loaded.config, LoadedCriteria::builtin().config);
    assert_eq!(loaded.degradations("x").len(), CriteriaCategory::ALL.len());
}

#[test]
fn test_korean_keys_accepted() {
    let loaded = load(json!({
        "벌커스": {
            "아이디어 품질": 500000,
            "프로토타입": 500000,
            "경영진": 500000,
            "전략적 관계": 500000,
            "제품 출시": 500000
        },
        "성장 기준": {"우수": 0.12, "양호": 0.06, "경고": 0.02}
    }));
    assert_eq!(
        loaded.provenance_of(CriteriaCategory::Berkus),
        Some(&Provenance::Sourced)
    );
    assert_eq!(loaded.config.growth_thresholds.excellent, 0.12);
}

#[test]
fn test_pmf_catalog_trimmed_and_deduplicated() {
    let loaded = load(json!({"pmf_signals": [" Organic word of mouth ", "organic word of mouth", "", "Churn below 2%"]}));
    assert_eq!(
        loaded.config.pmf_signal_catalog,
        vec!["Organic word of mouth".to_string(), "Churn below 2%".to_string()]
    );

    let empty = load(json!({"pmf_signals": []}));
    assert!(matches!(
        empty.provenance_of(CriteriaCategory::PmfSignals),
        Some(Provenance::Defaulted { .. })
    ));
}

#[test]
fn test_partial_profile_keeps_missing_weights_unset() {
    let loaded = load(json!({"profiles": {"relative": {"berkus": 0.5, "scorecard": 0.5}}}));
    let relative = loaded.config.profiles.relative;
    assert_eq!(relative.berkus, Some(0.5));
    assert_eq!(relative.competitor_step, None);
    assert_eq!(loaded.config.profiles.solo, WeightingProfile::solo_v1());
}

#[test]
fn test_store_loads_once_until_invalidated() {
    let store = CriteriaStore::new(Box::new(BuiltinCriteriaSource));
    assert!(store.get().is_none());

    let first = store.init();
    let second = store.init();
    assert!(Arc::ptr_eq(&first, &second));

    store.invalidate();
    assert!(store.get().is_none());
    let reloaded = store.init();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(*first, *reloaded);
}
