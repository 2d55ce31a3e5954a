use serde_json::json;

use super::*;

#[test]
fn test_null_outcome_is_empty() {
    let outcome = parse_competitor_outcome(&Value::Null).unwrap();
    assert_eq!(outcome, CompetitorOutcome::default());
    assert_eq!(
        resolve_comparison_mode(&outcome).unwrap(),
        ComparisonMode::Absolute
    );
}

#[test]
fn test_unnamed_entries_are_rejected() {
    let outcome = parse_competitor_outcome(&json!({
        "competitors": [
            {"name": "Rival", "signals": {"space": {"trl_level": 5}}},
            {"name": ""},
            {"signals": {}},
            "not an object",
            {"기업명": "경쟁사A"}
        ]
    }))
    .unwrap();
    assert_eq!(outcome.rejected, 3);
    let summary = outcome.summary();
    assert_eq!(summary.validated, 2);
    assert_eq!(summary.names, vec!["Rival".to_string(), "경쟁사A".to_string()]);
    assert_eq!(outcome.competitors[0].signals["space"]["trl_level"], 5);
    assert!(outcome.competitors[1].signals.is_null());
}

#[test]
fn test_mode_follows_validated_count() {
    let outcome = parse_competitor_outcome(&json!({"competitors": [{"name": "Rival"}]})).unwrap();
    assert_eq!(
        resolve_comparison_mode(&outcome).unwrap(),
        ComparisonMode::Relative
    );
}

#[test]
fn test_declared_mode_mismatch() {
    let outcome = parse_competitor_outcome(&json!({
        "competitors": [{"name": ""}],
        "comparison_mode": "relative"
    }))
    .unwrap();
    assert_eq!(
        resolve_comparison_mode(&outcome).unwrap_err(),
        ComparisonModeError::Mismatch {
            declared: "relative",
            validated: 0
        }
    );
}

#[test]
fn test_declared_mode_korean_and_unknown() {
    assert_eq!(parse_mode("상대평가"), Some(ComparisonMode::Relative));
    assert_eq!(parse_mode(" Absolute "), Some(ComparisonMode::Absolute));
    assert_eq!(parse_mode("peer"), None);

    let outcome = parse_competitor_outcome(&json!({"comparison_mode": "peer"})).unwrap();
    assert_eq!(
        resolve_comparison_mode(&outcome).unwrap_err(),
        ComparisonModeError::Unknown("peer".to_string())
    );
    assert!(parse_competitor_outcome(&json!({"comparison_mode": 3})).is_err());
}

#[test]
fn test_non_list_competitors_treated_as_empty() {
    let outcome = parse_competitor_outcome(&json!({"competitors": "Rival"})).unwrap();
    assert!(outcome.competitors.is_empty());
    assert_eq!(outcome.rejected, 0);
}
