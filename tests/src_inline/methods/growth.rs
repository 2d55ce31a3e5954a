use super::*;
use crate::criteria::defs::default_growth_thresholds;
use crate::model::thresholds::EngineThresholds;

#[test]
fn test_growth_labels() {
    let t = default_growth_thresholds();
    assert_eq!(classify_growth(Some(0.12), &t, 100.0).label, GrowthLabel::Excellent);
    assert_eq!(classify_growth(Some(0.10), &t, 100.0).label, GrowthLabel::Excellent);
    assert_eq!(classify_growth(Some(0.05), &t, 100.0).label, GrowthLabel::Good);
    assert_eq!(classify_growth(Some(0.02), &t, 100.0).label, GrowthLabel::Warning);
    assert_eq!(classify_growth(Some(-0.01), &t, 100.0).label, GrowthLabel::Critical);
}

#[test]
fn test_growth_score_saturates() {
    let t = default_growth_thresholds();
    assert_eq!(classify_growth(Some(0.4), &t, 100.0).score, 100.0);
    assert!((classify_growth(Some(0.05), &t, 100.0).score - 50.0).abs() < 1e-9);
    assert_eq!(classify_growth(Some(-0.2), &t, 100.0).score, 0.0);
}

#[test]
fn test_default_weight_caps_growth_score() {
    let t = default_growth_thresholds();
    let weight = EngineThresholds::default_v1().growth_weight;
    assert_eq!(weight, 30.0);
    assert!((classify_growth(Some(0.18), &t, weight).score - 30.0).abs() < 1e-9);
    assert!((classify_growth(Some(0.05), &t, weight).score - 15.0).abs() < 1e-9);
}

#[test]
fn test_missing_rate_is_no_data() {
    let out = classify_growth(None, &default_growth_thresholds(), 100.0);
    assert_eq!(out.label, GrowthLabel::NoData);
    assert_eq!(out.score, 0.0);
    assert_eq!(out.rate, None);
}
