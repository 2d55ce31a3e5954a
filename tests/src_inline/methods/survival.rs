use super::*;

#[test]
fn test_runway_tiers() {
    let t = EngineThresholds::default_v1();
    assert_eq!(classify_survival(Some(24), &t).tier, SurvivalTier::Low);
    assert_eq!(classify_survival(Some(18), &t).tier, SurvivalTier::Low);
    assert_eq!(classify_survival(Some(12), &t).tier, SurvivalTier::Medium);
    assert_eq!(classify_survival(Some(11), &t).tier, SurvivalTier::High);
    assert_eq!(classify_survival(Some(0), &t).tier, SurvivalTier::High);
}

#[test]
fn test_unknown_runway_is_high_risk() {
    let out = classify_survival(None, &EngineThresholds::default_v1());
    assert_eq!(out.tier, SurvivalTier::High);
    assert_eq!(out.runway_months, None);
}
