use super::*;
use crate::criteria::LoadedCriteria;
use crate::model::scores::{GrowthLabel, SurvivalTier};

#[test]
fn test_all_absent_sub_scores() {
    let config = LoadedCriteria::builtin().config;
    let subs = run_stage3(&Stage3Inputs {
        signals: &CandidateSignals::default(),
        config: &config,
    });
    assert_eq!(subs.berkus, 0.0);
    assert!((subs.scorecard - 19.0).abs() < 1e-9);
    assert_eq!(subs.growth.label, GrowthLabel::NoData);
    assert_eq!(subs.pmf.count, 0);
    assert_eq!(subs.survival.tier, SurvivalTier::High);
}

#[test]
fn test_pmf_count_feeds_berkus_and_scorecard() {
    let config = LoadedCriteria::builtin().config;
    let signals = CandidateSignals {
        pmf_signals: Some(config.pmf_signal_catalog[..3].to_vec()),
        ..CandidateSignals::default()
    };
    let subs = run_stage3(&Stage3Inputs {
        signals: &signals,
        config: &config,
    });
    assert_eq!(subs.pmf.count, 3);
    // product rollout at full allocation: 500k of 2.5M
    assert!((subs.berkus - 20.0).abs() < 1e-9);
    assert!(subs.scorecard > 19.0);
}

#[test]
fn test_growth_drives_other_category() {
    let config = LoadedCriteria::builtin().config;
    let signals = CandidateSignals {
        growth_rate: Some(0.2),
        ..CandidateSignals::default()
    };
    let subs = run_stage3(&Stage3Inputs {
        signals: &signals,
        config: &config,
    });
    assert_eq!(subs.growth.label, GrowthLabel::Excellent);
    assert_eq!(subs.growth.score, 30.0);
    // other category adds its full 5 points
    assert!((subs.scorecard - 24.0).abs() < 1e-9);
}
