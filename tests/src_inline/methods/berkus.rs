use super::*;
use crate::criteria::defs::default_berkus;

fn signals() -> CandidateSignals {
    CandidateSignals::default()
}

#[test]
fn test_empty_signals_score_zero() {
    let (score, lines) = score_berkus(&signals(), 0, &default_berkus());
    assert_eq!(score, 0.0);
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|l| l.allocation == 0.0));
}

#[test]
fn test_full_evidence_scores_hundred() {
    let s = CandidateSignals {
        trl: Some(8),
        team_size: Some(25),
        funding_rounds: Some(3),
        ..signals()
    };
    let (score, lines) = score_berkus(&s, 4, &default_berkus());
    assert_eq!(score, 100.0);
    assert_eq!(lines[0].basis, "trl >= 7");
}

#[test]
fn test_prototype_falls_back_to_core_technology() {
    let s = CandidateSignals {
        trl: Some(3),
        core_technology: Some(vec!["battery chemistry".to_string()]),
        ..signals()
    };
    assert_eq!(
        allocation_fraction(BerkusCategory::Prototype, &s, 0),
        (0.5, "core technology reported")
    );
    assert_eq!(allocation_fraction(BerkusCategory::SoundIdea, &s, 0).0, 0.2);
}

#[test]
fn test_team_tiers() {
    let small = CandidateSignals {
        key_people: Some(vec!["CEO".to_string()]),
        ..signals()
    };
    let mid = CandidateSignals {
        team_size: Some(12),
        ..signals()
    };
    assert_eq!(allocation_fraction(BerkusCategory::QualityTeam, &small, 0).0, 0.4);
    assert_eq!(allocation_fraction(BerkusCategory::QualityTeam, &mid, 0).0, 0.6);
}

#[test]
fn test_allocation_scales_with_caps() {
    let caps = BerkusCaps::new([1_000_000, 500_000, 500_000, 250_000, 250_000]);
    let s = CandidateSignals {
        trl: Some(7),
        ..signals()
    };
    let (score, lines) = score_berkus(&s, 0, &caps);
    // sound idea 1.0 of 1M plus prototype 1.0 of 500k
    assert!((score - 60.0).abs() < 1e-9);
    assert_eq!(lines[0].allocation, 1_000_000.0);
}
