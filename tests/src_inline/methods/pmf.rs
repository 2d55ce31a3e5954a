use super::*;
use crate::criteria::defs::default_pmf_catalog;

fn observed(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_matching_ignores_case_and_spacing() {
    let seen = observed(&["Organic  Word of mouth", "inbound press coverage", "unrelated"]);
    let out = classify_pmf(Some(seen.as_slice()), &default_pmf_catalog(), &EngineThresholds::default_v1());
    assert_eq!(out.count, 2);
    assert_eq!(
        out.matched,
        vec![
            "organic word of mouth".to_string(),
            "inbound press coverage".to_string()
        ]
    );
    assert!(!out.achieved);
    assert_eq!(out.state, PmfState::Pending);
    assert_eq!(out.score, 50.0);
}

#[test]
fn test_achieved_at_four_signals() {
    let catalog = default_pmf_catalog();
    let seen: Vec<String> = catalog[..4].to_vec();
    let out = classify_pmf(Some(seen.as_slice()), &catalog, &EngineThresholds::default_v1());
    assert!(out.achieved);
    assert_eq!(out.state, PmfState::Achieved);
    assert_eq!(out.score, 100.0);
}

#[test]
fn test_duplicates_count_once() {
    let seen = observed(&["repeat purchases or renewals", "Repeat purchases or renewals"]);
    let out = classify_pmf(Some(seen.as_slice()), &default_pmf_catalog(), &EngineThresholds::default_v1());
    assert_eq!(out.count, 1);
}

#[test]
fn test_unreported_signals() {
    let out = classify_pmf(None, &default_pmf_catalog(), &EngineThresholds::default_v1());
    assert_eq!(out.count, 0);
    assert!(out.matched.is_empty());
}
