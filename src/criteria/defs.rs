use crate::model::criteria::{BerkusCaps, GrowthThresholds, ScorecardWeights};

const BERKUS_CAPS: [u64; 5] = [500_000, 500_000, 500_000, 500_000, 500_000];

const SCORECARD_WEIGHTS: [f64; 7] = [0.30, 0.25, 0.15, 0.10, 0.10, 0.05, 0.05];

// Weekly growth benchmarks.
const GROWTH_THRESHOLDS: GrowthThresholds = GrowthThresholds {
    excellent: 0.10,
    good: 0.05,
    warning: 0.01,
};

const PMF_SIGNAL_CATALOG: &[&str] = &[
    "customers seek out the product",
    "organic word of mouth",
    "inbound press coverage",
    "hiring to keep up with demand",
    "repeat purchases or renewals",
];

pub fn default_berkus() -> BerkusCaps {
    BerkusCaps::new(BERKUS_CAPS)
}

pub fn default_scorecard() -> ScorecardWeights {
    ScorecardWeights::new(SCORECARD_WEIGHTS)
}

pub fn default_growth_thresholds() -> GrowthThresholds {
    GROWTH_THRESHOLDS
}

pub fn default_pmf_catalog() -> Vec<String> {
    PMF_SIGNAL_CATALOG.iter().map(|s| s.to_string()).collect()
}

