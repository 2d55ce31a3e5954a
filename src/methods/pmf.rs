use std::collections::BTreeSet;

use crate::model::scores::{PmfOutcome, PmfState};
use crate::model::thresholds::EngineThresholds;

/// Counts observed signals that appear in the catalog. Matching ignores
/// case and collapses whitespace; matches are reported in catalog order.
pub fn classify_pmf(
    observed: Option<&[String]>,
    catalog: &[String],
    thresholds: &EngineThresholds,
) -> PmfOutcome {
    let seen: BTreeSet<String> = observed
        .unwrap_or_default()
        .iter()
        .map(|s| normalize_signal(s))
        .collect();

    let matched: Vec<String> = catalog
        .iter()
        .filter(|entry| seen.contains(&normalize_signal(entry)))
        .cloned()
        .collect();
    let count = matched.len();
    let achieved = count >= thresholds.pmf_achieved_min;

    PmfOutcome {
        achieved,
        count,
        score: if achieved {
            thresholds.pmf_achieved_score
        } else {
            thresholds.pmf_pending_score
        },
        state: if achieved {
            PmfState::Achieved
        } else {
            PmfState::Pending
        },
        matched,
    }
}

pub fn normalize_signal(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/src_inline/methods/pmf.rs"]
mod tests;
