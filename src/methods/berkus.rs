use crate::model::criteria::{BERKUS_TOTAL, BerkusCaps, BerkusCategory};
use crate::model::scores::BerkusLine;
use crate::model::signals::CandidateSignals;

/// Berkus score on 0..=100: achieved allocations over the fixed total.
pub fn score_berkus(
    signals: &CandidateSignals,
    pmf_count: usize,
    caps: &BerkusCaps,
) -> (f64, Vec<BerkusLine>) {
    let mut lines = Vec::with_capacity(BerkusCategory::ALL.len());
    let mut achieved = 0.0;
    for category in BerkusCategory::ALL {
        let (fraction, basis) = allocation_fraction(category, signals, pmf_count);
        let cap = caps.get(category);
        let allocation = cap as f64 * fraction;
        achieved += allocation;
        lines.push(BerkusLine {
            category,
            cap,
            fraction,
            allocation,
            basis,
        });
    }
    (achieved / BERKUS_TOTAL as f64 * 100.0, lines)
}

pub fn allocation_fraction(
    category: BerkusCategory,
    signals: &CandidateSignals,
    pmf_count: usize,
) -> (f64, &'static str) {
    match category {
        BerkusCategory::SoundIdea => match signals.trl {
            Some(7..) => (1.0, "trl >= 7"),
            Some(4..=6) => (0.6, "trl 4-6"),
            Some(_) => (0.2, "trl 1-3"),
            None => (0.0, "trl unknown"),
        },
        BerkusCategory::Prototype => match signals.trl {
            Some(6..) => (1.0, "trl >= 6"),
            _ if signals.has_core_technology() => (0.5, "core technology reported"),
            _ => (0.0, "no prototype evidence"),
        },
        BerkusCategory::QualityTeam => team_fraction(signals),
        BerkusCategory::StrategicRelationships => match signals.funding_rounds {
            Some(2..) => (1.0, "funding rounds >= 2"),
            Some(1) => (0.6, "one funding round"),
            _ => (0.0, "no funding rounds"),
        },
        BerkusCategory::ProductRollout => match pmf_count {
            3.. => (1.0, "pmf signals >= 3"),
            1..=2 => (0.6, "pmf signals 1-2"),
            _ => (0.0, "no pmf signals"),
        },
    }
}

fn team_fraction(signals: &CandidateSignals) -> (f64, &'static str) {
    let team = signals.team_size.unwrap_or(0);
    if team >= 20 {
        (1.0, "team >= 20")
    } else if team >= 10 {
        (0.6, "team 10-19")
    } else if signals.has_key_people() || team > 0 {
        (0.4, "key people or small team")
    } else {
        (0.0, "team unknown")
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/methods/berkus.rs"]
mod tests;
