use crate::model::criteria::{ScorecardCategory, ScorecardWeights};
use crate::model::scores::{GrowthOutcome, ScorecardLine};
use crate::model::signals::CandidateSignals;

/// Raw sub-scores are percent of the peer average, 0..=150.
pub const RAW_MAX: f64 = 150.0;

const PEER_SCALE: f64 = RAW_MAX / 100.0;
const COUNT_STEP: f64 = 30.0;

pub struct ScorecardInputs<'a> {
    pub signals: &'a CandidateSignals,
    pub pmf_count: usize,
    pub growth: &'a GrowthOutcome,
    pub growth_weight: f64,
    pub weights: &'a ScorecardWeights,
}

pub fn score_scorecard(inputs: &ScorecardInputs<'_>) -> (f64, Vec<ScorecardLine>) {
    let mut lines = Vec::with_capacity(ScorecardCategory::ALL.len());
    let mut total = 0.0;
    for category in ScorecardCategory::ALL {
        let (raw, basis) = raw_score(category, inputs);
        let normalized = raw / RAW_MAX * 100.0;
        let weight = inputs.weights.get(category);
        let contribution = normalized * weight;
        total += contribution;
        lines.push(ScorecardLine {
            category,
            raw,
            normalized,
            weight,
            contribution,
            basis,
        });
    }
    (total, lines)
}

pub fn raw_score(category: ScorecardCategory, inputs: &ScorecardInputs<'_>) -> (f64, &'static str) {
    let signals = inputs.signals;
    match category {
        ScorecardCategory::Management => {
            let team = signals.team_size.unwrap_or(0);
            if team >= 20 {
                (150.0, "team >= 20")
            } else if team >= 10 {
                (105.0, "team 10-19")
            } else if signals.has_key_people() || team > 0 {
                (75.0, "key people or small team")
            } else {
                (45.0, "team unknown")
            }
        }
        ScorecardCategory::Opportunity => match signals.tam {
            Some(tam) if tam >= 100.0 => (150.0, "tam >= 100"),
            Some(tam) if tam >= 50.0 => (120.0, "tam 50-100"),
            Some(tam) if tam >= 10.0 => (90.0, "tam 10-50"),
            Some(_) => (60.0, "tam < 10"),
            None => (60.0, "tam unknown"),
        },
        ScorecardCategory::Product => match (signals.tech_score, signals.trl) {
            (Some(score), _) => (score * PEER_SCALE, "tech score"),
            (None, Some(trl)) => (f64::from(trl) / 9.0 * 100.0 * PEER_SCALE, "trl / 9"),
            (None, None) => (0.0, "technology unknown"),
        },
        ScorecardCategory::CompetitiveEnvironment => (
            counted(signals.strength_count().unwrap_or(0)),
            "competitive strengths",
        ),
        ScorecardCategory::Marketing => (counted(inputs.pmf_count), "pmf signals"),
        ScorecardCategory::NeedForFunding => (
            counted(signals.funding_rounds.unwrap_or(0) as usize),
            "funding rounds",
        ),
        ScorecardCategory::Other => {
            let scaled = if inputs.growth_weight > 0.0 {
                (inputs.growth.score / inputs.growth_weight * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            (scaled * PEER_SCALE, "growth score")
        }
    }
}

fn counted(n: usize) -> f64 {
    (n as f64 * COUNT_STEP).min(100.0) * PEER_SCALE
}

#[cfg(test)]
#[path = "../../tests/src_inline/methods/scorecard.rs"]
mod tests;
