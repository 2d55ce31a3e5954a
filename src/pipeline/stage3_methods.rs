use crate::methods::berkus::score_berkus;
use crate::methods::growth::classify_growth;
use crate::methods::pmf::classify_pmf;
use crate::methods::scorecard::{ScorecardInputs, score_scorecard};
use crate::methods::survival::classify_survival;
use crate::model::criteria::CriteriaConfig;
use crate::model::scores::SubScores;
use crate::model::signals::CandidateSignals;

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub signals: &'a CandidateSignals,
    pub config: &'a CriteriaConfig,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> SubScores {
    let signals = inputs.signals;
    let config = inputs.config;
    let thresholds = &config.thresholds;

    let growth = classify_growth(
        signals.growth_rate,
        &config.growth_thresholds,
        thresholds.growth_weight,
    );
    let pmf = classify_pmf(
        signals.pmf_signals.as_deref(),
        &config.pmf_signal_catalog,
        thresholds,
    );
    let survival = classify_survival(signals.runway_months, thresholds);

    let (berkus, berkus_detail) = score_berkus(signals, pmf.count, &config.berkus);
    let (scorecard, scorecard_detail) = score_scorecard(&ScorecardInputs {
        signals,
        pmf_count: pmf.count,
        growth: &growth,
        growth_weight: thresholds.growth_weight,
        weights: &config.scorecard,
    });

    SubScores {
        berkus,
        berkus_detail,
        scorecard,
        scorecard_detail,
        growth,
        pmf,
        survival,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_methods.rs"]
mod tests;
