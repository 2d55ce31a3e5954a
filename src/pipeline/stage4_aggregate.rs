use crate::model::scores::{CompetitorAdjustment, ScoreBreakdown, SubScores};
use crate::model::signals::CandidateSignals;
use crate::model::thresholds::{ComparisonMode, WeightingProfile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("weighting profile {profile} has no {weight} weight")]
    MissingWeight {
        profile: &'static str,
        weight: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Stage4Inputs<'a> {
    pub sub_scores: &'a SubScores,
    pub signals: &'a CandidateSignals,
    pub mode: ComparisonMode,
    pub profile: &'a WeightingProfile,
    /// Ceiling of the growth sub-score; it is brought onto 0..=100 before weighting.
    pub growth_weight: f64,
}

pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Result<ScoreBreakdown, AggregationError> {
    let profile = inputs.profile;
    let name = inputs.mode.profile_name();
    let subs = inputs.sub_scores;

    let berkus_w = required(profile.berkus, name, "berkus")?;
    let scorecard_w = required(profile.scorecard, name, "scorecard")?;
    let growth_w = profile.growth.unwrap_or(0.0);
    let pmf_w = profile.pmf.unwrap_or(0.0);
    let growth_pct = if inputs.growth_weight > 0.0 {
        (subs.growth.score / inputs.growth_weight * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let solo_final = (subs.berkus * berkus_w
        + subs.scorecard * scorecard_w
        + growth_pct * growth_w
        + subs.pmf.score * pmf_w)
        .clamp(0.0, 100.0);

    let (final_score, adjustment) = match inputs.mode {
        ComparisonMode::Absolute => (solo_final, None),
        ComparisonMode::Relative => {
            let step = required(profile.competitor_step, name, "competitor_step")?;
            let cap = required(profile.competitor_cap, name, "competitor_cap")?;
            let adjustment = competitor_adjustment(inputs.signals, solo_final, step, cap);
            (
                (solo_final * (1.0 + adjustment.fraction)).clamp(0.0, 100.0),
                Some(adjustment),
            )
        }
    };

    Ok(ScoreBreakdown {
        berkus: subs.berkus,
        scorecard: subs.scorecard,
        growth: subs.growth.clone(),
        pmf: subs.pmf.clone(),
        final_score,
        profile: inputs.mode,
        solo_final,
        adjustment,
        berkus_detail: subs.berkus_detail.clone(),
        scorecard_detail: subs.scorecard_detail.clone(),
    })
}

/// Each strength net of weaknesses moves the score by `step`, bounded by
/// `cap` in either direction. Unknown lists count as empty.
pub fn competitor_adjustment(
    signals: &CandidateSignals,
    solo_final: f64,
    step: f64,
    cap: f64,
) -> CompetitorAdjustment {
    let strengths = signals.strength_count().unwrap_or(0);
    let weaknesses = signals.weakness_count().unwrap_or(0);
    let net = strengths as f64 - weaknesses as f64;
    let fraction = (net * step).clamp(-cap, cap);
    CompetitorAdjustment {
        strengths,
        weaknesses,
        fraction,
        points: solo_final * fraction,
    }
}

fn required(
    weight: Option<f64>,
    profile: &'static str,
    key: &'static str,
) -> Result<f64, AggregationError> {
    weight.ok_or(AggregationError::MissingWeight {
        profile,
        weight: key,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
