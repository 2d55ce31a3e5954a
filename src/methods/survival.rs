use crate::model::scores::{SurvivalOutcome, SurvivalTier};
use crate::model::thresholds::EngineThresholds;

/// Runway tiers. Unknown runway is high risk.
pub fn classify_survival(runway_months: Option<u32>, thresholds: &EngineThresholds) -> SurvivalOutcome {
    let tier = match runway_months {
        Some(m) if m >= thresholds.runway_low_months => SurvivalTier::Low,
        Some(m) if m >= thresholds.runway_medium_months => SurvivalTier::Medium,
        _ => SurvivalTier::High,
    };
    SurvivalOutcome {
        runway_months,
        tier,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/methods/survival.rs"]
mod tests;
