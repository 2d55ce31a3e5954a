use crate::model::criteria::GrowthThresholds;
use crate::model::scores::{GrowthLabel, GrowthOutcome};

pub fn classify_growth(rate: Option<f64>, thresholds: &GrowthThresholds, weight: f64) -> GrowthOutcome {
    let Some(r) = rate else {
        return GrowthOutcome {
            rate: None,
            label: GrowthLabel::NoData,
            score: 0.0,
        };
    };

    let label = if r >= thresholds.excellent {
        GrowthLabel::Excellent
    } else if r >= thresholds.good {
        GrowthLabel::Good
    } else if r >= thresholds.warning {
        GrowthLabel::Warning
    } else {
        GrowthLabel::Critical
    };
    let score = r.clamp(0.0, thresholds.excellent) / thresholds.excellent * weight;

    GrowthOutcome {
        rate: Some(r),
        label,
        score,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/methods/growth.rs"]
mod tests;
