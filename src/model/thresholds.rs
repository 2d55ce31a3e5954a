use serde::Serialize;

use crate::model::decision::Grade;

/// Fixed decision constants that are not sourced from the knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineThresholds {
    pub growth_weight: f64,
    pub pmf_achieved_min: usize,
    pub pmf_achieved_score: f64,
    pub pmf_pending_score: f64,
    pub runway_low_months: u32,
    pub runway_medium_months: u32,
    pub risk_high_factors: usize,
    pub risk_medium_factors: usize,
    pub warning_downgrade_min: usize,
    pub risk_tam_min: f64,
    pub risk_funding_min: f64,
    pub risk_pmf_min: usize,
    pub reason_trl_min: u8,
    pub reason_patents_min: u32,
    pub reason_tam_min: f64,
    pub reason_growth_min: f64,
    pub reason_pmf_min: usize,
    pub reason_funding_min: f64,
    pub reason_strengths_min: usize,
    pub max_rationale_lines: usize,
}

impl EngineThresholds {
    pub fn default_v1() -> Self {
        Self {
            growth_weight: 30.0,
            pmf_achieved_min: 4,
            pmf_achieved_score: 100.0,
            pmf_pending_score: 50.0,
            runway_low_months: 18,
            runway_medium_months: 12,
            risk_high_factors: 5,
            risk_medium_factors: 3,
            warning_downgrade_min: 3,
            risk_tam_min: 10.0,
            risk_funding_min: 10.0,
            risk_pmf_min: 2,
            reason_trl_min: 7,
            reason_patents_min: 3,
            reason_tam_min: 50.0,
            reason_growth_min: 0.15,
            reason_pmf_min: 3,
            reason_funding_min: 50.0,
            reason_strengths_min: 3,
            max_rationale_lines: 5,
        }
    }
}

/// Inclusive lower bounds, checked in descending order; anything below `c` is D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeTable {
    pub s: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl GradeTable {
    pub fn default_v1() -> Self {
        Self {
            s: 90.0,
            a: 75.0,
            b: 60.0,
            c: 45.0,
        }
    }

    pub fn is_ordered(&self) -> bool {
        let bounds = [self.s, self.a, self.b, self.c];
        bounds.iter().all(|b| b.is_finite()) && bounds.windows(2).all(|w| w[0] > w[1])
    }

    pub fn grade_for(&self, score: f64) -> Grade {
        let rows = [
            (Grade::S, self.s),
            (Grade::A, self.a),
            (Grade::B, self.b),
            (Grade::C, self.c),
        ];
        for (grade, bound) in rows {
            if score >= bound {
                return grade;
            }
        }
        Grade::D
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    Absolute,
    Relative,
}

impl ComparisonMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonMode::Absolute => "absolute",
            ComparisonMode::Relative => "relative",
        }
    }

    pub fn profile_name(self) -> &'static str {
        match self {
            ComparisonMode::Absolute => "solo",
            ComparisonMode::Relative => "relative",
        }
    }
}

/// Weights are optional so a sourced profile can be incomplete; the
/// aggregator refuses to run on a profile missing a required weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightingProfile {
    pub berkus: Option<f64>,
    pub scorecard: Option<f64>,
    pub growth: Option<f64>,
    pub pmf: Option<f64>,
    pub competitor_step: Option<f64>,
    pub competitor_cap: Option<f64>,
}

impl WeightingProfile {
    pub fn solo_v1() -> Self {
        Self {
            berkus: Some(0.4),
            scorecard: Some(0.6),
            growth: Some(0.0),
            pmf: Some(0.0),
            competitor_step: None,
            competitor_cap: None,
        }
    }

    pub fn relative_v1() -> Self {
        let mut base = Self::solo_v1();
        base.competitor_step = Some(0.025);
        base.competitor_cap = Some(0.10);
        base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightingProfiles {
    pub solo: WeightingProfile,
    pub relative: WeightingProfile,
}

impl WeightingProfiles {
    pub fn default_v1() -> Self {
        Self {
            solo: WeightingProfile::solo_v1(),
            relative: WeightingProfile::relative_v1(),
        }
    }

    pub fn for_mode(&self, mode: ComparisonMode) -> &WeightingProfile {
        match mode {
            ComparisonMode::Absolute => &self.solo,
            ComparisonMode::Relative => &self.relative,
        }
    }
}
