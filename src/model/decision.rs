use serde::Serialize;

use crate::model::flags::RiskFactor;
use crate::model::scores::SurvivalOutcome;
use crate::model::stage::Degradation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    /// One tier down, never below C; D stays D.
    pub fn downgraded(self) -> Self {
        match self {
            Grade::S | Grade::A => Grade::B,
            Grade::B => Grade::C,
            Grade::C => Grade::C,
            Grade::D => Grade::D,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Grade::S => "Top-priority investment recommended",
            Grade::A => "Investment recommended",
            Grade::B => "Conditional investment recommended",
            Grade::C => "Investment on hold",
            Grade::D => "Investment not recommended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub grade: Grade,
    pub raw_grade: Grade,
    pub risk: RiskLevel,
    pub raw_risk: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub downgraded: bool,
    pub survival: SurvivalOutcome,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendation_text: String,
    pub degraded: bool,
    pub degradations: Vec<Degradation>,
}
