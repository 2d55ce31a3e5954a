use serde::Serialize;

use crate::model::thresholds::{EngineThresholds, GradeTable, WeightingProfiles};

/// Sum every Berkus configuration must reach after normalization.
pub const BERKUS_TOTAL: u64 = 2_500_000;

pub const SCORECARD_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BerkusCategory {
    SoundIdea,
    Prototype,
    QualityTeam,
    StrategicRelationships,
    ProductRollout,
}

impl BerkusCategory {
    pub const ALL: [BerkusCategory; 5] = [
        BerkusCategory::SoundIdea,
        BerkusCategory::Prototype,
        BerkusCategory::QualityTeam,
        BerkusCategory::StrategicRelationships,
        BerkusCategory::ProductRollout,
    ];

    pub fn key(self) -> &'static str {
        match self {
            BerkusCategory::SoundIdea => "sound_idea",
            BerkusCategory::Prototype => "prototype",
            BerkusCategory::QualityTeam => "quality_team",
            BerkusCategory::StrategicRelationships => "strategic_relationships",
            BerkusCategory::ProductRollout => "product_rollout",
        }
    }

    pub fn index(self) -> usize {
        match self {
            BerkusCategory::SoundIdea => 0,
            BerkusCategory::Prototype => 1,
            BerkusCategory::QualityTeam => 2,
            BerkusCategory::StrategicRelationships => 3,
            BerkusCategory::ProductRollout => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardCategory {
    Management,
    Opportunity,
    Product,
    CompetitiveEnvironment,
    Marketing,
    NeedForFunding,
    Other,
}

impl ScorecardCategory {
    pub const ALL: [ScorecardCategory; 7] = [
        ScorecardCategory::Management,
        ScorecardCategory::Opportunity,
        ScorecardCategory::Product,
        ScorecardCategory::CompetitiveEnvironment,
        ScorecardCategory::Marketing,
        ScorecardCategory::NeedForFunding,
        ScorecardCategory::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScorecardCategory::Management => "management",
            ScorecardCategory::Opportunity => "opportunity",
            ScorecardCategory::Product => "product",
            ScorecardCategory::CompetitiveEnvironment => "competitive_environment",
            ScorecardCategory::Marketing => "marketing",
            ScorecardCategory::NeedForFunding => "need_for_funding",
            ScorecardCategory::Other => "other",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ScorecardCategory::Management => 0,
            ScorecardCategory::Opportunity => 1,
            ScorecardCategory::Product => 2,
            ScorecardCategory::CompetitiveEnvironment => 3,
            ScorecardCategory::Marketing => 4,
            ScorecardCategory::NeedForFunding => 5,
            ScorecardCategory::Other => 6,
        }
    }
}

/// Maximum currency allocation per Berkus category, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BerkusCaps {
    caps: [u64; 5],
}

impl BerkusCaps {
    pub fn new(caps: [u64; 5]) -> Self {
        Self { caps }
    }

    pub fn get(&self, category: BerkusCategory) -> u64 {
        self.caps[category.index()]
    }

    pub fn total(&self) -> u64 {
        self.caps.iter().sum()
    }
}

impl Serialize for BerkusCaps {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(BerkusCategory::ALL.len()))?;
        for category in BerkusCategory::ALL {
            map.serialize_entry(category.key(), &self.get(category))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorecardWeights {
    weights: [f64; 7],
}

impl ScorecardWeights {
    pub fn new(weights: [f64; 7]) -> Self {
        Self { weights }
    }

    pub fn get(&self, category: ScorecardCategory) -> f64 {
        self.weights[category.index()]
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl Serialize for ScorecardWeights {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(ScorecardCategory::ALL.len()))?;
        for category in ScorecardCategory::ALL {
            map.serialize_entry(category.key(), &self.get(category))?;
        }
        map.end()
    }
}

/// Growth-rate label boundaries; `excellent > good > warning >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthThresholds {
    pub excellent: f64,
    pub good: f64,
    pub warning: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaConfig {
    pub berkus: BerkusCaps,
    pub scorecard: ScorecardWeights,
    pub growth_thresholds: GrowthThresholds,
    pub pmf_signal_catalog: Vec<String>,
    pub grades: GradeTable,
    pub profiles: WeightingProfiles,
    #[serde(skip)]
    pub thresholds: EngineThresholds,
}
