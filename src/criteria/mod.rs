pub mod aliases;
pub mod defs;
pub mod loader;
pub mod source;

use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::model::criteria::CriteriaConfig;
use crate::model::stage::{Degradation, DegradationKind, EvaluationStage};

pub use loader::load_criteria;
pub use source::{BuiltinCriteriaSource, JsonCriteriaSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaCategory {
    Berkus,
    Scorecard,
    GrowthThresholds,
    PmfSignals,
    Grades,
    Profiles,
}

impl CriteriaCategory {
    pub const ALL: [CriteriaCategory; 6] = [
        CriteriaCategory::Berkus,
        CriteriaCategory::Scorecard,
        CriteriaCategory::GrowthThresholds,
        CriteriaCategory::PmfSignals,
        CriteriaCategory::Grades,
        CriteriaCategory::Profiles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CriteriaCategory::Berkus => "berkus",
            CriteriaCategory::Scorecard => "scorecard",
            CriteriaCategory::GrowthThresholds => "growth_thresholds",
            CriteriaCategory::PmfSignals => "pmf_signals",
            CriteriaCategory::Grades => "grades",
            CriteriaCategory::Profiles => "profiles",
        }
    }
}

/// Where the value of a criteria category came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Provenance {
    Builtin,
    Sourced,
    Rescaled { original_total: f64 },
    Defaulted { reason: String },
}

impl Provenance {
    pub fn is_default_substitution(&self) -> bool {
        matches!(self, Provenance::Defaulted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProvenance {
    pub category: CriteriaCategory,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedCriteria {
    pub config: CriteriaConfig,
    pub provenance: Vec<CategoryProvenance>,
}

impl LoadedCriteria {
    #[cfg(test)]
    pub fn builtin() -> Self {
        load_criteria(&BuiltinCriteriaSource)
    }

    #[cfg(test)]
    pub fn provenance_of(&self, category: CriteriaCategory) -> Option<&Provenance> {
        self.provenance
            .iter()
            .find(|p| p.category == category)
            .map(|p| &p.provenance)
    }

    /// Categories replaced by defaults, reported against one candidate.
    pub fn degradations(&self, candidate: &str) -> Vec<Degradation> {
        self.provenance
            .iter()
            .filter_map(|p| match &p.provenance {
                Provenance::Defaulted { reason } => Some(Degradation {
                    kind: DegradationKind::ConfigDefaulted,
                    candidate: candidate.to_string(),
                    stage: EvaluationStage::CriteriaLoaded,
                    field: p.category.as_str().to_string(),
                    detail: reason.clone(),
                }),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("criteria document is not valid JSON: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("{category}: expected {expected}, found {found}")]
    WrongShape {
        category: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{category}.{key}: value is not a number")]
    NonNumeric { category: &'static str, key: String },
    #[error("{category}.{key}: value {value} is negative or not finite")]
    OutOfRange {
        category: &'static str,
        key: String,
        value: f64,
    },
    #[error("{category}: missing entry {key}")]
    MissingEntry { category: &'static str, key: &'static str },
    #[error("{category}: values sum to zero")]
    ZeroTotal { category: &'static str },
    #[error("{category}: values sum past the representable range")]
    OverflowingTotal { category: &'static str },
    #[error("{category}: {detail}")]
    Unordered { category: &'static str, detail: String },
    #[error("{category}: list is empty")]
    Empty { category: &'static str },
}

/// Knowledge source the criteria are retrieved from. `Ok(None)` means the
/// source does not publish the category; the built-in default applies.
pub trait CriteriaSource {
    fn fetch(&self, category: CriteriaCategory) -> Result<Option<Value>, SourceError>;
}

/// Explicitly constructed criteria cache. Loads once on `init`, hands out
/// shared immutable snapshots, and reloads only after `invalidate`.
pub struct CriteriaStore {
    source: Box<dyn CriteriaSource + Send + Sync>,
    cached: RwLock<Option<Arc<LoadedCriteria>>>,
}

impl CriteriaStore {
    pub fn new(source: Box<dyn CriteriaSource + Send + Sync>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    pub fn init(&self) -> Arc<LoadedCriteria> {
        if let Some(loaded) = self.get() {
            return loaded;
        }
        let mut slot = self.cached.write().unwrap_or_else(|e| e.into_inner());
        if let Some(loaded) = slot.as_ref() {
            return Arc::clone(loaded);
        }
        let loaded = Arc::new(load_criteria(self.source.as_ref()));
        *slot = Some(Arc::clone(&loaded));
        loaded
    }

    pub fn get(&self) -> Option<Arc<LoadedCriteria>> {
        self.cached
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(Arc::clone)
    }

    #[cfg(test)]
    pub fn invalidate(&self) {
        let mut slot = self.cached.write().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            crate::info!("criteria cache invalidated");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/criteria/tests.rs"]
mod tests;
