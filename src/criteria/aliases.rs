use crate::criteria::CriteriaCategory;
use crate::model::criteria::{BerkusCategory, ScorecardCategory};

pub fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn berkus_category(key: &str) -> Option<BerkusCategory> {
    lookup(BERKUS_KEYS, key)
}

pub fn scorecard_category(key: &str) -> Option<ScorecardCategory> {
    lookup(SCORECARD_KEYS, key)
}

pub fn growth_threshold(key: &str) -> Option<GrowthKey> {
    lookup(GROWTH_KEYS, key)
}

/// Top-level document keys a criteria category may be published under.
pub fn document_keys(category: CriteriaCategory) -> &'static [&'static str] {
    match category {
        CriteriaCategory::Berkus => &["berkus", "berkus_criteria", "벌커스"],
        CriteriaCategory::Scorecard => &["scorecard", "scorecard_weights", "스코어카드"],
        CriteriaCategory::GrowthThresholds => &["growth_thresholds", "성장_기준", "성장기준"],
        CriteriaCategory::PmfSignals => &["pmf_signals", "pmf_signal_catalog", "pmf_신호", "pmf신호"],
        CriteriaCategory::Grades => &["grades", "grade_thresholds", "등급"],
        CriteriaCategory::Profiles => &["profiles", "weighting_profiles"],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthKey {
    Excellent,
    Good,
    Warning,
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    let key = normalize_key(key);
    for (alias, value) in table {
        if *alias == key {
            return Some(*value);
        }
    }
    None
}

const BERKUS_KEYS: &[(&str, BerkusCategory)] = &[
    ("sound_idea", BerkusCategory::SoundIdea),
    ("idea", BerkusCategory::SoundIdea),
    ("아이디어_품질", BerkusCategory::SoundIdea),
    ("prototype", BerkusCategory::Prototype),
    ("프로토타입", BerkusCategory::Prototype),
    ("quality_team", BerkusCategory::QualityTeam),
    ("management_team", BerkusCategory::QualityTeam),
    ("경영진", BerkusCategory::QualityTeam),
    ("strategic_relationships", BerkusCategory::StrategicRelationships),
    ("전략적_관계", BerkusCategory::StrategicRelationships),
    ("product_rollout", BerkusCategory::ProductRollout),
    ("제품_출시", BerkusCategory::ProductRollout),
];

const SCORECARD_KEYS: &[(&str, ScorecardCategory)] = &[
    ("management", ScorecardCategory::Management),
    ("management_team", ScorecardCategory::Management),
    ("경영진", ScorecardCategory::Management),
    ("opportunity", ScorecardCategory::Opportunity),
    ("size_of_opportunity", ScorecardCategory::Opportunity),
    ("시장", ScorecardCategory::Opportunity),
    ("product", ScorecardCategory::Product),
    ("product_technology", ScorecardCategory::Product),
    ("제품", ScorecardCategory::Product),
    ("competitive_environment", ScorecardCategory::CompetitiveEnvironment),
    ("competition", ScorecardCategory::CompetitiveEnvironment),
    ("경쟁", ScorecardCategory::CompetitiveEnvironment),
    ("marketing", ScorecardCategory::Marketing),
    ("marketing_sales", ScorecardCategory::Marketing),
    ("판매", ScorecardCategory::Marketing),
    ("need_for_funding", ScorecardCategory::NeedForFunding),
    ("need_for_investment", ScorecardCategory::NeedForFunding),
    ("투자", ScorecardCategory::NeedForFunding),
    ("other", ScorecardCategory::Other),
    ("기타", ScorecardCategory::Other),
];

const GROWTH_KEYS: &[(&str, GrowthKey)] = &[
    ("excellent", GrowthKey::Excellent),
    ("우수", GrowthKey::Excellent),
    ("good", GrowthKey::Good),
    ("양호", GrowthKey::Good),
    ("warning", GrowthKey::Warning),
    ("경고", GrowthKey::Warning),
];
