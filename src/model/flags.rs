use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    ImmatureTechnology,
    NoPatents,
    SmallMarket,
    WeakPmf,
    ThinFunding,
    CompetitiveDisadvantage,
}

pub fn risk_factor_order() -> &'static [RiskFactor] {
    &[
        RiskFactor::ImmatureTechnology,
        RiskFactor::NoPatents,
        RiskFactor::SmallMarket,
        RiskFactor::WeakPmf,
        RiskFactor::ThinFunding,
        RiskFactor::CompetitiveDisadvantage,
    ]
}

/// Rationale checklist entries. A satisfied item yields a reason, an
/// unsatisfied (or unknown) one yields a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    TechnologyMaturity,
    PatentPortfolio,
    MarketSize,
    GrowthRate,
    PmfValidation,
    Funding,
    CompetitiveStrengths,
}

pub fn checklist_order() -> &'static [ChecklistItem] {
    &[
        ChecklistItem::TechnologyMaturity,
        ChecklistItem::PatentPortfolio,
        ChecklistItem::MarketSize,
        ChecklistItem::GrowthRate,
        ChecklistItem::PmfValidation,
        ChecklistItem::Funding,
        ChecklistItem::CompetitiveStrengths,
    ]
}
