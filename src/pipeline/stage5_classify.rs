use serde::Serialize;

use crate::model::decision::{Grade, RiskLevel};
use crate::model::flags::{ChecklistItem, RiskFactor, checklist_order, risk_factor_order};
use crate::model::scores::{ScoreBreakdown, SurvivalOutcome, SurvivalTier};
use crate::model::signals::CandidateSignals;
use crate::model::thresholds::{EngineThresholds, GradeTable};

/// One rationale checklist row. `observed` is `None` when the backing
/// signal was not reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistEntry {
    pub item: ChecklistItem,
    pub met: bool,
    pub observed: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub raw_grade: Grade,
    pub grade: Grade,
    pub raw_risk: RiskLevel,
    pub risk: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub warning_triggers: usize,
    pub downgraded: bool,
}

#[derive(Debug, Clone)]
pub struct Stage5Inputs<'a> {
    pub breakdown: &'a ScoreBreakdown,
    pub signals: &'a CandidateSignals,
    pub survival: &'a SurvivalOutcome,
    pub checklist: &'a [ChecklistEntry],
    pub grades: &'a GradeTable,
    pub thresholds: &'a EngineThresholds,
}

pub fn run_stage5(inputs: &Stage5Inputs<'_>) -> Classification {
    let raw_grade = inputs.grades.grade_for(inputs.breakdown.final_score);
    let risk_factors = collect_risk_factors(inputs);
    let raw_risk = risk_level(risk_factors.len(), inputs.thresholds);

    let warning_triggers = inputs.checklist.iter().filter(|e| !e.met).count();
    let (grade, risk) = if warning_triggers >= inputs.thresholds.warning_downgrade_min {
        (raw_grade.downgraded(), RiskLevel::High)
    } else {
        (raw_grade, raw_risk)
    };

    Classification {
        raw_grade,
        grade,
        raw_risk,
        risk,
        risk_factors,
        warning_triggers,
        downgraded: grade != raw_grade,
    }
}

pub fn risk_level(factor_count: usize, thresholds: &EngineThresholds) -> RiskLevel {
    if factor_count >= thresholds.risk_high_factors {
        RiskLevel::High
    } else if factor_count >= thresholds.risk_medium_factors {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn collect_risk_factors(inputs: &Stage5Inputs<'_>) -> Vec<RiskFactor> {
    let mut out = Vec::new();
    for &factor in risk_factor_order() {
        if risk_factor_present(factor, inputs) {
            out.push(factor);
        }
    }
    out
}

fn risk_factor_present(factor: RiskFactor, inputs: &Stage5Inputs<'_>) -> bool {
    let s = inputs.signals;
    let t = inputs.thresholds;
    match factor {
        RiskFactor::ImmatureTechnology => s.trl.is_none_or(|trl| trl < t.reason_trl_min),
        RiskFactor::NoPatents => s.patent_count.is_none_or(|n| n == 0),
        RiskFactor::SmallMarket => s.tam.is_none_or(|tam| tam < t.risk_tam_min),
        RiskFactor::WeakPmf => inputs.breakdown.pmf.count < t.risk_pmf_min,
        RiskFactor::ThinFunding => {
            let immature_stage = s.funding_stage.as_ref().is_some_and(|st| st.is_immature());
            let low_total = s.total_funding.is_none_or(|f| f < t.risk_funding_min);
            let short_runway = inputs.survival.runway_months.is_some()
                && inputs.survival.tier == SurvivalTier::High;
            immature_stage || low_total || short_runway
        }
        RiskFactor::CompetitiveDisadvantage => match s.weakness_count() {
            Some(weak) => weak > s.strength_count().unwrap_or(0),
            None => false,
        },
    }
}

/// Evaluates the rationale checklist in its fixed order.
pub fn evaluate_checklist(
    signals: &CandidateSignals,
    pmf_count: usize,
    thresholds: &EngineThresholds,
) -> Vec<ChecklistEntry> {
    checklist_order()
        .iter()
        .map(|&item| {
            let (met, observed) = check_item(item, signals, pmf_count, thresholds);
            ChecklistEntry {
                item,
                met,
                observed,
            }
        })
        .collect()
}

fn check_item(
    item: ChecklistItem,
    s: &CandidateSignals,
    pmf_count: usize,
    t: &EngineThresholds,
) -> (bool, Option<String>) {
    match item {
        ChecklistItem::TechnologyMaturity => (
            s.trl.is_some_and(|v| v >= t.reason_trl_min),
            s.trl.map(|v| v.to_string()),
        ),
        ChecklistItem::PatentPortfolio => (
            s.patent_count.is_some_and(|v| v >= t.reason_patents_min),
            s.patent_count.map(|v| v.to_string()),
        ),
        ChecklistItem::MarketSize => (
            s.tam.is_some_and(|v| v >= t.reason_tam_min),
            s.tam.map(format_amount),
        ),
        ChecklistItem::GrowthRate => (
            s.growth_rate.is_some_and(|v| v >= t.reason_growth_min),
            s.growth_rate.map(|v| format!("{:.1}%", v * 100.0)),
        ),
        ChecklistItem::PmfValidation => (
            s.pmf_signals.is_some() && pmf_count >= t.reason_pmf_min,
            s.pmf_signals.as_ref().map(|_| pmf_count.to_string()),
        ),
        ChecklistItem::Funding => (
            s.total_funding.is_some_and(|v| v >= t.reason_funding_min),
            s.total_funding.map(format_amount),
        ),
        ChecklistItem::CompetitiveStrengths => (
            s.strength_count().is_some_and(|v| v >= t.reason_strengths_min),
            s.strength_count().map(|v| v.to_string()),
        ),
    }
}

pub fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_classify.rs"]
mod tests;
