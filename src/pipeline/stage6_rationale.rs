use crate::model::decision::{Grade, RiskLevel};
use crate::model::flags::ChecklistItem;
use crate::model::stage::Degradation;
use crate::pipeline::stage5_classify::{ChecklistEntry, Classification};

#[derive(Debug, Clone, PartialEq)]
pub struct Rationale {
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Stage6Inputs<'a> {
    pub final_score: f64,
    pub classification: &'a Classification,
    pub checklist: &'a [ChecklistEntry],
    pub degradations: &'a [Degradation],
    pub max_lines: usize,
}

pub fn run_stage6(inputs: &Stage6Inputs<'_>) -> Rationale {
    let class = inputs.classification;
    let max = inputs.max_lines;

    let mut reasons = Vec::with_capacity(max);
    reasons.push(grade_opening(class.grade, inputs.final_score));
    for entry in inputs.checklist.iter().filter(|e| e.met) {
        reasons.push(reason_line(entry));
    }
    reasons.truncate(max);

    let mut warnings = Vec::with_capacity(max);
    if let Some(line) = risk_opening(class) {
        warnings.push(line);
    }
    for entry in inputs.checklist.iter().filter(|e| !e.met) {
        warnings.push(warning_line(entry));
    }
    if inputs.degradations.is_empty() {
        warnings.truncate(max);
    } else {
        warnings.truncate(max.saturating_sub(1));
        warnings.push(degradation_line(inputs.degradations));
    }

    Rationale { reasons, warnings }
}

fn grade_opening(grade: Grade, score: f64) -> String {
    match grade {
        Grade::S => format!("Outstanding overall score of {score:.1}; top-tier investment candidate"),
        Grade::A => format!("Strong overall score of {score:.1} with solid fundamentals"),
        Grade::B => format!("Moderate overall score of {score:.1}; investable under conditions"),
        Grade::C => format!("Below-target overall score of {score:.1}; further validation needed"),
        Grade::D => format!("Low overall score of {score:.1}; fundamentals not yet established"),
    }
}

fn risk_opening(class: &Classification) -> Option<String> {
    let factors = class.risk_factors.len();
    match class.risk {
        RiskLevel::Low => None,
        RiskLevel::Medium => Some(format!("Medium risk: {factors} risk factor(s) identified")),
        RiskLevel::High if class.downgraded => Some(format!(
            "High risk: {} warning signals lowered the grade from {} to {}",
            class.warning_triggers,
            class.raw_grade.as_str(),
            class.grade.as_str()
        )),
        RiskLevel::High if class.raw_risk != RiskLevel::High => Some(format!(
            "High risk: {} warning signals outweigh {factors} risk factor(s)",
            class.warning_triggers
        )),
        RiskLevel::High => Some(format!("High risk: {factors} risk factor(s) identified")),
    }
}

fn reason_line(entry: &ChecklistEntry) -> String {
    let v = entry.observed.as_deref().unwrap_or("N/A");
    match entry.item {
        ChecklistItem::TechnologyMaturity => format!("Commercially mature technology (TRL {v})"),
        ChecklistItem::PatentPortfolio => format!("Protected technology position ({v} patents)"),
        ChecklistItem::MarketSize => format!("Large addressable market (TAM {v})"),
        ChecklistItem::GrowthRate => format!("High growth rate ({v})"),
        ChecklistItem::PmfValidation => format!("Product-market fit evidenced by {v} signals"),
        ChecklistItem::Funding => format!("Well funded (total funding {v})"),
        ChecklistItem::CompetitiveStrengths => format!("{v} competitive strengths over peers"),
    }
}

fn warning_line(entry: &ChecklistEntry) -> String {
    let v = entry.observed.as_deref().unwrap_or("N/A");
    match entry.item {
        ChecklistItem::TechnologyMaturity => format!("Technology not yet mature (TRL {v})"),
        ChecklistItem::PatentPortfolio => format!("Thin patent portfolio ({v} patents)"),
        ChecklistItem::MarketSize => format!("Limited addressable market (TAM {v})"),
        ChecklistItem::GrowthRate => format!("Low growth rate ({v})"),
        ChecklistItem::PmfValidation => format!("Weak product-market fit evidence ({v} signals)"),
        ChecklistItem::Funding => format!("Insufficient funding (total funding {v})"),
        ChecklistItem::CompetitiveStrengths => format!("Few competitive strengths ({v})"),
    }
}

fn degradation_line(degradations: &[Degradation]) -> String {
    let fields = degradations
        .iter()
        .map(|d| d.field.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Evaluated on degraded input: {} substitution(s) ({fields})",
        degradations.len()
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_rationale.rs"]
mod tests;
