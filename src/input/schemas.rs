use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use crate::input::InputError;
use crate::input::fields::{AliasConflict, Section, ShapeLog, SignalShapeError, type_name};
use crate::model::signals::{CandidateSignals, FundingStage};

/// Upstream key-naming schemas, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSchema {
    PipelineState,
    LegacyAnalysis,
    Korean,
}

impl SignalSchema {
    pub const ALL: [SignalSchema; 3] = [
        SignalSchema::PipelineState,
        SignalSchema::LegacyAnalysis,
        SignalSchema::Korean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalSchema::PipelineState => "pipeline_state",
            SignalSchema::LegacyAnalysis => "legacy_analysis",
            SignalSchema::Korean => "korean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthRateSource {
    Company,
    Market,
}

/// What ingestion saw: which schemas contributed, which fields were
/// unreadable, and which aliases disagreed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestionNotes {
    pub schemas: Vec<SignalSchema>,
    pub shape_errors: Vec<SignalShapeError>,
    pub alias_conflicts: Vec<AliasConflict>,
    pub growth_rate_source: Option<GrowthRateSource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSignals {
    pub signals: CandidateSignals,
    pub notes: IngestionNotes,
}

pub fn normalize_payload(payload: &Value) -> Result<NormalizedSignals, InputError> {
    let map = match payload {
        Value::Null => {
            return Ok(NormalizedSignals {
                signals: CandidateSignals::default(),
                notes: IngestionNotes::default(),
            });
        }
        Value::Object(map) => map,
        other => {
            return Err(InputError::MalformedPayload {
                found: type_name(other),
            });
        }
    };

    let root = Section::root(map);
    let mut log = ShapeLog::default();
    let mut signals = CandidateSignals::default();
    let mut schemas = Vec::new();

    for schema in SignalSchema::ALL {
        let partial = match schema {
            SignalSchema::PipelineState => adapt_pipeline_state(&root, &mut log),
            SignalSchema::LegacyAnalysis => adapt_legacy_analysis(&root, &mut log),
            SignalSchema::Korean => adapt_korean(&root, &mut log),
        };
        if partial == CandidateSignals::default() {
            continue;
        }
        schemas.push(schema);
        merge_signals(&mut signals, partial, schema, &mut log);
    }

    let growth_rate_source = resolve_growth_rate(&mut signals);
    let (shape_errors, alias_conflicts) = log.into_parts();
    Ok(NormalizedSignals {
        signals,
        notes: IngestionNotes {
            schemas,
            shape_errors,
            alias_conflicts,
            growth_rate_source,
        },
    })
}

/// The company's own rate wins; the market rate stands in when it is all
/// upstream reported.
pub fn resolve_growth_rate(signals: &mut CandidateSignals) -> Option<GrowthRateSource> {
    if signals.growth_rate.is_some() {
        return Some(GrowthRateSource::Company);
    }
    let market = signals.market_growth_rate?;
    signals.growth_rate = Some(market);
    Some(GrowthRateSource::Market)
}

/// Shared pipeline state: `profile`, `space`, `market`, `growth`, `funding`,
/// `survival`, `comparison`. Outcome sections may nest their fields under
/// `analysis`.
pub fn adapt_pipeline_state(root: &Section<'_>, log: &mut ShapeLog) -> CandidateSignals {
    let mut out = CandidateSignals::default();

    if let Some(profile) = root.child(&["profile"], log) {
        out.name = profile.text(&["name"], log);
        out.team_size = profile.count(&["team_size", "employee_count"], log);
        out.key_people = profile.list(&["key_people"], log);
    }

    if let Some(space) = root.child(&["space"], log) {
        out.trl = space.trl(&["trl_level", "trl"], log);
        out.patent_count = space.count(&["patent_count", "patents"], log);
        out.core_technology = space.list(&["core_technology", "main_technology"], log);
        out.tech_score = space.percent_score(&["tech_score", "score"], log);
    }

    let market = outcome_sections(root, "market", log);
    let (tam, sam, som) = market_size(&market, log);
    out.tam = tam;
    out.sam = sam;
    out.som = som;
    out.market_growth_rate =
        first_of(&market, log, |s, log| s.number(&["market_growth_rate", "growth_rate"], log));
    out.pmf_signals = first_of(&market, log, |s, log| s.list(&["pmf_signals"], log));

    let growth = outcome_sections(root, "growth", log);
    out.growth_rate = first_of(&growth, log, |s, log| s.number(&["growth_rate"], log));
    let growth_trl = first_of(&growth, log, |s, log| s.trl(&["trl_level"], log));
    out.trl = prefer(out.trl, growth_trl, "trl", "growth.trl_level", log);

    if let Some(funding) = root.child(&["funding"], log) {
        out.funding_stage = funding
            .text(&["stage", "funding_stage"], log)
            .and_then(|s| FundingStage::parse(&s));
        out.total_funding = funding.non_negative(&["total_funding", "total_funding_krw"], log);
        out.funding_rounds = funding.count(&["funding_rounds", "rounds"], log);
    }

    let survival = outcome_sections(root, "survival", log);
    out.runway_months = first_of(&survival, log, |s, log| months(s, &["runway_months"], log));
    let survival_rounds = first_of(&survival, log, |s, log| s.count(&["funding_rounds"], log));
    out.funding_rounds = prefer(
        out.funding_rounds,
        survival_rounds,
        "funding_rounds",
        "survival.funding_rounds",
        log,
    );

    if let Some(comparison) = root.child(&["comparison"], log) {
        out.strengths = comparison.list(&["our_strengths", "strengths"], log);
        out.weaknesses = comparison.list(&["our_weaknesses", "weaknesses"], log);
    }

    out
}

/// Older per-analysis outputs: `tech_analysis`, `market_analysis` and
/// `survival_analysis` with its `financial`, `funding_history` and
/// `team_info` parts.
pub fn adapt_legacy_analysis(root: &Section<'_>, log: &mut ShapeLog) -> CandidateSignals {
    let mut out = CandidateSignals::default();

    if let Some(tech) = root.child(&["tech_analysis"], log) {
        out.trl = tech.trl(&["trl_level", "trl"], log);
        out.patent_count = tech.count(&["patents", "patent_count"], log);
        out.core_technology = tech.list(&["core_technology"], log);
        out.tech_score = tech.percent_score(&["score", "tech_score"], log);
    }

    if let Some(market) = root.child(&["market_analysis"], log) {
        let (tam, sam, som) = market_size(std::slice::from_ref(&market), log);
        out.tam = tam;
        out.sam = sam;
        out.som = som;
        out.growth_rate = market.number(&["growth_rate"], log);
        out.market_growth_rate = market.number(&["market_growth_rate"], log);
        out.pmf_signals = market.list(&["pmf_signals"], log);
    }

    if let Some(survival) = root.child(&["survival_analysis"], log) {
        if let Some(financial) = survival.child(&["financial"], log) {
            out.runway_months = months(&financial, &["runway_months"], log);
            out.total_funding =
                financial.non_negative(&["total_funding", "total_funding_krw"], log);
        }
        out.funding_rounds = survival.count(&["funding_history"], log);
        if let Some(team) = survival.child(&["team_info"], log) {
            out.team_size = team.count(&["team_size"], log);
            out.key_people = team.list(&["key_people"], log);
        }
    }

    out
}

/// Korean-keyed variant of the per-analysis outputs.
pub fn adapt_korean(root: &Section<'_>, log: &mut ShapeLog) -> CandidateSignals {
    let mut out = CandidateSignals::default();

    if let Some(company) = root.child(&["기업정보"], log) {
        out.name = company.text(&["기업명", "회사명", "이름"], log);
        out.team_size = company.count(&["직원수", "팀_규모", "팀규모"], log);
        out.key_people = company.list(&["핵심인력", "경영진"], log);
    }

    if let Some(tech) = root.child(&["기술분석"], log) {
        out.trl = tech.trl(&["TRL", "trl", "기술성숙도"], log);
        out.patent_count = tech.count(&["특허", "특허수"], log);
        out.core_technology = tech.list(&["핵심기술"], log);
        out.tech_score = tech.percent_score(&["기술점수", "점수"], log);
    }

    if let Some(market) = root.child(&["시장분석"], log) {
        let nested = market.child(&["시장규모"], log);
        let sections: Vec<Section<'_>> = nested.into_iter().chain([market.clone()]).collect();
        out.tam = first_of(&sections, log, |s, log| s.non_negative(&["TAM", "tam"], log));
        out.sam = first_of(&sections, log, |s, log| s.non_negative(&["SAM", "sam"], log));
        out.som = first_of(&sections, log, |s, log| s.non_negative(&["SOM", "som"], log));
        out.market_growth_rate = market.number(&["시장성장률"], log);
        out.pmf_signals = market.list(&["PMF신호", "PMF_신호", "pmf_신호"], log);
    }

    if let Some(growth) = root.child(&["성장분석"], log) {
        out.growth_rate = growth.number(&["성장률"], log);
    }

    if let Some(funding) = root.child(&["투자"], log) {
        out.funding_stage = funding
            .text(&["투자단계", "단계"], log)
            .and_then(|s| FundingStage::parse(&s));
        out.total_funding = funding.non_negative(&["총투자금", "누적투자금"], log);
        out.funding_rounds = funding.count(&["투자라운드", "투자횟수"], log);
    }

    if let Some(survival) = root.child(&["생존분석"], log) {
        out.runway_months = months(&survival, &["런웨이_개월", "런웨이"], log);
    }

    if let Some(comparison) = root.child(&["경쟁비교"], log) {
        out.strengths = comparison.list(&["강점", "우리_강점"], log);
        out.weaknesses = comparison.list(&["약점", "우리_약점"], log);
    }

    out
}

/// Folds one schema's reading into the record. Fields already set stay;
/// a different value arriving under another schema is recorded.
pub fn merge_signals(
    base: &mut CandidateSignals,
    incoming: CandidateSignals,
    schema: SignalSchema,
    log: &mut ShapeLog,
) {
    let source = schema.as_str();
    macro_rules! merge {
        ($($field:ident),* $(,)?) => {
            $(
                base.$field = prefer(
                    base.$field.take(),
                    incoming.$field,
                    stringify!($field),
                    source,
                    log,
                );
            )*
        };
    }
    merge!(
        name,
        trl,
        patent_count,
        core_technology,
        tech_score,
        tam,
        sam,
        som,
        growth_rate,
        market_growth_rate,
        pmf_signals,
        team_size,
        key_people,
        funding_rounds,
        total_funding,
        funding_stage,
        runway_months,
        strengths,
        weaknesses,
    );
}

fn prefer<T: PartialEq + Debug>(
    kept: Option<T>,
    other: Option<T>,
    field: &str,
    source: &str,
    log: &mut ShapeLog,
) -> Option<T> {
    match (kept, other) {
        (Some(kept), Some(other)) => {
            if kept != other {
                log.conflict(
                    field.to_string(),
                    source.to_string(),
                    format!("{kept:?}"),
                    format!("{other:?}"),
                );
            }
            Some(kept)
        }
        (kept, other) => kept.or(other),
    }
}

// The outcome section itself plus its `analysis` child, innermost first.
fn outcome_sections<'v>(root: &Section<'v>, key: &str, log: &mut ShapeLog) -> Vec<Section<'v>> {
    let Some(outer) = root.child(&[key], log) else {
        return Vec::new();
    };
    let mut sections = Vec::with_capacity(2);
    if let Some(inner) = outer.child(&["analysis"], log) {
        sections.push(inner);
    }
    sections.push(outer);
    sections
}

fn first_of<'v, T>(
    sections: &[Section<'v>],
    log: &mut ShapeLog,
    read: impl Fn(&Section<'v>, &mut ShapeLog) -> Option<T>,
) -> Option<T> {
    sections.iter().find_map(|s| read(s, log))
}

// TAM/SAM/SOM either nested under `tam_sam_som` or flat.
fn market_size(
    sections: &[Section<'_>],
    log: &mut ShapeLog,
) -> (Option<f64>, Option<f64>, Option<f64>) {
    let mut nested = Vec::new();
    for section in sections {
        if let Some(child) = section.child(&["tam_sam_som"], log) {
            nested.push(child);
        }
    }
    let tam = first_of(&nested, log, |s, log| s.non_negative(&["TAM", "tam"], log));
    let flat_tam = first_of(sections, log, |s, log| {
        s.non_negative(&["tam", "global_tam_usd"], log)
    });
    let tam = prefer(tam, flat_tam, "tam", "global_tam_usd", log);
    let sam = first_of(&nested, log, |s, log| s.non_negative(&["SAM", "sam"], log))
        .or_else(|| first_of(sections, log, |s, log| s.non_negative(&["sam"], log)));
    let som = first_of(&nested, log, |s, log| s.non_negative(&["SOM", "som"], log))
        .or_else(|| first_of(sections, log, |s, log| s.non_negative(&["som"], log)));
    (tam, sam, som)
}

// Whole months; fractional runway is truncated.
fn months(section: &Section<'_>, keys: &[&str], log: &mut ShapeLog) -> Option<u32> {
    section.non_negative(keys, log).map(|v| v.floor() as u32)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/schemas.rs"]
mod tests;
