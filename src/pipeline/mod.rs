pub mod cache;
pub mod stage2_signals;
pub mod stage3_methods;
pub mod stage4_aggregate;
pub mod stage5_classify;
pub mod stage6_rationale;
pub mod stage7_report;

use std::sync::{Arc, Mutex, MutexGuard};

use rayon::prelude::*;
use serde_json::Value;

use crate::criteria::LoadedCriteria;
use crate::input::InputError;
use crate::input::competitors::{ComparisonModeError, CompetitorOutcome, resolve_comparison_mode};
use crate::input::schemas::IngestionNotes;
use crate::model::decision::Decision;
use crate::model::scores::{ScoreBreakdown, SubScores};
use crate::model::signals::{CandidateSignals, UNKNOWN_CANDIDATE};
use crate::model::stage::EvaluationStage;
use crate::model::thresholds::ComparisonMode;

use cache::{CacheStats, CandidateKey, StageCache};
use stage2_signals::{Stage2Inputs, Stage2Output, run_stage2};
use stage3_methods::{Stage3Inputs, run_stage3};
use stage4_aggregate::{AggregationError, Stage4Inputs, run_stage4};
use stage5_classify::{ChecklistEntry, Stage5Inputs, evaluate_checklist, run_stage5};
use stage6_rationale::{Stage6Inputs, run_stage6};

/// One company to evaluate. `fallback_name` labels payloads that do not
/// carry a name of their own.
#[derive(Debug, Clone, Copy)]
pub struct CandidateInput<'a> {
    pub payload: &'a Value,
    pub fallback_name: Option<&'a str>,
}

impl<'a> CandidateInput<'a> {
    pub fn new(payload: &'a Value) -> Self {
        Self {
            payload,
            fallback_name: None,
        }
    }

    fn label(&self) -> &'a str {
        self.fallback_name.unwrap_or(UNKNOWN_CANDIDATE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub candidate: String,
    pub mode: ComparisonMode,
    pub signals: CandidateSignals,
    pub notes: IngestionNotes,
    pub checklist: Vec<ChecklistEntry>,
    pub breakdown: ScoreBreakdown,
    pub decision: Decision,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationErrorKind {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    ComparisonMode(#[from] ComparisonModeError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// A halted evaluation. `stage` is the last stage that completed.
#[derive(Debug, thiserror::Error)]
#[error("evaluation of {candidate} halted after stage {stage}: {kind}")]
pub struct EvaluationError {
    pub candidate: String,
    pub stage: EvaluationStage,
    #[source]
    pub kind: EvaluationErrorKind,
}

// Forward-only walk through the evaluation stages.
struct StageCursor {
    candidate: String,
    stage: EvaluationStage,
}

impl StageCursor {
    fn start(candidate: &str) -> Self {
        Self {
            candidate: candidate.to_string(),
            stage: EvaluationStage::CriteriaLoaded,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.stage.next() {
            self.stage = next;
        }
    }

    fn rename(&mut self, candidate: &str) {
        if self.candidate != candidate {
            self.candidate = candidate.to_string();
        }
    }

    fn fail(&self, kind: impl Into<EvaluationErrorKind>) -> EvaluationError {
        let err = EvaluationError {
            candidate: self.candidate.clone(),
            stage: self.stage,
            kind: kind.into(),
        };
        crate::error!("{err}");
        err
    }
}

/// Evaluates one candidate with no caching. Identical inputs always give
/// identical results.
#[cfg(test)]
pub fn evaluate(
    input: &CandidateInput<'_>,
    criteria: &LoadedCriteria,
    mode: ComparisonMode,
) -> Result<Evaluation, EvaluationError> {
    let mut cursor = StageCursor::start(input.label());
    let stage2 = normalize(input, criteria, &cursor)?;
    cursor.rename(stage2.signals.candidate_id());
    cursor.advance();
    let sub_scores = score(&stage2, criteria);
    cursor.advance();
    finish(&stage2, &sub_scores, criteria, mode, cursor)
}

fn normalize(
    input: &CandidateInput<'_>,
    criteria: &LoadedCriteria,
    cursor: &StageCursor,
) -> Result<Stage2Output, EvaluationError> {
    run_stage2(&Stage2Inputs {
        payload: input.payload,
        fallback_name: input.fallback_name,
        criteria,
    })
    .map_err(|e| cursor.fail(e))
}

fn score(stage2: &Stage2Output, criteria: &LoadedCriteria) -> SubScores {
    run_stage3(&Stage3Inputs {
        signals: &stage2.signals,
        config: &criteria.config,
    })
}

fn finish(
    stage2: &Stage2Output,
    sub_scores: &SubScores,
    criteria: &LoadedCriteria,
    mode: ComparisonMode,
    mut cursor: StageCursor,
) -> Result<Evaluation, EvaluationError> {
    let config = &criteria.config;
    let signals = &stage2.signals;

    let breakdown = run_stage4(&Stage4Inputs {
        sub_scores,
        signals,
        mode,
        profile: config.profiles.for_mode(mode),
        growth_weight: config.thresholds.growth_weight,
    })
    .map_err(|e| cursor.fail(e))?;
    cursor.advance();

    let checklist = evaluate_checklist(signals, sub_scores.pmf.count, &config.thresholds);
    let class = run_stage5(&Stage5Inputs {
        breakdown: &breakdown,
        signals,
        survival: &sub_scores.survival,
        checklist: &checklist,
        grades: &config.grades,
        thresholds: &config.thresholds,
    });
    cursor.advance();

    let rationale = run_stage6(&Stage6Inputs {
        final_score: breakdown.final_score,
        classification: &class,
        checklist: &checklist,
        degradations: &stage2.degradations,
        max_lines: config.thresholds.max_rationale_lines,
    });
    cursor.advance();

    let decision = Decision {
        grade: class.grade,
        raw_grade: class.raw_grade,
        risk: class.risk,
        raw_risk: class.raw_risk,
        risk_factors: class.risk_factors,
        downgraded: class.downgraded,
        survival: sub_scores.survival.clone(),
        reasons: rationale.reasons,
        warnings: rationale.warnings,
        recommendation_text: class.grade.recommendation().to_string(),
        degraded: !stage2.degradations.is_empty(),
        degradations: stage2.degradations.clone(),
    };
    cursor.advance();

    crate::info!(
        "candidate={} mode={} final={:.1} grade={} risk={}",
        cursor.candidate,
        mode.as_str(),
        breakdown.final_score,
        decision.grade.as_str(),
        decision.risk.as_str()
    );

    Ok(Evaluation {
        candidate: cursor.candidate,
        mode,
        signals: stage2.signals.clone(),
        notes: stage2.notes.clone(),
        checklist,
        breakdown,
        decision,
    })
}

/// Evaluates candidates against one criteria snapshot, reusing normalized
/// signals and sub-scores across comparison modes.
pub struct Evaluator {
    criteria: Arc<LoadedCriteria>,
    cache: Mutex<StageCache>,
}

impl Evaluator {
    pub fn new(criteria: Arc<LoadedCriteria>) -> Self {
        Self {
            criteria,
            cache: Mutex::new(StageCache::default()),
        }
    }

    pub fn criteria(&self) -> &LoadedCriteria {
        &self.criteria
    }

    pub fn evaluate(
        &self,
        input: &CandidateInput<'_>,
        mode: ComparisonMode,
    ) -> Result<Evaluation, EvaluationError> {
        let key = CandidateKey::new(input.label(), input.payload);
        let mut cursor = StageCursor::start(input.label());

        let cached = self.cache().signals(&key);
        let stage2 = match cached {
            Some(hit) => hit,
            None => {
                let out = Arc::new(normalize(input, &self.criteria, &cursor)?);
                self.cache().store_signals(key.clone(), Arc::clone(&out));
                out
            }
        };
        cursor.rename(stage2.signals.candidate_id());
        cursor.advance();

        let cached = self.cache().sub_scores(&key);
        let sub_scores = match cached {
            Some(hit) => hit,
            None => {
                let out = Arc::new(score(&stage2, &self.criteria));
                self.cache().store_sub_scores(key, Arc::clone(&out));
                out
            }
        };
        cursor.advance();

        finish(&stage2, &sub_scores, &self.criteria, mode, cursor)
    }

    /// Independent evaluations run in parallel; results keep input order.
    pub fn evaluate_batch(
        &self,
        inputs: &[CandidateInput<'_>],
        mode: ComparisonMode,
    ) -> Vec<Result<Evaluation, EvaluationError>> {
        inputs
            .par_iter()
            .map(|input| self.evaluate(input, mode))
            .collect()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    #[cfg(test)]
    pub fn invalidate(&self) {
        self.cache().clear();
    }

    fn cache(&self) -> MutexGuard<'_, StageCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug)]
pub struct CompetitorEvaluation {
    pub name: String,
    pub result: Result<Evaluation, EvaluationError>,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub mode: ComparisonMode,
    pub candidate: Evaluation,
    pub competitors: Vec<CompetitorEvaluation>,
}

/// Full run: an absolute first pass, then, when validated competitors
/// exist, a relative pass over the candidate and its competitors.
pub fn run_evaluation(
    evaluator: &Evaluator,
    payload: &Value,
    outcome: &CompetitorOutcome,
) -> Result<RunOutcome, EvaluationError> {
    let candidate_input = CandidateInput::new(payload);
    let first = evaluator.evaluate(&candidate_input, ComparisonMode::Absolute)?;

    let mode = resolve_comparison_mode(outcome).map_err(|e| {
        let mut cursor = StageCursor::start(&first.candidate);
        cursor.advance();
        cursor.advance();
        cursor.fail(e)
    })?;
    if mode == ComparisonMode::Absolute {
        return Ok(RunOutcome {
            mode,
            candidate: first,
            competitors: Vec::new(),
        });
    }

    crate::info!(
        "{} validated competitor(s); re-evaluating {} in relative mode",
        outcome.competitors.len(),
        first.candidate
    );
    let competitor_inputs: Vec<CandidateInput<'_>> = outcome
        .competitors
        .iter()
        .map(|c| CandidateInput {
            payload: &c.signals,
            fallback_name: Some(c.name.as_str()),
        })
        .collect();

    let (candidate, competitor_results) = rayon::join(
        || evaluator.evaluate(&candidate_input, mode),
        || evaluator.evaluate_batch(&competitor_inputs, mode),
    );
    let candidate = candidate?;

    let competitors = outcome
        .competitors
        .iter()
        .zip(competitor_results)
        .map(|(c, result)| {
            if let Err(e) = &result {
                crate::warn!("competitor {} not evaluated: {e}", c.name);
            }
            CompetitorEvaluation {
                name: c.name.clone(),
                result,
            }
        })
        .collect();

    Ok(RunOutcome {
        mode,
        candidate,
        competitors,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/tests.rs"]
mod tests;
