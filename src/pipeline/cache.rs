use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::model::scores::SubScores;
use crate::model::stage::EvaluationStage;
use crate::pipeline::stage2_signals::Stage2Output;

/// Identifies one candidate's input: its label plus a hash of the payload
/// as rendered by `serde_json`, whose maps are key-ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateKey {
    pub name: String,
    pub payload_hash: u64,
}

impl CandidateKey {
    pub fn new(name: &str, payload: &Value) -> Self {
        Self {
            name: name.to_string(),
            payload_hash: hash_bytes(payload.to_string().as_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
enum StageOutput {
    Signals(Arc<Stage2Output>),
    SubScores(Arc<SubScores>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

/// Outputs of the mode-independent stages, keyed by `(candidate, stage)`.
/// Aggregation onward depends on the comparison mode and is never cached.
#[derive(Debug, Default)]
pub struct StageCache {
    entries: HashMap<(CandidateKey, EvaluationStage), StageOutput>,
    hits: usize,
    misses: usize,
}

impl StageCache {
    pub fn signals(&mut self, key: &CandidateKey) -> Option<Arc<Stage2Output>> {
        let found = match self.entries.get(&(key.clone(), EvaluationStage::SignalsNormalized)) {
            Some(StageOutput::Signals(out)) => Some(Arc::clone(out)),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    pub fn sub_scores(&mut self, key: &CandidateKey) -> Option<Arc<SubScores>> {
        let found = match self.entries.get(&(key.clone(), EvaluationStage::SubScored)) {
            Some(StageOutput::SubScores(out)) => Some(Arc::clone(out)),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    pub fn store_signals(&mut self, key: CandidateKey, output: Arc<Stage2Output>) {
        self.entries.insert(
            (key, EvaluationStage::SignalsNormalized),
            StageOutput::Signals(output),
        );
    }

    pub fn store_sub_scores(&mut self, key: CandidateKey, output: Arc<SubScores>) {
        self.entries
            .insert((key, EvaluationStage::SubScored), StageOutput::SubScores(output));
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

pub fn hash_bytes(data: &[u8]) -> u64 {
    let mut hasher = Fnv64::new();
    hasher.update(data);
    hasher.finish()
}

struct Fnv64 {
    hash: u64,
}

impl Fnv64 {
    fn new() -> Self {
        Self {
            hash: 0xcbf29ce484222325,
        }
    }

    fn update(&mut self, data: &[u8]) {
        let mut h = self.hash;
        for &b in data {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.hash = h;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/cache.rs"]
mod tests;
