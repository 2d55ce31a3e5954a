use serde::Serialize;

pub const UNKNOWN_CANDIDATE: &str = "unknown";

/// Canonical per-company record. Every field is independently optional and
/// `None` means "not reported", which is never the same as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidateSignals {
    pub name: Option<String>,
    pub trl: Option<u8>,
    pub patent_count: Option<u32>,
    pub core_technology: Option<Vec<String>>,
    pub tech_score: Option<f64>,
    pub tam: Option<f64>,
    pub sam: Option<f64>,
    pub som: Option<f64>,
    pub growth_rate: Option<f64>,
    pub market_growth_rate: Option<f64>,
    pub pmf_signals: Option<Vec<String>>,
    pub team_size: Option<u32>,
    pub key_people: Option<Vec<String>>,
    pub funding_rounds: Option<u32>,
    pub total_funding: Option<f64>,
    pub funding_stage: Option<FundingStage>,
    pub runway_months: Option<u32>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
}

impl CandidateSignals {
    pub fn candidate_id(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_CANDIDATE)
    }

    pub fn strength_count(&self) -> Option<usize> {
        self.strengths.as_ref().map(Vec::len)
    }

    pub fn weakness_count(&self) -> Option<usize> {
        self.weaknesses.as_ref().map(Vec::len)
    }

    pub fn has_core_technology(&self) -> bool {
        self.core_technology.as_ref().is_some_and(|v| !v.is_empty())
    }

    pub fn has_key_people(&self) -> bool {
        self.key_people.as_ref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingStage {
    PreSeed,
    Seed,
    Angel,
    SeriesA,
    SeriesB,
    SeriesC,
    Later,
    Other(String),
}

impl FundingStage {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let stage = match key.as_str() {
            "preseed" | "프리시드" => FundingStage::PreSeed,
            "seed" | "시드" => FundingStage::Seed,
            "angel" | "엔젤" => FundingStage::Angel,
            "seriesa" | "시리즈a" => FundingStage::SeriesA,
            "seriesb" | "시리즈b" => FundingStage::SeriesB,
            "seriesc" | "시리즈c" => FundingStage::SeriesC,
            "seriesd" | "seriese" | "growth" | "preipo" | "ipo" | "시리즈d" | "상장" => {
                FundingStage::Later
            }
            _ => FundingStage::Other(trimmed.to_string()),
        };
        Some(stage)
    }

    pub fn is_immature(&self) -> bool {
        matches!(
            self,
            FundingStage::PreSeed | FundingStage::Seed | FundingStage::Angel
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            FundingStage::PreSeed => "pre_seed",
            FundingStage::Seed => "seed",
            FundingStage::Angel => "angel",
            FundingStage::SeriesA => "series_a",
            FundingStage::SeriesB => "series_b",
            FundingStage::SeriesC => "series_c",
            FundingStage::Later => "later",
            FundingStage::Other(raw) => raw.as_str(),
        }
    }
}

impl Serialize for FundingStage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
