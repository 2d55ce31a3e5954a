use serde_json::{Map, Value};

use crate::criteria::aliases::{
    GrowthKey, berkus_category, growth_threshold, normalize_key, scorecard_category,
};
use crate::criteria::defs::{
    default_berkus, default_growth_thresholds, default_pmf_catalog, default_scorecard,
};
use crate::criteria::{
    CategoryProvenance, ConfigValidationError, CriteriaCategory, CriteriaSource, LoadedCriteria,
    Provenance,
};
use crate::input::fields::type_name;
use crate::model::criteria::{
    BERKUS_TOTAL, BerkusCaps, BerkusCategory, CriteriaConfig, GrowthThresholds,
    SCORECARD_TOLERANCE, ScorecardCategory, ScorecardWeights,
};
use crate::model::thresholds::{
    EngineThresholds, GradeTable, WeightingProfile, WeightingProfiles,
};

type Parsed<T> = Result<(T, Provenance), ConfigValidationError>;

/// Loads every criteria category independently. A category the source
/// does not publish uses its built-in value; a category that fails to
/// fetch or validate is replaced by its default and recorded as such.
pub fn load_criteria(source: &dyn CriteriaSource) -> LoadedCriteria {
    let mut provenance = Vec::with_capacity(CriteriaCategory::ALL.len());

    let berkus = resolve(
        source,
        CriteriaCategory::Berkus,
        default_berkus,
        parse_berkus,
        &mut provenance,
    );
    let scorecard = resolve(
        source,
        CriteriaCategory::Scorecard,
        default_scorecard,
        parse_scorecard,
        &mut provenance,
    );
    let growth_thresholds = resolve(
        source,
        CriteriaCategory::GrowthThresholds,
        default_growth_thresholds,
        parse_growth_thresholds,
        &mut provenance,
    );
    let pmf_signal_catalog = resolve(
        source,
        CriteriaCategory::PmfSignals,
        default_pmf_catalog,
        parse_pmf_catalog,
        &mut provenance,
    );
    let grades = resolve(
        source,
        CriteriaCategory::Grades,
        GradeTable::default_v1,
        parse_grades,
        &mut provenance,
    );
    let profiles = resolve(
        source,
        CriteriaCategory::Profiles,
        WeightingProfiles::default_v1,
        parse_profiles,
        &mut provenance,
    );

    LoadedCriteria {
        config: CriteriaConfig {
            berkus,
            scorecard,
            growth_thresholds,
            pmf_signal_catalog,
            grades,
            profiles,
            thresholds: EngineThresholds::default_v1(),
        },
        provenance,
    }
}

fn resolve<T>(
    source: &dyn CriteriaSource,
    category: CriteriaCategory,
    default: impl Fn() -> T,
    parse: impl Fn(&Value) -> Parsed<T>,
    out: &mut Vec<CategoryProvenance>,
) -> T {
    let (value, provenance) = match source.fetch(category) {
        Ok(None) => (default(), Provenance::Builtin),
        Ok(Some(raw)) => match parse(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                crate::warn!(
                    "criteria category {} rejected, using defaults: {e}",
                    category.as_str()
                );
                (
                    default(),
                    Provenance::Defaulted {
                        reason: e.to_string(),
                    },
                )
            }
        },
        Err(e) => {
            crate::warn!(
                "criteria category {} unavailable, using defaults: {e}",
                category.as_str()
            );
            (
                default(),
                Provenance::Defaulted {
                    reason: e.to_string(),
                },
            )
        }
    };
    if let Provenance::Rescaled { original_total } = &provenance {
        crate::info!(
            "criteria category {} rescaled from total {original_total}",
            category.as_str()
        );
    }
    out.push(CategoryProvenance {
        category,
        provenance,
    });
    value
}

fn expect_object<'v>(
    category: &'static str,
    raw: &'v Value,
) -> Result<&'v Map<String, Value>, ConfigValidationError> {
    raw.as_object().ok_or(ConfigValidationError::WrongShape {
        category,
        expected: "object",
        found: type_name(raw),
    })
}

fn entry_number(category: &'static str, key: &str, value: &Value) -> Result<f64, ConfigValidationError> {
    let Some(v) = value.as_f64() else {
        return Err(ConfigValidationError::NonNumeric {
            category,
            key: key.to_string(),
        });
    };
    if !v.is_finite() || v < 0.0 {
        return Err(ConfigValidationError::OutOfRange {
            category,
            key: key.to_string(),
            value: v,
        });
    }
    Ok(v)
}

/// Reads `N` aliased numeric entries into canonical slots. Unknown keys are
/// skipped with a warning; the first alias seen for a slot wins.
fn collect_entries<const N: usize, C: Copy>(
    category: &'static str,
    map: &Map<String, Value>,
    classify: impl Fn(&str) -> Option<C>,
    index: impl Fn(C) -> usize,
) -> Result<[Option<f64>; N], ConfigValidationError> {
    let mut slots = [None; N];
    for (key, value) in map {
        let Some(slot) = classify(key) else {
            crate::warn!("{category}: ignoring unknown entry {key:?}");
            continue;
        };
        let v = entry_number(category, key, value)?;
        let i = index(slot);
        if slots[i].is_some() {
            crate::warn!("{category}: duplicate entry {key:?} ignored");
            continue;
        }
        slots[i] = Some(v);
    }
    Ok(slots)
}

fn parse_berkus(raw: &Value) -> Parsed<BerkusCaps> {
    const CATEGORY: &str = "berkus";
    let map = expect_object(CATEGORY, raw)?;
    let slots: [Option<f64>; 5] =
        collect_entries(CATEGORY, map, berkus_category, BerkusCategory::index)?;
    let mut values = [0.0; 5];
    for category in BerkusCategory::ALL {
        values[category.index()] =
            slots[category.index()].ok_or(ConfigValidationError::MissingEntry {
                category: CATEGORY,
                key: category.key(),
            })?;
    }
    normalize_berkus(values)
}

/// Scales caps proportionally onto `BERKUS_TOTAL`. Rounding residue lands on
/// the largest category so the sum is exact.
pub fn normalize_berkus(values: [f64; 5]) -> Parsed<BerkusCaps> {
    let total: f64 = values.iter().sum();
    if !total.is_finite() {
        return Err(ConfigValidationError::OverflowingTotal { category: "berkus" });
    }
    if total <= 0.0 {
        return Err(ConfigValidationError::ZeroTotal { category: "berkus" });
    }
    let target = BERKUS_TOTAL as f64;
    if total == target && values.iter().all(|v| v.fract() == 0.0) {
        return Ok((
            BerkusCaps::new(values.map(|v| v as u64)),
            Provenance::Sourced,
        ));
    }

    let mut caps = values.map(|v| (v / total * target).round() as u64);
    let mut largest = 0;
    for i in 1..caps.len() {
        if caps[i] > caps[largest] {
            largest = i;
        }
    }
    let assigned: u64 = caps.iter().sum();
    if assigned > BERKUS_TOTAL {
        caps[largest] = caps[largest].saturating_sub(assigned - BERKUS_TOTAL);
    } else {
        caps[largest] += BERKUS_TOTAL - assigned;
    }
    Ok((
        BerkusCaps::new(caps),
        Provenance::Rescaled {
            original_total: total,
        },
    ))
}

fn parse_scorecard(raw: &Value) -> Parsed<ScorecardWeights> {
    const CATEGORY: &str = "scorecard";
    let map = expect_object(CATEGORY, raw)?;
    let slots: [Option<f64>; 7] =
        collect_entries(CATEGORY, map, scorecard_category, ScorecardCategory::index)?;
    let mut values = [0.0; 7];
    for category in ScorecardCategory::ALL {
        values[category.index()] =
            slots[category.index()].ok_or(ConfigValidationError::MissingEntry {
                category: CATEGORY,
                key: category.key(),
            })?;
    }
    normalize_scorecard(values)
}

pub fn normalize_scorecard(values: [f64; 7]) -> Parsed<ScorecardWeights> {
    let total: f64 = values.iter().sum();
    if !total.is_finite() {
        return Err(ConfigValidationError::OverflowingTotal {
            category: "scorecard",
        });
    }
    if total <= 0.0 {
        return Err(ConfigValidationError::ZeroTotal {
            category: "scorecard",
        });
    }
    if (total - 1.0).abs() <= SCORECARD_TOLERANCE {
        return Ok((ScorecardWeights::new(values), Provenance::Sourced));
    }
    Ok((
        ScorecardWeights::new(values.map(|w| w / total)),
        Provenance::Rescaled {
            original_total: total,
        },
    ))
}

fn parse_growth_thresholds(raw: &Value) -> Parsed<GrowthThresholds> {
    const CATEGORY: &str = "growth_thresholds";
    let map = expect_object(CATEGORY, raw)?;
    let index = |key: GrowthKey| match key {
        GrowthKey::Excellent => 0,
        GrowthKey::Good => 1,
        GrowthKey::Warning => 2,
    };
    let slots: [Option<f64>; 3] = collect_entries(CATEGORY, map, growth_threshold, index)?;
    let [Some(excellent), Some(good), Some(warning)] = slots else {
        let key = match slots {
            [None, _, _] => "excellent",
            [_, None, _] => "good",
            _ => "warning",
        };
        return Err(ConfigValidationError::MissingEntry {
            category: CATEGORY,
            key,
        });
    };
    if !(excellent > good && good > warning) {
        return Err(ConfigValidationError::Unordered {
            category: CATEGORY,
            detail: format!(
                "expected excellent > good > warning, got {excellent}, {good}, {warning}"
            ),
        });
    }
    Ok((
        GrowthThresholds {
            excellent,
            good,
            warning,
        },
        Provenance::Sourced,
    ))
}

fn parse_pmf_catalog(raw: &Value) -> Parsed<Vec<String>> {
    const CATEGORY: &str = "pmf_signals";
    let Value::Array(items) = raw else {
        return Err(ConfigValidationError::WrongShape {
            category: CATEGORY,
            expected: "list of strings",
            found: type_name(raw),
        });
    };
    let mut catalog: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(s) = item else {
            return Err(ConfigValidationError::WrongShape {
                category: CATEGORY,
                expected: "string entry",
                found: type_name(item),
            });
        };
        let entry = s.trim();
        if entry.is_empty() {
            continue;
        }
        let folded = entry.to_lowercase();
        if catalog.iter().any(|c| c.to_lowercase() == folded) {
            continue;
        }
        catalog.push(entry.to_string());
    }
    if catalog.is_empty() {
        return Err(ConfigValidationError::Empty { category: CATEGORY });
    }
    Ok((catalog, Provenance::Sourced))
}

fn parse_grades(raw: &Value) -> Parsed<GradeTable> {
    const CATEGORY: &str = "grades";
    let map = expect_object(CATEGORY, raw)?;
    let mut bounds: [Option<f64>; 4] = [None; 4];
    for (key, value) in map {
        let slot = match normalize_key(key).as_str() {
            "s" => 0,
            "a" => 1,
            "b" => 2,
            "c" => 3,
            "d" => continue,
            _ => {
                crate::warn!("{CATEGORY}: ignoring unknown entry {key:?}");
                continue;
            }
        };
        let Some(v) = value.as_f64() else {
            return Err(ConfigValidationError::NonNumeric {
                category: CATEGORY,
                key: key.clone(),
            });
        };
        bounds[slot] = Some(v);
    }
    const KEYS: [&str; 4] = ["S", "A", "B", "C"];
    let mut values = [0.0; 4];
    for (i, key) in KEYS.into_iter().enumerate() {
        values[i] = bounds[i].ok_or(ConfigValidationError::MissingEntry {
            category: CATEGORY,
            key,
        })?;
    }
    let table = GradeTable {
        s: values[0],
        a: values[1],
        b: values[2],
        c: values[3],
    };
    if !table.is_ordered() {
        return Err(ConfigValidationError::Unordered {
            category: CATEGORY,
            detail: format!(
                "expected S > A > B > C, got {}, {}, {}, {}",
                table.s, table.a, table.b, table.c
            ),
        });
    }
    Ok((table, Provenance::Sourced))
}

fn parse_profiles(raw: &Value) -> Parsed<WeightingProfiles> {
    const CATEGORY: &str = "profiles";
    let map = expect_object(CATEGORY, raw)?;
    let mut profiles = WeightingProfiles::default_v1();
    for (key, value) in map {
        let target = match normalize_key(key).as_str() {
            "solo" | "absolute" => &mut profiles.solo,
            "relative" => &mut profiles.relative,
            _ => {
                crate::warn!("{CATEGORY}: ignoring unknown profile {key:?}");
                continue;
            }
        };
        *target = parse_profile(expect_object(CATEGORY, value)?)?;
    }
    Ok((profiles, Provenance::Sourced))
}

// Weights the document omits stay unset; the aggregator decides whether
// the profile is usable.
fn parse_profile(map: &Map<String, Value>) -> Result<WeightingProfile, ConfigValidationError> {
    const CATEGORY: &str = "profiles";
    let mut profile = WeightingProfile {
        berkus: None,
        scorecard: None,
        growth: None,
        pmf: None,
        competitor_step: None,
        competitor_cap: None,
    };
    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        let slot = match normalize_key(key).as_str() {
            "berkus" => &mut profile.berkus,
            "scorecard" => &mut profile.scorecard,
            "growth" => &mut profile.growth,
            "pmf" => &mut profile.pmf,
            "competitor_step" => &mut profile.competitor_step,
            "competitor_cap" => &mut profile.competitor_cap,
            _ => {
                crate::warn!("{CATEGORY}: ignoring unknown weight {key:?}");
                continue;
            }
        };
        *slot = Some(entry_number(CATEGORY, key, value)?);
    }
    Ok(profile)
}
