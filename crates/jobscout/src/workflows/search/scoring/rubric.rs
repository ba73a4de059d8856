use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// User-tunable configuration of keyword weights, preferences, and thresholds
/// driving job scoring.
///
/// Keyword maps are ordered so that matched signals come out in a stable,
/// reproducible order. Keys are held normalized: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub title_keywords: BTreeMap<String, i64>,
    #[serde(default)]
    pub description_keywords: BTreeMap<String, i64>,
    #[serde(default)]
    pub company_preferences: BTreeMap<String, i64>,
    #[serde(default)]
    pub location_preferences: BTreeMap<String, i64>,
    /// A job matching none of these (title + description) is excluded.
    /// Empty set means no requirement.
    #[serde(default)]
    pub required_keywords: BTreeSet<String>,
    /// A job matching any of these (title + description) is excluded,
    /// overriding every positive signal.
    #[serde(default)]
    pub blacklist_keywords: BTreeSet<String>,
    #[serde(default)]
    pub min_score_threshold: i64,
    #[serde(default)]
    pub auto_apply_threshold: i64,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            title_keywords: BTreeMap::new(),
            description_keywords: BTreeMap::new(),
            company_preferences: BTreeMap::new(),
            location_preferences: BTreeMap::new(),
            required_keywords: BTreeSet::new(),
            blacklist_keywords: BTreeSet::new(),
            min_score_threshold: 0,
            auto_apply_threshold: 0,
        }
    }
}

impl Rubric {
    /// The stock data-engineering/MLOps/cloud rubric the service ships with.
    pub fn standard() -> Self {
        let title_keywords = weight_map(&[
            ("data engineer", 15),
            ("data engineering", 15),
            ("senior data engineer", 20),
            ("lead data engineer", 18),
            ("staff data engineer", 22),
            ("principal data engineer", 25),
            ("mlops", 18),
            ("ml engineer", 16),
            ("machine learning engineer", 16),
            ("ml platform", 14),
            ("ai engineer", 14),
            ("cloud engineer", 16),
            ("devops engineer", 14),
            ("platform engineer", 15),
            ("infrastructure engineer", 13),
            ("site reliability engineer", 14),
            ("sre", 14),
        ]);

        let description_keywords = weight_map(&[
            ("apache spark", 8),
            ("kafka", 7),
            ("airflow", 7),
            ("kubernetes", 8),
            ("docker", 6),
            ("terraform", 7),
            ("aws", 6),
            ("azure", 6),
            ("gcp", 6),
            ("databricks", 8),
            ("snowflake", 7),
            ("dbt", 6),
            ("mlflow", 7),
            ("kubeflow", 8),
            ("sagemaker", 6),
            ("pytorch", 5),
            ("tensorflow", 5),
            ("python", 4),
            ("scala", 5),
            ("java", 4),
            ("sql", 3),
            ("ci/cd", 5),
            ("iac", 6),
            ("infrastructure as code", 6),
            ("data pipeline", 6),
            ("etl", 5),
            ("streaming", 6),
        ]);

        let company_preferences = weight_map(&[
            ("netflix", 5),
            ("spotify", 5),
            ("uber", 4),
            ("meta", 4),
            ("google", 5),
            ("microsoft", 4),
            ("amazon", 3),
        ]);

        let location_preferences = weight_map(&[
            ("remote", 8),
            ("hybrid", 5),
            ("san francisco", 3),
            ("new york", 3),
            ("seattle", 3),
            ("austin", 4),
        ]);

        Self {
            title_keywords,
            description_keywords,
            company_preferences,
            location_preferences,
            required_keywords: phrase_set(&["data", "engineering", "cloud", "ml"]),
            blacklist_keywords: phrase_set(&["unpaid", "internship", "entry level"]),
            min_score_threshold: 8,
            auto_apply_threshold: 25,
        }
    }

    /// Normalize and check every invariant, consuming the raw rubric.
    ///
    /// Keys are trimmed and lower-cased; two keys that collide after
    /// normalization are rejected rather than silently merged.
    pub fn validated(self) -> Result<Self, RubricError> {
        if self.min_score_threshold > self.auto_apply_threshold {
            return Err(RubricError::ThresholdOrder {
                min_score_threshold: self.min_score_threshold,
                auto_apply_threshold: self.auto_apply_threshold,
            });
        }

        Ok(Self {
            title_keywords: normalize_weights("title_keywords", self.title_keywords)?,
            description_keywords: normalize_weights(
                "description_keywords",
                self.description_keywords,
            )?,
            company_preferences: normalize_weights("company_preferences", self.company_preferences)?,
            location_preferences: normalize_weights(
                "location_preferences",
                self.location_preferences,
            )?,
            required_keywords: normalize_phrases("required_keywords", self.required_keywords)?,
            blacklist_keywords: normalize_phrases("blacklist_keywords", self.blacklist_keywords)?,
            min_score_threshold: self.min_score_threshold,
            auto_apply_threshold: self.auto_apply_threshold,
        })
    }
}

/// Partial rubric carrying only the fields the caller intends to change.
///
/// Produced upstream by the instruction-translation collaborator; treated as
/// untrusted input and fully validated on merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_keywords: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_keywords: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_preferences: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_preferences: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_keywords: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist_keywords: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score_threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_apply_threshold: Option<i64>,
}

impl RubricPatch {
    pub fn is_empty(&self) -> bool {
        self.title_keywords.is_none()
            && self.description_keywords.is_none()
            && self.company_preferences.is_none()
            && self.location_preferences.is_none()
            && self.required_keywords.is_none()
            && self.blacklist_keywords.is_none()
            && self.min_score_threshold.is_none()
            && self.auto_apply_threshold.is_none()
    }

    /// Merge onto `base` and validate, without touching `base` on failure.
    ///
    /// Maps and sets are upserted key by key; scalars are overwritten;
    /// nothing is ever implicitly deleted.
    pub fn apply(&self, base: &Rubric) -> Result<Rubric, RubricError> {
        let mut merged = base.clone();

        if let Some(map) = &self.title_keywords {
            upsert(&mut merged.title_keywords, "title_keywords", map)?;
        }
        if let Some(map) = &self.description_keywords {
            upsert(&mut merged.description_keywords, "description_keywords", map)?;
        }
        if let Some(map) = &self.company_preferences {
            upsert(&mut merged.company_preferences, "company_preferences", map)?;
        }
        if let Some(map) = &self.location_preferences {
            upsert(&mut merged.location_preferences, "location_preferences", map)?;
        }
        if let Some(set) = &self.required_keywords {
            let normalized = normalize_phrases("required_keywords", set.clone())?;
            merged.required_keywords.extend(normalized);
        }
        if let Some(set) = &self.blacklist_keywords {
            let normalized = normalize_phrases("blacklist_keywords", set.clone())?;
            merged.blacklist_keywords.extend(normalized);
        }
        if let Some(min) = self.min_score_threshold {
            merged.min_score_threshold = min;
        }
        if let Some(auto) = self.auto_apply_threshold {
            merged.auto_apply_threshold = auto;
        }

        merged.validated()
    }
}

/// Validation failure for a proposed rubric. Never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RubricError {
    #[error("negative weight {points} for '{phrase}' in {field}")]
    NegativeWeight {
        field: &'static str,
        phrase: String,
        points: i64,
    },
    #[error("empty phrase in {field}")]
    EmptyPhrase { field: &'static str },
    #[error("phrases in {field} collide on '{phrase}' after normalization")]
    DuplicatePhrase {
        field: &'static str,
        phrase: String,
    },
    #[error(
        "min_score_threshold {min_score_threshold} exceeds auto_apply_threshold {auto_apply_threshold}"
    )]
    ThresholdOrder {
        min_score_threshold: i64,
        auto_apply_threshold: i64,
    },
}

fn normalize_phrase(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn normalize_weights(
    field: &'static str,
    map: BTreeMap<String, i64>,
) -> Result<BTreeMap<String, i64>, RubricError> {
    let mut normalized = BTreeMap::new();
    for (raw, points) in map {
        let phrase = normalize_phrase(&raw);
        if phrase.is_empty() {
            return Err(RubricError::EmptyPhrase { field });
        }
        if points < 0 {
            return Err(RubricError::NegativeWeight {
                field,
                phrase,
                points,
            });
        }
        if normalized.insert(phrase.clone(), points).is_some() {
            return Err(RubricError::DuplicatePhrase { field, phrase });
        }
    }
    Ok(normalized)
}

fn normalize_phrases(
    field: &'static str,
    set: BTreeSet<String>,
) -> Result<BTreeSet<String>, RubricError> {
    let mut normalized = BTreeSet::new();
    for raw in set {
        let phrase = normalize_phrase(&raw);
        if phrase.is_empty() {
            return Err(RubricError::EmptyPhrase { field });
        }
        normalized.insert(phrase);
    }
    Ok(normalized)
}

fn upsert(
    target: &mut BTreeMap<String, i64>,
    field: &'static str,
    patch: &BTreeMap<String, i64>,
) -> Result<(), RubricError> {
    // Normalizing before the insert keeps "Spark" in a patch from landing
    // next to an existing "spark" entry as a distinct key.
    let normalized = normalize_weights(field, patch.clone())?;
    target.extend(normalized);
    Ok(())
}

fn weight_map(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(phrase, points)| (phrase.to_string(), *points))
        .collect()
}

fn phrase_set(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|phrase| phrase.to_string()).collect()
}
