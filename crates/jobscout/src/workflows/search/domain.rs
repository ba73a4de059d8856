use serde::{Deserialize, Serialize};

/// Structurally validated job posting as consumed by the scoring engine.
///
/// Every field is guaranteed present; any of them may be an empty string,
/// which simply contributes no keyword matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub url: String,
    pub source_id: String,
}

/// Feed-side shape of a job posting before structural validation.
///
/// Upstream sources hand us loosely typed payloads; a field that is absent
/// (as opposed to empty) marks the record as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJobRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
}

impl RawJobRecord {
    /// Validate the structural shape, naming the first missing field.
    pub fn into_record(self) -> Result<JobRecord, MalformedJobRecord> {
        let missing = |field| MalformedJobRecord { field };
        Ok(JobRecord {
            title: self.title.ok_or_else(|| missing("title"))?,
            company: self.company.ok_or_else(|| missing("company"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            location: self.location.ok_or_else(|| missing("location"))?,
            url: self.url.ok_or_else(|| missing("url"))?,
            source_id: self.source_id.ok_or_else(|| missing("source_id"))?,
        })
    }
}

impl From<JobRecord> for RawJobRecord {
    fn from(job: JobRecord) -> Self {
        Self {
            title: Some(job.title),
            company: Some(job.company),
            description: Some(job.description),
            location: Some(job.location),
            url: Some(job.url),
            source_id: Some(job.source_id),
        }
    }
}

/// Structural validation failure for a single feed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("job record missing required field '{field}'")]
pub struct MalformedJobRecord {
    pub field: &'static str,
}

/// Which job field a keyword match was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalField {
    Title,
    Description,
    Company,
    Location,
}

impl SignalField {
    pub fn label(&self) -> &'static str {
        match self {
            SignalField::Title => "title",
            SignalField::Description => "description",
            SignalField::Company => "company",
            SignalField::Location => "location",
        }
    }
}

/// One (field, phrase, points) contribution recorded for score explainability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedSignal {
    pub field: SignalField,
    pub phrase: String,
    pub points: i64,
}

/// Why a job was dropped before any points were tallied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    Blacklisted { phrase: String },
    MissingRequiredKeyword,
}

impl ExclusionReason {
    pub fn summary(&self) -> String {
        match self {
            ExclusionReason::Blacklisted { phrase } => {
                format!("blacklisted phrase '{phrase}' present")
            }
            ExclusionReason::MissingRequiredKeyword => {
                "no required keyword present in title or description".to_string()
            }
        }
    }
}

/// Scored, annotated outcome of evaluating one job against one rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub job: JobRecord,
    pub score: i64,
    pub matched_signals: Vec<MatchedSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<ExclusionReason>,
}

impl ScoreResult {
    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }
}

/// Classification applied post-ranking based on the auto-apply threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Relevant,
}

impl PriorityTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Relevant => "relevant",
        }
    }
}

/// A surviving ranked result with its priority tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedJob {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub tier: PriorityTier,
}

/// Record rejected at the ranker boundary, reported but never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position of the offending record in the input batch.
    pub index: usize,
    pub error: MalformedJobRecord,
}
