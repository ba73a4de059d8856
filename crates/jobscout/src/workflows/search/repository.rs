use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{JobRecord, PriorityTier, RawJobRecord};

/// Upstream listings source.
///
/// May return fewer records than requested; records arrive untyped and are
/// validated at the ranker boundary, never trusted here.
pub trait JobFeed: Send + Sync {
    fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawJobRecord>, FeedError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("listings source unavailable: {0}")]
    Unavailable(String),
    #[error("listings source rejected query: {0}")]
    BadQuery(String),
}

/// Durable log of jobs the user applied to.
pub trait ApplicationLog: Send + Sync {
    fn record(&self, entry: ApplicationEntry) -> Result<ApplicationEntry, LogError>;
    fn list(&self) -> Result<Vec<ApplicationEntry>, LogError>;
}

/// One recorded application, keyed downstream by the job's url/source id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub job: JobRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("application log unavailable: {0}")]
    Unavailable(String),
}

/// Outbound alert hook for the SMS/voice notification collaborator.
///
/// The payload carries score and tier so the collaborator can pick a channel;
/// transport is entirely its business.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAlert {
    pub title: String,
    pub company: String,
    pub url: String,
    pub score: i64,
    pub tier: PriorityTier,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Drafts a cover letter from a job posting and resume text.
pub trait CoverLetterWriter: Send + Sync {
    fn draft(&self, job: &JobRecord, resume: &str) -> Result<String, DraftError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("cover letter backend unavailable: {0}")]
    Unavailable(String),
}
