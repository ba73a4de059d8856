//! Job search scoring, ranking, and rubric management.
//!
//! The scoring engine and ranker are pure functions over a rubric snapshot;
//! the [`RubricStore`] mediates concurrent reads and validated updates; the
//! [`JobSearchService`] wires those to the collaborator seams (listings feed,
//! application log, notification channel, cover-letter backend) and the
//! router exposes the whole thing over HTTP.

pub mod domain;
pub mod importer;
pub mod ranker;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ExclusionReason, JobRecord, MalformedJobRecord, MatchedSignal, PriorityTier, RankedJob,
    RawJobRecord, ScoreResult, SignalField, SkippedRecord,
};
pub use ranker::{rank, rank_priority_only, rank_raw, rank_raw_priority, RankOutcome};
pub use repository::{
    AlertError, ApplicationEntry, ApplicationLog, CoverLetterWriter, DraftError, FeedError,
    JobAlert, JobFeed, LogError, NotificationPublisher,
};
pub use router::search_router;
pub use scoring::{Rubric, RubricError, RubricPatch, ScoringEngine};
pub use service::{JobEvaluation, JobSearchService, SearchServiceError, PRIORITY_QUERY};
pub use store::RubricStore;
