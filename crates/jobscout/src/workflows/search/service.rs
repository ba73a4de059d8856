use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::domain::{PriorityTier, RawJobRecord, ScoreResult};
use super::ranker::{self, RankOutcome};
use super::repository::{
    AlertError, ApplicationEntry, ApplicationLog, CoverLetterWriter, DraftError, FeedError,
    JobAlert, JobFeed, LogError, NotificationPublisher,
};
use super::scoring::{Rubric, RubricError, RubricPatch, ScoringEngine};
use super::store::RubricStore;

/// Search query used when the caller does not supply one.
pub const PRIORITY_QUERY: &str = "data engineer OR mlops OR cloud engineer OR devops";

/// Service composing the rubric store, ranker, and collaborator seams.
///
/// Scoring and ranking themselves are pure; the service's job is to pin one
/// rubric snapshot per operation and to fan results out to the log and the
/// notification channel.
pub struct JobSearchService<F, L, N, W> {
    feed: Arc<F>,
    log: Arc<L>,
    alerts: Arc<N>,
    letters: Arc<W>,
    store: Arc<RubricStore>,
}

impl<F, L, N, W> JobSearchService<F, L, N, W>
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    pub fn new(
        feed: Arc<F>,
        log: Arc<L>,
        alerts: Arc<N>,
        letters: Arc<W>,
        store: Arc<RubricStore>,
    ) -> Self {
        Self {
            feed,
            log,
            alerts,
            letters,
            store,
        }
    }

    /// Fetch, rank, and alert on high-tier hits.
    pub fn search(&self, query: &str, limit: usize) -> Result<RankOutcome, SearchServiceError> {
        let query = if query.trim().is_empty() {
            PRIORITY_QUERY
        } else {
            query
        };

        let records = self.feed.fetch(query, limit)?;
        let rubric = self.store.current();
        let outcome = ranker::rank_raw(records, &rubric);
        self.publish_high_tier(&outcome)?;

        info!(
            query,
            ranked = outcome.ranked.len(),
            skipped = outcome.skipped.len(),
            "search ranked feed batch"
        );
        Ok(outcome)
    }

    /// Fetch with the default priority query and keep only auto-apply-grade
    /// matches.
    pub fn search_priority(&self, limit: usize) -> Result<RankOutcome, SearchServiceError> {
        let records = self.feed.fetch(PRIORITY_QUERY, limit)?;
        let rubric = self.store.current();
        let outcome = ranker::rank_raw_priority(records, &rubric);
        self.publish_high_tier(&outcome)?;
        Ok(outcome)
    }

    /// Rank a caller-supplied batch against the current rubric. No feed, no
    /// alerts; used for offline batches and introspection.
    pub fn rank_batch(&self, records: Vec<RawJobRecord>) -> RankOutcome {
        let rubric = self.store.current();
        ranker::rank_raw(records, &rubric)
    }

    /// Score one job and report how it sits against both thresholds.
    pub fn score_job(&self, raw: RawJobRecord) -> Result<JobEvaluation, SearchServiceError> {
        let job = raw.into_record()?;
        let rubric = self.store.current();
        let result = ScoringEngine::new(rubric.clone()).score(&job);

        let meets_threshold = !result.is_excluded() && result.score >= rubric.min_score_threshold;
        let auto_apply = !result.is_excluded() && result.score >= rubric.auto_apply_threshold;
        let tier = meets_threshold.then(|| {
            if auto_apply {
                PriorityTier::High
            } else {
                PriorityTier::Relevant
            }
        });

        Ok(JobEvaluation {
            result,
            tier,
            meets_threshold,
            auto_apply,
        })
    }

    /// Record that the user applied to a job.
    pub fn apply(
        &self,
        raw: RawJobRecord,
        notes: Option<String>,
    ) -> Result<ApplicationEntry, SearchServiceError> {
        let job = raw.into_record()?;
        let entry = ApplicationEntry {
            job,
            notes,
            applied_at: Utc::now(),
        };
        Ok(self.log.record(entry)?)
    }

    pub fn applications(&self) -> Result<Vec<ApplicationEntry>, SearchServiceError> {
        Ok(self.log.list()?)
    }

    pub fn cover_letter(
        &self,
        raw: RawJobRecord,
        resume: &str,
    ) -> Result<String, SearchServiceError> {
        let job = raw.into_record()?;
        Ok(self.letters.draft(&job, resume)?)
    }

    pub fn rubric(&self) -> Arc<Rubric> {
        self.store.current()
    }

    pub fn replace_rubric(&self, rubric: Rubric) -> Result<Arc<Rubric>, SearchServiceError> {
        Ok(self.store.replace(rubric)?)
    }

    pub fn patch_rubric(&self, patch: &RubricPatch) -> Result<Arc<Rubric>, SearchServiceError> {
        Ok(self.store.apply_patch(patch)?)
    }

    pub fn reset_rubric(&self) -> Arc<Rubric> {
        self.store.reset_to_default()
    }

    fn publish_high_tier(&self, outcome: &RankOutcome) -> Result<(), SearchServiceError> {
        for ranked in &outcome.ranked {
            if ranked.tier == PriorityTier::High {
                self.alerts.publish(JobAlert {
                    title: ranked.result.job.title.clone(),
                    company: ranked.result.job.company.clone(),
                    url: ranked.result.job.url.clone(),
                    score: ranked.result.score,
                    tier: ranked.tier,
                })?;
            }
        }
        Ok(())
    }
}

/// Single-job introspection payload for the score endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct JobEvaluation {
    #[serde(flatten)]
    pub result: ScoreResult,
    /// Tier the job would land in if ranked; absent when it would be dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<PriorityTier>,
    pub meets_threshold: bool,
    pub auto_apply: bool,
}

/// Error raised by the search service.
#[derive(Debug, thiserror::Error)]
pub enum SearchServiceError {
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Log(#[from] LogError),
    #[error(transparent)]
    Alert(#[from] AlertError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Rubric(#[from] RubricError),
    #[error(transparent)]
    Malformed(#[from] super::domain::MalformedJobRecord),
}
