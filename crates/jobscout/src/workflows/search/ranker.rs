use serde::Serialize;
use tracing::warn;

use super::domain::{JobRecord, PriorityTier, RankedJob, RawJobRecord, SkippedRecord};
use super::scoring::{rules, Rubric};

/// Ranked survivors plus the records rejected at the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct RankOutcome {
    pub ranked: Vec<RankedJob>,
    pub skipped: Vec<SkippedRecord>,
}

/// Score, filter, and sort a batch of well-formed jobs.
///
/// Excluded jobs and jobs below `min_score_threshold` are dropped; the rest
/// are sorted by score descending with ties kept in input order, so repeated
/// calls over identical input produce identical rankings.
pub fn rank(jobs: &[JobRecord], rubric: &Rubric) -> Vec<RankedJob> {
    rank_with_floor(jobs, rubric, rubric.min_score_threshold)
}

/// Same pipeline with the floor raised to the auto-apply threshold, for
/// "show only the best matches" queries.
pub fn rank_priority_only(jobs: &[JobRecord], rubric: &Rubric) -> Vec<RankedJob> {
    let floor = rubric.min_score_threshold.max(rubric.auto_apply_threshold);
    rank_with_floor(jobs, rubric, floor)
}

/// Rank an untrusted batch, skipping and reporting malformed records instead
/// of failing the whole batch.
pub fn rank_raw(records: Vec<RawJobRecord>, rubric: &Rubric) -> RankOutcome {
    let (jobs, skipped) = split_raw(records);
    RankOutcome {
        ranked: rank(&jobs, rubric),
        skipped,
    }
}

/// Priority-only variant of [`rank_raw`].
pub fn rank_raw_priority(records: Vec<RawJobRecord>, rubric: &Rubric) -> RankOutcome {
    let (jobs, skipped) = split_raw(records);
    RankOutcome {
        ranked: rank_priority_only(&jobs, rubric),
        skipped,
    }
}

fn split_raw(records: Vec<RawJobRecord>) -> (Vec<JobRecord>, Vec<SkippedRecord>) {
    let mut jobs = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (index, raw) in records.into_iter().enumerate() {
        match raw.into_record() {
            Ok(job) => jobs.push(job),
            Err(error) => {
                warn!(index, field = error.field, "skipping malformed job record");
                skipped.push(SkippedRecord { index, error });
            }
        }
    }
    (jobs, skipped)
}

fn rank_with_floor(jobs: &[JobRecord], rubric: &Rubric, floor: i64) -> Vec<RankedJob> {
    let mut survivors: Vec<_> = jobs
        .iter()
        .map(|job| rules::score_job(job, rubric))
        .filter(|result| !result.is_excluded() && result.score >= floor)
        .collect();

    // Vec::sort_by is stable; comparing on score alone preserves input
    // order among ties.
    survivors.sort_by(|a, b| b.score.cmp(&a.score));

    survivors
        .into_iter()
        .map(|result| {
            let tier = if result.score >= rubric.auto_apply_threshold {
                PriorityTier::High
            } else {
                PriorityTier::Relevant
            };
            RankedJob { result, tier }
        })
        .collect()
}
