mod rubric;
pub(crate) mod rules;

pub use rubric::{Rubric, RubricError, RubricPatch};

use std::sync::Arc;

use crate::workflows::search::domain::{JobRecord, ScoreResult};

/// Stateless evaluator applying one rubric snapshot to job records.
///
/// Holds an `Arc` so callers scoring a whole batch observe a single
/// consistent rubric even while the store accepts updates.
pub struct ScoringEngine {
    rubric: Arc<Rubric>,
}

impl ScoringEngine {
    pub fn new(rubric: Arc<Rubric>) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn score(&self, job: &JobRecord) -> ScoreResult {
        rules::score_job(job, &self.rubric)
    }
}
