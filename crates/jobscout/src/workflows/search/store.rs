use std::sync::{Arc, RwLock};

use super::scoring::{Rubric, RubricError, RubricPatch};

/// Shared holder for the live rubric.
///
/// Readers take an `Arc` snapshot, so a ranking pass in flight keeps seeing
/// the rubric it started with while a writer swaps in a replacement. Every
/// write path validates before the swap; a rejected update leaves the store
/// untouched.
pub struct RubricStore {
    current: RwLock<Arc<Rubric>>,
}

impl RubricStore {
    pub fn new(rubric: Rubric) -> Result<Self, RubricError> {
        let rubric = rubric.validated()?;
        Ok(Self {
            current: RwLock::new(Arc::new(rubric)),
        })
    }

    /// Store seeded with the stock rubric.
    pub fn standard() -> Self {
        Self {
            current: RwLock::new(Arc::new(Rubric::standard())),
        }
    }

    /// Snapshot of the current rubric.
    pub fn current(&self) -> Arc<Rubric> {
        self.current.read().expect("rubric lock poisoned").clone()
    }

    /// Validate and swap in a full replacement rubric.
    pub fn replace(&self, rubric: Rubric) -> Result<Arc<Rubric>, RubricError> {
        let validated = Arc::new(rubric.validated()?);
        let mut guard = self.current.write().expect("rubric lock poisoned");
        *guard = validated.clone();
        Ok(validated)
    }

    /// Merge a partial update onto the current rubric, atomically.
    ///
    /// Validation happens against the merged result while the write lock is
    /// held, so concurrent patches serialize and a failing patch changes
    /// nothing.
    pub fn apply_patch(&self, patch: &RubricPatch) -> Result<Arc<Rubric>, RubricError> {
        let mut guard = self.current.write().expect("rubric lock poisoned");
        let merged = Arc::new(patch.apply(&guard)?);
        *guard = merged.clone();
        Ok(merged)
    }

    /// Discard the current rubric in favor of the stock one.
    pub fn reset_to_default(&self) -> Arc<Rubric> {
        let rubric = Arc::new(Rubric::standard());
        let mut guard = self.current.write().expect("rubric lock poisoned");
        *guard = rubric.clone();
        rubric
    }
}

impl Default for RubricStore {
    fn default() -> Self {
        Self::standard()
    }
}
