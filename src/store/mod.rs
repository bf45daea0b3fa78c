//! Persistence collaborator for progression state
//!
//! The engine is pure; this is where state is read and written. A store
//! must commit at most one update per user per event, enforced here with a
//! compare-and-swap on a per-user version.

mod db;

pub use db::SqliteStore;

use chrono::NaiveDate;

use crate::error::StoreError;
use crate::progression::{ActivityOutcome, AssessmentAttempt, ProgressionState};

/// State as loaded, with the version a commit must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredProgression {
    pub state: ProgressionState,
    /// 0 when the user has never been committed
    pub version: u64,
}

pub trait ProgressionStore {
    /// Load the current state (zeroed for unknown users)
    fn load_state(&self, user_id: &str) -> Result<StoredProgression, StoreError>;

    /// Atomically persist an outcome computed from the state at `expected_version`.
    ///
    /// Returns the new version, or [`StoreError::VersionConflict`] when another
    /// writer got there first. Nothing is written on error.
    fn commit(
        &self,
        user_id: &str,
        expected_version: u64,
        activity_date: NaiveDate,
        outcome: &ActivityOutcome,
    ) -> Result<u64, StoreError>;

    fn record_assessment(
        &self,
        user_id: &str,
        attempt: &AssessmentAttempt,
    ) -> Result<(), StoreError>;

    /// All assessment attempts, oldest first
    fn assessments(&self, user_id: &str) -> Result<Vec<AssessmentAttempt>, StoreError>;
}
