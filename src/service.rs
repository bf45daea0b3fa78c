//! Progression service: the single write path for progression state
//!
//! Each activity event goes through [`ProgressionService::complete_activity`]
//! exactly once: load, compute, commit. Commit failures are returned as-is
//! with the stored state untouched; retrying is the caller's decision.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ServiceError, StoreError};
use crate::progression::{
    latest_tier, record_activity_completion, AssessmentAttempt, AssessmentResult, BadgeDefinition,
    ProgressionEvent, ProgressionState, RankProgress, StreakInfo, Tier,
};
use crate::store::ProgressionStore;

/// Result of recording one activity
#[derive(Debug, Clone)]
pub struct CompletedActivity {
    pub state: ProgressionState,
    pub events: Vec<ProgressionEvent>,
    pub newly_unlocked_badges: Vec<BadgeDefinition>,
    pub ranked_up: bool,
    /// False when the day was already recorded and nothing was written
    pub recorded: bool,
}

/// Progression overview for display
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionSummary {
    pub user_id: String,
    pub tier: Option<Tier>,
    pub rank: RankProgress,
    pub workouts: u64,
    pub streak: StreakInfo,
    pub streak_active: bool,
    pub badges: Vec<BadgeDefinition>,
}

pub struct ProgressionService<S> {
    store: S,
    definitions: Vec<BadgeDefinition>,
}

impl<S: ProgressionStore> ProgressionService<S> {
    pub fn new(store: S, definitions: Vec<BadgeDefinition>) -> Self {
        Self { store, definitions }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a completed activity on the user's local calendar day
    pub fn complete_activity(
        &self,
        user_id: &str,
        activity_date: NaiveDate,
    ) -> Result<CompletedActivity, ServiceError> {
        let stored = self.store.load_state(user_id)?;
        let outcome = record_activity_completion(&stored.state, activity_date, &self.definitions)?;

        if outcome.duplicate {
            tracing::debug!(user_id, %activity_date, "Activity already recorded for this day");
            return Ok(CompletedActivity {
                state: outcome.new_state,
                events: Vec::new(),
                newly_unlocked_badges: Vec::new(),
                ranked_up: false,
                recorded: false,
            });
        }

        self.store
            .commit(user_id, stored.version, activity_date, &outcome)
            .inspect_err(|e| {
                if !matches!(e, StoreError::VersionConflict { .. }) {
                    tracing::warn!(user_id, "Failed to persist progression: {}", e);
                }
            })?;

        let events = outcome.events(&stored.state);
        for badge in &outcome.newly_unlocked_badges {
            tracing::info!(user_id, badge = %badge.identifier, "Badge unlocked");
        }
        if outcome.ranked_up {
            tracing::info!(user_id, xp = outcome.new_state.total_xp, "Ranked up");
        }

        Ok(CompletedActivity {
            state: outcome.new_state,
            events,
            newly_unlocked_badges: outcome.newly_unlocked_badges,
            ranked_up: outcome.ranked_up,
            recorded: true,
        })
    }

    /// Store an assessment attempt and return the tier it yields
    pub fn record_assessment(
        &self,
        user_id: &str,
        result: AssessmentResult,
        taken_on: NaiveDate,
    ) -> Result<Tier, ServiceError> {
        let attempt = AssessmentAttempt { taken_on, result };
        self.store.record_assessment(user_id, &attempt)?;
        let tier = result.tier();
        tracing::info!(user_id, %tier, "Recorded assessment");
        Ok(tier)
    }

    /// Tier from the user's most recent assessment
    pub fn current_tier(&self, user_id: &str) -> Result<Option<Tier>, ServiceError> {
        let attempts = self.store.assessments(user_id)?;
        Ok(latest_tier(&attempts))
    }

    pub fn summary(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<ProgressionSummary, ServiceError> {
        let state = self.store.load_state(user_id)?.state;
        let streak = StreakInfo::from_dates(&state.activity_dates);

        Ok(ProgressionSummary {
            user_id: user_id.to_string(),
            tier: self.current_tier(user_id)?,
            rank: RankProgress::new(state.total_xp),
            workouts: state.workout_count(),
            streak_active: streak.is_active(today),
            streak,
            badges: self
                .definitions
                .iter()
                .filter(|d| state.granted_badges.contains(&d.identifier))
                .cloned()
                .collect(),
        })
    }
}
