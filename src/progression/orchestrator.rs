//! Activity completion: the single state transition of the engine
//!
//! Pure over its inputs. Persisting the outcome (and failing to) belongs to
//! the caller, see [`crate::service`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::checker::{detect_new_badges, BadgeCounters};
use super::definitions::BadgeDefinition;
use super::rank::has_ranked_up;
use super::streaks::{current_streak, longest_streak};
use super::xp::add_activity;
use crate::error::ProgressionError;

/// Per-user progression state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub total_xp: u64,
    /// Streak as of the most recent activity day
    pub current_streak: u32,
    pub best_streak: u32,
    pub activity_dates: BTreeSet<NaiveDate>,
    pub granted_badges: BTreeSet<String>,
}

impl ProgressionState {
    /// Completed workouts, one per active day
    pub fn workout_count(&self) -> u64 {
        self.activity_dates.len() as u64
    }

    pub fn last_activity_day(&self) -> Option<NaiveDate> {
        self.activity_dates.last().copied()
    }

    fn counters(&self) -> BadgeCounters {
        BadgeCounters::new(self.workout_count(), self.current_streak)
    }
}

/// Everything the caller must persist and announce for one event
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityOutcome {
    pub new_state: ProgressionState,
    pub newly_unlocked_badges: Vec<BadgeDefinition>,
    pub ranked_up: bool,
    pub xp_awarded: u64,
    /// The day was already recorded; `new_state` equals the input state
    pub duplicate: bool,
}

impl ActivityOutcome {
    fn unchanged(state: &ProgressionState) -> Self {
        Self {
            new_state: state.clone(),
            newly_unlocked_badges: Vec::new(),
            ranked_up: false,
            xp_awarded: 0,
            duplicate: true,
        }
    }
}

/// Apply one completed activity on `activity_date` to `state`.
///
/// Recording a day that is already present is a no-op, so replaying the
/// same (user, day) event leaves the state as if it were recorded once.
///
/// Fails with [`ProgressionError::XpOverflow`] when the XP total cannot grow.
pub fn record_activity_completion(
    state: &ProgressionState,
    activity_date: NaiveDate,
    definitions: &[BadgeDefinition],
) -> Result<ActivityOutcome, ProgressionError> {
    if state.activity_dates.contains(&activity_date) {
        return Ok(ActivityOutcome::unchanged(state));
    }

    let before = state.counters();

    let mut new_state = state.clone();
    new_state.activity_dates.insert(activity_date);

    // Streak is measured at the most recent activity day, which is
    // `activity_date` unless an older day is being backfilled
    let as_of = new_state.last_activity_day().unwrap_or(activity_date);
    new_state.current_streak = current_streak(&new_state.activity_dates, as_of);
    new_state.best_streak = state
        .best_streak
        .max(longest_streak(&new_state.activity_dates));

    new_state.total_xp = add_activity(state.total_xp)?;

    let after = new_state.counters();
    let newly_unlocked_badges: Vec<BadgeDefinition> =
        detect_new_badges(before, after, &state.granted_badges, definitions)
            .into_iter()
            .cloned()
            .collect();
    new_state
        .granted_badges
        .extend(newly_unlocked_badges.iter().map(|b| b.identifier.clone()));

    let ranked_up = has_ranked_up(state.total_xp, new_state.total_xp);

    Ok(ActivityOutcome {
        xp_awarded: new_state.total_xp - state.total_xp,
        new_state,
        newly_unlocked_badges,
        ranked_up,
        duplicate: false,
    })
}
