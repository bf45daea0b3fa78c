//! Daily activity streaks
//!
//! Dates are local calendar days. Converting instants to days is the
//! caller's job.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::ProgressionError;

/// Day format used on every boundary (CLI, storage)
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_day(s: &str) -> Result<NaiveDate, ProgressionError> {
    NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
        .map_err(|_| ProgressionError::InvalidDate(s.to_string()))
}

/// Consecutive active days ending at `as_of`.
///
/// Walks backward from `as_of` and stops at the first day without activity.
pub fn current_streak(activity_dates: &BTreeSet<NaiveDate>, as_of: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = as_of;
    while activity_dates.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive active days anywhere in the history
pub fn longest_streak(activity_dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &day in activity_dates {
        run = match previous {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }
    best
}

/// Streak summary for display
#[derive(Debug, Clone, Default, Serialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub last_activity_day: Option<NaiveDate>,
}

impl StreakInfo {
    pub fn from_dates(activity_dates: &BTreeSet<NaiveDate>) -> Self {
        let last_activity_day = activity_dates.last().copied();
        Self {
            current: last_activity_day
                .map(|day| current_streak(activity_dates, day))
                .unwrap_or(0),
            best: longest_streak(activity_dates),
            last_activity_day,
        }
    }

    /// Check if the streak is still alive (activity today or yesterday)
    pub fn is_active(&self, today: NaiveDate) -> bool {
        let Some(last_day) = self.last_activity_day else {
            return false;
        };
        let days_since = (today - last_day).num_days();
        (0..=1).contains(&days_since)
    }
}
