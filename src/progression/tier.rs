//! Skill tier classification from a fitness assessment
//!
//! Tiers are assigned once from the onboarding assessment (and again on
//! retake). They are unrelated to XP ranks, see [`super::rank`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;

/// Skill tier, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Novice,
    Intermediate,
    Advanced,
    Elite,
}

impl Tier {
    /// Minimum pushups for Intermediate
    pub const INTERMEDIATE_MIN: u32 = 10;
    /// Minimum pushups for Advanced
    pub const ADVANCED_MIN: u32 = 26;
    /// Minimum pushups for Elite
    pub const ELITE_MIN: u32 = 51;

    /// Tier for an already-validated pushup count
    pub fn from_pushups(pushups: u32) -> Self {
        if pushups >= Self::ELITE_MIN {
            Self::Elite
        } else if pushups >= Self::ADVANCED_MIN {
            Self::Advanced
        } else if pushups >= Self::INTERMEDIATE_MIN {
            Self::Intermediate
        } else {
            Self::Novice
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Elite => "elite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "novice" => Some(Self::Novice),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "elite" => Some(Self::Elite),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Elite => "Elite",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw pushup count.
///
/// Negative counts are rejected rather than clamped to zero.
pub fn classify_tier(pushups: i64) -> Result<Tier, ProgressionError> {
    let pushups = non_negative("pushups", pushups)?;
    Ok(Tier::from_pushups(pushups))
}

/// Result of one assessment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub pushups: u32,
    pub jump_squats: u32,
    pub plank_seconds: u32,
}

impl AssessmentResult {
    /// Build from raw counts as reported by the onboarding flow
    pub fn new(
        pushups: i64,
        jump_squats: i64,
        plank_seconds: i64,
    ) -> Result<Self, ProgressionError> {
        Ok(Self {
            pushups: non_negative("pushups", pushups)?,
            jump_squats: non_negative("jump_squats", jump_squats)?,
            plank_seconds: non_negative("plank_seconds", plank_seconds)?,
        })
    }

    /// Tier is derived from pushups only
    pub fn tier(&self) -> Tier {
        Tier::from_pushups(self.pushups)
    }
}

/// A dated assessment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAttempt {
    pub taken_on: NaiveDate,
    pub result: AssessmentResult,
}

/// Tier from the most recent attempt, if any.
///
/// Attempts on the same day resolve to the later one in `attempts`.
pub fn latest_tier(attempts: &[AssessmentAttempt]) -> Option<Tier> {
    attempts
        .iter()
        .enumerate()
        .max_by_key(|(idx, a)| (a.taken_on, *idx))
        .map(|(_, a)| a.result.tier())
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, ProgressionError> {
    if value < 0 {
        return Err(ProgressionError::NegativeCount { field, value });
    }
    // Counts beyond u32 are not physically meaningful; saturate at the top tier
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}
