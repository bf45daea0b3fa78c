//! Progression engine: tiers, XP, ranks, streaks and badges
//!
//! Every function here is pure over its inputs. Reading and writing state
//! lives in [`crate::store`] and [`crate::service`].

mod checker;
mod definitions;
mod events;
mod orchestrator;
mod rank;
mod streaks;
mod tier;
mod xp;

pub use checker::{detect_new_badges, BadgeCounters};
pub use definitions::{default_badges, validate_catalogue, BadgeDefinition, RequirementType};
pub use events::{ProgressionEvent, RankUp};
pub use orchestrator::{record_activity_completion, ActivityOutcome, ProgressionState};
pub use rank::{
    has_ranked_up, progress_to_next_rank, rank_for_xp, xp_to_next_rank, Rank, RankProgress,
    RankTable, RANKS,
};
pub use streaks::{current_streak, longest_streak, parse_day, StreakInfo, DAY_FORMAT};
pub use tier::{classify_tier, latest_tier, AssessmentAttempt, AssessmentResult, Tier};
pub use xp::{add_activity, xp_for_activity_count, XpRewards};
