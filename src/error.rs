//! Error types for the progression engine and its collaborators

use thiserror::Error;

/// Invalid input handed to the engine.
///
/// The engine never clamps or defaults bad input; every variant here points
/// at an upstream data problem that the caller has to surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("Invalid calendar date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown badge requirement type: {0}")]
    UnknownRequirement(String),

    #[error("XP total would exceed the representable range")]
    XpOverflow,
}

/// Misconfigured rank bands or badge catalogue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Rank table is empty")]
    EmptyRankTable,

    #[error("First rank '{name}' must start at 0 XP, starts at {min_xp}")]
    RankTableStart { name: String, min_xp: u64 },

    #[error("Rank '{name}' starts at {min_xp} but the previous band ends at {previous_max}")]
    RankGapOrOverlap {
        name: String,
        min_xp: u64,
        previous_max: u64,
    },

    #[error("Rank '{name}' has an empty XP range")]
    EmptyRankBand { name: String },

    #[error("Only the last rank may be unbounded, '{name}' is not last")]
    UnboundedRankNotLast { name: String },

    #[error("Last rank '{name}' must be unbounded above")]
    BoundedTopRank { name: String },

    #[error("Duplicate rank name: {0}")]
    DuplicateRank(String),

    #[error("Duplicate badge identifier: {0}")]
    DuplicateBadge(String),

    #[error("Badge '{0}' must have a threshold greater than zero")]
    ZeroThreshold(String),

    #[error("Badge identifier must not be empty")]
    EmptyBadgeIdentifier,
}

/// Failures reported by the persistence collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    /// Another writer committed for this user since the state was loaded
    #[error("Progression for user '{user_id}' changed concurrently (expected version {expected})")]
    VersionConflict { user_id: String, expected: u64 },

    #[error("Stored data for user '{user_id}' is corrupt: {reason}")]
    Corrupt { user_id: String, reason: String },

    #[error("{field} value {value} does not fit in a database integer")]
    OutOfRange { field: &'static str, value: u64 },
}

/// Errors surfaced by [`crate::service::ProgressionService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Input(#[from] ProgressionError),

    #[error("Failed to persist progression: {0}")]
    Store(#[from] StoreError),
}
