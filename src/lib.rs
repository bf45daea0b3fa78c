//! forgefit - progression engine for fitness coaching
//!
//! Turns raw activity into derived progression state:
//!
//! - **Tier**: skill tier from the onboarding assessment (Novice to Elite)
//! - **XP and rank**: flat XP per completed workout, ranked in XP bands
//! - **Streaks**: consecutive active calendar days
//! - **Badges**: one-time unlocks when a workout or streak threshold is crossed
//!
//! The engine in [`progression`] is pure. [`service::ProgressionService`] is the
//! single write path that loads state from a [`store::ProgressionStore`],
//! applies one event and commits the result atomically.

pub mod config;
pub mod error;
pub mod progression;
pub mod service;
pub mod store;

pub use error::{ConfigError, ProgressionError, ServiceError, StoreError};
