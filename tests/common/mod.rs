//! Shared test utilities for progression integration tests

#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use tempfile::TempDir;

use forgefit::progression::default_badges;
use forgefit::service::ProgressionService;
use forgefit::store::SqliteStore;

/// Reference day `D` used by scenario tests
pub fn d() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

/// `D - n`
pub fn d_minus(n: u64) -> NaiveDate {
    d().checked_sub_days(Days::new(n)).expect("valid date")
}

/// Service backed by a fresh on-disk database; keep the `TempDir` alive
pub fn create_test_service() -> (TempDir, ProgressionService<SqliteStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = SqliteStore::open(&temp_dir.path().join("progression.db"))
        .expect("Failed to open test db");
    (temp_dir, ProgressionService::new(store, default_badges()))
}
