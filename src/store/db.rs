//! SQLite-backed progression store
//!
//! Manages the `~/.forgefit/progression.db` database with schema versioning.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{ProgressionStore, StoredProgression};
use crate::error::StoreError;
use crate::progression::{ActivityOutcome, AssessmentAttempt, AssessmentResult, ProgressionState};

const SCHEMA_VERSION: i32 = 1;

/// Database wrapper, cheap to clone
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        tracing::debug!("Opened progression db at {}", path.display());

        Self::with_connection(conn)
    }

    /// Private in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-call; every
        // write runs in a transaction, so the connection itself is consistent
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        if version < SCHEMA_VERSION {
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }
        Ok(())
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl ProgressionStore for SqliteStore {
    fn load_state(&self, user_id: &str) -> Result<StoredProgression, StoreError> {
        let conn = self.conn();

        let row = conn
            .query_row(
                r#"
                SELECT total_xp, current_streak, best_streak, version
                FROM progression WHERE user_id = ?1
                "#,
                [user_id],
                |r| {
                    Ok((
                        r.get::<_, i64>(0)?,
                        r.get::<_, i64>(1)?,
                        r.get::<_, i64>(2)?,
                        r.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((total_xp, current_streak, best_streak, version)) = row else {
            return Ok(StoredProgression::default());
        };

        let corrupt = |reason: &str| StoreError::Corrupt {
            user_id: user_id.to_string(),
            reason: reason.to_string(),
        };

        let mut stmt = conn.prepare("SELECT day FROM activity_days WHERE user_id = ?1")?;
        let activity_dates = stmt
            .query_map([user_id], |r| r.get::<_, NaiveDate>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        let mut stmt = conn.prepare("SELECT badge_id FROM granted_badges WHERE user_id = ?1")?;
        let granted_badges = stmt
            .query_map([user_id], |r| r.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(StoredProgression {
            state: ProgressionState {
                total_xp: u64::try_from(total_xp).map_err(|_| corrupt("negative total_xp"))?,
                current_streak: u32::try_from(current_streak)
                    .map_err(|_| corrupt("current_streak out of range"))?,
                best_streak: u32::try_from(best_streak)
                    .map_err(|_| corrupt("best_streak out of range"))?,
                activity_dates,
                granted_badges,
            },
            version: u64::try_from(version).map_err(|_| corrupt("negative version"))?,
        })
    }

    fn commit(
        &self,
        user_id: &str,
        expected_version: u64,
        activity_date: NaiveDate,
        outcome: &ActivityOutcome,
    ) -> Result<u64, StoreError> {
        let now = Self::now_ms();
        let state = &outcome.new_state;
        let new_version = expected_version + 1;

        let to_sql = |field: &'static str, value: u64| {
            i64::try_from(value).map_err(|_| StoreError::OutOfRange { field, value })
        };
        let total_xp = to_sql("total_xp", state.total_xp)?;
        let version = to_sql("version", new_version)?;
        let expected = to_sql("version", expected_version)?;

        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let changed = if expected_version == 0 {
            tx.execute(
                r#"
                INSERT INTO progression
                    (user_id, total_xp, current_streak, best_streak, version, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(user_id) DO NOTHING
                "#,
                params![
                    user_id,
                    total_xp,
                    state.current_streak,
                    state.best_streak,
                    version,
                    now
                ],
            )?
        } else {
            tx.execute(
                r#"
                UPDATE progression
                SET total_xp = ?2, current_streak = ?3, best_streak = ?4,
                    version = ?5, updated_at = ?6
                WHERE user_id = ?1 AND version = ?7
                "#,
                params![
                    user_id,
                    total_xp,
                    state.current_streak,
                    state.best_streak,
                    version,
                    now,
                    expected
                ],
            )?
        };

        if changed == 0 {
            tracing::warn!(
                user_id,
                expected_version,
                "Progression commit lost a concurrent update"
            );
            // Dropping the transaction rolls it back
            return Err(StoreError::VersionConflict {
                user_id: user_id.to_string(),
                expected: expected_version,
            });
        }

        tx.execute(
            r#"
            INSERT INTO activity_days (user_id, day, event_id, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![user_id, activity_date, Uuid::new_v4().to_string(), now],
        )?;

        for badge in &outcome.newly_unlocked_badges {
            tx.execute(
                "INSERT INTO granted_badges (user_id, badge_id, granted_at) VALUES (?1, ?2, ?3)",
                params![user_id, badge.identifier, now],
            )?;
        }

        tx.commit()?;
        tracing::debug!(user_id, version = new_version, "Committed progression");
        Ok(new_version)
    }

    fn record_assessment(
        &self,
        user_id: &str,
        attempt: &AssessmentAttempt,
    ) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute(
            r#"
            INSERT INTO assessments
                (user_id, taken_on, pushups, jump_squats, plank_seconds, tier, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user_id,
                attempt.taken_on,
                attempt.result.pushups,
                attempt.result.jump_squats,
                attempt.result.plank_seconds,
                attempt.result.tier().as_str(),
                Self::now_ms()
            ],
        )?;
        Ok(())
    }

    fn assessments(&self, user_id: &str) -> Result<Vec<AssessmentAttempt>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            r#"
            SELECT taken_on, pushups, jump_squats, plank_seconds
            FROM assessments WHERE user_id = ?1 ORDER BY id
            "#,
        )?;
        let attempts = stmt
            .query_map([user_id], |r| {
                Ok(AssessmentAttempt {
                    taken_on: r.get(0)?,
                    result: AssessmentResult {
                        pushups: r.get(1)?,
                        jump_squats: r.get(2)?,
                        plank_seconds: r.get(3)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(attempts)
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

-- One row per user, guarded by version for compare-and-swap
CREATE TABLE IF NOT EXISTS progression (
    user_id TEXT PRIMARY KEY,
    total_xp INTEGER NOT NULL DEFAULT 0 CHECK (total_xp >= 0),
    current_streak INTEGER NOT NULL DEFAULT 0,
    best_streak INTEGER NOT NULL DEFAULT 0,
    version INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER
);

CREATE TABLE IF NOT EXISTS activity_days (
    user_id TEXT NOT NULL REFERENCES progression(user_id),
    day TEXT NOT NULL,
    event_id TEXT NOT NULL,
    recorded_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, day)
);

-- Unique per (user, badge): a badge is granted at most once
CREATE TABLE IF NOT EXISTS granted_badges (
    user_id TEXT NOT NULL REFERENCES progression(user_id),
    badge_id TEXT NOT NULL,
    granted_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, badge_id)
);

CREATE TABLE IF NOT EXISTS assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    taken_on TEXT NOT NULL,
    pushups INTEGER NOT NULL CHECK (pushups >= 0),
    jump_squats INTEGER NOT NULL CHECK (jump_squats >= 0),
    plank_seconds INTEGER NOT NULL CHECK (plank_seconds >= 0),
    tier TEXT NOT NULL,
    recorded_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_assessments_user ON assessments(user_id);
"#;
