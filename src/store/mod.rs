//! Progress persistence
//!
//! The engine talks to storage through the [`ProgressStore`] trait; the
//! SQLite implementation lives in this module. Keeping the trait small and
//! injected (no process-wide connection holder) is what makes the engine
//! testable against a throwaway database.

mod db;
mod sqlite;

pub use db::StudyDb;
pub use sqlite::SqliteProgressStore;

use chrono::{DateTime, Utc};

use crate::domain::{BadgeId, Chapter, ChapterStatus, StudySessionRecord, UserProgress};
use crate::error::Result;

/// Storage contract consumed by the gamification engine.
///
/// Implementations must keep badge unlocks unique per (user, badge) and
/// report a duplicate insert as [`crate::Error::Conflict`] so the engine can
/// stay idempotent under retries.
pub trait ProgressStore {
    /// Load a user's progress; `NotFound` for an unknown user
    fn load_progress(&self, user_id: i64) -> Result<UserProgress>;

    /// Full replace of the four mutable progress fields
    fn save_progress(&self, user_id: i64, progress: &UserProgress) -> Result<()>;

    fn is_badge_unlocked(&self, user_id: i64, badge: BadgeId) -> Result<bool>;

    /// Record a badge unlock; `Conflict` if already recorded
    fn record_badge_unlock(
        &self,
        user_id: i64,
        badge: BadgeId,
        earned_at: DateTime<Utc>,
    ) -> Result<()>;

    fn count_completed_chapters(&self, user_id: i64) -> Result<u32>;

    // Collaborator surface used by the CLI, not part of the engine contract

    /// Create a user with fresh progress; `Conflict` on a taken username
    fn create_user(&self, username: &str) -> Result<i64>;

    fn find_user(&self, username: &str) -> Result<Option<i64>>;

    fn record_session(&self, user_id: i64, session: &StudySessionRecord) -> Result<()>;

    fn list_sessions(&self, user_id: i64) -> Result<Vec<StudySessionRecord>>;

    fn add_chapter(&self, user_id: i64, name: &str) -> Result<i64>;

    /// Set a chapter's status; returns false when it already had that status
    fn set_chapter_status(
        &self,
        user_id: i64,
        chapter_id: i64,
        status: ChapterStatus,
    ) -> Result<bool>;

    fn list_chapters(&self, user_id: i64) -> Result<Vec<Chapter>>;

    fn list_badge_unlocks(&self, user_id: i64) -> Result<Vec<(BadgeId, DateTime<Utc>)>>;
}
