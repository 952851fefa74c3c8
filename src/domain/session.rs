use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of one logged study session and the XP it produced.
///
/// Session history is write-only as far as the engine is concerned; the
/// engine only needs the current progress snapshot to operate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySessionRecord {
    /// Chapter the session was spent on, if any
    pub chapter_id: Option<i64>,
    pub hours: f64,
    pub xp_earned: u32,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}
