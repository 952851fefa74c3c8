use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user gamification state.
///
/// `level` is always derived from `xp` (flat 100-XP-per-level curve) and the
/// two are written together in every store update, so they cannot diverge in
/// storage. `xp` only ever grows; deleting a session does not claw back the
/// XP it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u32,
    pub level: u32,
    /// Consecutive days with at least one study session
    pub study_streak: u32,
    /// Instant of the most recent session, absent until the first one
    pub last_activity: Option<DateTime<Utc>>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            study_streak: 0,
            last_activity: None,
        }
    }
}
