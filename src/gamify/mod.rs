//! Gamification engine: XP awards, levels, streaks, and badge unlocks
//!
//! This module turns raw study events into progress state. It is pure
//! computation plus store calls; all I/O goes through the injected
//! [`crate::store::ProgressStore`] handle.

mod checker;
mod clock;
mod engine;
mod streak;
mod xp;

pub use checker::check_badges;
pub use clock::{Clock, SystemClock};
pub use engine::{GamificationEngine, LevelUp, ProgressEvent};
pub use streak::next_streak;
pub use xp::{apply_xp, level_for_xp, level_progress, session_xp, XP_PER_LEVEL};
