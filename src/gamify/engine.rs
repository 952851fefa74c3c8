//! Gamification engine - core orchestration
//!
//! Owns a store handle and a clock, and runs the full pipeline for each
//! study event: XP award, level recompute, streak update, badge evaluation.

use tracing::{debug, info};

use super::checker::check_badges;
use super::clock::{Clock, SystemClock};
use super::streak::next_streak;
use super::xp::{apply_xp, session_xp};
use crate::domain::{Badge, BadgeId, ChapterStatus, StudySessionRecord};
use crate::error::{Error, Result};
use crate::store::ProgressStore;

/// A level transition produced by an XP award
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Events emitted while processing a study event
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    XpAwarded { amount: u32 },
    LevelUp(LevelUp),
    StreakChanged { count: u32 },
    BadgeUnlocked { badge: &'static Badge },
}

/// Engine over a progress store and a time source.
///
/// All operations are sequential single-writer; there is no internal
/// locking. Callers exposing this to concurrent use must serialize access
/// per user externally.
pub struct GamificationEngine<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: ProgressStore> GamificationEngine<S> {
    /// Create an engine using wall-clock time
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    /// Create an engine with an injected time source
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Process a logged study session.
    ///
    /// Awards XP for the duration, updates the streak from the event
    /// timestamp, persists the session record, then re-evaluates the badge
    /// catalog against the updated snapshot. Returns everything that
    /// happened, in order: XP, level up, streak change, badge unlocks.
    pub fn record_session(
        &self,
        user_id: i64,
        hours: f64,
        chapter_id: Option<i64>,
        notes: Option<&str>,
    ) -> Result<Vec<ProgressEvent>> {
        let xp_delta = session_xp(hours)?;
        let progress = self.store.load_progress(user_id)?;
        let now = self.clock.now();

        let mut updated = apply_xp(&progress, i64::from(xp_delta))?;
        updated.study_streak = next_streak(progress.study_streak, progress.last_activity, now);
        updated.last_activity = Some(now);
        self.store.save_progress(user_id, &updated)?;

        self.store.record_session(
            user_id,
            &StudySessionRecord {
                chapter_id,
                hours,
                xp_earned: xp_delta,
                notes: notes.map(str::to_string),
                logged_at: now,
            },
        )?;

        debug!(
            user_id,
            xp = updated.xp,
            level = updated.level,
            streak = updated.study_streak,
            "session recorded"
        );

        let mut events = vec![ProgressEvent::XpAwarded { amount: xp_delta }];
        if updated.level > progress.level {
            info!(user_id, from = progress.level, to = updated.level, "level up");
            events.push(ProgressEvent::LevelUp(LevelUp {
                old_level: progress.level,
                new_level: updated.level,
            }));
        }
        if updated.study_streak != progress.study_streak {
            events.push(ProgressEvent::StreakChanged {
                count: updated.study_streak,
            });
        }
        events.extend(self.evaluate_badges(user_id)?);
        Ok(events)
    }

    /// Mark a chapter completed and re-evaluate chapter badges.
    ///
    /// A chapter that is already completed produces no events and does not
    /// bump the completed count.
    pub fn record_chapter_completion(
        &self,
        user_id: i64,
        chapter_id: i64,
    ) -> Result<Vec<ProgressEvent>> {
        let changed = self
            .store
            .set_chapter_status(user_id, chapter_id, ChapterStatus::Completed)?;
        if !changed {
            return Ok(Vec::new());
        }
        self.evaluate_badges(user_id)
    }

    /// Run the badge catalog against the current progress snapshot.
    ///
    /// Unlocks are idempotent: already-earned badges are skipped via store
    /// lookup, and a `Conflict` on insert (a retried event racing its own
    /// earlier write) is swallowed rather than surfaced.
    pub fn evaluate_badges(&self, user_id: i64) -> Result<Vec<ProgressEvent>> {
        let progress = self.store.load_progress(user_id)?;
        let completed_chapters = self.store.count_completed_chapters(user_id)?;

        let mut unlocked = Vec::new();
        for id in BadgeId::all() {
            if self.store.is_badge_unlocked(user_id, *id)? {
                unlocked.push(*id);
            }
        }

        let mut events = Vec::new();
        for id in check_badges(&progress, completed_chapters, &unlocked) {
            match self.store.record_badge_unlock(user_id, id, self.clock.now()) {
                Ok(()) => {}
                Err(Error::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
            info!(user_id, badge = id.as_str(), "badge unlocked");
            events.push(ProgressEvent::BadgeUnlocked {
                badge: Badge::get(id),
            });
        }
        Ok(events)
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use tempfile::tempdir;

    use super::*;
    use crate::store::{SqliteProgressStore, StudyDb};

    /// Clock that tests can advance by hand
    #[derive(Clone)]
    struct TestClock(Arc<Mutex<DateTime<Utc>>>);

    impl TestClock {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(
                Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap(),
            )))
        }

        fn advance(&self, d: Duration) {
            let mut t = self.0.lock().unwrap();
            *t += d;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn engine() -> (GamificationEngine<SqliteProgressStore>, TestClock, tempfile::TempDir, i64) {
        let dir = tempdir().unwrap();
        let db = StudyDb::open(&dir.path().join("test_study.db")).unwrap();
        let store = SqliteProgressStore::new(db);
        let user_id = store.create_user("mara").unwrap();
        let clock = TestClock::new();
        let engine = GamificationEngine::with_clock(store, Box::new(clock.clone()));
        (engine, clock, dir, user_id)
    }

    fn unlocked_badges(events: &[ProgressEvent]) -> Vec<BadgeId> {
        events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::BadgeUnlocked { badge } => Some(badge.id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_session_awards_xp_and_starts_streak() {
        let (engine, _clock, _dir, user_id) = engine();

        let events = engine.record_session(user_id, 0.5, None, None).unwrap();

        let progress = engine.store().load_progress(user_id).unwrap();
        assert_eq!(progress.xp, 5);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.study_streak, 1);
        assert!(progress.last_activity.is_some());

        assert!(matches!(events[0], ProgressEvent::XpAwarded { amount: 5 }));
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::StreakChanged { count: 1 })));
        // 5 XP is below the first_study threshold
        assert!(unlocked_badges(&events).is_empty());
    }

    #[test]
    fn test_first_study_badge_at_ten_xp() {
        let (engine, _clock, _dir, user_id) = engine();

        let events = engine.record_session(user_id, 1.0, None, None).unwrap();
        assert_eq!(unlocked_badges(&events), vec![BadgeId::FirstStudy]);

        // Re-running with unchanged thresholds unlocks nothing new
        let events = engine.record_session(user_id, 1.0, None, None).unwrap();
        assert!(unlocked_badges(&events).is_empty());
    }

    #[test]
    fn test_streak_over_consecutive_days() {
        let (engine, clock, _dir, user_id) = engine();

        for day in 1..=3u32 {
            let events = engine.record_session(user_id, 1.0, None, None).unwrap();
            let progress = engine.store().load_progress(user_id).unwrap();
            assert_eq!(progress.study_streak, day);
            if day == 3 {
                assert_eq!(unlocked_badges(&events), vec![BadgeId::Streak3]);
            }
            clock.advance(Duration::hours(25));
        }
    }

    #[test]
    fn test_same_day_sessions_do_not_inflate_streak() {
        let (engine, clock, _dir, user_id) = engine();

        engine.record_session(user_id, 1.0, None, None).unwrap();
        clock.advance(Duration::hours(2));
        engine.record_session(user_id, 1.0, None, None).unwrap();

        let progress = engine.store().load_progress(user_id).unwrap();
        assert_eq!(progress.study_streak, 1);
    }

    #[test]
    fn test_streak_resets_after_gap() {
        let (engine, clock, _dir, user_id) = engine();

        engine.record_session(user_id, 1.0, None, None).unwrap();
        clock.advance(Duration::hours(25));
        engine.record_session(user_id, 1.0, None, None).unwrap();
        assert_eq!(
            engine.store().load_progress(user_id).unwrap().study_streak,
            2
        );

        clock.advance(Duration::days(3));
        engine.record_session(user_id, 1.0, None, None).unwrap();
        assert_eq!(
            engine.store().load_progress(user_id).unwrap().study_streak,
            1
        );
    }

    #[test]
    fn test_level_up_event() {
        let (engine, _clock, _dir, user_id) = engine();

        let events = engine.record_session(user_id, 10.5, None, None).unwrap();

        let progress = engine.store().load_progress(user_id).unwrap();
        assert_eq!(progress.xp, 105);
        assert_eq!(progress.level, 2);
        assert!(events.iter().any(|e| matches!(
            e,
            ProgressEvent::LevelUp(LevelUp {
                old_level: 1,
                new_level: 2
            })
        )));
    }

    #[test]
    fn test_multiple_badges_in_one_evaluation() {
        let (engine, _clock, _dir, user_id) = engine();

        // Seed a snapshot that crosses several thresholds at once
        let seeded = crate::domain::UserProgress {
            xp: 10,
            level: 1,
            study_streak: 7,
            last_activity: None,
        };
        engine.store().save_progress(user_id, &seeded).unwrap();

        let events = engine.evaluate_badges(user_id).unwrap();
        assert_eq!(
            unlocked_badges(&events),
            vec![BadgeId::FirstStudy, BadgeId::Streak3, BadgeId::Streak7]
        );

        // Second pass with unchanged inputs is empty
        assert!(engine.evaluate_badges(user_id).unwrap().is_empty());
        assert!(engine
            .store()
            .is_badge_unlocked(user_id, BadgeId::Streak7)
            .unwrap());
    }

    #[test]
    fn test_chapter_completion_unlocks_chapter_badges() {
        let (engine, _clock, _dir, user_id) = engine();

        let mut last_events = Vec::new();
        for i in 0..5 {
            let chapter_id = engine
                .store()
                .add_chapter(user_id, &format!("Chapter {i}"))
                .unwrap();
            last_events = engine
                .record_chapter_completion(user_id, chapter_id)
                .unwrap();
        }
        assert_eq!(unlocked_badges(&last_events), vec![BadgeId::Chapters5]);
        assert_eq!(
            engine.store().count_completed_chapters(user_id).unwrap(),
            5
        );
    }

    #[test]
    fn test_completing_a_chapter_twice_is_a_no_op() {
        let (engine, _clock, _dir, user_id) = engine();

        let chapter_id = engine.store().add_chapter(user_id, "Algebra").unwrap();
        engine
            .record_chapter_completion(user_id, chapter_id)
            .unwrap();
        let events = engine
            .record_chapter_completion(user_id, chapter_id)
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(
            engine.store().count_completed_chapters(user_id).unwrap(),
            1
        );
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (engine, _clock, _dir, _user_id) = engine();
        assert!(matches!(
            engine.record_session(999, 1.0, None, None),
            Err(Error::NotFound(_))
        ));
    }
}
