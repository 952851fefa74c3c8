//! SQLite-backed progress store

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::db::StudyDb;
use super::ProgressStore;
use crate::domain::{BadgeId, Chapter, ChapterStatus, StudySessionRecord, UserProgress};
use crate::error::{Error, Result};

/// Progress store over a shared SQLite connection
#[derive(Clone)]
pub struct SqliteProgressStore {
    db: StudyDb,
}

impl SqliteProgressStore {
    pub fn new(db: StudyDb) -> Self {
        Self { db }
    }
}

/// UNIQUE/PK violations map to `Conflict`; everything else passes through
fn insert_error(err: rusqlite::Error, what: &str) -> Error {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return Error::Conflict(what.to_string());
        }
    }
    Error::Storage(err)
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl ProgressStore for SqliteProgressStore {
    fn load_progress(&self, user_id: i64) -> Result<UserProgress> {
        let conn = self.db.conn();
        let row = conn
            .query_row(
                "SELECT xp, level, study_streak, last_activity FROM users WHERE id = ?1",
                [user_id],
                |r| {
                    Ok((
                        r.get::<_, u32>(0)?,
                        r.get::<_, u32>(1)?,
                        r.get::<_, u32>(2)?,
                        r.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((xp, level, study_streak, last_activity)) = row else {
            return Err(Error::NotFound(format!("user {user_id}")));
        };

        Ok(UserProgress {
            xp,
            level,
            study_streak,
            last_activity: last_activity.as_deref().and_then(parse_instant),
        })
    }

    fn save_progress(&self, user_id: i64, progress: &UserProgress) -> Result<()> {
        let conn = self.db.conn();
        let updated = conn.execute(
            "UPDATE users SET xp = ?1, level = ?2, study_streak = ?3, last_activity = ?4 WHERE id = ?5",
            params![
                progress.xp,
                progress.level,
                progress.study_streak,
                progress.last_activity.map(|t| t.to_rfc3339()),
                user_id,
            ],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    fn is_badge_unlocked(&self, user_id: i64, badge: BadgeId) -> Result<bool> {
        let conn = self.db.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM user_badges WHERE user_id = ?1 AND badge = ?2",
            params![user_id, badge.as_str()],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    fn record_badge_unlock(
        &self,
        user_id: i64,
        badge: BadgeId,
        earned_at: DateTime<Utc>,
    ) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO user_badges (user_id, badge, earned_at) VALUES (?1, ?2, ?3)",
            params![user_id, badge.as_str(), earned_at.to_rfc3339()],
        )
        .map_err(|e| insert_error(e, badge.as_str()))?;
        Ok(())
    }

    fn count_completed_chapters(&self, user_id: i64) -> Result<u32> {
        let conn = self.db.conn();
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM chapters WHERE user_id = ?1 AND status = 'completed'",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    fn create_user(&self, username: &str) -> Result<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
            params![username, Utc::now().to_rfc3339()],
        )
        .map_err(|e| insert_error(e, username))?;
        Ok(conn.last_insert_rowid())
    }

    fn find_user(&self, username: &str) -> Result<Option<i64>> {
        let conn = self.db.conn();
        let id = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                [username],
                |r| r.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn record_session(&self, user_id: i64, session: &StudySessionRecord) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"INSERT INTO study_sessions (user_id, chapter_id, hours, xp_earned, notes, logged_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                user_id,
                session.chapter_id,
                session.hours,
                session.xp_earned,
                session.notes,
                session.logged_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn list_sessions(&self, user_id: i64) -> Result<Vec<StudySessionRecord>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            r#"SELECT chapter_id, hours, xp_earned, notes, logged_at
               FROM study_sessions WHERE user_id = ?1 ORDER BY logged_at DESC"#,
        )?;
        let rows = stmt.query_map([user_id], |r| {
            Ok((
                r.get::<_, Option<i64>>(0)?,
                r.get::<_, f64>(1)?,
                r.get::<_, u32>(2)?,
                r.get::<_, Option<String>>(3)?,
                r.get::<_, String>(4)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (chapter_id, hours, xp_earned, notes, logged_at) = row?;
            let Some(logged_at) = parse_instant(&logged_at) else {
                continue;
            };
            sessions.push(StudySessionRecord {
                chapter_id,
                hours,
                xp_earned,
                notes,
                logged_at,
            });
        }
        Ok(sessions)
    }

    fn add_chapter(&self, user_id: i64, name: &str) -> Result<i64> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO chapters (user_id, name, status) VALUES (?1, ?2, 'not_started')",
            params![user_id, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn set_chapter_status(
        &self,
        user_id: i64,
        chapter_id: i64,
        status: ChapterStatus,
    ) -> Result<bool> {
        let conn = self.db.conn();
        let current: Option<String> = conn
            .query_row(
                "SELECT status FROM chapters WHERE id = ?1 AND user_id = ?2",
                params![chapter_id, user_id],
                |r| r.get(0),
            )
            .optional()?;

        let Some(current) = current else {
            return Err(Error::NotFound(format!("chapter {chapter_id}")));
        };
        if ChapterStatus::from_str(&current) == Some(status) {
            return Ok(false);
        }

        conn.execute(
            "UPDATE chapters SET status = ?1 WHERE id = ?2 AND user_id = ?3",
            params![status.as_str(), chapter_id, user_id],
        )?;
        Ok(true)
    }

    fn list_chapters(&self, user_id: i64) -> Result<Vec<Chapter>> {
        let conn = self.db.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, status FROM chapters WHERE user_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map([user_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
            ))
        })?;

        let mut chapters = Vec::new();
        for row in rows {
            let (id, name, status) = row?;
            let Some(status) = ChapterStatus::from_str(&status) else {
                continue;
            };
            chapters.push(Chapter { id, name, status });
        }
        Ok(chapters)
    }

    fn list_badge_unlocks(&self, user_id: i64) -> Result<Vec<(BadgeId, DateTime<Utc>)>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT badge, earned_at FROM user_badges WHERE user_id = ?1 ORDER BY earned_at",
        )?;
        let rows = stmt.query_map([user_id], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
        })?;

        let mut unlocks = Vec::new();
        for row in rows {
            let (badge, earned_at) = row?;
            if let (Some(badge), Some(earned_at)) =
                (BadgeId::from_str(&badge), parse_instant(&earned_at))
            {
                unlocks.push((badge, earned_at));
            }
        }
        Ok(unlocks)
    }
}
