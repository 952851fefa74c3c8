//! Badge unlock predicates
//!
//! Pure threshold checks over a progress snapshot. The engine supplies the
//! already-unlocked set and persists whatever comes back.

use crate::domain::{BadgeId, UserProgress};

/// Evaluate the full badge catalog against a progress snapshot.
///
/// Returns newly satisfied badges in catalog order. Entries already in
/// `unlocked` are skipped; unlocking is permanent, so a later streak reset
/// never revokes a streak badge. Checks are independent of the triggering
/// event: one session that crosses several thresholds at once unlocks all
/// of them in the same pass.
pub fn check_badges(
    progress: &UserProgress,
    completed_chapters: u32,
    unlocked: &[BadgeId],
) -> Vec<BadgeId> {
    let mut newly_unlocked = Vec::new();

    for id in BadgeId::all() {
        if unlocked.contains(id) {
            continue;
        }
        if badge_earned(*id, progress, completed_chapters) {
            newly_unlocked.push(*id);
        }
    }

    newly_unlocked
}

/// Static unlock predicate for a single badge
fn badge_earned(id: BadgeId, progress: &UserProgress, completed_chapters: u32) -> bool {
    match id {
        BadgeId::FirstStudy => progress.xp >= 10,
        BadgeId::Streak3 => progress.study_streak >= 3,
        BadgeId::Streak7 => progress.study_streak >= 7,
        BadgeId::Chapters5 => completed_chapters >= 5,
        BadgeId::Chapters10 => completed_chapters >= 10,
        BadgeId::Level5 => progress.level >= 5,
        BadgeId::Level10 => progress.level >= 10,
        BadgeId::Level15 => progress.level >= 15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProgress;

    fn progress(xp: u32, level: u32, streak: u32) -> UserProgress {
        UserProgress {
            xp,
            level,
            study_streak: streak,
            last_activity: None,
        }
    }

    #[test]
    fn test_nothing_unlocks_on_fresh_progress() {
        let p = UserProgress::default();
        assert!(check_badges(&p, 0, &[]).is_empty());
    }

    #[test]
    fn test_multiple_unlocks_in_one_pass() {
        // xp=10 and streak=7 crossed in the same session: first_study plus
        // both streak badges, in catalog order
        let p = progress(10, 1, 7);
        assert_eq!(
            check_badges(&p, 0, &[]),
            vec![BadgeId::FirstStudy, BadgeId::Streak3, BadgeId::Streak7]
        );
    }

    #[test]
    fn test_already_unlocked_are_skipped() {
        let p = progress(10, 1, 7);
        let unlocked = vec![BadgeId::FirstStudy, BadgeId::Streak3];
        assert_eq!(check_badges(&p, 0, &unlocked), vec![BadgeId::Streak7]);

        // Second evaluation with everything unlocked yields nothing
        let all = check_badges(&p, 0, &[]);
        assert!(check_badges(&p, 0, &all).is_empty());
    }

    #[test]
    fn test_chapter_and_level_thresholds() {
        let p = progress(450, 5, 0);
        assert_eq!(
            check_badges(&p, 5, &[]),
            vec![BadgeId::FirstStudy, BadgeId::Chapters5, BadgeId::Level5]
        );

        let p = progress(1500, 16, 0);
        assert_eq!(
            check_badges(&p, 12, &[]),
            vec![
                BadgeId::FirstStudy,
                BadgeId::Chapters5,
                BadgeId::Chapters10,
                BadgeId::Level5,
                BadgeId::Level10,
                BadgeId::Level15,
            ]
        );
    }
}
