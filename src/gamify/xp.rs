//! XP award policy and level math
//!
//! A study session earns 10 XP per hour (floored), and every 100 XP is one
//! level on a flat curve.

use crate::domain::UserProgress;
use crate::error::{Error, Result};

/// XP earned per full hour of study
const XP_PER_HOUR: f64 = 10.0;

/// XP span of a single level
pub const XP_PER_LEVEL: u32 = 100;

/// Convert a session duration in hours into an XP award.
///
/// The duration must be a positive finite number; no upper bound is enforced
/// here (a sane maximum session length is the caller's concern).
pub fn session_xp(hours: f64) -> Result<u32> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "session duration must be a positive number of hours, got {hours}"
        )));
    }
    Ok((hours * XP_PER_HOUR).floor() as u32)
}

/// Level for a given XP total
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Add XP to a progress snapshot, rederiving the level in the same step.
///
/// XP never decreases in this design (there is no "remove session"
/// clawback), so a negative delta is rejected outright.
pub fn apply_xp(progress: &UserProgress, delta: i64) -> Result<UserProgress> {
    let delta = u32::try_from(delta)
        .map_err(|_| Error::InvalidArgument(format!("XP delta must be non-negative, got {delta}")))?;

    let xp = progress.xp.saturating_add(delta);
    Ok(UserProgress {
        xp,
        level: level_for_xp(xp),
        ..progress.clone()
    })
}

/// Percentage progress through the current level, in `[0, 100)`.
///
/// The level is re-derived from `xp` here; a stored level that disagrees
/// with the XP total would make the percentage meaningless, so it is never
/// trusted. At an exact boundary (xp=100) this reads 0%, not 100%.
pub fn level_progress(progress: &UserProgress) -> f64 {
    let level = level_for_xp(progress.xp);
    let level_floor = (level - 1) * XP_PER_LEVEL;
    f64::from(progress.xp - level_floor) / f64::from(XP_PER_LEVEL) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_xp_floors() {
        assert_eq!(session_xp(0.5).unwrap(), 5);
        assert_eq!(session_xp(0.33).unwrap(), 3); // floor, not round
        assert_eq!(session_xp(1.0).unwrap(), 10);
        assert_eq!(session_xp(2.75).unwrap(), 27);
    }

    #[test]
    fn test_session_xp_rejects_bad_durations() {
        assert!(session_xp(0.0).is_err());
        assert!(session_xp(-1.5).is_err());
        assert!(session_xp(f64::NAN).is_err());
        assert!(session_xp(f64::INFINITY).is_err());
    }

    #[test]
    fn test_apply_xp_level_boundaries() {
        let p = UserProgress::default();

        let p99 = apply_xp(&p, 99).unwrap();
        assert_eq!(p99.xp, 99);
        assert_eq!(p99.level, 1);

        let p100 = apply_xp(&p, 100).unwrap();
        assert_eq!(p100.xp, 100);
        assert_eq!(p100.level, 2);

        let mid = UserProgress {
            xp: 95,
            level: 1,
            ..UserProgress::default()
        };
        let p105 = apply_xp(&mid, 10).unwrap();
        assert_eq!(p105.xp, 105);
        assert_eq!(p105.level, 2);
    }

    #[test]
    fn test_apply_xp_rejects_negative_delta() {
        let p = UserProgress::default();
        assert!(matches!(
            apply_xp(&p, -5),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_level_progress_range() {
        let p = UserProgress {
            xp: 150,
            level: 2,
            ..UserProgress::default()
        };
        assert!((level_progress(&p) - 50.0).abs() < f64::EPSILON);

        // Exact boundary reads 0%, not 100%
        let boundary = UserProgress {
            xp: 100,
            level: 2,
            ..UserProgress::default()
        };
        assert_eq!(level_progress(&boundary), 0.0);

        // Re-derivation is stable
        assert_eq!(level_progress(&boundary), level_progress(&boundary));
    }

    #[test]
    fn test_level_progress_ignores_stored_level() {
        // A stored level that disagrees with xp must not skew the result
        let skewed = UserProgress {
            xp: 150,
            level: 7,
            ..UserProgress::default()
        };
        assert!((level_progress(&skewed) - 50.0).abs() < f64::EPSILON);
    }
}
