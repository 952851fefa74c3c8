//! Badge definitions and metadata
//!
//! All badges are defined here with their display metadata. The unlock
//! thresholds live in the rule engine (`gamify::checker`) so the catalog
//! stays a plain data table.

use serde::{Deserialize, Serialize};

/// Unique identifier for each badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstStudy,
    Streak3,
    Streak7,
    Chapters5,
    Chapters10,
    Level5,
    Level10,
    Level15,
}

impl BadgeId {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstStudy => "first_study",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Chapters5 => "chapters_5",
            Self::Chapters10 => "chapters_10",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::Level15 => "level_15",
        }
    }

    /// Parse from database string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first_study" => Some(Self::FirstStudy),
            "streak_3" => Some(Self::Streak3),
            "streak_7" => Some(Self::Streak7),
            "chapters_5" => Some(Self::Chapters5),
            "chapters_10" => Some(Self::Chapters10),
            "level_5" => Some(Self::Level5),
            "level_10" => Some(Self::Level10),
            "level_15" => Some(Self::Level15),
            _ => None,
        }
    }

    /// All badge IDs, in catalog (evaluation) order
    pub fn all() -> &'static [BadgeId] {
        &[
            Self::FirstStudy,
            Self::Streak3,
            Self::Streak7,
            Self::Chapters5,
            Self::Chapters10,
            Self::Level5,
            Self::Level10,
            Self::Level15,
        ]
    }
}

/// Badge definition with display metadata
#[derive(Debug, Clone)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// All badge definitions, in catalog order
pub static BADGES: &[Badge] = &[
    Badge {
        id: BadgeId::FirstStudy,
        name: "First Study",
        description: "Complete your first study session",
        icon: "🎯",
    },
    Badge {
        id: BadgeId::Streak3,
        name: "3-Day Streak",
        description: "Study for 3 days in a row",
        icon: "🔥",
    },
    Badge {
        id: BadgeId::Streak7,
        name: "7-Day Streak",
        description: "Study for 7 days in a row",
        icon: "⚡",
    },
    Badge {
        id: BadgeId::Chapters5,
        name: "Chapter Master",
        description: "Complete 5 chapters",
        icon: "📚",
    },
    Badge {
        id: BadgeId::Chapters10,
        name: "Knowledge Seeker",
        description: "Complete 10 chapters",
        icon: "🏆",
    },
    Badge {
        id: BadgeId::Level5,
        name: "Level 5",
        description: "Reach level 5",
        icon: "⭐",
    },
    Badge {
        id: BadgeId::Level10,
        name: "Level 10",
        description: "Reach level 10",
        icon: "💎",
    },
    Badge {
        id: BadgeId::Level15,
        name: "Level 15",
        description: "Reach level 15",
        icon: "👑",
    },
];

impl Badge {
    /// Get badge definition by ID
    pub fn get(id: BadgeId) -> &'static Badge {
        BADGES
            .iter()
            .find(|b| b.id == id)
            .expect("All badges should be defined")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_id() {
        for id in BadgeId::all() {
            let badge = Badge::get(*id);
            assert_eq!(badge.id, *id);
        }
        assert_eq!(BADGES.len(), BadgeId::all().len());
    }

    #[test]
    fn test_string_id_roundtrip() {
        for id in BadgeId::all() {
            assert_eq!(BadgeId::from_str(id.as_str()), Some(*id));
        }
        assert_eq!(BadgeId::from_str("no_such_badge"), None);
    }
}
