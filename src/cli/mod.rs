//! CLI command implementations

pub mod badges;
pub mod chapter;
pub mod init;
pub mod profile;
pub mod session;
pub mod user;

use anyhow::{bail, Context, Result};

use studytrack::config::Config;
use studytrack::gamify::ProgressEvent;
use studytrack::store::{ProgressStore, SqliteProgressStore, StudyDb};

/// Shared setup for commands that touch the database
pub(crate) struct CliContext {
    pub config: Config,
    pub store: SqliteProgressStore,
}

pub(crate) fn context() -> Result<CliContext> {
    let config = Config::load()?;
    let db = StudyDb::open(&config.db_path())?;
    Ok(CliContext {
        config,
        store: SqliteProgressStore::new(db),
    })
}

impl CliContext {
    /// Resolve the acting user from the --user flag or the configured default
    pub fn resolve_user(&self, flag: Option<&str>) -> Result<i64> {
        let Some(name) = flag.or(self.config.default_user.as_deref()) else {
            bail!(
                "no user given: pass --user or set default_user in {}",
                Config::config_path().display()
            );
        };
        self.store
            .find_user(name)?
            .with_context(|| format!("unknown user '{name}', run `studytrack register {name}` first"))
    }
}

/// Print the outcome of a gamification pass, one line per event
pub(crate) fn print_events(events: &[ProgressEvent]) {
    for event in events {
        match event {
            ProgressEvent::XpAwarded { amount } => println!("+{amount} XP"),
            ProgressEvent::LevelUp(up) => {
                println!("Level up! {} -> {}", up.old_level, up.new_level)
            }
            ProgressEvent::StreakChanged { count } => println!("🔥 {count}-day streak"),
            ProgressEvent::BadgeUnlocked { badge } => println!(
                "{} Badge unlocked: {} - {}",
                badge.icon, badge.name, badge.description
            ),
        }
    }
}
