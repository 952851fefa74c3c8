//! Error taxonomy shared by the gamification engine and the progress store

use thiserror::Error;

/// Failures produced by engine operations and store calls.
///
/// All of these are immediate, local failures; nothing is retried
/// internally. `Conflict` from a duplicate badge unlock is expected under
/// retries and is swallowed inside the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected input: negative XP delta, non-positive session duration
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unknown user or chapter
    #[error("{0} not found")]
    NotFound(String),

    /// Row already exists (badge unlock, username)
    #[error("{0} already exists")]
    Conflict(String),

    /// Underlying SQLite failure
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
