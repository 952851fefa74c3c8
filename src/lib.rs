//! StudyTrack - a terminal study tracker with a gamified progress model
//!
//! Logged study sessions earn XP, XP drives levels, daily activity builds a
//! streak, and threshold badges unlock along the way. The gamification rules
//! live in [`gamify`]; everything is persisted in a local SQLite database
//! behind the [`store::ProgressStore`] trait.
//!
//! ## Flow
//!
//! A logged session runs through one pipeline: duration -> XP award -> level
//! recompute -> streak update -> badge evaluation. Completing a chapter only
//! re-runs the badge evaluation (chapter badges are count-driven).

pub mod config;
pub mod domain;
pub mod error;
pub mod gamify;
pub mod store;

pub use domain::*;
pub use error::{Error, Result};
