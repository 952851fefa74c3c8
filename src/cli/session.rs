//! Log command implementation

use anyhow::Result;

use studytrack::gamify::GamificationEngine;

/// Log a study session and run the full gamification pass
pub fn log_command(
    user: Option<&str>,
    hours: f64,
    chapter: Option<i64>,
    notes: Option<&str>,
) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let engine = GamificationEngine::new(ctx.store);
    let events = engine.record_session(user_id, hours, chapter, notes)?;

    println!("Study session logged ({hours}h).");
    super::print_events(&events);
    Ok(())
}
