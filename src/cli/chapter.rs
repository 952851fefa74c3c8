//! Chapter command implementations

use anyhow::Result;

use studytrack::gamify::GamificationEngine;
use studytrack::store::ProgressStore;

/// Add a chapter for the acting user
pub fn add_command(user: Option<&str>, name: &str) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let id = ctx.store.add_chapter(user_id, name)?;
    println!("Added chapter #{id}: {name}");
    Ok(())
}

/// Mark a chapter completed and re-check chapter badges
pub fn done_command(user: Option<&str>, chapter_id: i64) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let engine = GamificationEngine::new(ctx.store);
    let events = engine.record_chapter_completion(user_id, chapter_id)?;

    if events.is_empty() {
        println!("Chapter #{chapter_id} marked completed.");
    } else {
        println!("Chapter #{chapter_id} completed!");
        super::print_events(&events);
    }
    Ok(())
}

/// List all chapters with their status
pub fn list_command(user: Option<&str>) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let chapters = ctx.store.list_chapters(user_id)?;
    if chapters.is_empty() {
        println!("No chapters yet. Add one with `studytrack chapter add <name>`.");
        return Ok(());
    }

    println!("Chapters ({}):\n", chapters.len());
    for chapter in chapters {
        println!("  #{} [{}] {}", chapter.id, chapter.status.label(), chapter.name);
    }
    Ok(())
}
