//! Profile command implementation

use anyhow::Result;
use serde_json::json;

use studytrack::domain::Badge;
use studytrack::gamify::level_progress;
use studytrack::store::ProgressStore;

/// Show the acting user's XP, level, streak and badge summary
pub fn profile_command(user: Option<&str>, json_output: bool) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let progress = ctx.store.load_progress(user_id)?;
    let completed_chapters = ctx.store.count_completed_chapters(user_id)?;
    let unlocks = ctx.store.list_badge_unlocks(user_id)?;
    let percent = level_progress(&progress);

    if json_output {
        let value = json!({
            "xp": progress.xp,
            "level": progress.level,
            "level_progress_percent": percent,
            "study_streak": progress.study_streak,
            "last_activity": progress.last_activity,
            "completed_chapters": completed_chapters,
            "badges": unlocks
                .iter()
                .map(|(id, earned_at)| json!({
                    "id": id.as_str(),
                    "earned_at": earned_at,
                }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "Level {}  ({} XP, {:.0}% into the level)",
        progress.level, progress.xp, percent
    );
    if progress.study_streak > 0 {
        println!("🔥 {}-day study streak", progress.study_streak);
    }
    println!("Completed chapters: {completed_chapters}");

    if unlocks.is_empty() {
        println!("No badges yet.");
    } else {
        println!("Badges ({}):", unlocks.len());
        for (id, earned_at) in unlocks {
            let badge = Badge::get(id);
            println!(
                "  {} {} (earned {})",
                badge.icon,
                badge.name,
                earned_at.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}
