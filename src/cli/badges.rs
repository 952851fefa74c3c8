//! Badges command implementation

use anyhow::Result;
use serde_json::json;

use studytrack::domain::BADGES;
use studytrack::store::ProgressStore;

/// List the full badge catalog with per-badge unlock status
pub fn badges_command(user: Option<&str>, json_output: bool) -> Result<()> {
    let ctx = super::context()?;
    let user_id = ctx.resolve_user(user)?;

    let mut entries = Vec::new();
    for badge in BADGES {
        let unlocked = ctx.store.is_badge_unlocked(user_id, badge.id)?;
        entries.push((badge, unlocked));
    }

    if json_output {
        let value = entries
            .iter()
            .map(|(badge, unlocked)| {
                json!({
                    "id": badge.id.as_str(),
                    "name": badge.name,
                    "description": badge.description,
                    "unlocked": unlocked,
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (badge, unlocked) in entries {
        let icon = if unlocked { badge.icon } else { "🔒" };
        println!("  {} {} - {}", icon, badge.name, badge.description);
    }
    Ok(())
}
