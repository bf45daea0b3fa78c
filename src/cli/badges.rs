//! Badges command implementation

use anyhow::Result;

use super::Context;

/// List the badge catalogue in effect
pub fn badges_command(ctx: &Context, json: bool) -> Result<()> {
    let badges = ctx.load_config()?.badges();

    if json {
        println!("{}", serde_json::to_string_pretty(&badges)?);
        return Ok(());
    }

    println!("Badges ({}):\n", badges.len());
    for badge in &badges {
        println!(
            "  {:<16} {:<18} {} >= {}",
            badge.identifier, badge.name, badge.requirement_type, badge.threshold_count
        );
        if !badge.description.is_empty() {
            println!("  {:<16} {}", "", badge.description);
        }
    }
    Ok(())
}
