//! Status command implementation

use anyhow::Result;
use chrono::Local;

use super::Context;

/// Show a user's progression
pub fn status_command(ctx: &Context, user: &str, json: bool) -> Result<()> {
    let service = ctx.service()?;
    let summary = service.summary(user, Local::now().date_naive())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Progression for {}:\n", summary.user_id);
    match summary.tier {
        Some(tier) => println!("  Tier:     {}", tier),
        None => println!("  Tier:     (no assessment yet)"),
    }

    let rank = &summary.rank;
    println!("  Rank:     {} ({} XP)", rank.rank, rank.total_xp);
    match rank.next_rank {
        Some(next) => println!(
            "  Next:     {} in {} XP ({:.0}%)",
            next, rank.xp_to_next, rank.progress_percent
        ),
        None => println!("  Next:     max rank reached"),
    }

    println!("  Workouts: {}", summary.workouts);
    let streak_state = if summary.streak_active { "" } else { " (inactive)" };
    println!(
        "  Streak:   {} day(s){}, best {}",
        summary.streak.current, streak_state, summary.streak.best
    );

    if summary.badges.is_empty() {
        println!("  Badges:   none yet");
    } else {
        println!("  Badges:");
        for badge in &summary.badges {
            println!("    - {}", badge.name);
        }
    }
    Ok(())
}
