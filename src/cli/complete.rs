//! Complete command implementation

use anyhow::Result;

use forgefit::progression::ProgressionEvent;

use super::{day_or_today, Context};

/// Record a completed workout and print what changed
pub fn complete_command(ctx: &Context, user: &str, date: Option<&str>) -> Result<()> {
    let day = day_or_today(date)?;
    let service = ctx.service()?;
    let done = service.complete_activity(user, day)?;

    if !done.recorded {
        println!("Workout on {} was already recorded for {}.", day, user);
        return Ok(());
    }

    println!("Workout recorded for {} on {}", user, day);
    for event in &done.events {
        match event {
            ProgressionEvent::XpAwarded { amount, total } => {
                println!("  +{} XP ({} total)", amount, total);
            }
            ProgressionEvent::StreakExtended { count } => {
                println!("  Streak: {} day(s)", count);
            }
            ProgressionEvent::BadgeUnlocked(badge) => {
                println!("  Badge unlocked: {} - {}", badge.name, badge.description);
            }
            ProgressionEvent::RankUp(rank_up) => {
                println!("  Rank up! {} -> {}", rank_up.old_rank, rank_up.new_rank);
            }
        }
    }
    Ok(())
}
