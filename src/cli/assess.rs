//! Assess command implementation

use anyhow::Result;
use clap::Args;

use forgefit::progression::AssessmentResult;

use super::{day_or_today, Context};

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// User identifier
    #[arg(short, long)]
    pub user: String,

    /// Max pushups in one set
    #[arg(long, allow_negative_numbers = true)]
    pub pushups: i64,

    /// Max jump squats in one set
    #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
    pub jump_squats: i64,

    /// Longest plank hold in seconds
    #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
    pub plank_seconds: i64,

    /// Day the assessment was taken (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Record an assessment attempt
pub fn assess_command(ctx: &Context, args: &AssessArgs) -> Result<()> {
    // Negative values get through the parser so the engine can reject them
    let result = AssessmentResult::new(args.pushups, args.jump_squats, args.plank_seconds)?;
    let taken_on = day_or_today(args.date.as_deref())?;

    let service = ctx.service()?;
    let tier = service.record_assessment(&args.user, result, taken_on)?;

    println!("Assessment recorded for {} on {}", args.user, taken_on);
    println!("  Tier: {}", tier);
    Ok(())
}
