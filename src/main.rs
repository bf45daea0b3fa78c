use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "forgefit")]
#[command(about = "Progression engine for fitness coaching - tiers, XP, ranks, streaks and badges")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.forgefit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the progression database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file with the built-in badge catalogue
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Record a fitness assessment and show the resulting tier
    Assess(cli::assess::AssessArgs),

    /// Record a completed workout
    Complete {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Local calendar day of the workout (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show a user's progression
    Status {
        /// User identifier
        #[arg(short, long)]
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the badge catalogue in effect
    Badges {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli::Context::new(cli.config, cli.db);

    match cli.command {
        Commands::Init { force } => cli::init::init_command(&ctx, force)?,
        Commands::Assess(args) => cli::assess::assess_command(&ctx, &args)?,
        Commands::Complete { user, date } => {
            cli::complete::complete_command(&ctx, &user, date.as_deref())?
        }
        Commands::Status { user, json } => cli::status::status_command(&ctx, &user, json)?,
        Commands::Badges { json } => cli::badges::badges_command(&ctx, json)?,
    }

    Ok(())
}
