//! Init command implementation

use anyhow::{bail, Result};
use tracing::info;

use forgefit::config::Config;

use super::Context;

/// Write a default config file
pub fn init_command(ctx: &Context, force: bool) -> Result<()> {
    let path = ctx.config_file();

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    Config::with_defaults().save_to_file(&path)?;
    info!("Wrote config to {}", path.display());
    println!("Created {}", path.display());
    Ok(())
}
