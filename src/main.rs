//! Cutframe CLI
//!
//! Splice interval algebra and aspect-preserving crop geometry for preparing
//! transcode jobs.
//!
//! # Usage
//!
//! ```bash
//! cutframe timecode 01:02:03:12 --fps 24
//! cutframe splice '[[0,10],[20,30]]' --bound '[0,60]'
//! cutframe scale --source 1920x1080 --rect 910,490,1010,590
//! cutframe prepare -i s3://in/a.mov -o file:///out/a.mp4 --size 1920x1080 --crop 100,0,100,0 --keep-aspect
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use cutframe::adapters::init_tracing;
use cutframe::app::AppContainer;
use cutframe::cli::{commands, Cli};
use cutframe::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log);
    info!("Starting Cutframe");
    debug!(?config, "effective configuration");

    let container = AppContainer::new(config).context("Failed to initialize providers")?;
    commands::run(&cli, &container).await?;

    debug!("Cutframe completed successfully");
    Ok(())
}
