//! CLI module for Cutframe
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub mod args;
pub mod commands;

/// Cutframe
///
/// Splice timecodes and crop geometry for transcode job preparation.
#[derive(Parser, Debug)]
#[command(name = "cutframe")]
#[command(about = "Cutframe - splice ranges and aspect-preserving crops for transcode jobs")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./cutframe.toml when present)
    #[arg(long, global = true, env = "CUTFRAME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply flag overrides on top of file and environment configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a timecode into an elapsed range
    Timecode(args::TimecodeArgs),
    /// Decode a splice and report its size, union and ordering
    Splice(args::SpliceArgs),
    /// Apply crop insets to a source frame
    Crop(args::CropArgs),
    /// Shrink a crop rectangle to the source aspect ratio
    Scale(args::ScaleArgs),
    /// List registered providers with their health
    Providers,
    /// Prepare a job and submit it to a provider
    Prepare(args::PrepareArgs),
}
