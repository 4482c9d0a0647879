//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control where the artifact goes, configuration
//! file selection, and logging verbosity.

use clap::Parser;

use strata::config::OutputFormat;

/// Command-line arguments for rendering the transactional outbox diagram
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the artifact is written to, overriding the configuration
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output format (png, jpg, svg, pdf, dot), overriding the configuration
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
