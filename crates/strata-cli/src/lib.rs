//! CLI logic for Strata.
//!
//! This module declares the transactional outbox diagram and renders it with
//! the configured output settings.

pub mod catalog;
pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use strata::{
    Artifact, DiagramBuilder, StrataError,
    config::AppConfig,
    render::{GraphvizRenderer, Renderer},
};

/// Run the Strata CLI application
///
/// Renders the transactional outbox diagram through Graphviz.
///
/// # Errors
///
/// Returns `StrataError` for:
/// - Configuration loading errors
/// - Declaration errors
/// - A missing or failing Graphviz installation
/// - File I/O errors
pub fn run(args: &Args) -> Result<Artifact, StrataError> {
    run_with(args, GraphvizRenderer)
}

/// Same as [`run`], with an explicit rendering collaborator.
///
/// # Errors
///
/// See [`run`].
pub fn run_with<R: Renderer>(args: &Args, renderer: R) -> Result<Artifact, StrataError> {
    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    info!(
        output_dir = app_config.output().directory().display().to_string(),
        format:% = app_config.output().format();
        "Rendering diagram"
    );

    let builder = DiagramBuilder::new(app_config).with_renderer(renderer);
    let artifact = builder.open(catalog::outbox_spec(), catalog::declare_outbox)?;

    info!(
        output_file = artifact.path().display().to_string(),
        bytes = artifact.size();
        "Diagram exported successfully"
    );

    Ok(artifact)
}

fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut output = config.output().clone();
    if let Some(dir) = &args.output_dir {
        output = output.with_directory(dir);
    }
    if let Some(format) = args.format {
        output = output.with_format(format);
    }
    config.with_output(output)
}
