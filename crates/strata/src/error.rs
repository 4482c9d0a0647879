//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`] which wraps
//! the conditions that can stop a diagram from being declared or rendered.

use std::io;

use thiserror::Error;

use strata_core::error::DeclarationError;

/// The main error type for Strata operations.
///
/// None of these are recovered locally: rendering is a one-shot operation
/// with no notion of partial success.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Declaration error: {0}")]
    Declaration(#[from] DeclarationError),

    /// The rendering tool is missing or cannot be started.
    #[error("Environment error: {0}")]
    Environment(String),

    /// The rendering tool ran but rejected the graph.
    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
