//! Rendering collaborators.
//!
//! A [`Renderer`] turns DOT text into the bytes of an image. The production
//! implementation, [`GraphvizRenderer`], runs the Graphviz `dot` executable.

use std::io;

use graphviz_rust::cmd::{CommandArg, Format};
use log::{debug, info};

use crate::{StrataError, config::OutputFormat};

/// Turns a DOT description into artifact bytes.
pub trait Renderer {
    /// Renders `dot` into `format`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Environment`] when the rendering tool cannot be
    /// run at all, and [`StrataError::Render`] when it rejects the input.
    fn render(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>, StrataError>;
}

/// Renders through the Graphviz `dot` executable found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphvizRenderer;

impl Renderer for GraphvizRenderer {
    fn render(&self, dot: &str, format: OutputFormat) -> Result<Vec<u8>, StrataError> {
        let graphviz_format = match format {
            OutputFormat::Png => Format::Png,
            OutputFormat::Jpg => Format::Jpg,
            OutputFormat::Svg => Format::Svg,
            OutputFormat::Pdf => Format::Pdf,
            OutputFormat::Dot => Format::Dot,
        };

        info!(format:%; "Running graphviz");
        let bytes = graphviz_rust::exec_dot(dot.to_string(), vec![CommandArg::Format(graphviz_format)])
            .map_err(classify)?;
        debug!(bytes = bytes.len(); "Graphviz finished");

        Ok(bytes)
    }
}

fn classify(err: io::Error) -> StrataError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => StrataError::Environment(
            format!("could not run graphviz `dot`: {err}"),
        ),
        _ => StrataError::Render(err.to_string()),
    }
}
