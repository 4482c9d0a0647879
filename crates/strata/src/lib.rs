//! Strata - declare architecture diagrams in Rust and render them with Graphviz.
//!
//! A diagram is declared inside a scope: nodes are created through the
//! scope, clusters open nested scopes, and edges connect node handles. When
//! the outermost scope closes the graph is exported to DOT and handed to a
//! [`Renderer`], and the result is written next to any previous artifact of
//! the same name.

pub mod config;
pub mod export;
pub mod render;

mod artifact;
mod diagram;
mod error;
mod viewer;

pub use strata_core::{color, edge, error::DeclarationError, graph, identifier, kind};

pub use artifact::Artifact;
pub use diagram::{DiagramSpec, Scope};
pub use error::StrataError;

use std::path::PathBuf;

use log::{debug, info, trace, warn};

use config::{AppConfig, OutputFormat};
use export::dot::DotExporter;
use graph::Graph;
use render::{GraphvizRenderer, Renderer};

/// Builder for declaring and rendering Strata diagrams.
///
/// This provides an API for processing diagrams through declaration, DOT
/// export, rendering and writing.
///
/// # Examples
///
/// ```rust,no_run
/// use strata::{DiagramBuilder, DiagramSpec, config::AppConfig, edge::Direction, kind::NodeKind};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let spec = DiagramSpec::new("Web Service").show(false);
///
/// let artifact = builder
///     .open(spec, |diagram| {
///         let app = diagram.node(NodeKind::Service)?;
///         let db = diagram.node(NodeKind::Database)?;
///         diagram.connect(&[app], &[db], Direction::Forward)
///     })
///     .expect("Failed to render");
///
/// println!("{}", artifact.path().display());
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder<R = GraphvizRenderer> {
    config: AppConfig,
    renderer: R,
}

impl DiagramBuilder<GraphvizRenderer> {
    /// Create a new diagram builder that renders through Graphviz.
    ///
    /// # Arguments
    ///
    /// * `config` - Output, layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            renderer: GraphvizRenderer,
        }
    }
}

impl<R: Renderer> DiagramBuilder<R> {
    /// Replace the rendering collaborator.
    pub fn with_renderer<S: Renderer>(self, renderer: S) -> DiagramBuilder<S> {
        DiagramBuilder {
            config: self.config,
            renderer,
        }
    }

    /// Returns the rendering collaborator.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the configuration this builder renders with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Declare a diagram and return its graph without rendering it.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `declare`.
    pub fn declare<F>(&self, spec: &DiagramSpec, declare: F) -> Result<Graph, StrataError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), StrataError>,
    {
        info!(title = spec.title(); "Declaring diagram");

        let mut graph = Graph::new(spec.title());
        declare(&mut Scope::root(&mut graph))?;

        debug!(
            nodes = graph.node_count(),
            clusters = graph.cluster_count(),
            edges = graph.edge_count();
            "Diagram declared"
        );
        trace!(graph:?; "Declared graph");

        Ok(graph)
    }

    /// Export a declared graph to DOT text.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Config`] if the style configuration is invalid.
    pub fn to_dot(&self, spec: &DiagramSpec, graph: &Graph) -> Result<String, StrataError> {
        Ok(DotExporter::new(spec, graph, &self.config)?.to_dot_string())
    }

    /// Format the artifact for `spec` is rendered in.
    pub fn output_format(&self, spec: &DiagramSpec) -> OutputFormat {
        spec.format_override()
            .unwrap_or_else(|| self.config.output().format())
    }

    /// Path the artifact for `spec` is written to.
    pub fn artifact_path(&self, spec: &DiagramSpec) -> PathBuf {
        let file_name = format!("{}.{}", spec.file_stem(), self.output_format(spec).extension());
        self.config.output().directory().join(file_name)
    }

    /// Render a declared graph and write the artifact.
    ///
    /// Nothing is written unless rendering succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError`] for configuration, environment, rendering or
    /// I/O failures.
    pub fn render(&self, spec: &DiagramSpec, graph: &Graph) -> Result<Artifact, StrataError> {
        let dot = self.to_dot(spec, graph)?;
        let format = self.output_format(spec);

        let bytes = match format {
            OutputFormat::Dot => dot.into_bytes(),
            _ => self.renderer.render(&dot, format)?,
        };

        let path = self.artifact_path(spec);
        let artifact = artifact::write_atomic(&path, &bytes, format)?;
        info!(path = path.display().to_string(), format:%; "Artifact written");

        Ok(artifact)
    }

    /// Open a diagram scope, declare its content and render it once the
    /// scope closes.
    ///
    /// If `declare` fails, nothing is rendered or written. When `spec` asks
    /// for it, the artifact is opened in the platform viewer afterwards; a
    /// viewer that cannot be started is logged and does not fail the render.
    ///
    /// # Errors
    ///
    /// Propagates errors from `declare` and from [`DiagramBuilder::render`].
    pub fn open<F>(&self, spec: DiagramSpec, declare: F) -> Result<Artifact, StrataError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), StrataError>,
    {
        let graph = self.declare(&spec, declare)?;
        let artifact = self.render(&spec, &graph)?;

        if spec.is_shown() {
            if let Err(err) = viewer::open(artifact.path()) {
                warn!(err:%; "Could not open artifact viewer");
            }
        }

        Ok(artifact)
    }
}
