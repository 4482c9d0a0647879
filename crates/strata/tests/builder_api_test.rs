//! Integration tests for the DiagramBuilder API
//!
//! Rendering goes through stub renderers so the tests do not need Graphviz.

use std::{cell::Cell, fs};

use tempfile::tempdir;

use strata::{
    DiagramBuilder, DiagramSpec, Scope, StrataError,
    config::{AppConfig, OutputConfig, OutputFormat},
    edge::Direction,
    kind::NodeKind,
    render::Renderer,
};

/// Returns the DOT text it was given and counts calls.
#[derive(Default)]
struct EchoRenderer {
    calls: Cell<usize>,
}

impl Renderer for EchoRenderer {
    fn render(&self, dot: &str, _format: OutputFormat) -> Result<Vec<u8>, StrataError> {
        self.calls.set(self.calls.get() + 1);
        Ok(dot.as_bytes().to_vec())
    }
}

/// Behaves like a machine without Graphviz installed.
struct MissingGraphviz;

impl Renderer for MissingGraphviz {
    fn render(&self, _dot: &str, _format: OutputFormat) -> Result<Vec<u8>, StrataError> {
        Err(StrataError::Environment(
            "could not run graphviz `dot`: No such file or directory".to_string(),
        ))
    }
}

fn declare_pair(diagram: &mut Scope<'_>) -> Result<(), StrataError> {
    let a = diagram.node(NodeKind::Service)?;
    let b = diagram.node(NodeKind::Queue)?;
    diagram.connect(&[a], &[b], Direction::Both)
}

fn config_in(dir: &std::path::Path, format: OutputFormat) -> AppConfig {
    AppConfig::default().with_output(OutputConfig::new(dir, format))
}

#[test]
fn test_open_renders_once_into_output_directory() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Svg))
        .with_renderer(EchoRenderer::default());

    let artifact = builder
        .open(DiagramSpec::new("Two Tier").show(false), |diagram| {
            let app = diagram.node(NodeKind::Service)?;
            let db = diagram.node(NodeKind::Database)?;
            diagram.connect(&[app], &[db], Direction::Forward)
        })
        .expect("Failed to render");

    assert_eq!(artifact.path(), dir.path().join("two_tier.svg"));
    assert_eq!(artifact.format(), OutputFormat::Svg);
    let written = fs::read_to_string(artifact.path()).unwrap();
    assert!(written.contains("n0 -> n1"), "{written}");
}

#[test]
fn test_renderer_called_exactly_once() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Png))
        .with_renderer(EchoRenderer::default());

    builder
        .open(DiagramSpec::new("Once").show(false), |diagram| {
            diagram.cluster("a", |a| a.node(NodeKind::Queue).map(|_| ()))?;
            diagram.cluster("b", |b| b.node(NodeKind::Queue).map(|_| ()))
        })
        .unwrap();

    assert_eq!(builder.renderer().calls.get(), 1);
}

#[test]
fn test_dot_format_skips_renderer() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Dot))
        .with_renderer(MissingGraphviz);

    let artifact = builder
        .open(DiagramSpec::new("No Graphviz").show(false), |diagram| {
            diagram.node(NodeKind::Compute).map(|_| ())
        })
        .expect("dot output needs no renderer");

    assert!(artifact.path().ends_with("no_graphviz.dot"));
    assert!(
        fs::read_to_string(artifact.path())
            .unwrap()
            .starts_with("digraph")
    );
}

#[test]
fn test_environment_error_writes_nothing() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Png))
        .with_renderer(MissingGraphviz);

    let result = builder.open(DiagramSpec::new("Broken").show(false), |diagram| {
        diagram.node(NodeKind::Service).map(|_| ())
    });

    assert!(matches!(result, Err(StrataError::Environment(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_environment_error_keeps_previous_artifact() {
    let dir = tempdir().unwrap();
    let previous = dir.path().join("broken.png");
    fs::write(&previous, b"previous render").unwrap();

    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Png))
        .with_renderer(MissingGraphviz);
    let result = builder.open(DiagramSpec::new("Broken").show(false), |diagram| {
        diagram.node(NodeKind::Service).map(|_| ())
    });

    assert!(result.is_err());
    assert_eq!(fs::read(&previous).unwrap(), b"previous render");
}

#[test]
fn test_declaration_error_skips_render() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Svg))
        .with_renderer(EchoRenderer::default());

    let other = builder
        .declare(&DiagramSpec::new("Other"), |diagram| {
            diagram.node(NodeKind::Queue).map(|_| ())
        })
        .unwrap();
    let foreign = other.nodes().next().map(|(id, _)| id).unwrap();

    let result = builder.open(DiagramSpec::new("Mixed").show(false), |diagram| {
        let local = diagram.node(NodeKind::Service)?;
        diagram.connect(&[local], &[foreign], Direction::Forward)
    });

    assert!(matches!(result, Err(StrataError::Declaration(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_rerender_overwrites_same_path() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Dot))
        .with_renderer(EchoRenderer::default());
    let first = builder
        .open(DiagramSpec::new("Again").show(false), declare_pair)
        .unwrap();
    let first_bytes = fs::read(first.path()).unwrap();
    let second = builder
        .open(DiagramSpec::new("Again").show(false), declare_pair)
        .unwrap();

    assert_eq!(first.path(), second.path());
    assert_eq!(first_bytes, fs::read(second.path()).unwrap());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_spec_format_and_filename_override_config() {
    let dir = tempdir().unwrap();
    let builder = DiagramBuilder::new(config_in(dir.path(), OutputFormat::Png))
        .with_renderer(EchoRenderer::default());

    let spec = DiagramSpec::new("Anything")
        .filename("custom")
        .format(OutputFormat::Pdf);
    assert_eq!(builder.artifact_path(&spec), dir.path().join("custom.pdf"));
}
