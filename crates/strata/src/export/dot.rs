//! DOT export.
//!
//! Builds a `dot_structures` digraph from a declared [`Graph`] and prints it
//! with the `graphviz_rust` printer. Node ids are `n<index>` and clusters are
//! `cluster_<index>`, both in declaration order, so a given declaration always
//! prints the same text.

use std::path::PathBuf;

use dot_structures::{
    Attribute, Edge, EdgeTy, Graph as DotGraph, GraphAttributes, Id, Node, NodeId as DotNodeId,
    Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::PrinterContext;
use log::debug;

use strata_core::{
    color::Color,
    graph::Graph,
    identifier::{ClusterId, NodeId},
    kind::NodeKind,
};

use crate::{
    StrataError,
    config::{AppConfig, CurveStyle, Rankdir},
    diagram::DiagramSpec,
};

const ICON_NODE_HEIGHT: f32 = 1.9;
const LABEL_LINE_PADDING: f32 = 0.4;

/// Style values resolved from configuration once per export.
struct Palette {
    font_name: String,
    font_color: String,
    edge_color: String,
    cluster_pen_color: String,
    cluster_backgrounds: Vec<String>,
    icons_dir: Option<PathBuf>,
}

impl Palette {
    fn from_config(config: &AppConfig) -> Result<Self, StrataError> {
        let style = config.style();
        let hex = |color: Color| color.to_hex();

        Ok(Self {
            font_name: style.font_name().to_string(),
            font_color: style.font_color().map(hex).map_err(StrataError::Config)?,
            edge_color: style.edge_color().map(hex).map_err(StrataError::Config)?,
            cluster_pen_color: style
                .cluster_pen_color()
                .map(hex)
                .map_err(StrataError::Config)?,
            cluster_backgrounds: style
                .cluster_backgrounds()
                .map_err(StrataError::Config)?
                .into_iter()
                .map(hex)
                .collect(),
            icons_dir: style.icons_dir().map(PathBuf::from),
        })
    }

    fn cluster_background(&self, depth: usize) -> Option<&str> {
        if self.cluster_backgrounds.is_empty() {
            return None;
        }
        Some(&self.cluster_backgrounds[depth % self.cluster_backgrounds.len()])
    }

    fn icon_for(&self, kind: NodeKind) -> Option<PathBuf> {
        let icon = self.icons_dir.as_ref()?.join(kind.icon_path());
        icon.is_file().then_some(icon)
    }
}

/// Builds and prints the DOT description of a declared diagram.
pub struct DotExporter<'a> {
    spec: &'a DiagramSpec,
    graph: &'a Graph,
    rankdir: Rankdir,
    curve_style: CurveStyle,
    palette: Palette,
}

impl<'a> DotExporter<'a> {
    /// Creates an exporter, resolving style values from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Config`] if a configured color is invalid.
    pub fn new(
        spec: &'a DiagramSpec,
        graph: &'a Graph,
        config: &AppConfig,
    ) -> Result<Self, StrataError> {
        Ok(Self {
            spec,
            graph,
            rankdir: spec
                .direction_override()
                .unwrap_or_else(|| config.layout().direction()),
            curve_style: spec
                .curve_style_override()
                .unwrap_or_else(|| config.layout().curve_style()),
            palette: Palette::from_config(config)?,
        })
    }

    /// Returns the graph as DOT text.
    pub fn to_dot_string(&self) -> String {
        let dot = graphviz_rust::print(self.to_dot_graph(), &mut PrinterContext::default());
        debug!(bytes = dot.len(); "DOT description printed");
        dot
    }

    /// Returns the graph as a `dot_structures` digraph.
    pub fn to_dot_graph(&self) -> DotGraph {
        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(self.graph_attributes())),
            Stmt::GAttribute(GraphAttributes::Node(self.node_defaults())),
            Stmt::GAttribute(GraphAttributes::Edge(self.edge_defaults())),
        ];

        for (cluster_id, _) in self.graph.child_clusters(None) {
            stmts.push(Stmt::Subgraph(self.cluster_subgraph(cluster_id)));
        }
        for (node_id, _) in self.graph.unclustered_nodes() {
            stmts.push(self.node_stmt(node_id));
        }
        for edge in self.graph.edges() {
            let attrs = edge.attrs();
            let mut attributes = vec![attr("dir", attrs.direction().as_dot_str())];
            if let Some(label) = attrs.label() {
                // Orthogonal routing cannot place edge labels, only external ones.
                let key = match self.curve_style {
                    CurveStyle::Ortho => "xlabel",
                    _ => "label",
                };
                attributes.push(attr(key, label));
            }
            if let Some(color) = attrs.color() {
                attributes.push(attr("color", &color.to_hex()));
            }
            if let Some(style) = attrs.style() {
                attributes.push(attr("style", style.as_dot_str()));
            }

            stmts.push(Stmt::Edge(Edge {
                ty: EdgeTy::Pair(vertex(edge.source()), vertex(edge.target())),
                attributes,
            }));
        }

        DotGraph::DiGraph {
            id: quoted(&self.spec.file_stem()),
            strict: false,
            stmts,
        }
    }

    fn graph_attributes(&self) -> Vec<Attribute> {
        vec![
            attr("label", self.spec.title()),
            attr("rankdir", self.rankdir.as_dot_str()),
            attr("splines", self.curve_style.as_dot_str()),
            attr("pad", "2.0"),
            attr("nodesep", "0.60"),
            attr("ranksep", "0.75"),
            attr("fontname", &self.palette.font_name),
            attr("fontsize", "15"),
            attr("fontcolor", &self.palette.font_color),
        ]
    }

    fn node_defaults(&self) -> Vec<Attribute> {
        vec![
            attr("shape", "box"),
            attr("style", "rounded"),
            attr("fixedsize", "true"),
            attr("width", "1.4"),
            attr("height", "1.4"),
            attr("labelloc", "b"),
            attr("imagescale", "true"),
            attr("fontname", &self.palette.font_name),
            attr("fontsize", "13"),
            attr("fontcolor", &self.palette.font_color),
        ]
    }

    fn edge_defaults(&self) -> Vec<Attribute> {
        vec![
            attr("color", &self.palette.edge_color),
            attr("fontname", &self.palette.font_name),
            attr("fontsize", "13"),
            attr("fontcolor", &self.palette.font_color),
        ]
    }

    fn cluster_subgraph(&self, cluster_id: ClusterId) -> Subgraph {
        let mut attributes = Vec::new();
        if let Some(cluster) = self.graph.cluster(cluster_id) {
            attributes.push(attr("label", cluster.label()));
            if let Some(background) = self.palette.cluster_background(cluster.depth()) {
                attributes.push(attr("bgcolor", background));
            }
        }
        attributes.extend([
            attr("labeljust", "l"),
            attr("pencolor", &self.palette.cluster_pen_color),
            attr("fontname", &self.palette.font_name),
            attr("fontsize", "12"),
            attr("style", "rounded"),
        ]);

        let mut stmts = vec![Stmt::GAttribute(GraphAttributes::Graph(attributes))];
        for (node_id, _) in self.graph.cluster_members(cluster_id) {
            stmts.push(self.node_stmt(node_id));
        }
        for (child_id, _) in self.graph.child_clusters(Some(cluster_id)) {
            stmts.push(Stmt::Subgraph(self.cluster_subgraph(child_id)));
        }

        Subgraph {
            id: Id::Plain(cluster_id.to_string()),
            stmts,
        }
    }

    fn node_stmt(&self, node_id: NodeId) -> Stmt {
        let mut attributes = Vec::new();
        if let Some(node) = self.graph.node(node_id) {
            attributes.push(attr("label", node.label()));
            match self.palette.icon_for(node.kind()) {
                Some(icon) => {
                    let extra_lines = node.label().lines().count().saturating_sub(1);
                    let height = ICON_NODE_HEIGHT + LABEL_LINE_PADDING * extra_lines as f32;
                    attributes.push(attr("image", &icon.to_string_lossy()));
                    attributes.push(attr("height", &format!("{height:.1}")));
                }
                None => {
                    attributes.push(attr("shape", fallback_shape(node.kind())));
                    attributes.push(attr("labelloc", "c"));
                }
            }
        }

        Stmt::Node(Node {
            id: DotNodeId(Id::Plain(node_id.to_string()), None),
            attributes,
        })
    }
}

/// Shape drawn for a node kind when no icon is available.
fn fallback_shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Service => "box",
        NodeKind::Database => "cylinder",
        NodeKind::Queue => "cds",
        NodeKind::Compute => "box3d",
    }
}

fn vertex(node_id: NodeId) -> Vertex {
    Vertex::N(DotNodeId(Id::Plain(node_id.to_string()), None))
}

fn attr(key: &str, value: &str) -> Attribute {
    Attribute(Id::Plain(key.to_string()), quoted(value))
}

/// Escaped ids carry their own quotes.
fn quoted(value: &str) -> Id {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    Id::Escaped(format!("\"{escaped}\""))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use strata_core::edge::{Direction, EdgeAttrs, LineStyle};

    use super::*;
    use crate::config::{LayoutConfig, OutputConfig, StyleConfig};

    fn sample() -> (DiagramSpec, Graph) {
        let spec = DiagramSpec::new("Sample Diagram").show(false);
        let mut graph = Graph::new(spec.title());
        let outer = graph.add_cluster("Outer", None).unwrap();
        let inner = graph.add_cluster("Inner", Some(outer)).unwrap();
        let service = graph.add_node(NodeKind::Service, None, Some(outer)).unwrap();
        let db = graph.add_node(NodeKind::Database, None, Some(inner)).unwrap();
        let host = graph
            .add_node(NodeKind::Compute, Some("Relay \"1\"".to_string()), None)
            .unwrap();
        graph
            .connect(&[service, host], &[db], &EdgeAttrs::new(Direction::Forward))
            .unwrap();
        (spec, graph)
    }

    #[test]
    fn test_graph_attributes() {
        let (spec, graph) = sample();
        let dot = DotExporter::new(&spec, &graph, &AppConfig::default())
            .unwrap()
            .to_dot_string();

        assert!(dot.starts_with("digraph \"sample_diagram\""), "{dot}");
        assert!(dot.contains("label=\"Sample Diagram\""), "{dot}");
        assert!(dot.contains("rankdir=\"LR\""), "{dot}");
        assert!(dot.contains("splines=\"ortho\""), "{dot}");
        assert!(dot.contains("fontcolor=\"#2d3436\""), "{dot}");
    }

    #[test]
    fn test_clusters_nest_with_depth_backgrounds() {
        let (spec, graph) = sample();
        let dot = DotExporter::new(&spec, &graph, &AppConfig::default())
            .unwrap()
            .to_dot_string();

        let outer = dot.find("subgraph cluster_0").expect("outer cluster");
        let inner = dot.find("subgraph cluster_1").expect("inner cluster");
        assert!(outer < inner);
        assert!(dot.contains("bgcolor=\"#e5f5fd\""), "{dot}");
        assert!(dot.contains("bgcolor=\"#ebf3e7\""), "{dot}");
    }

    #[test]
    fn test_nodes_and_edges() {
        let (spec, graph) = sample();
        let dot = DotExporter::new(&spec, &graph, &AppConfig::default())
            .unwrap()
            .to_dot_string();

        assert!(dot.contains("n0 -> n1"), "{dot}");
        assert!(dot.contains("n2 -> n1"), "{dot}");
        assert!(dot.contains("dir=\"forward\""), "{dot}");
        assert!(dot.contains("shape=\"cylinder\""), "{dot}");
        assert!(dot.contains("label=\"Relay \\\"1\\\"\""), "{dot}");
    }

    #[test]
    fn test_edge_label_depends_on_splines() {
        let spec = DiagramSpec::new("Labels");
        let mut graph = Graph::new(spec.title());
        let a = graph.add_node(NodeKind::Service, None, None).unwrap();
        let b = graph.add_node(NodeKind::Queue, None, None).unwrap();
        let attrs = EdgeAttrs::new(Direction::Both)
            .with_label("events")
            .with_color(Color::new("red").unwrap())
            .with_style(LineStyle::Dashed);
        graph.connect(&[a], &[b], &attrs).unwrap();

        let ortho = DotExporter::new(&spec, &graph, &AppConfig::default())
            .unwrap()
            .to_dot_string();
        assert!(ortho.contains("xlabel=\"events\""), "{ortho}");
        assert!(ortho.contains("dir=\"both\""), "{ortho}");
        assert!(ortho.contains("color=\"#ff0000\""), "{ortho}");
        assert!(ortho.contains("style=\"dashed\""), "{ortho}");

        let curved = spec.clone().curve_style(CurveStyle::Curved);
        let dot = DotExporter::new(&curved, &graph, &AppConfig::default())
            .unwrap()
            .to_dot_string();
        assert!(!dot.contains("xlabel"), "{dot}");
        assert!(dot.contains("label=\"events\""), "{dot}");
    }

    #[test]
    fn test_spec_overrides_config_direction() {
        let (spec, graph) = sample();
        let config = AppConfig::new(
            OutputConfig::default(),
            LayoutConfig::new(Rankdir::Bt, CurveStyle::Spline),
            StyleConfig::default(),
        );

        let from_config = DotExporter::new(&spec, &graph, &config)
            .unwrap()
            .to_dot_string();
        assert!(from_config.contains("rankdir=\"BT\""), "{from_config}");

        let spec = spec.direction(Rankdir::Tb);
        let overridden = DotExporter::new(&spec, &graph, &config)
            .unwrap()
            .to_dot_string();
        assert!(overridden.contains("rankdir=\"TB\""), "{overridden}");
    }

    #[test]
    fn test_icon_used_when_present() {
        let icons = tempfile::tempdir().unwrap();
        let icon = icons.path().join(NodeKind::Database.icon_path());
        fs::create_dir_all(icon.parent().unwrap()).unwrap();
        fs::write(&icon, b"png").unwrap();

        let config: AppConfig = toml::from_str(&format!(
            "[style]\nicons_dir = {:?}\n",
            icons.path().to_string_lossy()
        ))
        .unwrap();

        let (spec, graph) = sample();
        let dot = DotExporter::new(&spec, &graph, &config)
            .unwrap()
            .to_dot_string();

        assert!(dot.contains("postgresql.png"), "{dot}");
        assert!(dot.contains("height=\"1.9\""), "{dot}");
        // Kinds without an icon in the directory keep their fallback shape.
        assert!(dot.contains("shape=\"box3d\""), "{dot}");
    }

    #[test]
    fn test_invalid_style_is_config_error() {
        let config: AppConfig = toml::from_str("[style]\nfont_color = \"nope\"\n").unwrap();
        let (spec, graph) = sample();

        let result = DotExporter::new(&spec, &graph, &config);
        assert!(matches!(result, Err(StrataError::Config(_))));
    }

    #[test]
    fn test_output_is_deterministic() {
        let (spec, graph_a) = sample();
        let (_, graph_b) = sample();
        let config = AppConfig::default();

        let a = DotExporter::new(&spec, &graph_a, &config)
            .unwrap()
            .to_dot_string();
        let b = DotExporter::new(&spec, &graph_b, &config)
            .unwrap()
            .to_dot_string();
        assert_eq!(a, b);
    }
}
