//! Scoped declaration of diagrams and clusters.
//!
//! A diagram is described by a [`DiagramSpec`] and declared through a
//! [`Scope`]. Scopes are handed to closures: a cluster ends when its closure
//! returns, and the diagram is finalized once, after the outermost closure
//! returns (see [`DiagramBuilder::open`](crate::DiagramBuilder::open)).

use strata_core::{
    edge::{Direction, EdgeAttrs},
    graph::Graph,
    identifier::{ClusterId, NodeId},
    kind::NodeKind,
};

use crate::{
    StrataError,
    config::{CurveStyle, OutputFormat, Rankdir},
};

/// Title and rendering options of one diagram.
///
/// Options left unset fall back to the builder's configuration.
///
/// # Examples
///
/// ```
/// use strata::DiagramSpec;
///
/// let spec = DiagramSpec::new("Transactional Outbox").show(false);
/// assert_eq!(spec.file_stem(), "transactional_outbox");
/// assert!(!spec.is_shown());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSpec {
    title: String,
    show: bool,
    filename: Option<String>,
    direction: Option<Rankdir>,
    curve_style: Option<CurveStyle>,
    format: Option<OutputFormat>,
}

impl DiagramSpec {
    /// Creates a spec that opens the artifact once it is rendered.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show: true,
            filename: None,
            direction: None,
            curve_style: None,
            format: None,
        }
    }

    /// Sets whether the finished artifact is opened in a viewer.
    pub fn show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Overrides the file name (without extension) derived from the title.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn direction(mut self, direction: Rankdir) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn curve_style(mut self, curve_style: CurveStyle) -> Self {
        self.curve_style = Some(curve_style);
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_shown(&self) -> bool {
        self.show
    }

    pub fn direction_override(&self) -> Option<Rankdir> {
        self.direction
    }

    pub fn curve_style_override(&self) -> Option<CurveStyle> {
        self.curve_style
    }

    pub fn format_override(&self) -> Option<OutputFormat> {
        self.format
    }

    /// File name of the artifact without extension.
    ///
    /// Defaults to the title's words joined by `_` and lowercased.
    pub fn file_stem(&self) -> String {
        if let Some(filename) = &self.filename {
            return filename.clone();
        }

        let stem = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase();
        if stem.is_empty() {
            "diagram".to_string()
        } else {
            stem
        }
    }
}

/// The open part of a diagram where nodes, clusters and edges are declared.
///
/// Nodes declared through a scope belong to the scope's cluster, or to no
/// cluster at the diagram level.
#[derive(Debug)]
pub struct Scope<'g> {
    graph: &'g mut Graph,
    cluster: Option<ClusterId>,
}

impl<'g> Scope<'g> {
    pub(crate) fn root(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            cluster: None,
        }
    }

    /// Declares a node with the kind's default label.
    pub fn node(&mut self, kind: NodeKind) -> Result<NodeId, StrataError> {
        Ok(self.graph.add_node(kind, None, self.cluster)?)
    }

    /// Declares a node with an explicit label.
    pub fn labeled(
        &mut self,
        kind: NodeKind,
        label: impl Into<String>,
    ) -> Result<NodeId, StrataError> {
        Ok(self.graph.add_node(kind, Some(label.into()), self.cluster)?)
    }

    /// Opens a cluster nested in this scope and declares its content.
    ///
    /// Whatever the closure returns is passed back, which is how node
    /// handles leave the cluster.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `declare`.
    pub fn cluster<T, F>(&mut self, label: impl Into<String>, declare: F) -> Result<T, StrataError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<T, StrataError>,
    {
        let id = self.graph.add_cluster(label, self.cluster)?;
        let mut inner = Scope {
            graph: &mut *self.graph,
            cluster: Some(id),
        };
        declare(&mut inner)
    }

    /// Connects every source to every target.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Declaration`] if either list is empty or holds
    /// a node not declared in this diagram.
    pub fn connect(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        direction: Direction,
    ) -> Result<(), StrataError> {
        self.connect_with(sources, targets, direction)
    }

    /// Connects every source to every target with labeled or styled edges.
    ///
    /// # Errors
    ///
    /// Same as [`Scope::connect`].
    pub fn connect_with(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        attrs: impl Into<EdgeAttrs>,
    ) -> Result<(), StrataError> {
        self.graph.connect(sources, targets, &attrs.into())?;
        Ok(())
    }

    /// The cluster this scope declares into, `None` at the diagram level.
    pub fn current_cluster(&self) -> Option<ClusterId> {
        self.cluster
    }
}

#[cfg(test)]
mod tests {
    use strata_core::error::DeclarationError;

    use super::*;

    #[test]
    fn test_file_stem_from_title() {
        assert_eq!(
            DiagramSpec::new("Transactional  Outbox").file_stem(),
            "transactional_outbox"
        );
        assert_eq!(DiagramSpec::new("   ").file_stem(), "diagram");
    }

    #[test]
    fn test_explicit_filename() {
        let spec = DiagramSpec::new("Transactional Outbox").filename("outbox");
        assert_eq!(spec.file_stem(), "outbox");
    }

    #[test]
    fn test_show_defaults_on() {
        assert!(DiagramSpec::new("x").is_shown());
    }

    #[test]
    fn test_nodes_land_in_their_cluster() {
        let mut graph = Graph::new("t");
        let mut scope = Scope::root(&mut graph);

        let (outer_node, inner_node) = scope
            .cluster("outer", |outer| {
                let outer_node = outer.node(NodeKind::Service)?;
                let inner_node = outer.cluster("inner", |inner| inner.node(NodeKind::Queue))?;
                Ok((outer_node, inner_node))
            })
            .unwrap();
        let loose = scope.labeled(NodeKind::Compute, "loose").unwrap();

        let outer_cluster = graph.node(outer_node).unwrap().cluster().unwrap();
        let inner_cluster = graph.node(inner_node).unwrap().cluster().unwrap();
        assert_eq!(graph.cluster(outer_cluster).unwrap().label(), "outer");
        assert_eq!(graph.cluster(inner_cluster).unwrap().parent(), Some(outer_cluster));
        assert!(graph.node(loose).unwrap().cluster().is_none());
    }

    #[test]
    fn test_cluster_error_propagates() {
        let mut graph = Graph::new("t");
        let mut scope = Scope::root(&mut graph);

        let result: Result<(), _> = scope.cluster("broken", |inner| {
            let node = inner.node(NodeKind::Database)?;
            inner.connect(&[node], &[], Direction::Forward)
        });

        assert!(matches!(
            result,
            Err(StrataError::Declaration(DeclarationError::EmptyEndpoints(
                "target"
            )))
        ));
    }

    #[test]
    fn test_connect_with_attrs() {
        let mut graph = Graph::new("t");
        let mut scope = Scope::root(&mut graph);
        let a = scope.node(NodeKind::Service).unwrap();
        let b = scope.node(NodeKind::Database).unwrap();
        scope
            .connect_with(&[a], &[b], EdgeAttrs::new(Direction::Both).with_label("sync"))
            .unwrap();

        let edge = graph.edges().next().unwrap();
        assert_eq!(edge.attrs().direction(), Direction::Both);
        assert_eq!(edge.attrs().label(), Some("sync"));
    }
}
