//! The declared diagram graph.
//!
//! A [`Graph`] records nodes, clusters and edges in the order they are
//! declared. Node storage is a `petgraph` directed graph whose indices double
//! as the public [`NodeId`] indices; nodes are never removed, so the indices
//! stay dense.
//!
//! Every mutation validates the handles it receives, so a malformed
//! declaration fails at the call that made it.

use indexmap::IndexMap;
use log::trace;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    edge::EdgeAttrs,
    error::DeclarationError,
    identifier::{ClusterId, GraphToken, NodeId},
    kind::NodeKind,
};

/// A labeled vertex standing for one infrastructure element.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    label: String,
    cluster: Option<ClusterId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The innermost cluster the node was declared in, if any.
    pub fn cluster(&self) -> Option<ClusterId> {
        self.cluster
    }
}

/// A named visual grouping of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    label: String,
    parent: Option<ClusterId>,
    depth: usize,
}

impl Cluster {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    /// Nesting depth, `0` for a cluster directly inside the diagram.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// A directed relation between two declared nodes.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    source: NodeId,
    target: NodeId,
    attrs: &'a EdgeAttrs,
}

impl<'a> Edge<'a> {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn attrs(&self) -> &'a EdgeAttrs {
        self.attrs
    }
}

/// The structure of one diagram: a title plus its nodes, clusters and edges.
#[derive(Debug, Clone)]
pub struct Graph {
    token: GraphToken,
    title: String,
    inner: DiGraph<Node, EdgeAttrs>,
    clusters: Vec<Cluster>,
}

impl Graph {
    /// Creates an empty graph for a diagram with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            token: GraphToken::fresh(),
            title: title.into(),
            inner: DiGraph::new(),
            clusters: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Declares a cluster, nested inside `parent` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::UnknownCluster`] if `parent` was not
    /// issued by this graph.
    pub fn add_cluster(
        &mut self,
        label: impl Into<String>,
        parent: Option<ClusterId>,
    ) -> Result<ClusterId, DeclarationError> {
        let depth = match parent {
            Some(parent) => self.check_cluster(parent)?.depth + 1,
            None => 0,
        };

        let id = ClusterId::new(self.token, self.clusters.len());
        let label = label.into();
        trace!(cluster = id.to_string(), label = label.as_str(), depth; "Cluster declared");
        self.clusters.push(Cluster {
            label,
            parent,
            depth,
        });
        Ok(id)
    }

    /// Declares a node. Without a label the kind's default label is used.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::UnknownCluster`] if `cluster` was not
    /// issued by this graph.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        label: Option<String>,
        cluster: Option<ClusterId>,
    ) -> Result<NodeId, DeclarationError> {
        if let Some(cluster) = cluster {
            self.check_cluster(cluster)?;
        }

        let label = label.unwrap_or_else(|| kind.default_label().to_string());
        let index = self.inner.add_node(Node {
            kind,
            label,
            cluster,
        });
        let id = NodeId::new(self.token, index.index());
        trace!(node = id.to_string(), kind:%; "Node declared");
        Ok(id)
    }

    /// Connects every source to every target, source-major.
    ///
    /// All handles are validated before any edge is added, so a failing call
    /// leaves the graph unchanged. Returns the number of edges added.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] if either list is empty or holds a
    /// handle this graph did not issue.
    pub fn connect(
        &mut self,
        sources: &[NodeId],
        targets: &[NodeId],
        attrs: &EdgeAttrs,
    ) -> Result<usize, DeclarationError> {
        if sources.is_empty() {
            return Err(DeclarationError::EmptyEndpoints("source"));
        }
        if targets.is_empty() {
            return Err(DeclarationError::EmptyEndpoints("target"));
        }

        let sources = sources
            .iter()
            .map(|id| self.check_node(*id))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = targets
            .iter()
            .map(|id| self.check_node(*id))
            .collect::<Result<Vec<_>, _>>()?;

        for source in &sources {
            for target in &targets {
                self.inner.add_edge(*source, *target, attrs.clone());
            }
        }

        Ok(sources.len() * targets.len())
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns the node for a handle, or `None` if this graph did not issue it.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.owner() != self.token {
            return None;
        }
        self.inner.node_weight(NodeIndex::new(id.index()))
    }

    /// Returns the cluster for a handle, or `None` if this graph did not issue it.
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        if id.owner() != self.token {
            return None;
        }
        self.clusters.get(id.index())
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.inner
            .node_indices()
            .map(move |index| (NodeId::new(self.token, index.index()), &self.inner[index]))
    }

    /// Clusters in declaration order.
    pub fn clusters(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .map(move |(index, cluster)| (ClusterId::new(self.token, index), cluster))
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.inner.edge_references().map(move |edge| Edge {
            source: NodeId::new(self.token, edge.source().index()),
            target: NodeId::new(self.token, edge.target().index()),
            attrs: edge.weight(),
        })
    }

    /// Nodes declared directly inside `cluster`, excluding nested clusters.
    pub fn cluster_members(&self, cluster: ClusterId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes()
            .filter(move |(_, node)| node.cluster == Some(cluster))
    }

    /// Clusters declared directly inside `parent`, or top-level clusters for `None`.
    pub fn child_clusters(
        &self,
        parent: Option<ClusterId>,
    ) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.clusters()
            .filter(move |(_, cluster)| cluster.parent == parent)
    }

    /// Nodes that belong to no cluster.
    pub fn unclustered_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, node)| node.cluster.is_none())
    }

    /// Outgoing targets per source node, both in declaration order.
    ///
    /// Nodes without outgoing edges are omitted.
    pub fn adjacency(&self) -> IndexMap<NodeId, Vec<NodeId>> {
        let mut adjacency: IndexMap<NodeId, Vec<NodeId>> = IndexMap::new();
        for edge in self.edges() {
            adjacency.entry(edge.source).or_default().push(edge.target);
        }
        adjacency
    }

    /// Same as [`Graph::adjacency`], keyed and valued by node label.
    pub fn labeled_adjacency(&self) -> IndexMap<String, Vec<String>> {
        self.adjacency()
            .into_iter()
            .map(|(source, targets)| {
                let targets = targets
                    .into_iter()
                    .map(|target| self.label_of(target))
                    .collect();
                (self.label_of(source), targets)
            })
            .collect()
    }

    /// Cluster label to the labels of the nodes declared directly inside it.
    pub fn cluster_map(&self) -> IndexMap<String, Vec<String>> {
        self.clusters()
            .map(|(id, cluster)| {
                let members = self
                    .cluster_members(id)
                    .map(|(_, node)| node.label.clone())
                    .collect();
                (cluster.label.clone(), members)
            })
            .collect()
    }

    fn label_of(&self, id: NodeId) -> String {
        self.node(id)
            .map(|node| node.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn check_node(&self, id: NodeId) -> Result<NodeIndex, DeclarationError> {
        if id.owner() != self.token {
            return Err(DeclarationError::ForeignNode(id.to_string()));
        }
        if id.index() >= self.inner.node_count() {
            return Err(DeclarationError::UnknownNode(id.to_string()));
        }
        Ok(NodeIndex::new(id.index()))
    }

    fn check_cluster(&self, id: ClusterId) -> Result<&Cluster, DeclarationError> {
        self.cluster(id)
            .ok_or_else(|| DeclarationError::UnknownCluster(id.to_string()))
    }
}
