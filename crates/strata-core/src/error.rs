//! Errors raised while declaring a diagram.

use thiserror::Error;

/// A malformed structural declaration.
///
/// Declarations are checked eagerly, so these surface at the call that made
/// the mistake rather than at render time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("node `{0}` belongs to a different diagram")]
    ForeignNode(String),

    #[error("node `{0}` was never declared in this diagram")]
    UnknownNode(String),

    #[error("cluster `{0}` was never declared in this diagram")]
    UnknownCluster(String),

    #[error("connection has no {0} nodes")]
    EmptyEndpoints(&'static str),
}
