//! Strata Core Types and Definitions
//!
//! This crate provides the foundational types for Strata architecture
//! diagrams. It includes:
//!
//! - **Identifiers**: Handles for declared nodes and clusters ([`identifier`] module)
//! - **Kinds**: The infrastructure categories a node can depict ([`kind::NodeKind`])
//! - **Colors**: CSS color parsing with hex output ([`color::Color`])
//! - **Edges**: Direction and styling of relations ([`edge`] module)
//! - **Graph**: The declared diagram graph and its queries ([`graph::Graph`])

pub mod color;
pub mod edge;
pub mod error;
pub mod graph;
pub mod identifier;
pub mod kind;
