//! Call graph over sibling declarations.
//!
//! This module provides:
//! - The declaration record consumed by the engine
//! - Call graph construction from local call names
//! - Strongly connected components and their condensation

mod call_graph;
mod components;
mod types;

pub use call_graph::CallGraph;
pub use components::Condensation;
pub use types::{DeclId, DeclKind, Declaration, Edge};
