//! Dependency-based member ordering engine.
//!
//! This crate provides:
//! - Call graph construction among sibling declarations
//! - Cycle collapsing into strongly connected components
//! - Deterministic topological ordering of those components
//! - Offset remapping for applying the order to text
//!
//! It never reads or writes source text; extractors and appliers live in
//! other crates and talk to the engine through [`Declaration`] records and
//! the [`SortHost`] trait.
//!
//! ```
//! use depsort_core::{Declaration, OrderingConfig, compute_order};
//!
//! let decls = vec![
//!     Declaration::method(0, "foo", 0).with_calls(["bar"]),
//!     Declaration::method(1, "bar", 1),
//! ];
//! let order = compute_order(&decls, &OrderingConfig::default()).unwrap();
//! assert_eq!(order, vec![1, 0]);
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;
pub mod host;
pub mod order;
pub mod remap;

pub use cancel::{CancellationProbe, CancellationToken};
pub use config::{Collation, OrderingConfig, OtherPlacement};
pub use error::{Error, Result};
pub use graph::{DeclId, DeclKind, Declaration, Edge};
pub use host::{SortHost, SortOutcome, run_host};
pub use order::{DeclarationComparator, OrderedGroup, OrderingEngine, compute_order};
pub use remap::PositionRemap;
