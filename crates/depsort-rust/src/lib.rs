//! Dependency ordering for members of Rust impl blocks.
//!
//! Parses source with syn, turns every impl member into a
//! [`depsort_core::Declaration`], runs the ordering engine per block and
//! writes the result back by swapping member texts between their slots.
//! Comments, attributes and blank lines attached to a member travel with it.

mod calls;
pub mod apply;
pub mod error;
pub mod extract;
pub mod host;
mod line_index;
pub mod visibility;

pub use apply::{
    BlockExplanation, BlockReport, FileReport, GroupExplanation, MemberSummary, ReorderedSource,
    SortOptions, explain_source, reorder_source, reorder_source_with_probe, sort_file,
};
pub use calls::local_call_names;
pub use error::{SortError, SortResult};
pub use extract::{BlockExtractor, ImplBlock, Member};
pub use host::ImplBlockHost;
pub use visibility::{VisibilityClass, VisibilityOrder};
