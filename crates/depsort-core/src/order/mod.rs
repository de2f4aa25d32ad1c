//! Ordering pipeline: comparator, sequencer and the engine entry point.

mod comparator;
mod engine;
mod sequencer;

pub use comparator::DeclarationComparator;
pub use engine::{OrderingEngine, compute_order};
pub use sequencer::{OrderedGroup, TopologicalSequencer};
