//! Narrow interface to whatever environment drives the engine.
//!
//! A host supplies declarations and configuration, receives the outcome,
//! and applies it. Everything else about the host stays on its side.

use std::ops::Range;

use crate::cancel::CancellationProbe;
use crate::config::OrderingConfig;
use crate::error::Result;
use crate::graph::Declaration;
use crate::order::OrderingEngine;
use crate::remap::PositionRemap;

/// Result of one successful ordering call.
#[derive(Debug, Clone)]
pub struct SortOutcome {
    /// `permutation[k]` is the input index placed at position `k`.
    pub permutation: Vec<usize>,
    /// Present when the host supplied source ranges.
    pub remap: Option<PositionRemap>,
}

impl SortOutcome {
    /// Whether the order differs from the input order.
    pub fn is_reordered(&self) -> bool {
        self.permutation.iter().enumerate().any(|(k, &idx)| k != idx)
    }
}

/// Environment collaborator for one ordering run.
pub trait SortHost {
    /// Declarations to order, in input order.
    fn declarations(&self) -> Result<Vec<Declaration>>;

    fn config(&self) -> &OrderingConfig;

    /// Source range of each declaration, in input order, when a remap is wanted.
    fn ranges(&self) -> Option<Vec<Range<usize>>> {
        None
    }

    fn probe(&self) -> Option<&dyn CancellationProbe> {
        None
    }

    /// Apply a successful outcome. Never called for a cancelled run.
    fn apply(&mut self, outcome: &SortOutcome) -> Result<()>;
}

/// Run the engine for a host and hand it the outcome.
pub fn run_host<H: SortHost + ?Sized>(host: &mut H) -> Result<SortOutcome> {
    let decls = host.declarations()?;

    let permutation = {
        let mut engine = OrderingEngine::new(host.config().clone());
        if let Some(probe) = host.probe() {
            engine = engine.with_probe(probe);
        }
        engine.compute_order(&decls)?
    };

    let remap = match host.ranges() {
        Some(ranges) => Some(PositionRemap::new(&ranges, &permutation)?),
        None => None,
    };

    let outcome = SortOutcome { permutation, remap };
    host.apply(&outcome)?;
    Ok(outcome)
}
