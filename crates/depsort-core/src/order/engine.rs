//! Entry point tying the ordering pipeline together.

use rustc_hash::FxHashSet;

use super::comparator::DeclarationComparator;
use super::sequencer::{OrderedGroup, TopologicalSequencer};
use crate::cancel::{CancellationProbe, checkpoint};
use crate::config::OrderingConfig;
use crate::error::{Error, Result};
use crate::graph::{CallGraph, Condensation, Declaration};

/// Computes dependency-based member orders.
///
/// Each call builds its own graph, condensation and ranks and drops them
/// before returning; the engine itself only holds the configuration and an
/// optional cancellation probe.
pub struct OrderingEngine<'p> {
    config: OrderingConfig,
    probe: Option<&'p dyn CancellationProbe>,
}

impl<'p> OrderingEngine<'p> {
    pub fn new(config: OrderingConfig) -> Self {
        Self { config, probe: None }
    }

    /// Poll `probe` during the computation and abort when it fires.
    pub fn with_probe(mut self, probe: &'p dyn CancellationProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Compute the new order as a permutation of input indices.
    ///
    /// `result[k]` is the index (into `decls`) of the declaration placed at
    /// position `k`.
    pub fn compute_order(&self, decls: &[Declaration]) -> Result<Vec<usize>> {
        let groups = self.order_groups(decls)?;
        let order: Vec<usize> = groups.into_iter().flat_map(|g| g.members).collect();

        tracing::debug!(
            "sorted: [{}]",
            order
                .iter()
                .map(|&i| decls[i].name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(order)
    }

    /// Compute the ordered components, each with its members in final order.
    pub fn order_groups(&self, decls: &[Declaration]) -> Result<Vec<OrderedGroup>> {
        validate(decls)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            for decl in decls {
                tracing::debug!(
                    "> {} [{:?}, vis {}, #{}] calls {:?}",
                    decl.name,
                    decl.kind,
                    decl.visibility_rank,
                    decl.original_index,
                    decl.local_call_names
                );
            }
        }

        let call_graph = CallGraph::build(decls, self.probe)?;
        let condensation = Condensation::of(&call_graph);
        checkpoint(self.probe)?;

        let ranks = DeclarationComparator::new(&self.config).ranks(decls);
        let groups = TopologicalSequencer::new(&condensation, &ranks).sequence(self.probe)?;

        tracing::debug!(
            "{} declarations, {} edges, {} components",
            decls.len(),
            call_graph.edges().len(),
            groups.len()
        );

        Ok(groups)
    }
}

/// Compute a member order with the given configuration.
pub fn compute_order(decls: &[Declaration], config: &OrderingConfig) -> Result<Vec<usize>> {
    OrderingEngine::new(config.clone()).compute_order(decls)
}

/// Reject batches the pipeline cannot order deterministically.
fn validate(decls: &[Declaration]) -> Result<()> {
    let mut ids = FxHashSet::default();
    let mut positions = FxHashSet::default();

    for decl in decls {
        if !ids.insert(decl.id) {
            return Err(Error::InvalidInput(format!("duplicate declaration id {}", decl.id)));
        }
        if !positions.insert(decl.original_index) {
            return Err(Error::InvalidInput(format!(
                "duplicate original index {} (at '{}')",
                decl.original_index, decl.name
            )));
        }
        if decl.kind.is_callable() && decl.name.is_empty() {
            return Err(Error::InvalidInput(format!("{} has an empty name", decl.id)));
        }
    }

    Ok(())
}
