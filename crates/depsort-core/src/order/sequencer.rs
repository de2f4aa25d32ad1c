//! Topological sequencing of the condensation graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::cancel::{CancellationProbe, checkpoint};
use crate::error::Result;
use crate::graph::Condensation;

/// One emitted component: its members in comparator order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedGroup {
    /// Component number within the condensation.
    pub component: usize,
    /// Declaration indices, best-ranked first.
    pub members: Vec<usize>,
    /// Members call each other, or the single member calls itself.
    pub cyclic: bool,
}

/// Orders components so that dependencies come before their dependents.
///
/// Among ready components (all dependencies placed), the one whose
/// best-ranked member has the lowest comparator rank goes next.
pub struct TopologicalSequencer<'a> {
    condensation: &'a Condensation,
    ranks: &'a [usize],
}

impl<'a> TopologicalSequencer<'a> {
    /// `ranks[i]` is the comparator rank of declaration `i`.
    pub fn new(condensation: &'a Condensation, ranks: &'a [usize]) -> Self {
        Self { condensation, ranks }
    }

    /// Emit every component exactly once.
    pub fn sequence(&self, probe: Option<&dyn CancellationProbe>) -> Result<Vec<OrderedGroup>> {
        let count = self.condensation.len();

        let mut groups: Vec<Vec<usize>> = (0..count)
            .map(|c| {
                let mut members = self.condensation.members(c).to_vec();
                members.sort_by_key(|&m| self.ranks[m]);
                members
            })
            .collect();
        let representative: Vec<usize> = groups.iter().map(|m| self.ranks[m[0]]).collect();

        let mut pending: Vec<usize> = (0..count)
            .map(|c| self.condensation.dependencies(c).len())
            .collect();

        let mut ready: BinaryHeap<Reverse<(usize, usize)>> = (0..count)
            .filter(|&c| pending[c] == 0)
            .map(|c| Reverse((representative[c], c)))
            .collect();

        let mut ordered = Vec::with_capacity(count);
        while let Some(Reverse((_, component))) = ready.pop() {
            checkpoint(probe)?;

            for &dependent in self.condensation.dependents(component) {
                pending[dependent] -= 1;
                if pending[dependent] == 0 {
                    ready.push(Reverse((representative[dependent], dependent)));
                }
            }

            ordered.push(OrderedGroup {
                component,
                members: std::mem::take(&mut groups[component]),
                cyclic: self.condensation.is_cyclic(component),
            });
        }

        // The condensation is acyclic, so every component becomes ready.
        debug_assert_eq!(ordered.len(), count);

        Ok(ordered)
    }
}
