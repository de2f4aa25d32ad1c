//! Deterministic tie-break order over declarations.

use std::cmp::Ordering;

use crate::config::{OrderingConfig, OtherPlacement};
use crate::graph::{DeclKind, Declaration};

/// Strict total order over declarations.
///
/// Used to pick among simultaneously ready components and to order members
/// within a component. Never returns `Equal` for two declarations with
/// different `original_index`.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationComparator<'a> {
    config: &'a OrderingConfig,
}

impl<'a> DeclarationComparator<'a> {
    pub fn new(config: &'a OrderingConfig) -> Self {
        Self { config }
    }

    pub fn compare(&self, a: &Declaration, b: &Declaration) -> Ordering {
        match (a.kind == DeclKind::Other, b.kind == DeclKind::Other) {
            (true, true) => return a.original_index.cmp(&b.original_index),
            (true, false) => return self.other_before_member(),
            (false, true) => return self.other_before_member().reverse(),
            (false, false) => {}
        }

        if self.config.honor_visibility_grouping {
            let vis = a.visibility_rank.cmp(&b.visibility_rank);
            if vis != Ordering::Equal {
                return vis;
            }
        }

        let collation = self.config.collation;
        let cmp = collation.compare(&a.name, &b.name);
        if cmp != Ordering::Equal {
            return cmp;
        }

        // if names are equal, sort by parameter types
        for (pa, pb) in a.parameter_signatures.iter().zip(&b.parameter_signatures) {
            let cmp = collation.compare(pa, pb);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }

        a.parameter_signatures
            .len()
            .cmp(&b.parameter_signatures.len())
            .then_with(|| a.original_index.cmp(&b.original_index))
    }

    /// Ordering of an `Other` declaration against a method.
    fn other_before_member(&self) -> Ordering {
        match self.config.other_members {
            OtherPlacement::Leading => Ordering::Less,
            OtherPlacement::Trailing => Ordering::Greater,
        }
    }

    /// Input indices sorted by this comparator.
    pub fn sorted_indices(&self, decls: &[Declaration]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..decls.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&decls[a], &decls[b]));
        indices
    }

    /// Position of every declaration in the fully sorted order.
    ///
    /// `rank[i]` is where declaration `i` lands when sorted by the comparator alone.
    pub fn ranks(&self, decls: &[Declaration]) -> Vec<usize> {
        let mut ranks = vec![0; decls.len()];
        for (rank, idx) in self.sorted_indices(decls).into_iter().enumerate() {
            ranks[idx] = rank;
        }
        ranks
    }
}
