//! Call graph among sibling declarations.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

use super::types::{Declaration, Edge};
use crate::cancel::{CancellationProbe, checkpoint};
use crate::error::Result;

/// Directed call graph over one batch of declarations.
///
/// Node `i` carries the index of declaration `i`; edges go from caller to
/// callee, so a callee is a dependency of every node with an edge into it.
pub struct CallGraph {
    graph: DiGraph<usize, ()>,
    edges: Vec<Edge>,
}

impl CallGraph {
    /// Build the graph from the declarations' local call names.
    ///
    /// A call name matches every callable sibling with that name, so calls
    /// to an overloaded name depend on all overloads. Names with no match
    /// are ignored.
    pub fn build(decls: &[Declaration], probe: Option<&dyn CancellationProbe>) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(decls.len(), 0);
        let nodes: Vec<NodeIndex> = (0..decls.len()).map(|i| graph.add_node(i)).collect();

        let mut by_name: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
        for (idx, decl) in decls.iter().enumerate() {
            if decl.kind.is_callable() {
                by_name.entry(decl.name.as_str()).or_default().push(idx);
            }
        }

        let mut seen = FxHashSet::default();
        let mut edges = Vec::new();
        for (caller, decl) in decls.iter().enumerate() {
            checkpoint(probe)?;
            if !decl.kind.is_callable() {
                continue;
            }
            for name in &decl.local_call_names {
                let Some(callees) = by_name.get(name.as_str()) else {
                    tracing::trace!("{}: call to '{}' has no sibling target", decl.name, name);
                    continue;
                };
                for &callee in callees {
                    let edge = Edge { caller, callee };
                    if seen.insert(edge) {
                        tracing::trace!("edge {} -> {}", decl.name, decls[callee].name);
                        graph.add_edge(nodes[caller], nodes[callee], ());
                        edges.push(edge);
                    }
                }
            }
        }

        Ok(Self { graph, edges })
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<usize, ()> {
        &self.graph
    }

    /// All distinct edges, in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Direct callees of a declaration.
    #[cfg(test)]
    pub(crate) fn callees(&self, idx: usize) -> Vec<usize> {
        self.graph
            .neighbors(NodeIndex::new(idx))
            .map(|n| self.graph[n])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DeclKind;

    fn decl(idx: usize, name: &str, calls: &[&str]) -> Declaration {
        Declaration::method(idx, name, idx).with_calls(calls.iter().copied())
    }

    #[test]
    fn test_empty_graph() {
        let graph = CallGraph::build(&[], None).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_simple_edge() {
        let decls = vec![decl(0, "foo", &["bar"]), decl(1, "bar", &[])];
        let graph = CallGraph::build(&decls, None).unwrap();
        assert_eq!(graph.edges(), &[Edge { caller: 0, callee: 1 }]);
        assert_eq!(graph.callees(0), vec![1]);
        assert!(graph.callees(1).is_empty());
    }

    #[test]
    fn test_overloads_get_all_edges() {
        let decls = vec![
            decl(0, "run", &["log"]),
            decl(1, "log", &[]).with_params(["&str"]),
            decl(2, "log", &[]).with_params(["&str", "usize"]),
        ];
        let graph = CallGraph::build(&decls, None).unwrap();
        let mut callees = graph.callees(0);
        callees.sort();
        assert_eq!(callees, vec![1, 2]);
    }

    #[test]
    fn test_unresolved_names_ignored() {
        let decls = vec![decl(0, "foo", &["println", "unwrap"])];
        let graph = CallGraph::build(&decls, None).unwrap();
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_self_recursion_recorded() {
        let decls = vec![decl(0, "walk", &["walk"])];
        let graph = CallGraph::build(&decls, None).unwrap();
        assert_eq!(graph.edges(), &[Edge { caller: 0, callee: 0 }]);
    }

    #[test]
    fn test_other_kind_never_in_graph() {
        let decls = vec![
            decl(0, "foo", &["LIMIT"]),
            Declaration::other(1, "LIMIT", 1).with_calls(["foo"]),
            decl(2, "Output", &[]).with_kind(DeclKind::Other),
        ];
        let graph = CallGraph::build(&decls, None).unwrap();
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_cancelled_during_build() {
        let decls = vec![decl(0, "foo", &[]), decl(1, "bar", &[])];
        let probe = || true;
        let result = CallGraph::build(&decls, Some(&probe));
        assert!(matches!(result, Err(crate::Error::Cancelled)));
    }
}
