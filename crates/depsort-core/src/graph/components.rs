//! Strongly connected components and the condensation graph.

use petgraph::algo::tarjan_scc;
use rustc_hash::FxHashSet;

use super::call_graph::CallGraph;

/// Call graph collapsed into strongly connected components.
///
/// Each component is a set of declaration indices. Component numbering
/// follows discovery order and carries no meaning for the final order.
#[derive(Debug, Clone)]
pub struct Condensation {
    components: Vec<Vec<usize>>,
    component_of: Vec<usize>,
    /// Components each component calls into (its dependencies).
    dependencies: Vec<FxHashSet<usize>>,
    /// Components that call into each component.
    dependents: Vec<FxHashSet<usize>>,
    /// More than one member, or a member that calls itself.
    cyclic: Vec<bool>,
}

impl Condensation {
    /// Collapse the call graph. Every declaration lands in exactly one component.
    pub fn of(call_graph: &CallGraph) -> Self {
        let graph = call_graph.graph();
        let sccs = tarjan_scc(graph);

        let mut component_of = vec![0; graph.node_count()];
        let components: Vec<Vec<usize>> = sccs
            .iter()
            .enumerate()
            .map(|(component, members)| {
                members
                    .iter()
                    .map(|&node| {
                        let idx = graph[node];
                        component_of[idx] = component;
                        idx
                    })
                    .collect()
            })
            .collect();

        let mut dependencies = vec![FxHashSet::default(); components.len()];
        let mut dependents = vec![FxHashSet::default(); components.len()];
        let mut cyclic: Vec<bool> = components.iter().map(|m| m.len() > 1).collect();
        for edge in call_graph.edges() {
            let from = component_of[edge.caller];
            let to = component_of[edge.callee];
            if edge.caller == edge.callee {
                cyclic[from] = true;
            } else if from != to {
                dependencies[from].insert(to);
                dependents[to].insert(from);
            }
        }

        Self {
            components,
            component_of,
            dependencies,
            dependents,
            cyclic,
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Declaration indices in a component (unordered).
    pub fn members(&self, component: usize) -> &[usize] {
        &self.components[component]
    }

    /// Component holding a declaration.
    pub fn component_of(&self, decl: usize) -> usize {
        self.component_of[decl]
    }

    pub fn dependencies(&self, component: usize) -> &FxHashSet<usize> {
        &self.dependencies[component]
    }

    pub fn dependents(&self, component: usize) -> &FxHashSet<usize> {
        &self.dependents[component]
    }

    /// Whether a component is a real cycle (more than one member, or self-recursive).
    pub fn is_cyclic(&self, component: usize) -> bool {
        self.cyclic[component]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Declaration;

    /// `calls` is a space-separated list of callee names.
    fn build(specs: &[(&str, &str)]) -> (CallGraph, Condensation) {
        let decls: Vec<Declaration> = specs
            .iter()
            .enumerate()
            .map(|(i, (name, calls))| Declaration::method(i, *name, i).with_calls(calls.split_whitespace()))
            .collect();
        let graph = CallGraph::build(&decls, None).unwrap();
        let condensation = Condensation::of(&graph);
        (graph, condensation)
    }

    #[test]
    fn test_empty_input_has_no_components() {
        let (_, condensation) = build(&[]);
        assert!(condensation.is_empty());
    }

    #[test]
    fn test_acyclic_graph_gives_singletons() {
        let (_, condensation) = build(&[("a", "b"), ("b", "c"), ("c", "")]);
        assert_eq!(condensation.len(), 3);
        for c in 0..3 {
            assert_eq!(condensation.members(c).len(), 1);
        }
        let a = condensation.component_of(0);
        let b = condensation.component_of(1);
        assert!(condensation.dependencies(a).contains(&b));
        assert!(condensation.dependents(b).contains(&a));
    }

    #[test]
    fn test_mutual_recursion_collapses() {
        let (_, condensation) = build(&[("qux", "baz"), ("baz", "qux"), ("top", "qux")]);
        assert_eq!(condensation.len(), 2);
        assert_eq!(condensation.component_of(0), condensation.component_of(1));
        let cycle = condensation.component_of(0);
        let top = condensation.component_of(2);
        assert!(condensation.is_cyclic(cycle));
        assert!(!condensation.is_cyclic(top));
        assert_eq!(condensation.dependencies(top).len(), 1);
        assert!(condensation.dependencies(cycle).is_empty());
    }

    #[test]
    fn test_self_recursion_is_singleton_without_self_dependency() {
        let (_, condensation) = build(&[("walk", "walk")]);
        assert_eq!(condensation.len(), 1);
        assert!(condensation.dependencies(0).is_empty());
        assert!(condensation.is_cyclic(0));
    }

    #[test]
    fn test_parallel_edges_deduplicated() {
        let (_, condensation) = build(&[
            ("a", "b c"),
            ("b", "c"),
            ("c", "b"),
        ]);
        let a = condensation.component_of(0);
        assert_eq!(condensation.dependencies(a).len(), 1);
    }

    #[test]
    fn test_every_declaration_in_exactly_one_component() {
        let (_, condensation) = build(&[
            ("a", "b"),
            ("b", "a c"),
            ("c", "d"),
            ("d", "c"),
            ("e", ""),
        ]);
        let mut seen = vec![0; 5];
        for c in 0..condensation.len() {
            for &m in condensation.members(c) {
                seen[m] += 1;
            }
        }
        assert_eq!(seen, vec![1; 5]);
    }
}
