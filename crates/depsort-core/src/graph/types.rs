//! Types for the ordering graph.

use std::collections::BTreeSet;

/// Unique identifier for a declaration within one input batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct DeclId(pub(crate) usize);

impl DeclId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "decl_{}", self.0)
    }
}

/// Kind of member in a type body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    /// Method with a body that may call siblings.
    Method,
    /// Constructor (for Rust: an associated function returning `Self`).
    Constructor,
    /// Anything else (constants, associated types, macros).
    ///
    /// Takes part in ordering but never in the call graph.
    Other,
}

impl DeclKind {
    /// Whether declarations of this kind can be callers or callees.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }
}

/// Normalized view of one member of a type body.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    /// Unique identifier
    pub id: DeclId,
    /// Member kind
    pub kind: DeclKind,
    /// Identifier text
    pub name: String,
    /// Rank from the visibility ordering policy (lower sorts first)
    pub visibility_rank: u32,
    /// Normalized parameter type signatures, receiver excluded
    pub parameter_signatures: Vec<String>,
    /// Position in the body before reordering
    pub original_index: usize,
    /// Names invoked without an explicit receiver
    pub local_call_names: BTreeSet<String>,
}

impl Declaration {
    /// Rank carried by `Other` declarations. They are ordered by
    /// `original_index` only, so the value never takes part in a comparison.
    pub const ANCHORED_RANK: u32 = u32::MAX;

    /// Create a method declaration with no parameters and no calls.
    pub fn method(id: usize, name: impl Into<String>, original_index: usize) -> Self {
        Self {
            id: DeclId::new(id),
            kind: DeclKind::Method,
            name: name.into(),
            visibility_rank: 0,
            parameter_signatures: Vec::new(),
            original_index,
            local_call_names: BTreeSet::new(),
        }
    }

    /// Create an `Other` declaration anchored to its original position.
    pub fn other(id: usize, name: impl Into<String>, original_index: usize) -> Self {
        Self {
            id: DeclId::new(id),
            kind: DeclKind::Other,
            name: name.into(),
            visibility_rank: Self::ANCHORED_RANK,
            parameter_signatures: Vec::new(),
            original_index,
            local_call_names: BTreeSet::new(),
        }
    }

    pub fn with_kind(mut self, kind: DeclKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_visibility(mut self, rank: u32) -> Self {
        self.visibility_rank = rank;
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_signatures = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_calls<I, S>(mut self, calls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.local_call_names = calls.into_iter().map(Into::into).collect();
        self
    }
}

/// A directed call edge: `callee` is a dependency of `caller`.
///
/// Both ends are indices into the declaration slice the graph was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub caller: usize,
    pub callee: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_id_display() {
        assert_eq!(DeclId::new(7).to_string(), "decl_7");
    }

    #[test]
    fn test_other_is_anchored() {
        let decl = Declaration::other(0, "MAX", 3);
        assert_eq!(decl.visibility_rank, Declaration::ANCHORED_RANK);
        assert!(!decl.kind.is_callable());
    }

    #[test]
    fn test_builder_collects_calls() {
        let decl = Declaration::method(1, "run", 0).with_calls(["step", "step", "finish"]);
        assert_eq!(decl.local_call_names.len(), 2);
        assert!(decl.kind.is_callable());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DeclKind::Constructor).unwrap();
        assert_eq!(json, "\"constructor\"");
    }
}
