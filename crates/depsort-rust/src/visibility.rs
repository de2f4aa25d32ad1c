//! Visibility classes and the ranking policy.

use serde::{Deserialize, Serialize};
use syn::Visibility;

/// Coarse visibility of an impl member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityClass {
    /// `pub`
    Public,
    /// `pub(crate)`
    Crate,
    /// `pub(super)`, `pub(self)`, `pub(in path)`
    Restricted,
    /// No visibility modifier.
    Private,
}

impl VisibilityClass {
    /// Classify a syn visibility.
    ///
    /// Members of trait impls carry no modifier but are as visible as the
    /// trait, so callers pass `in_trait_impl` to map them to `Public`.
    pub fn of(vis: &Visibility, in_trait_impl: bool) -> Self {
        match vis {
            Visibility::Public(_) => Self::Public,
            Visibility::Restricted(r) if r.path.is_ident("crate") => Self::Crate,
            Visibility::Restricted(_) => Self::Restricted,
            Visibility::Inherited if in_trait_impl => Self::Public,
            Visibility::Inherited => Self::Private,
        }
    }
}

/// Ordering policy for visibility classes: earlier entries sort first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityOrder(pub Vec<VisibilityClass>);

impl Default for VisibilityOrder {
    fn default() -> Self {
        Self(vec![
            VisibilityClass::Public,
            VisibilityClass::Crate,
            VisibilityClass::Restricted,
            VisibilityClass::Private,
        ])
    }
}

impl VisibilityOrder {
    /// Rank of a class. Classes missing from the policy rank after all listed ones.
    pub fn rank(&self, class: VisibilityClass) -> u32 {
        self.0
            .iter()
            .position(|&c| c == class)
            .unwrap_or(self.0.len()) as u32
    }
}
