//! Ordering configuration.
//!
//! One immutable [`OrderingConfig`] value is passed into every ordering call.
//! Nothing is read from global state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// String collation used for names and parameter signatures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collation {
    /// Case-folded comparison first; on a tie, lowercase sorts before
    /// uppercase at the first differing character.
    #[default]
    Natural,
    /// Plain code-point order.
    Ordinal,
}

impl Collation {
    /// Compare two strings under this collation.
    ///
    /// Both variants are total orders: `Equal` is returned only for equal strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Ordinal => a.cmp(b),
            Self::Natural => {
                let folded = a
                    .chars()
                    .flat_map(char::to_lowercase)
                    .cmp(b.chars().flat_map(char::to_lowercase));
                folded.then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
            }
        }
    }
}

fn case_key(c: char) -> (bool, char) {
    (!c.is_lowercase(), c)
}

impl std::str::FromStr for Collation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "natural" => Ok(Self::Natural),
            "ordinal" => Ok(Self::Ordinal),
            other => Err(format!("unknown collation '{}' (expected 'natural' or 'ordinal')", other)),
        }
    }
}

/// Where `Other` declarations go relative to methods and constructors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherPlacement {
    /// Constants, associated types and macros come first.
    #[default]
    Leading,
    /// They come after every method.
    Trailing,
}

/// Configuration for one ordering call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Compare visibility ranks before names.
    pub honor_visibility_grouping: bool,
    /// Collation for names and parameter signatures.
    pub collation: Collation,
    /// Placement of non-callable members.
    pub other_members: OtherPlacement,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            honor_visibility_grouping: true,
            collation: Collation::Natural,
            other_members: OtherPlacement::Leading,
        }
    }
}

impl OrderingConfig {
    pub fn with_visibility_grouping(mut self, honor: bool) -> Self {
        self.honor_visibility_grouping = honor;
        self
    }

    pub fn with_collation(mut self, collation: Collation) -> Self {
        self.collation = collation;
        self
    }

    pub fn with_other_members(mut self, placement: OtherPlacement) -> Self {
        self.other_members = placement;
        self
    }
}
