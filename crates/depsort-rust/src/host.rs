//! [`SortHost`] for one impl block of a Rust source text.

use std::ops::Range;

use depsort_core::{CancellationProbe, Declaration, OrderingConfig, SortHost, SortOutcome};

use crate::extract::ImplBlock;

/// Drives the engine for a single impl block and renders the result.
///
/// After a successful run, [`replacement`](Self::replacement) holds the new
/// text for [`span`](Self::span); it is `None` when the order did not change.
pub struct ImplBlockHost<'a> {
    source: &'a str,
    block: &'a ImplBlock,
    config: &'a OrderingConfig,
    probe: Option<&'a dyn CancellationProbe>,
    replacement: Option<String>,
}

impl<'a> ImplBlockHost<'a> {
    pub fn new(source: &'a str, block: &'a ImplBlock, config: &'a OrderingConfig) -> Self {
        Self {
            source,
            block,
            config,
            probe: None,
            replacement: None,
        }
    }

    pub fn with_probe(mut self, probe: &'a dyn CancellationProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Byte range from the first member's start to the last member's end.
    pub fn span(&self) -> Range<usize> {
        let start = self.block.members.iter().map(|m| m.range.start).min().unwrap_or(0);
        let end = self.block.members.iter().map(|m| m.range.end).max().unwrap_or(0);
        start..end
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    pub fn into_replacement(self) -> Option<String> {
        self.replacement
    }
}

impl SortHost for ImplBlockHost<'_> {
    fn declarations(&self) -> depsort_core::Result<Vec<Declaration>> {
        Ok(self.block.declarations())
    }

    fn config(&self) -> &OrderingConfig {
        self.config
    }

    fn ranges(&self) -> Option<Vec<Range<usize>>> {
        Some(self.block.ranges())
    }

    fn probe(&self) -> Option<&dyn CancellationProbe> {
        self.probe
    }

    fn apply(&mut self, outcome: &SortOutcome) -> depsort_core::Result<()> {
        if !outcome.is_reordered() {
            self.replacement = None;
            return Ok(());
        }

        // Members are extracted in source order, so slot k is member k.
        let members = &self.block.members;
        let span = self.span();
        let mut text = String::with_capacity(span.len());
        let mut cursor = span.start;
        for (slot, &placed) in members.iter().zip(&outcome.permutation) {
            text.push_str(&self.source[cursor..slot.range.start]);
            text.push_str(&self.source[members[placed].range.clone()]);
            cursor = slot.range.end;
        }

        tracing::debug!("{}: reordered {} members", self.block.label(), members.len());
        self.replacement = Some(text);
        Ok(())
    }
}
