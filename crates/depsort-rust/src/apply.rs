//! Apply computed orders to Rust source text.
//!
//! Each impl block is rewritten independently: member texts move between
//! the block's slots while everything between them stays put. A block's
//! length never changes, so offsets outside every rewritten span are stable.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use depsort_core::{
    CancellationProbe, DeclKind, OrderingConfig, OrderingEngine, PositionRemap, run_host,
};
use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};
use crate::extract::{BlockExtractor, ImplBlock};
use crate::host::ImplBlockHost;
use crate::visibility::{VisibilityClass, VisibilityOrder};

/// Everything that controls a sorting run over Rust source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub ordering: OrderingConfig,
    pub visibility_order: VisibilityOrder,
}

/// Summary of one impl block after sorting.
#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    pub label: String,
    pub line: usize,
    /// Whether the member order changed.
    pub moved: bool,
    /// Member names in their new order.
    pub order: Vec<String>,
}

/// Result of [`reorder_source`].
#[derive(Debug, Clone)]
pub struct ReorderedSource {
    pub text: String,
    pub blocks: Vec<BlockReport>,
    /// Rewritten spans with their remaps, in source order.
    edits: Vec<(Range<usize>, PositionRemap)>,
}

impl ReorderedSource {
    /// Whether any block was rewritten.
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Map an offset in the original text to the rewritten text.
    pub fn remap(&self, offset: usize) -> usize {
        let idx = self.edits.partition_point(|(span, _)| span.end <= offset);
        match self.edits.get(idx) {
            Some((span, remap)) if span.contains(&offset) => remap.remap(offset),
            _ => offset,
        }
    }
}

/// Reorder the members of every impl block in `source`.
pub fn reorder_source(source: &str, options: &SortOptions) -> SortResult<ReorderedSource> {
    reorder_source_with_probe(source, options, None)
}

/// Like [`reorder_source`], checking `probe` between engine steps.
///
/// A cancelled run returns [`depsort_core::Error::Cancelled`] and no text.
pub fn reorder_source_with_probe(
    source: &str,
    options: &SortOptions,
    probe: Option<&dyn CancellationProbe>,
) -> SortResult<ReorderedSource> {
    let blocks = BlockExtractor::new(&options.visibility_order).extract(source)?;

    let mut reports = Vec::with_capacity(blocks.len());
    let mut edits = Vec::new();
    let mut replacements = Vec::new();

    for block in &blocks {
        let mut host = ImplBlockHost::new(source, block, &options.ordering);
        if let Some(probe) = probe {
            host = host.with_probe(probe);
        }
        let outcome = run_host(&mut host)?;
        let span = host.span();

        reports.push(BlockReport {
            label: block.label(),
            line: block.line,
            moved: outcome.is_reordered(),
            order: outcome
                .permutation
                .iter()
                .map(|&i| display_name(block, i))
                .collect(),
        });

        if let (Some(text), Some(remap)) = (host.into_replacement(), outcome.remap) {
            replacements.push((span.clone(), text));
            edits.push((span, remap));
        }
    }

    // Blocks never overlap; apply back to front so earlier offsets stay valid.
    let mut text = source.to_string();
    for (span, replacement) in replacements.iter().rev() {
        text.replace_range(span.clone(), replacement);
    }

    Ok(ReorderedSource {
        text,
        blocks: reports,
        edits,
    })
}

fn display_name(block: &ImplBlock, index: usize) -> String {
    let name = &block.members[index].decl.name;
    if name.is_empty() {
        format!("<item {}>", index)
    } else {
        name.clone()
    }
}

/// Outcome of sorting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub blocks: Vec<BlockReport>,
    /// Sorted text, kept only when the file was not written back.
    pub text: Option<String>,
}

/// Read a file, reorder it and optionally write it back.
pub fn sort_file(path: &Path, options: &SortOptions, write: bool) -> SortResult<FileReport> {
    let source = fs::read_to_string(path).map_err(|e| SortError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sorted = reorder_source(&source, options)?;
    let changed = sorted.changed();

    if write && changed {
        fs::write(path, &sorted.text).map_err(|e| SortError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!("Rewrote {}", path.display());
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        changed,
        blocks: sorted.blocks,
        text: (!write).then_some(sorted.text),
    })
}

/// Member as shown in an explanation.
#[derive(Debug, Clone, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub kind: DeclKind,
    pub visibility: VisibilityClass,
    pub line: usize,
}

/// One strongly connected group in final order.
#[derive(Debug, Clone, Serialize)]
pub struct GroupExplanation {
    /// Members call each other, or the single member calls itself.
    pub cyclic: bool,
    pub members: Vec<MemberSummary>,
}

/// Ordered groups of one impl block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockExplanation {
    pub label: String,
    pub line: usize,
    pub groups: Vec<GroupExplanation>,
}

/// Describe how every impl block in `source` would be ordered, without
/// changing anything.
pub fn explain_source(source: &str, options: &SortOptions) -> SortResult<Vec<BlockExplanation>> {
    let blocks = BlockExtractor::new(&options.visibility_order).extract(source)?;
    let engine = OrderingEngine::new(options.ordering.clone());

    blocks
        .iter()
        .map(|block| -> SortResult<BlockExplanation> {
            let decls = block.declarations();
            let groups = engine
                .order_groups(&decls)?
                .into_iter()
                .map(|group| {
                    let members = group
                        .members
                        .iter()
                        .map(|&i| {
                            let member = &block.members[i];
                            MemberSummary {
                                name: display_name(block, i),
                                kind: member.decl.kind,
                                visibility: member.visibility,
                                line: member.line,
                            }
                        })
                        .collect();
                    GroupExplanation {
                        cyclic: group.cyclic,
                        members,
                    }
                })
                .collect();
            Ok(BlockExplanation {
                label: block.label(),
                line: block.line,
                groups,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsort_core::CancellationToken;

    const SOURCE: &str = r#"struct Stack { items: Vec<u32> }

impl Stack {
    pub fn push_all(&mut self, xs: &[u32]) {
        for &x in xs {
            self.push(x);
        }
    }

    /// Push one item.
    pub fn push(&mut self, x: u32) {
        self.items.push(x);
    }
}
"#;

    #[test]
    fn test_reorder_moves_callee_first() {
        let sorted = reorder_source(SOURCE, &SortOptions::default()).unwrap();
        assert!(sorted.changed());
        let push = sorted.text.find("/// Push one item.").unwrap();
        let push_all = sorted.text.find("pub fn push_all").unwrap();
        assert!(push < push_all);
        assert_eq!(sorted.text.len(), SOURCE.len());
        assert_eq!(sorted.blocks[0].order, vec!["push", "push_all"]);
        assert!(sorted.blocks[0].moved);
    }

    #[test]
    fn test_remap_follows_members() {
        let sorted = reorder_source(SOURCE, &SortOptions::default()).unwrap();
        let before = SOURCE.find("self.items.push").unwrap();
        let after = sorted.remap(before);
        assert_eq!(&sorted.text[after..after + 15], "self.items.push");
        // Outside any block nothing moves.
        assert_eq!(sorted.remap(0), 0);
    }

    #[test]
    fn test_sorted_source_is_fixed_point() {
        let once = reorder_source(SOURCE, &SortOptions::default()).unwrap();
        let twice = reorder_source(&once.text, &SortOptions::default()).unwrap();
        assert!(!twice.changed());
        assert_eq!(twice.text, once.text);
    }

    #[test]
    fn test_cancelled_run_returns_no_text() {
        let token = CancellationToken::new();
        token.cancel();
        let err = reorder_source_with_probe(SOURCE, &SortOptions::default(), Some(&token)).unwrap_err();
        assert!(matches!(err, SortError::Engine(e) if e.is_cancelled()));
    }

    #[test]
    fn test_explain_marks_cycles() {
        let src = r#"impl P {
    fn even(&self, n: u32) -> bool { n == 0 || self.odd(n - 1) }
    fn odd(&self, n: u32) -> bool { n != 0 && self.even(n - 1) }
    fn spin(&self) { self.spin() }
    fn top(&self) -> bool { self.even(4) }
}
"#;
        let explained = explain_source(src, &SortOptions::default()).unwrap();
        let groups = &explained[0].groups;
        let names: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.members.iter().map(|m| m.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["even", "odd"], vec!["spin"], vec!["top"]]);
        assert!(groups[0].cyclic);
        assert!(groups[1].cyclic);
        assert!(!groups[2].cyclic);
    }
}
