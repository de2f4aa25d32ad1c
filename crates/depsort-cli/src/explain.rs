//! Explain command implementation.

use std::path::Path;

use anyhow::Context;
use depsort_rust::{SortOptions, explain_source};

/// Print the ordered groups of every impl block in a file as JSON.
pub fn execute(path: &Path, options: &SortOptions) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let blocks = explain_source(&source, options)?;
    println!("{}", serde_json::to_string_pretty(&blocks)?);
    Ok(())
}
