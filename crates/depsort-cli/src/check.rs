//! Check command implementation.

use std::path::PathBuf;

use depsort_rust::SortOptions;

use crate::{files, sort};

/// Execute the check command. Returns whether every file is already sorted.
pub fn execute(paths: &[PathBuf], options: &SortOptions) -> anyhow::Result<bool> {
    let files = files::collect(paths)?;
    let reports = sort::run_all(&files, options, false)?;

    let mut clean = true;
    for report in reports.iter().filter(|r| r.changed) {
        clean = false;
        let blocks: Vec<_> = report
            .blocks
            .iter()
            .filter(|b| b.moved)
            .map(|b| format!("{} (line {})", b.label, b.line))
            .collect();
        println!("{}: {}", report.path.display(), blocks.join(", "));
    }

    if clean {
        println!("{} file(s) already sorted", reports.len());
    }
    Ok(clean)
}
