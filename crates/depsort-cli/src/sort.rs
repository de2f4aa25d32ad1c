//! Sort command implementation.

use std::path::PathBuf;
use std::time::Instant;

use depsort_rust::{FileReport, SortOptions, sort_file};
use rayon::prelude::*;

use crate::files;

/// Execute the sort command.
pub fn execute(paths: &[PathBuf], options: &SortOptions, stdout: bool) -> anyhow::Result<()> {
    let files = files::collect(paths)?;

    if stdout {
        let [file] = files.as_slice() else {
            anyhow::bail!("--stdout needs exactly one file, got {}", files.len());
        };
        let report = sort_file(file, options, false)?;
        print!("{}", report.text.unwrap_or_default());
        return Ok(());
    }

    let start = Instant::now();
    let reports = run_all(&files, options, true)?;
    let changed = reports.iter().filter(|r| r.changed).count();

    for report in reports.iter().filter(|r| r.changed) {
        println!("sorted {}", report.path.display());
    }
    println!(
        "{} file(s) checked, {} rewritten ({:.2}ms)",
        reports.len(),
        changed,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Sort files in parallel. Files that fail are logged and make the whole
/// run fail after every other file was processed.
pub fn run_all(files: &[PathBuf], options: &SortOptions, write: bool) -> anyhow::Result<Vec<FileReport>> {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| sort_file(path, options, write))
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!("{}", e);
                eprintln!("error: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) could not be processed", failed);
    }
    Ok(reports)
}
