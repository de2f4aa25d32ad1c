//! Expand command line paths into Rust source files.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Collect `.rs` files under the given paths.
///
/// Files named explicitly are taken as-is. Directories are walked
/// recursively, skipping `target/` and hidden directories. The result is
/// sorted and free of duplicates.
pub fn collect(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_entry(|e| !is_skipped(e, path)) {
                let entry = entry?;
                if entry.file_type().is_file() && is_rust_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            anyhow::bail!("Path not found: {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

fn is_skipped(entry: &DirEntry, root: &Path) -> bool {
    if !entry.file_type().is_dir() || entry.path() == root {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walks_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/nested/mod.rs"), "").unwrap();
        fs::write(root.join("src/notes.md"), "").unwrap();
        fs::write(root.join("target/debug/build.rs"), "").unwrap();
        fs::write(root.join(".git/hook.rs"), "").unwrap();

        let files = collect(&[root.to_path_buf()]).unwrap();
        assert_eq!(
            files,
            vec![root.join("src/lib.rs"), root.join("src/nested/mod.rs")]
        );
    }

    #[test]
    fn test_explicit_file_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.rs");
        fs::write(&file, "").unwrap();

        let files = collect(&[file.clone(), dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_missing_path() {
        assert!(collect(&[PathBuf::from("/definitely/not/here")]).is_err());
    }
}
