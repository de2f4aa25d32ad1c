//! `depsort.toml` loading.
//!
//! ```toml
//! visibility_order = ["public", "crate", "restricted", "private"]
//!
//! [ordering]
//! honor_visibility_grouping = true
//! collation = "natural"
//! other_members = "leading"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use depsort_core::Collation;
use depsort_rust::SortOptions;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE: &str = "depsort.toml";

/// Command line values that take precedence over the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub no_visibility: bool,
    pub collation: Option<Collation>,
}

/// Parse a config file.
pub fn load(path: &Path) -> anyhow::Result<SortOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let options: SortOptions = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(options)
}

/// Resolve options: explicit path, then `./depsort.toml`, then the user
/// config directory, then defaults. Overrides apply last.
pub fn resolve(explicit: Option<&Path>, overrides: Overrides) -> anyhow::Result<SortOptions> {
    let mut options = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            load(path)?
        }
        None => match candidates().into_iter().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!("Using config {}", path.display());
                load(&path)?
            }
            None => SortOptions::default(),
        },
    };

    if overrides.no_visibility {
        options.ordering.honor_visibility_grouping = false;
    }
    if let Some(collation) = overrides.collation {
        options.ordering.collation = collation;
    }
    Ok(options)
}

fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("depsort").join(CONFIG_FILE));
    }
    paths
}
