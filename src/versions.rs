//! Version-directory discovery and the outer run loop.
//!
//! Each version directory is indexed independently; a fatal error in one
//! version is reported and the remaining versions still run. The caller
//! receives an error at the end if any version failed, so CI still sees a
//! non-zero exit.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::pipeline;
use crate::publisher::SearchClient;

/// Immediate subdirectories of the content root whose names start with the
/// configured version prefix, sorted by name for predictable reporting.
pub fn discover_versions(root: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Content root does not exist: {}", root.display());
    }

    let mut versions = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(prefix) {
            versions.push(entry.path());
        }
    }

    versions.sort();
    Ok(versions)
}

/// Run the pipeline once per discovered version.
///
/// `only` restricts the run to a single version name. `client = None` is a
/// dry run: no publish calls are made.
pub fn run_all(config: &Config, client: Option<&SearchClient>, only: Option<&str>) -> Result<()> {
    let mut versions = discover_versions(&config.content.root, &config.content.version_prefix)?;

    if let Some(name) = only {
        versions.retain(|v| v.file_name().map(|n| n == name).unwrap_or(false));
        if versions.is_empty() {
            bail!(
                "Version '{}' not found under {}",
                name,
                config.content.root.display()
            );
        }
    }

    if versions.is_empty() {
        bail!(
            "No version directories (prefix '{}') under {}",
            config.content.version_prefix,
            config.content.root.display()
        );
    }

    let mut failed = 0usize;
    for version in &versions {
        if let Err(err) = pipeline::run_version(config, client, version) {
            eprintln!(
                "Warning: indexing failed for version {} - [{}]. Continuing...",
                version.display(),
                err
            );
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} versions failed", failed, versions.len());
    }

    Ok(())
}
