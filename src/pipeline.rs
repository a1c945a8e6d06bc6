//! Per-version pipeline orchestration.
//!
//! Coordinates the full flow for one version directory: collect files,
//! extract one document per file, aggregate the survivors in traversal
//! order, and hand them to the publisher. Per-file failures are warned and
//! skipped; they never abort the version.

use anyhow::Result;
use std::path::Path;

use crate::collector;
use crate::config::Config;
use crate::extract::{self, ExtractError};
use crate::models::{IndexDocument, VersionReport};
use crate::publisher::{resolve_index_name, SearchClient};

/// Run the pipeline for one version directory.
///
/// With `client = None` (dry run) everything except the publish step runs,
/// including the collector's truncation side effect on oversized files.
pub fn run_version(
    config: &Config,
    client: Option<&SearchClient>,
    version_dir: &Path,
) -> Result<VersionReport> {
    let version_name = version_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let files = collector::collect_files(version_dir, &config.content)?;

    let mut report = VersionReport {
        files_scanned: files.len(),
        ..VersionReport::default()
    };

    let mut docs: Vec<IndexDocument> = Vec::new();

    for file in &files {
        match extract::extract_document(file) {
            Ok(Some(doc)) => docs.push(doc),
            Ok(None) => report.skipped_flagged += 1,
            Err(err) => {
                warn_skip(file, &err);
                report.skipped_warned += 1;
            }
        }
    }

    report.documents_built = docs.len();

    let index_name = resolve_index_name(&config.index.base_name, &version_name);

    if let Some(client) = client {
        client.replace_all_objects(&index_name, &docs)?;
        report.published = true;
    }

    println!(
        "index {}{}",
        index_name,
        if report.published { "" } else { " (dry-run)" }
    );
    println!("  files scanned: {}", report.files_scanned);
    println!("  documents built: {}", report.documents_built);
    println!("  skipped (flagged): {}", report.skipped_flagged);
    println!("  skipped (warned): {}", report.skipped_warned);
    if report.published {
        println!("ok");
    }

    Ok(report)
}

fn warn_skip(file: &Path, err: &ExtractError) {
    eprintln!(
        "Warning: error processing file at {} - [{}]. Skipping...",
        file.display(),
        err
    );
}
