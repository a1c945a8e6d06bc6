//! Core data types that flow through the indexing pipeline.

use serde::Serialize;

/// One record in the remote search index, built from a single markdown page.
///
/// `object_id` carries the page slug and doubles as the index key.
/// `description` is serialized as `null` when the page header omits it.
#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: String,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub content: String,
}

/// Per-version outcome counters, printed after each pipeline run.
#[derive(Debug, Clone, Default)]
pub struct VersionReport {
    pub files_scanned: usize,
    pub documents_built: usize,
    pub skipped_flagged: usize,
    pub skipped_warned: usize,
    pub published: bool,
}
