//! Per-file document extraction.
//!
//! Reads one markdown file, splits its front matter, and builds the
//! [`IndexDocument`] for it. Every failure here is per-file: the pipeline
//! logs a warning and moves on, it never aborts the batch.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::frontmatter::{self, FrontMatterError};
use crate::models::IndexDocument;

/// Angle-bracket spans, including multi-line ones. Removes embedded HTML/JSX
/// blocks from the body before indexing.
static TAG_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(.*?)>").expect("valid regex"));

/// Extraction failure for a single file. The caller decides skip-vs-abort;
/// this crate's pipeline always skips with a warning.
#[derive(Debug)]
pub enum ExtractError {
    Io(std::io::Error),
    FrontMatter(FrontMatterError),
    MissingField(&'static str),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Io(e) => write!(f, "cannot read file: {}", e),
            ExtractError::FrontMatter(e) => write!(f, "{}", e),
            ExtractError::MissingField(field) => write!(f, "missing required field '{}'", field),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io(e)
    }
}

impl From<FrontMatterError> for ExtractError {
    fn from(e: FrontMatterError) -> Self {
        ExtractError::FrontMatter(e)
    }
}

/// Build the index document for one file.
///
/// Returns `Ok(None)` when the page header carries a truthy `collate` flag,
/// meaning the page is excluded from public indexing — a silent skip.
/// Required header fields are `slug` and `title`; `description` passes
/// through as-is when present.
pub fn extract_document(path: &Path) -> Result<Option<IndexDocument>, ExtractError> {
    let raw = std::fs::read_to_string(path)?;
    let page = frontmatter::parse(&raw)?;

    let metadata = page.metadata.unwrap_or(Value::Null);

    if is_truthy(metadata.get("collate")) {
        return Ok(None);
    }

    let slug = metadata
        .get("slug")
        .and_then(|v| v.as_str())
        .ok_or(ExtractError::MissingField("slug"))?;
    let title = metadata
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or(ExtractError::MissingField("title"))?;
    let description = metadata
        .get("description")
        .and_then(|v| v.as_str())
        .map(String::from);

    Ok(Some(IndexDocument {
        object_id: slug.to_string(),
        title: title.to_string(),
        description,
        categories: categories_from_slug(slug),
        content: clean_content(page.body),
    }))
}

/// Hierarchical category tags from the page slug: strip one leading `/`,
/// then split on `/`.
pub fn categories_from_slug(slug: &str) -> Vec<String> {
    slug.strip_prefix('/')
        .unwrap_or(slug)
        .split('/')
        .map(String::from)
        .collect()
}

/// Clean a page body for indexing: drop angle-bracket spans, newlines, and
/// `#` heading markers. No other markdown normalization — link text,
/// emphasis markers, and list bullets stay in. Idempotent.
pub fn clean_content(body: &str) -> String {
    TAG_SPAN_RE
        .replace_all(body, "")
        .replace('\n', "")
        .replace('#', "")
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Sequence(s)) => !s.is_empty(),
        Some(Value::Mapping(m)) => !m.is_empty(),
        Some(_) => true,
    }
}
