//! YAML front-matter extraction.
//!
//! Content files open with a metadata block delimited by `---`:
//!
//! ```markdown
//! ---
//! title: Connectors
//! slug: /connectors
//! ---
//!
//! Body text.
//! ```
//!
//! A file that does not start with `---` simply has no metadata. A file that
//! opens a block but never closes it, or closes it around invalid YAML, is
//! malformed — callers treat that as a per-file failure.

use serde_yaml::Value;

/// Front-matter split of one file: parsed metadata (if present) plus the
/// body after the closing delimiter.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub metadata: Option<Value>,
    pub body: &'a str,
}

/// Malformed front-matter block.
#[derive(Debug)]
pub enum FrontMatterError {
    UnclosedBlock,
    InvalidYaml(String),
}

impl std::fmt::Display for FrontMatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontMatterError::UnclosedBlock => {
                write!(f, "front-matter block has no closing delimiter")
            }
            FrontMatterError::InvalidYaml(e) => write!(f, "invalid front-matter YAML: {}", e),
        }
    }
}

impl std::error::Error for FrontMatterError {}

/// Split a file into front-matter metadata and body.
pub fn parse(content: &str) -> Result<Page<'_>, FrontMatterError> {
    if !content.starts_with("---") {
        return Ok(Page {
            metadata: None,
            body: content,
        });
    }

    let after_open = match content[3..].find('\n') {
        Some(pos) => &content[3 + pos + 1..],
        None => return Err(FrontMatterError::UnclosedBlock),
    };

    // Empty block (`---` immediately followed by `---`) or the normal case
    // with YAML between the delimiters.
    let (yaml, after_close) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else if let Some(close) = after_open.find("\n---") {
        (&after_open[..close], &after_open[close + 4..])
    } else {
        return Err(FrontMatterError::UnclosedBlock);
    };

    let body = after_close.strip_prefix('\n').unwrap_or(after_close);

    if yaml.trim().is_empty() {
        return Ok(Page {
            metadata: None,
            body,
        });
    }

    match serde_yaml::from_str::<Value>(yaml) {
        Ok(value) => Ok(Page {
            metadata: Some(value),
            body,
        }),
        Err(e) => Err(FrontMatterError::InvalidYaml(e.to_string())),
    }
}
