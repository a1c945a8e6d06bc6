//! File collection for one version directory.
//!
//! Walks the directory recursively, keeps markdown files that pass the
//! exclusion rules, and caps oversized files in place before anything
//! downstream reads them.

use anyhow::{bail, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ContentConfig;

/// Collect the files to index under `version_dir`.
///
/// Exclusion rules, in order:
/// - extension must match `content.extension` case-insensitively
/// - the file stem must not be in `content.excluded_files`
/// - the full path must not contain any `content.excluded_dirs` substring
///
/// Side effect: any surviving file larger than `content.max_file_bytes` is
/// truncated on disk to exactly that size. The mutation happens here, before
/// extraction, so the read path downstream never sees the oversized bytes.
/// Ordering follows filesystem traversal and is not stable across runs.
pub fn collect_files(version_dir: &Path, content: &ContentConfig) -> Result<Vec<PathBuf>> {
    let files = list_files(version_dir, content)?;
    for file in &files {
        truncate_if_oversized(file, content.max_file_bytes)?;
    }
    Ok(files)
}

/// The same candidate set as [`collect_files`], without the truncation side
/// effect. Used by `scan` to report without mutating anything.
pub fn list_files(version_dir: &Path, content: &ContentConfig) -> Result<Vec<PathBuf>> {
    if !version_dir.is_dir() {
        bail!(
            "Version directory does not exist: {}",
            version_dir.display()
        );
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(version_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !matches_extension(path, &content.extension) {
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if content.excluded_files.iter().any(|f| f == &stem) {
            continue;
        }

        let path_str = path.to_string_lossy();
        if content.excluded_dirs.iter().any(|d| path_str.contains(d)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Cap a file at `max_bytes` on disk. Files at or under the cap are left
/// byte-for-byte untouched. Not transactional: the truncation stands even if
/// a later pipeline stage fails.
fn truncate_if_oversized(path: &Path, max_bytes: u64) -> Result<()> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(max_bytes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentConfig;
    use std::fs;
    use tempfile::TempDir;

    fn test_content_config() -> ContentConfig {
        ContentConfig {
            root: PathBuf::from("content"),
            version_prefix: "v".to_string(),
            extension: "md".to_string(),
            excluded_files: vec!["gdpr-banner".to_string(), "menu".to_string()],
            excluded_dirs: vec!["main-concepts".to_string()],
            max_file_bytes: 100_000,
        }
    }

    #[test]
    fn collects_markdown_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.md"), "a").unwrap();
        fs::write(tmp.path().join("b.MD"), "b").unwrap();
        fs::write(tmp.path().join("c.txt"), "c").unwrap();

        let files = collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn excluded_stems_are_dropped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("menu.md"), "nav").unwrap();
        fs::write(tmp.path().join("gdpr-banner.md"), "banner").unwrap();
        fs::write(tmp.path().join("page.md"), "page").unwrap();

        let files = collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("page.md"));
    }

    #[test]
    fn excluded_dir_substrings_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let internal = tmp.path().join("main-concepts");
        fs::create_dir_all(&internal).unwrap();
        fs::write(internal.join("hidden.md"), "hidden").unwrap();
        fs::write(tmp.path().join("visible.md"), "visible").unwrap();

        let files = collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.md"));
    }

    #[test]
    fn oversized_file_is_truncated_to_cap() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.md");
        fs::write(&path, vec![b'x'; 100_001]).unwrap();

        collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 100_000);
    }

    #[test]
    fn file_at_cap_is_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("exact.md");
        let body = vec![b'y'; 100_000];
        fs::write(&path, &body).unwrap();

        collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), body);
    }

    #[test]
    fn small_file_is_byte_for_byte_unmodified() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("small.md");
        fs::write(&path, "---\ntitle: T\n---\nbody").unwrap();

        collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "---\ntitle: T\n---\nbody");
    }

    #[test]
    fn missing_version_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("v9");
        assert!(collect_files(&missing, &test_content_config()).is_err());
    }

    #[test]
    fn list_files_does_not_truncate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.md");
        fs::write(&path, vec![b'x'; 150_000]).unwrap();

        let files = list_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(fs::metadata(&path).unwrap().len(), 150_000);
    }

    #[test]
    fn walks_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("guides").join("setup");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("install.md"), "install").unwrap();

        let files = collect_files(tmp.path(), &test_content_config()).unwrap();
        assert_eq!(files.len(), 1);
    }
}
