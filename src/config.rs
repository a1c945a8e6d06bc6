use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub content: ContentConfig,
    pub index: IndexConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub root: PathBuf,
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_excluded_files")]
    pub excluded_files: Vec<String>,
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_version_prefix() -> String {
    "v".to_string()
}
fn default_extension() -> String {
    "md".to_string()
}
fn default_excluded_files() -> Vec<String> {
    vec!["gdpr-banner".to_string(), "menu".to_string()]
}
fn default_excluded_dirs() -> Vec<String> {
    vec!["main-concepts".to_string()]
}
fn default_max_file_bytes() -> u64 {
    100_000
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    pub base_name: String,
    /// When true, wait for the replace operation to settle on the service
    /// before returning.
    #[serde(default)]
    pub safe: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Search-service credentials, resolved from the environment once at startup
/// and passed down. Pipeline code never reads the environment itself.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub admin_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let app_id = std::env::var("DOCINDEX_APP_ID")
            .map_err(|_| anyhow::anyhow!("DOCINDEX_APP_ID not set"))?;
        let admin_key = std::env::var("DOCINDEX_ADMIN_KEY")
            .map_err(|_| anyhow::anyhow!("DOCINDEX_ADMIN_KEY not set"))?;
        Ok(Self { app_id, admin_key })
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.content.root.as_os_str().is_empty() {
        anyhow::bail!("content.root must not be empty");
    }

    if config.content.extension.is_empty() {
        anyhow::bail!("content.extension must not be empty");
    }

    if config.content.max_file_bytes == 0 {
        anyhow::bail!("content.max_file_bytes must be > 0");
    }

    if config.index.base_name.is_empty() {
        anyhow::bail!("index.base_name must not be empty");
    }

    Ok(config)
}
