//! # docindex CLI
//!
//! Publishes versioned markdown documentation to a hosted search index.
//!
//! ## Usage
//!
//! ```bash
//! docindex --config ./config/docindex.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docindex build` | Rebuild the remote index for every version directory |
//! | `docindex build --version v1.2` | Rebuild a single version's index |
//! | `docindex build --dry-run` | Run collection and extraction, skip publishing |
//! | `docindex scan` | List the files that would be indexed, without mutating anything |
//!
//! Credentials are read from the environment once at startup:
//! `DOCINDEX_APP_ID` (application id) and `DOCINDEX_ADMIN_KEY` (admin API
//! key). They are only required for a real `build`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docindex::collector;
use docindex::config::{self, Credentials};
use docindex::publisher::SearchClient;
use docindex::versions;

/// docindex — publish versioned markdown documentation to a hosted search
/// index.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/docindex.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "docindex",
    about = "Publish versioned markdown documentation to a hosted search index",
    version,
    long_about = "docindex walks a content root of versioned markdown directories, extracts \
    front-matter metadata and cleaned body text from each page, and replaces the contents of \
    one remote search index per version with the result."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docindex.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Rebuild the remote search index from the current file system state.
    ///
    /// Runs the full pipeline once per version directory: collect markdown
    /// files (truncating any over the configured size cap), extract one
    /// document per page, and replace the version's index with the result.
    /// Versions are isolated — one version's failure does not stop the rest,
    /// but the command exits non-zero if any version failed.
    Build {
        /// Restrict the run to a single version directory name (e.g. `v1.2`).
        #[arg(long)]
        version: Option<String>,

        /// Run collection and extraction but skip the publish call.
        /// Oversized files are still truncated on disk.
        #[arg(long)]
        dry_run: bool,
    },

    /// List the files the collector would index, per version.
    ///
    /// Reports paths and byte sizes without extraction and without the
    /// truncation side effect.
    Scan {
        /// Restrict to a single version directory name.
        #[arg(long)]
        version: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build { version, dry_run } => {
            let client = if dry_run {
                None
            } else {
                let credentials = Credentials::from_env()?;
                Some(SearchClient::new(&credentials, &cfg.index)?)
            };
            versions::run_all(&cfg, client.as_ref(), version.as_deref())?;
        }
        Commands::Scan { version } => {
            run_scan(&cfg, version.as_deref())?;
        }
    }

    Ok(())
}

fn run_scan(cfg: &config::Config, only: Option<&str>) -> anyhow::Result<()> {
    let mut dirs =
        versions::discover_versions(&cfg.content.root, &cfg.content.version_prefix)?;
    if let Some(name) = only {
        dirs.retain(|v| v.file_name().map(|n| n == name).unwrap_or(false));
        if dirs.is_empty() {
            anyhow::bail!(
                "Version '{}' not found under {}",
                name,
                cfg.content.root.display()
            );
        }
    }

    for dir in &dirs {
        let name = dir.file_name().map(|n| n.to_string_lossy().to_string());
        println!("version {}", name.unwrap_or_default());
        let files = collector::list_files(dir, &cfg.content)?;
        for file in &files {
            let size = std::fs::metadata(file)?.len();
            println!("  {} ({} bytes)", file.display(), size);
        }
        println!("  files: {}", files.len());
    }

    Ok(())
}
