//! # docindex
//!
//! A build-time utility that publishes versioned markdown documentation to a
//! hosted search index. It walks one directory per documentation version,
//! extracts front-matter metadata and cleaned body text from each page, and
//! replaces the contents of that version's remote index with one document
//! per page.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌───────────┐   ┌────────────┐   ┌───────────┐
//! │ Collector │──▶│ Extractor │──▶│ Aggregator │──▶│ Publisher │
//! │  walkdir  │   │ frontmatter│  │  Vec<doc>  │   │ REST API  │
//! └───────────┘   └───────────┘   └────────────┘   └───────────┘
//!        once per version directory under the content root
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export DOCINDEX_APP_ID=...
//! export DOCINDEX_ADMIN_KEY=...
//! docindex scan                 # list what would be indexed
//! docindex build --dry-run      # run extraction, skip publishing
//! docindex build                # rebuild every version's index
//! docindex build --version v1.2 # rebuild one version
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and environment credentials |
//! | [`models`] | Index document and report types |
//! | [`collector`] | Markdown file discovery with exclusions and size cap |
//! | [`frontmatter`] | YAML front-matter splitting |
//! | [`extract`] | Per-file document extraction and content cleaning |
//! | [`pipeline`] | Per-version orchestration |
//! | [`publisher`] | Remote index replacement |
//! | [`versions`] | Version discovery and the outer run loop |

pub mod collector;
pub mod config;
pub mod extract;
pub mod frontmatter;
pub mod models;
pub mod pipeline;
pub mod publisher;
pub mod versions;
