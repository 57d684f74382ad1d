//! blogfeed: a post indexer and feed renderer for static blogs
//!
//! The indexer scans HTML posts for an embedded `blog-meta` block and writes
//! a sorted JSON manifest. The feed renderer loads that manifest and turns it
//! into a searchable, filterable, infinitely scrolling card feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the site directory
pub const CONFIG_FILE: &str = "_feed.yml";

/// A static site whose posts are indexed into a manifest
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post documents
    pub content_dir: PathBuf,
    /// Manifest file written by the indexer
    pub manifest_path: PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let manifest_path = base_dir.join(&config.manifest);

        Self {
            config,
            base_dir,
            content_dir,
            manifest_path,
        }
    }

    /// Rebuild the manifest from the content directory
    pub fn index(&self) -> Result<commands::index::IndexReport> {
        commands::index::run(self)
    }

    /// Remove the manifest
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
