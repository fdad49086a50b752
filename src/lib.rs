//! starlog: a blog front-end for headless-CMS content
//!
//! Lists posts with cursor-based "load more" pagination and renders
//! individual post pages with reading-time estimates, sourcing all
//! content from a Prismic-style document API.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod pagination;
pub mod readtime;
pub mod render;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main application handle
#[derive(Clone)]
pub struct Starlog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Starlog {
    /// Create a new application handle from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Client for the configured content source
    pub fn source(&self) -> content::ContentSource {
        content::ContentSource::new(&self.config)
    }
}
