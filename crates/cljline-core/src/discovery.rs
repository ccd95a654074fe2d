//! File discovery for the CLI collaborator
//!
//! Walks directories and selects Clojure-family sources by the include /
//! exclude glob patterns from the configuration.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::Result;

/// Trait for file discovery functionality
pub trait FileDiscovery {
    /// Discover source files under the root based on configuration patterns
    fn discover_files(&self, config: &Config) -> Result<Vec<PathBuf>>;

    /// Check if a file should be included based on configuration
    fn should_include(&self, path: &Path, config: &Config) -> bool;
}

/// Default implementation of file discovery
#[derive(Debug, Clone)]
pub struct DefaultFileDiscovery {
    root_dir: PathBuf,
}

impl DefaultFileDiscovery {
    /// Create a new file discovery instance
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn matches_any(path: &Path, patterns: &[String]) -> bool {
        patterns
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|p| p.matches_path(path))
    }
}

impl FileDiscovery for DefaultFileDiscovery {
    fn discover_files(&self, config: &Config) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if self.should_include(entry.path(), config) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        debug!(
            "Discovered {} files under {}",
            files.len(),
            self.root_dir.display()
        );
        Ok(files)
    }

    fn should_include(&self, path: &Path, config: &Config) -> bool {
        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);

        if Self::matches_any(relative, &config.exclude_patterns) {
            return false;
        }
        Self::matches_any(relative, &config.include_patterns)
    }
}
