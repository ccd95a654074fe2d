//! Configuration management for the reformatter

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CljlineError;
use crate::rules::{self, IndentRule};
use crate::Result;

/// Configuration file names searched for in ancestor directories
const CONFIG_FILE_NAMES: &[&str] = &["cljline.toml", ".cljline.json"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum allowed line width, in characters
    pub line_length: usize,
    /// File patterns to include
    #[serde(alias = "include")]
    pub include_patterns: Vec<String>,
    /// File patterns to exclude
    #[serde(alias = "exclude")]
    pub exclude_patterns: Vec<String>,
    /// Head-symbol indent overrides, merged over the built-in table
    pub indents: HashMap<String, IndentRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_length: 80,
            include_patterns: vec![
                "**/*.clj".to_string(),
                "**/*.cljs".to_string(),
                "**/*.cljc".to_string(),
                "**/*.edn".to_string(),
            ],
            exclude_patterns: vec!["target/**".to_string(), ".git/**".to_string()],
            indents: HashMap::new(),
        }
    }
}

impl Config {
    /// Create a configuration with a specific line length
    pub fn with_line_length(line_length: usize) -> Self {
        Self {
            line_length,
            ..Default::default()
        }
    }

    /// Resolve the indent rule for a head symbol: user overrides first,
    /// then the built-in table.
    pub fn resolve_indent(&self, head: &str) -> Option<IndentRule> {
        self.indents
            .get(head)
            .copied()
            .or_else(|| rules::builtin_indent(head))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.line_length == 0 {
            return Err(CljlineError::config_error("line_length must be positive"));
        }
        Ok(())
    }
}

/// Loads configuration files, resolving their location and format
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from an explicit path, or discover one by walking
    /// up from `start_dir`. Falls back to defaults when nothing is found.
    pub fn load(&self, explicit: Option<&Path>, start_dir: &Path) -> Result<Config> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(start_dir),
        };

        let config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Search ancestor directories for a configuration file
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            dir = current.parent();
        }
        None
    }

    /// Parse a configuration file, selecting the format by extension
    pub fn load_file(path: &Path) -> Result<Config> {
        let content =
            fs::read_to_string(path).map_err(|e| CljlineError::io_error(path, e))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                CljlineError::config_error(format!("invalid TOML in '{}': {e}", path.display()))
            }),
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                CljlineError::config_error(format!("invalid JSON in '{}': {e}", path.display()))
            }),
            _ => Err(CljlineError::config_error(format!(
                "unsupported configuration format: '{}'",
                path.display()
            ))),
        }
    }
}
