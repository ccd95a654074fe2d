//! CLI command implementations

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use cljline_core::{
    CljlineError, Config, ConfigLoader, DefaultFileDiscovery, FileDiscovery, Reformatter, Result,
    ResultExt,
};

use crate::output::{self, FileReport, OutputFormat};
use crate::ConfigFormat;

/// Load configuration for a run: explicit path, or discovery from the first
/// target's directory, with an optional line-length override on top.
fn load_config(
    explicit: Option<&Path>,
    paths: &[PathBuf],
    line_length: Option<usize>,
) -> Result<Config> {
    let start_dir = paths
        .first()
        .map(|p| {
            if p.is_dir() {
                p.clone()
            } else {
                p.parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .unwrap_or(Path::new("."))
                    .to_path_buf()
            }
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = ConfigLoader::new().load(explicit, &start_dir)?;
    if let Some(limit) = line_length {
        config.line_length = limit;
        config.validate()?;
    }
    Ok(config)
}

/// Expand files and directories into the ordered list of sources to process
fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(DefaultFileDiscovery::new(path).discover_files(config)?);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(CljlineError::io_error(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CljlineError::io_error(path, e))
}

/// Check command: report violations, never mutate. Exit 1 when any file has
/// a violation, 2 when a file could not be processed.
pub fn check_command(
    paths: Vec<PathBuf>,
    format: OutputFormat,
    line_length: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let config = load_config(config_path.as_deref(), &paths, line_length)?;
    let files = collect_files(&paths, &config)?;
    info!("Checking {} files", files.len());

    let results: Vec<Result<FileReport>> = files
        .par_iter()
        .map(|file| {
            let source = read_source(file)?;
            let violations = Reformatter::new(config.clone())?
                .check(&source)
                .map_err(|e| e.with_file(file))?;
            Ok(FileReport {
                path: file.clone(),
                violations,
            })
        })
        .collect();

    let mut reports = Vec::new();
    let mut failed = 0usize;
    for result in results {
        match result.log_and_continue() {
            Some(report) => reports.push(report),
            None => failed += 1,
        }
    }

    output::print_check_results(&reports, config.line_length, format);

    if failed > 0 {
        return Ok(2);
    }
    Ok(if reports.iter().any(|r| !r.is_clean()) { 1 } else { 0 })
}

/// Fix command: rewrite files in place with the reformatted source
pub fn fix_command(
    paths: Vec<PathBuf>,
    line_length: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let config = load_config(config_path.as_deref(), &paths, line_length)?;
    let files = collect_files(&paths, &config)?;
    info!("Fixing {} files", files.len());

    let results: Vec<Result<bool>> = files
        .par_iter()
        .map(|file| {
            let source = read_source(file)?;
            let fixed = Reformatter::new(config.clone())?
                .fix(&source)
                .map_err(|e| e.with_file(file))?;
            if fixed == source {
                debug!("{} unchanged", file.display());
                return Ok(false);
            }
            fs::write(file, &fixed).map_err(|e| CljlineError::io_error(file, e))?;
            Ok(true)
        })
        .collect();

    let mut changed = 0usize;
    let mut failed = 0usize;
    for result in results {
        match result.log_and_continue() {
            Some(true) => changed += 1,
            Some(false) => {}
            None => failed += 1,
        }
    }

    output::print_fix_summary(changed, files.len());
    Ok(if failed > 0 { 2 } else { 0 })
}

/// Stdout command: print reformatted sources without touching files
pub fn stdout_command(
    paths: Vec<PathBuf>,
    line_length: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let config = load_config(config_path.as_deref(), &paths, line_length)?;
    let files = collect_files(&paths, &config)?;

    let results: Vec<Result<String>> = files
        .par_iter()
        .map(|file| {
            let source = read_source(file)?;
            Reformatter::new(config.clone())?
                .fix(&source)
                .map_err(|e| e.with_file(file))
        })
        .collect();

    let multiple = files.len() > 1;
    for (file, result) in files.iter().zip(results) {
        let fixed = result?;
        if multiple {
            output::print_stdout_header(file);
        }
        print!("{fixed}");
        if !fixed.ends_with('\n') && multiple {
            println!();
        }
    }
    Ok(0)
}

/// Config init: write a default configuration file
pub fn config_init_command(format: ConfigFormat, force: bool) -> Result<i32> {
    let (filename, content) = match format {
        ConfigFormat::Toml => (
            "cljline.toml",
            toml::to_string_pretty(&Config::default())
                .map_err(|e| CljlineError::config_error(format!("Failed to serialize TOML: {e}")))?,
        ),
        ConfigFormat::Json => (
            ".cljline.json",
            serde_json::to_string_pretty(&Config::default())
                .map_err(|e| CljlineError::config_error(format!("Failed to serialize JSON: {e}")))?,
        ),
    };

    let path = PathBuf::from(filename);
    if path.exists() && !force {
        return Err(CljlineError::config_error(format!(
            "Configuration file '{filename}' already exists. Use --force to overwrite."
        )));
    }

    fs::write(&path, content).map_err(|e| CljlineError::io_error(&path, e))?;
    println!("Created configuration file: {filename}");
    Ok(0)
}

/// Config validate: load a configuration and report the outcome
pub fn config_validate_command(path: Option<PathBuf>) -> Result<i32> {
    let config = match path {
        Some(path) => {
            let config = ConfigLoader::load_file(&path)?;
            config.validate()?;
            config
        }
        None => ConfigLoader::new().load(None, Path::new("."))?,
    };

    println!("Configuration is valid");
    println!("  line_length: {}", config.line_length);
    println!("  indent overrides: {}", config.indents.len());
    println!("  include patterns: {}", config.include_patterns.len());
    println!("  exclude patterns: {}", config.exclude_patterns.len());
    Ok(0)
}

/// Config show: print the resolved configuration
pub fn config_show_command(config_path: Option<PathBuf>) -> Result<i32> {
    let config = load_config(config_path.as_deref(), &[], None)?;
    let rendered = serde_json::to_string_pretty(&config)
        .map_err(|e| CljlineError::config_error(format!("Failed to serialize config: {e}")))?;
    println!("{rendered}");
    Ok(0)
}
