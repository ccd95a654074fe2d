//! cljline CLI
//!
//! Command-line interface for the cljline reformatter

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use cljline_core::{init_tracing, Result};
use std::io;
use std::path::PathBuf;
use tracing::error;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "cljline")]
#[command(about = "Opinionated line-width reformatter for Clojure sources")]
#[command(version = cljline_core::VERSION)]
#[command(
    long_about = "cljline breaks over-wide lines in Clojure, ClojureScript, and EDN files\n\
at form boundaries, indenting by each form's role.\n\
\n\
Examples:\n  \
cljline check src/            # Report lines over the limit\n  \
cljline fix src/core.clj      # Rewrite a file in place\n  \
cljline stdout src/core.clj   # Print the fixed source\n  \
cljline config init           # Write a default cljline.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (cljline.toml/.cljline.json)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel processing
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report lines exceeding the configured width
    Check {
        /// Files or directories to check
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,

        /// Maximum line width override
        #[arg(long, help = "Maximum line width (overrides configuration)")]
        line_length: Option<usize>,
    },

    /// Rewrite files in place, breaking over-wide lines
    Fix {
        /// Files or directories to fix
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Maximum line width override
        #[arg(long, help = "Maximum line width (overrides configuration)")]
        line_length: Option<usize>,
    },

    /// Print reformatted sources to stdout without touching files
    Stdout {
        /// Files or directories to reformat
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Maximum line width override
        #[arg(long, help = "Maximum line width (overrides configuration)")]
        line_length: Option<usize>,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Initialize a new configuration file
    Init {
        /// Configuration file format
        #[arg(long, default_value = "toml", help = "Configuration file format")]
        format: ConfigFormat,

        /// Overwrite existing configuration file
        #[arg(long, help = "Overwrite existing configuration file")]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(help = "Path to configuration file (default: discover)")]
        path: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ConfigFormat {
    /// TOML configuration format
    Toml,
    /// JSON configuration format
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.generate_completion {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    // Initialize colored output
    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity
    let level = match cli.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    init_tracing(&format!("cljline={level},cljline_core={level}"));

    // Set thread pool size if specified
    if let Some(threads) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            error!("Failed to set thread pool size: {}", e);
            std::process::exit(2);
        }
    }

    match run_command(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> Result<i32> {
    match cli.command {
        Some(Commands::Check {
            paths,
            format,
            line_length,
        }) => commands::check_command(default_paths(paths), format, line_length, cli.config),

        Some(Commands::Fix { paths, line_length }) => {
            commands::fix_command(default_paths(paths), line_length, cli.config)
        }

        Some(Commands::Stdout { paths, line_length }) => {
            commands::stdout_command(default_paths(paths), line_length, cli.config)
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Validate { path } => commands::config_validate_command(path),
            ConfigAction::Show => commands::config_show_command(cli.config),
        },

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(0)
        }
    }
}

fn default_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    }
}
