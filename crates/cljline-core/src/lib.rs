//! cljline core
//!
//! Structure-aware line-width reformatting engine for Clojure-family
//! sources. This crate parses with tree-sitter, scans for over-wide lines,
//! and breaks the responsible forms at element boundaries with indentation
//! derived from each form's role.

pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod edit;
pub mod engine;
pub mod error;
pub mod ignore;
pub mod parser;
pub mod planner;
pub mod result;
pub mod rules;
pub mod syntax;

// Re-export commonly used types
pub use config::{Config, ConfigLoader};
pub use diagnostics::{scan_violations, Violation};
pub use discovery::{DefaultFileDiscovery, FileDiscovery};
pub use edit::{apply_edits, Edit};
pub use engine::{check_source, fix_source, Reformatter, MAX_ITERATIONS};
pub use error::{CljlineError, ErrorKind};
pub use ignore::{collect_ignored, IgnoredRegions, IGNORE_SENTINEL};
pub use parser::{ClojureParser, ParseError, ParseResult};
pub use result::{Result, ResultExt};
pub use rules::IndentRule;

/// Initialize the tracing subscriber for logging
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
