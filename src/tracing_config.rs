//! Log output for the `lighttag` binary.
//!
//! Nothing is installed unless `LIGHTTAG_LOG` (falling back to `RUST_LOG`)
//! holds a filter directive. `LIGHTTAG_LOG_FORMAT` then picks the layer:
//! `text` for flat lines, `tree` to nest every event under the `make_tag`
//! span that produced it, `json` for one object per line. All of them write
//! to stderr so the tag dump on stdout stays clean.
//!
//! What each target reports:
//!
//! | target | level | events |
//! |--------|-------|--------|
//! | `lighttag_builder::tag_builder` | debug | `make_tag` span, `built tag` summary |
//! | `lighttag_builder::builder` | warn | lambda parameters the body never uses |
//! | `lighttag_builder::builder` | trace | every `make_ref` step, recursive occurrences cut |
//! | `lighttag_builder::unpack` | debug | self-referential bounds dropped |
//! | `lighttag_builder::inheritance` | debug, trace | collapsed stable bases, every stable edge |
//! | `lighttag_builder::cache` | trace | `reference cache hit` / `reference cache miss` |
//!
//! ```bash
//! LIGHTTAG_LOG="lighttag_builder::cache=trace" lighttag -t List
//! LIGHTTAG_LOG=trace LIGHTTAG_LOG_FORMAT=tree lighttag -t 'Functor[List]'
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "LIGHTTAG_LOG";
pub const LOG_FORMAT_ENV: &str = "LIGHTTAG_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Unknown values fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_ENV).unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `LIGHTTAG_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `LIGHTTAG_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with the tags printed on stdout.
pub fn init_tracing() {
    let has_lighttag_log = std::env::var(LOG_ENV).is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_lighttag_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
