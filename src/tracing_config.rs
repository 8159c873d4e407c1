//! Diagnostics for the `j2k` binary.
//!
//! Events come from the crates of the pipeline: the index summary
//! (`j2k_binder`), placeholder and overload warnings (`j2k_emitter`) and the
//! per-unit `translate` span (`j2k`). Verbosity is chosen on the command line:
//!
//! ```bash
//! j2k -v unit.json                       # placeholder warnings
//! j2k -vv --log-format tree unit.json    # per-unit summary inside its span
//! J2K_LOG=j2k_emitter=trace j2k unit.json
//! ```
//!
//! `J2K_LOG` replaces the filter the flags would build. Everything is written
//! to stderr; stdout carries only the translated text.

use clap::ValueEnum;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Crates whose events the verbosity flags enable.
const PIPELINE_TARGETS: [&str; 3] = ["j2k", "j2k_binder", "j2k_emitter"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Text,
    /// Events indented under the `translate` span of their unit.
    Tree,
    /// One JSON object per event.
    Json,
}

/// Resolved logging choice. `filter` is `None` when nothing was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl LogSettings {
    /// Combine the command-line flags with an optional `J2K_LOG` value.
    pub fn resolve(verbose: u8, format: LogFormat, env_filter: Option<String>) -> Self {
        let filter = env_filter
            .filter(|value| !value.trim().is_empty())
            .or_else(|| verbosity_filter(verbose));
        Self { filter, format }
    }

    pub fn from_env(verbose: u8, format: LogFormat) -> Self {
        Self::resolve(verbose, format, std::env::var("J2K_LOG").ok())
    }
}

/// `-v` shows warnings, `-vv` the per-unit summaries, `-vvv` everything.
pub fn verbosity_filter(verbose: u8) -> Option<String> {
    let level = match verbose {
        0 => return None,
        1 => "warn",
        2 => "debug",
        _ => "trace",
    };
    Some(
        PIPELINE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Install the global subscriber for `settings`; a no-op without a filter.
pub fn init_tracing(settings: &LogSettings) {
    let Some(filter) = &settings.filter else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(filter);
    match settings.format {
        LogFormat::Tree => {
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(false)
                .with_bracketed_fields(true);
            Registry::default().with(filter).with(tree).init();
        }
        LogFormat::Json => {
            let json = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(std::io::stderr);
            Registry::default().with(filter).with(json).init();
        }
        LogFormat::Text => {
            let text = fmt::layer().without_time().with_writer(std::io::stderr);
            Registry::default().with(filter).with(text).init();
        }
    }
}
