use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the j2k binary.
///
/// The input count is checked by the driver, not by clap, so that a wrong
/// count produces the fixed `EXCEPTION:` line instead of a usage error.
#[derive(Parser, Debug, Default)]
#[command(
    name = "j2k",
    version,
    about = "Translate a Java syntax tree (JSON) to Kotlin source"
)]
pub struct CliArgs {
    /// Emit the compatibility-library imports.
    #[arg(long)]
    pub compat: bool,

    /// Print the assembled text without whitespace normalization.
    #[arg(long)]
    pub raw: bool,

    /// Translator configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Runtime library root passed to the front end. Repeatable.
    #[arg(long = "library-root", value_name = "DIR")]
    pub library_roots: Vec<PathBuf>,

    /// Diagnostics on stderr: `-v` warnings, `-vv` debug, `-vvv` trace.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Layout of the diagnostics.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Syntax tree JSON, or the path of a file containing it.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}
