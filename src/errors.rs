//! Error kinds of the translation pipeline.
//!
//! Configuration problems and translation problems are separate result
//! kinds: a caller may retry a translation with another input, but a broken
//! setup fails the same way every time.

use std::path::PathBuf;

use thiserror::Error;

pub use j2k_emitter::ConvertError;

/// Environment or setup failure, reported before the core runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("library root {} does not exist", .0.display())]
    MissingLibraryRoot(PathBuf),
    #[error("library root {} is not a directory", .0.display())]
    LibraryRootNotADirectory(PathBuf),
    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The front end could not produce a syntax tree.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed syntax tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single translation request failed.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Frontend(#[from] FrontendError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}
