//! JSON front end.
//!
//! Parsing Java source is outside the translator. An external parser
//! serialises the syntax tree (the `j2k-syntax` model) to JSON and this
//! front end reads it back. Runtime library locations are explicit
//! configuration, checked once when the front end is created.

use std::path::{Path, PathBuf};

use tracing::debug;

use j2k_syntax::CompilationUnit;

use crate::errors::{ConfigError, FrontendError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendConfig {
    pub library_roots: Vec<PathBuf>,
}

impl FrontendConfig {
    /// Every library root must be an existing directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for root in &self.library_roots {
            if !root.exists() {
                return Err(ConfigError::MissingLibraryRoot(root.clone()));
            }
            if !root.is_dir() {
                return Err(ConfigError::LibraryRootNotADirectory(root.clone()));
            }
        }
        Ok(())
    }
}

/// Front end without library roots: [`JsonFrontEnd::default`].
#[derive(Debug, Clone, Default)]
pub struct JsonFrontEnd {
    config: FrontendConfig,
}

impl JsonFrontEnd {
    pub fn new(config: FrontendConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(roots = config.library_roots.len(), "front end ready");
        Ok(Self { config })
    }

    pub fn library_roots(&self) -> &[PathBuf] {
        &self.config.library_roots
    }

    /// Deserialise one compilation unit.
    pub fn parse(&self, json: &str) -> Result<CompilationUnit, FrontendError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn parse_file(&self, path: &Path) -> Result<CompilationUnit, FrontendError> {
        let json = std::fs::read_to_string(path).map_err(|source| FrontendError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&json)
    }

    /// A command-line input: the path of an existing file, or the JSON text
    /// itself.
    pub fn load(&self, input: &str) -> Result<CompilationUnit, FrontendError> {
        let path = Path::new(input);
        if !input.trim_start().starts_with('{') && path.is_file() {
            debug!(path = %path.display(), "reading syntax tree file");
            return self.parse_file(path);
        }
        self.parse(input)
    }
}
