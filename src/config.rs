//! Translator configuration.
//!
//! Loaded from a camelCase JSON file (`--config`), then overridden by
//! command-line flags:
//!
//! ```json
//! {
//!   "compatibilityImports": ["kotlin.compatibility.*"],
//!   "compatibilityPackage": "kotlin.compatibility",
//!   "libraryRoots": ["/opt/jdk/jmods"],
//!   "normalize": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::frontend::FrontendConfig;

pub const DEFAULT_COMPATIBILITY_PACKAGE: &str = "kotlin.compatibility";

fn default_compatibility_imports() -> Vec<String> {
    vec![format!("{DEFAULT_COMPATIBILITY_PACKAGE}.*")]
}

fn default_compatibility_package() -> String {
    DEFAULT_COMPATIBILITY_PACKAGE.to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranslatorConfig {
    /// Imports emitted first in compatibility mode.
    #[serde(default = "default_compatibility_imports")]
    pub compatibility_imports: Vec<String>,
    /// Package of the compatibility helper functions.
    #[serde(default = "default_compatibility_package")]
    pub compatibility_package: String,
    /// Runtime library locations handed to the front end.
    #[serde(default)]
    pub library_roots: Vec<PathBuf>,
    /// Run the text normalizer over the assembled unit.
    #[serde(default = "default_true")]
    pub normalize: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            compatibility_imports: default_compatibility_imports(),
            compatibility_package: default_compatibility_package(),
            library_roots: Vec::new(),
            normalize: true,
        }
    }
}

impl TranslatorConfig {
    pub fn parse(source: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, path)
    }

    /// Front-end part of the configuration.
    pub fn frontend(&self) -> FrontendConfig {
        FrontendConfig {
            library_roots: self.library_roots.clone(),
        }
    }
}
