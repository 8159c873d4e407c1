//! Translation mode flags.

use serde::{Deserialize, Serialize};

/// Per-request translation flags.
///
/// The mode is the only knob that changes the *shape* of the output between
/// two requests over the same tree; declaration bodies never depend on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationMode {
    /// Emit the compatibility-library imports ahead of all other imports.
    #[serde(default)]
    pub compatibility_imports: bool,
}

impl TranslationMode {
    /// Plain translation without compatibility imports.
    pub const fn plain() -> Self {
        Self {
            compatibility_imports: false,
        }
    }

    /// Translation that emits compatibility imports.
    pub const fn with_compatibility_imports() -> Self {
        Self {
            compatibility_imports: true,
        }
    }
}
