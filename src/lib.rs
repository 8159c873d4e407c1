//! j2k: Java to Kotlin source translation.
//!
//! The translator works on syntax trees. An external front end parses Java
//! and hands over a [`CompilationUnit`]; the pipeline indexes the declared
//! names, converts every node to its Kotlin counterpart, assembles package,
//! imports and declarations into one file and normalizes the whitespace.
//!
//! ```text
//! JSON ──► JsonFrontEnd ──► CompilationUnit ──► Translator ──► Kotlin text
//! ```
//!
//! # Crates
//!
//! - `j2k-common` - limits, Kotlin keywords, translation mode
//! - `j2k-syntax` - the Java syntax tree
//! - `j2k-binder` - identifier index
//! - `j2k-emitter` - node converter, Kotlin printer, assembler, normalizer

pub mod config;
pub mod errors;
pub mod frontend;
pub mod tracing_config;
pub mod translator;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::TranslatorConfig;
pub use errors::{ConfigError, ConvertError, FrontendError, TranslationError};
pub use frontend::{FrontendConfig, JsonFrontEnd};
pub use translator::Translator;

pub use j2k_common::TranslationMode;
pub use j2k_emitter::{TranslationUnitResult, normalize};
pub use j2k_syntax::CompilationUnit;

/// Normalized Kotlin for `unit` with the default configuration.
pub fn generate_kotlin_code(unit: &CompilationUnit) -> Result<String, TranslationError> {
    Translator::default().translate(unit, TranslationMode::plain())
}

/// Like [`generate_kotlin_code`], with the compatibility imports.
pub fn generate_kotlin_code_with_compatibility_import(
    unit: &CompilationUnit,
) -> Result<String, TranslationError> {
    Translator::default().translate(unit, TranslationMode::with_compatibility_imports())
}

/// JSON syntax tree in, normalized Kotlin out.
pub fn translate_to_kotlin(json: &str) -> Result<String, TranslationError> {
    let unit = JsonFrontEnd::default().parse(json)?;
    generate_kotlin_code(&unit)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/frontend_tests.rs"]
mod frontend_tests;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
#[cfg(test)]
#[path = "tests/translator_tests.rs"]
mod translator_tests;
