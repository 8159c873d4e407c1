//! Common types and utilities for the j2k translator.
//!
//! This crate provides foundational items used across all j2k crates:
//! - Translation mode flags (`TranslationMode`)
//! - Kotlin keyword table and identifier quoting (`keywords`)
//! - Centralized limits (`limits`)

pub mod keywords;
pub use keywords::{is_hard_keyword, quote_identifier, quote_path};

pub mod limits;

pub mod mode;
pub use mode::TranslationMode;

#[cfg(test)]
#[path = "../tests/keywords_tests.rs"]
mod keywords_tests;
