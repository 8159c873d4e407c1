//! Java to Kotlin conversion for the j2k translator.
//!
//! # Pipeline
//!
//! ```text
//! CompilationUnit ──► convert_unit ──► KotlinUnit ──► assemble ──► text ──► normalize
//!        │                 ▲
//!        └─► IdentifierIndex
//! ```
//!
//! - `convert` - one conversion rule per Java syntactic category
//! - `context` - per-request conversion state
//! - `ir` - Kotlin target tree
//! - `ir_printer` - Kotlin tree to text
//! - `assembler` - package, imports and declarations into one unit
//! - `normalize` - whitespace post-processing filter

pub mod assembler;
pub mod context;
pub mod convert;
pub mod errors;
pub mod ir;
pub mod ir_printer;
mod ir_printer_helpers;
pub mod normalize;

pub use assembler::{AssemblyOptions, TranslationUnitResult, assemble};
pub use context::{ConversionContext, ImportOrigin, ImportSet};
pub use convert::convert_unit;
pub use errors::ConvertError;
pub use ir::KotlinUnit;
pub use ir_printer::KotlinPrinter;
pub use normalize::normalize;

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
#[cfg(test)]
#[path = "../tests/declarations_tests.rs"]
mod declarations_tests;
#[cfg(test)]
#[path = "../tests/statements_tests.rs"]
mod statements_tests;
#[cfg(test)]
#[path = "../tests/expressions_tests.rs"]
mod expressions_tests;
#[cfg(test)]
#[path = "../tests/placeholder_tests.rs"]
mod placeholder_tests;
#[cfg(test)]
#[path = "../tests/assembler_tests.rs"]
mod assembler_tests;
#[cfg(test)]
#[path = "../tests/normalize_tests.rs"]
mod normalize_tests;
