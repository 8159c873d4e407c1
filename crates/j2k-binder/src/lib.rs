//! Identifier index for the j2k translator.
//!
//! One read-only pass over a compilation unit collects every class-like
//! name declared anywhere in it (top-level, member, local and anonymous
//! class bodies). The converter consults the index to tell names declared in
//! the unit apart from JDK names that have Kotlin builtin equivalents, and
//! to qualify enum constants. The index is built before conversion starts,
//! so forward references resolve.

mod collect;
mod index;

pub use index::{DeclKind, IdentifierIndex};

#[cfg(test)]
#[path = "../tests/index_tests.rs"]
mod index_tests;
