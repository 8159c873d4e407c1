//! Per-request conversion state.
//!
//! A `ConversionContext` is created for every translation request and
//! dropped at its end. It borrows the request's identifier index read-only
//! and owns everything the converter accumulates while walking the tree.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::warn;

use j2k_binder::IdentifierIndex;
use j2k_common::TranslationMode;
use j2k_common::limits::MAX_CONVERSION_DEPTH;
use j2k_syntax::{Expr, Primitive, TypeKind, TypeRef};

use crate::errors::ConvertError;

/// Where an import line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportOrigin {
    /// Carried over from a Java import.
    Source,
    /// Needed by the converted code itself (`kotlin.reflect.KClass`).
    Discovered,
    /// Helper from the compatibility package, emitted only in compatibility
    /// mode.
    Compat,
}

/// Import paths in first-use order, deduplicated by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    entries: IndexMap<String, ImportOrigin>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path`; returns false when it was already present. The origin
    /// of the first use is kept.
    pub fn record(&mut self, path: impl Into<String>, origin: ImportOrigin) -> bool {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return false;
        }
        self.entries.insert(path, origin);
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ImportOrigin)> {
        self.entries.iter().map(|(path, origin)| (path.as_str(), *origin))
    }

    pub fn with_origin(&self, origin: ImportOrigin) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |(_, o)| *o == origin)
            .map(|(path, _)| path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declared Java type of a variable, field or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct VarInfo {
    pub ty: TypeRef,
    /// Rendered as a nullable Kotlin type.
    pub nullable: bool,
}

/// One enclosing type declaration.
#[derive(Debug, Clone)]
pub struct TypeFrame {
    /// Empty for anonymous classes.
    pub name: String,
    pub kind: TypeKind,
    pub is_static: bool,
    pub fields: FxHashMap<String, VarInfo>,
}

/// A loop being converted, for `continue` rewriting.
#[derive(Debug, Clone)]
pub(crate) struct LoopFrame {
    pub(crate) label: Option<String>,
    /// Update expressions of a `for` loop lowered to `while`; they have to
    /// run before every `continue` that targets this loop.
    pub(crate) update: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReturnTarget {
    /// Method, constructor or initializer body; `returns` is a primitive
    /// return type.
    Function { returns: Option<Primitive> },
    /// Java lambda block; non-trailing returns need a label.
    Lambda { labeled: bool },
}

pub struct ConversionContext<'a> {
    index: &'a IdentifierIndex,
    mode: TranslationMode,
    compat_package: &'a str,
    type_stack: Vec<TypeFrame>,
    scopes: Vec<FxHashMap<String, VarInfo>>,
    pub(crate) loops: Vec<LoopFrame>,
    pub(crate) return_targets: Vec<ReturnTarget>,
    depth: u32,
    imports: ImportSet,
    placeholders: usize,
}

impl<'a> ConversionContext<'a> {
    pub fn new(index: &'a IdentifierIndex, mode: TranslationMode, compat_package: &'a str) -> Self {
        Self {
            index,
            mode,
            compat_package,
            type_stack: Vec::new(),
            scopes: Vec::new(),
            loops: Vec::new(),
            return_targets: Vec::new(),
            depth: 0,
            imports: ImportSet::new(),
            placeholders: 0,
        }
    }

    pub const fn index(&self) -> &'a IdentifierIndex {
        self.index
    }

    pub const fn mode(&self) -> TranslationMode {
        self.mode
    }

    pub const fn imports(&self) -> &ImportSet {
        &self.imports
    }

    pub fn into_imports(self) -> ImportSet {
        self.imports
    }

    /// Number of placeholders emitted so far.
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    // =====================================================================
    // Depth
    // =====================================================================

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError> {
        if self.depth >= MAX_CONVERSION_DEPTH {
            return Err(ConvertError::NestingTooDeep {
                limit: MAX_CONVERSION_DEPTH,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // =====================================================================
    // Imports and placeholders
    // =====================================================================

    pub(crate) fn record_source_import(&mut self, path: impl Into<String>) {
        self.imports.record(path, ImportOrigin::Source);
    }

    pub(crate) fn record_discovered_import(&mut self, path: &str) {
        self.imports.record(path, ImportOrigin::Discovered);
    }

    /// Record the compatibility helper `<compat package>.<helper>`.
    pub(crate) fn record_compat_helper(&mut self, helper: &str) {
        let path = format!("{}.{helper}", self.compat_package);
        self.imports.record(path, ImportOrigin::Compat);
    }

    pub(crate) fn note_unsupported(&mut self, reason: &str) {
        self.placeholders += 1;
        warn!(reason, "unsupported construct replaced by placeholder");
    }

    // =====================================================================
    // Enclosing types
    // =====================================================================

    pub(crate) fn push_type(&mut self, frame: TypeFrame) {
        self.type_stack.push(frame);
    }

    pub(crate) fn pop_type(&mut self) {
        self.type_stack.pop();
    }

    pub fn current_type(&self) -> Option<&TypeFrame> {
        self.type_stack.last()
    }

    pub fn enclosing_types(&self) -> impl Iterator<Item = &TypeFrame> {
        self.type_stack.iter().rev()
    }

    // =====================================================================
    // Variables
    // =====================================================================

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Run `f` inside a fresh lexical scope.
    pub(crate) fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError> {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    pub(crate) fn declare_var(&mut self, name: &str, info: VarInfo) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), info);
        }
    }

    /// Local or parameter with this name, innermost first.
    pub fn lookup_local(&self, name: &str) -> Option<&VarInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Field of an enclosing type, innermost first.
    pub fn lookup_field(&self, name: &str) -> Option<&VarInfo> {
        self.type_stack
            .iter()
            .rev()
            .find_map(|frame| frame.fields.get(name))
    }

    /// Local, parameter or field.
    pub fn lookup_var(&self, name: &str) -> Option<&VarInfo> {
        self.lookup_local(name).or_else(|| self.lookup_field(name))
    }
}
