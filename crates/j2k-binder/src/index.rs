use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use j2k_syntax::{CompilationUnit, TypeKind};

use crate::collect::Collector;

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl From<TypeKind> for DeclKind {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => DeclKind::Class,
            TypeKind::Interface => DeclKind::Interface,
            TypeKind::Enum => DeclKind::Enum,
            TypeKind::Annotation => DeclKind::Annotation,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) kind: DeclKind,
    pub(crate) enum_constants: SmallVec<[String; 8]>,
}

/// Simple names of every class-like declaration in one compilation unit.
///
/// Built once per translation request and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdentifierIndex {
    entries: FxHashMap<String, Entry>,
}

impl IdentifierIndex {
    /// Collect all declared class-like names of `unit`.
    pub fn build(unit: &CompilationUnit) -> Self {
        let mut collector = Collector::default();
        for decl in &unit.types {
            collector.visit_type_decl(decl);
        }
        let index = Self {
            entries: collector.finish(),
        };
        debug!(names = index.len(), "identifier index built");
        index
    }

    /// An index with no names.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Kind of the first declaration with this simple name.
    pub fn kind_of(&self, name: &str) -> Option<DeclKind> {
        self.entries.get(name).map(|e| e.kind)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.kind_of(name) == Some(DeclKind::Enum)
    }

    /// Constants of a locally declared enum, in declaration order.
    pub fn enum_constants(&self, name: &str) -> &[String] {
        self.entries
            .get(name)
            .map(|e| e.enum_constants.as_slice())
            .unwrap_or_default()
    }

    /// All names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
