//! Unit assembler.
//!
//! Combines the converted declarations with the package header and the
//! import block into one Kotlin file:
//!
//! ```text
//! package p
//!
//! import <compatibility imports>      (compatibility mode only)
//! import <source and discovered imports, first-use order>
//!
//! <declarations, blank line separated>
//! ```

use tracing::trace;

use j2k_common::{TranslationMode, quote_path};

use crate::context::{ImportOrigin, ImportSet};
use crate::convert::jdk_type_by_name;
use crate::ir::KotlinUnit;
use crate::ir_printer::KotlinPrinter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub mode: TranslationMode,
    /// Imports emitted first in compatibility mode, in this order.
    pub compat_imports: Vec<String>,
}

impl AssemblyOptions {
    pub fn new(mode: TranslationMode, compat_imports: Vec<String>) -> Self {
        Self {
            mode,
            compat_imports,
        }
    }
}

/// One assembled Kotlin file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnitResult {
    pub text: String,
    /// Import paths in the order they appear in `text`.
    pub imports: Vec<String>,
}

/// Java imports that mean nothing in Kotlin: `java.lang` is implicit and
/// mapped JDK types resolve to Kotlin builtins.
fn is_dropped_java_import(path: &str) -> bool {
    if let Some(rest) = path.strip_prefix("java.lang.")
        && !rest.contains('.')
    {
        return true;
    }
    jdk_type_by_name(path).is_some_and(|jdk| jdk.qualified == path)
}

/// `pkg.*` covers `pkg.helper`.
fn covered_by_wildcard(path: &str, base: &[String]) -> bool {
    let Some((package, _)) = path.rsplit_once('.') else {
        return false;
    };
    base.iter()
        .any(|b| b.strip_suffix(".*").is_some_and(|p| p == package))
}

fn push(path: &str, lines: &mut Vec<String>) {
    if !lines.iter().any(|l| l == path) {
        lines.push(path.to_string());
    }
}

/// Ordered import list for `unit`.
fn import_lines(unit: &KotlinUnit, imports: &ImportSet, options: &AssemblyOptions) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if options.mode.compatibility_imports && !unit.decls.is_empty() {
        for base in &options.compat_imports {
            push(base, &mut lines);
        }
        for helper in imports.with_origin(ImportOrigin::Compat) {
            if !covered_by_wildcard(helper, &options.compat_imports) {
                push(helper, &mut lines);
            }
        }
    }
    for (path, origin) in imports.iter() {
        match origin {
            ImportOrigin::Compat => {}
            ImportOrigin::Source if is_dropped_java_import(path) => {
                trace!(path, "java import dropped");
            }
            ImportOrigin::Source | ImportOrigin::Discovered => push(path, &mut lines),
        }
    }
    lines
}

/// Assemble one Kotlin file. Deterministic: the same inputs always give
/// byte-identical text.
pub fn assemble(
    unit: &KotlinUnit,
    imports: &ImportSet,
    options: &AssemblyOptions,
) -> TranslationUnitResult {
    let import_paths = import_lines(unit, imports, options);
    let mut text = String::new();
    if let Some(package) = &unit.package {
        text.push_str("package ");
        text.push_str(&quote_path(package));
        text.push_str("\n\n");
    }
    if !import_paths.is_empty() {
        for path in &import_paths {
            text.push_str("import ");
            text.push_str(&quote_path(path));
            text.push('\n');
        }
        text.push('\n');
    }
    let mut printer = KotlinPrinter::new();
    printer.emit_unit_body(unit);
    text.push_str(&printer.finish());
    TranslationUnitResult {
        text,
        imports: import_paths,
    }
}
