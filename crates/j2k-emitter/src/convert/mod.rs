//! Node converter: Java tree to Kotlin tree.
//!
//! Every conversion rule is a method on [`ConversionContext`] taking one
//! Java node and returning its Kotlin counterpart. Dispatch is an exhaustive
//! `match` per syntactic category.
//!
//! Unsupported constructs become placeholders and conversion carries on.
//! Structurally invalid trees abort the request with
//! [`ConvertError::StructuralInvalid`].

mod analysis;
mod arrays;
mod calls;
mod declarations;
mod expressions;
mod literals;
mod loops;
mod members;
mod modifiers;
mod operators;
mod overloads;
mod statements;
mod switch;
pub(crate) mod types;

use std::fmt::Display;

use tracing::debug;

use j2k_common::limits::MAX_PLACEHOLDER_FRAGMENT_CHARS;
use j2k_syntax::CompilationUnit;

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KotlinUnit, KtDecl, KtExpr, KtStmt};

pub use declarations::Container;
pub use literals::{convert_literal, escape_char_content, escape_string_content};
pub use types::{JdkType, jdk_type_by_name};

/// Convert a whole compilation unit.
///
/// Source imports are recorded in `ctx` in their original order; imports the
/// conversion itself needs are recorded as they are discovered.
pub fn convert_unit(
    unit: &CompilationUnit,
    ctx: &mut ConversionContext<'_>,
) -> Result<KotlinUnit, ConvertError> {
    if let Some(package) = &unit.package {
        require_path(package, "package declaration")?;
    }
    for import in &unit.imports {
        require_path(&import.path, "import")?;
        let path = if import.is_wildcard {
            format!("{}.*", import.path)
        } else {
            import.path.clone()
        };
        ctx.record_source_import(path);
    }

    let mut decls = Vec::with_capacity(unit.types.len());
    for decl in &unit.types {
        decls.push(ctx.convert_type_decl(decl, Container::TopLevel)?);
    }
    debug!(
        decls = decls.len(),
        placeholders = ctx.placeholder_count(),
        "unit converted"
    );
    Ok(KotlinUnit {
        package: unit.package.clone(),
        decls,
    })
}

/// One-line Java rendering of `node`, cut to a bounded length.
pub(crate) fn fragment_of(node: &impl Display) -> String {
    let text = node.to_string();
    if text.chars().count() <= MAX_PLACEHOLDER_FRAGMENT_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_PLACEHOLDER_FRAGMENT_CHARS).collect();
    cut.push_str(" ...");
    cut
}

pub(crate) fn require_name(name: &str, context: &'static str) -> Result<(), ConvertError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(ConvertError::invalid(
            context,
            format!("`{name}` is not a valid identifier"),
        ))
    }
}

pub(crate) fn require_path(path: &str, context: &'static str) -> Result<(), ConvertError> {
    path.split('.')
        .try_for_each(|segment| require_name(segment, context))
}

impl ConversionContext<'_> {
    pub(crate) fn expr_placeholder(&mut self, reason: &str, fragment: String) -> KtExpr {
        self.note_unsupported(reason);
        KtExpr::Placeholder {
            reason: reason.to_string(),
            fragment,
        }
    }

    pub(crate) fn stmt_placeholder(&mut self, reason: &str, fragment: String) -> KtStmt {
        KtStmt::Expr(self.expr_placeholder(reason, fragment))
    }

    pub(crate) fn decl_placeholder(&mut self, reason: &str, fragment: String) -> KtDecl {
        self.note_unsupported(reason);
        KtDecl::Placeholder {
            reason: reason.to_string(),
            fragment,
        }
    }
}
