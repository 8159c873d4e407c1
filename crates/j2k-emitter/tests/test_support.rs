//! Shared helpers for the emitter tests.

use j2k_binder::IdentifierIndex;
use j2k_common::TranslationMode;
use j2k_syntax::{CompilationUnit, Member, MethodDecl, Modifier, Modifiers, Stmt, TypeDecl, TypeRef};

use crate::{AssemblyOptions, ConversionContext, ConvertError, assemble, convert_unit, normalize};

pub(crate) const COMPAT_PACKAGE: &str = "kotlin.compatibility";
pub(crate) const COMPAT_BASE: &str = "kotlin.compatibility.*";

pub(crate) fn try_translate_with(
    unit: &CompilationUnit,
    mode: TranslationMode,
) -> Result<String, ConvertError> {
    let index = IdentifierIndex::build(unit);
    let mut ctx = ConversionContext::new(&index, mode, COMPAT_PACKAGE);
    let kotlin = convert_unit(unit, &mut ctx)?;
    let imports = ctx.into_imports();
    let options = AssemblyOptions::new(mode, vec![COMPAT_BASE.to_string()]);
    Ok(normalize(&assemble(&kotlin, &imports, &options).text))
}

pub(crate) fn try_translate(unit: &CompilationUnit) -> Result<String, ConvertError> {
    try_translate_with(unit, TranslationMode::plain())
}

/// Convert, assemble and normalize `unit` without compatibility imports.
pub(crate) fn translate(unit: &CompilationUnit) -> String {
    try_translate(unit).expect("unit should convert")
}

pub(crate) fn unit_of(decl: TypeDecl) -> CompilationUnit {
    CompilationUnit::new(None).with_type(decl)
}

/// `public final class <name>`, which converts to a plain `class <name>`.
pub(crate) fn final_class(name: &str) -> TypeDecl {
    TypeDecl::class(name).with_modifiers(&[Modifier::Public, Modifier::Final])
}

pub(crate) fn public_method(name: &str, return_type: TypeRef) -> MethodDecl {
    MethodDecl::new(name, return_type).with_modifiers(Modifiers::of(&[Modifier::Public]))
}

/// `class Test { fn run() { <stmts> } }` with `extra` members first.
pub(crate) fn class_with_body(extra: Vec<Member>, stmts: Vec<Stmt>) -> CompilationUnit {
    let mut class = final_class("Test");
    for member in extra {
        class = class.with_member(member);
    }
    let run = public_method("run", TypeRef::Void).with_body(stmts);
    unit_of(class.with_member(run.into_member()))
}

/// Normalized output of `stmts` as the body of `Test.run()`.
pub(crate) fn translate_stmts(stmts: Vec<Stmt>) -> String {
    translate(&class_with_body(Vec::new(), stmts))
}

/// Assert that `output` has a line exactly equal to `line`.
#[track_caller]
pub(crate) fn assert_line(output: &str, line: &str) {
    assert!(
        output.lines().any(|l| l == line),
        "expected line `{line}` in:\n{output}"
    );
}

#[track_caller]
pub(crate) fn assert_no_line(output: &str, line: &str) {
    assert!(
        !output.lines().any(|l| l == line),
        "unexpected line `{line}` in:\n{output}"
    );
}
