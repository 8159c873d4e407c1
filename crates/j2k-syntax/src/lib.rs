//! Java syntax tree for the j2k translator.
//!
//! The tree is produced by an external front end and handed over as a value
//! (or as JSON, hence the serde derives). It is never mutated by the
//! translator. Every syntactic category is a closed enum so that the
//! converter can match exhaustively and the compiler flags any category that
//! is added here but not handled there.
//!
//! # Modules
//!
//! - `decl` - compilation unit, type declarations, members, modifiers
//! - `types` - type references
//! - `stmt` - statements
//! - `expr` - expressions, literals and operators
//! - `display` - single-line Java rendering used for placeholder fragments
//! - `builders` - convenience constructors for hand-built trees

pub mod builders;
pub mod decl;
pub mod display;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::{
    Annotation, AnnotationArg, CompilationUnit, ConstructorDecl, EnumConstant, FieldDecl,
    ImportDecl, Initializer, Member, MethodDecl, Modifier, Modifiers, Param, TypeDecl, TypeKind,
    TypeParam, VarDeclarator,
};
pub use expr::{
    AssignOp, BinaryOp, Expr, LambdaBody, LambdaParam, Literal, MethodRefTarget, UnaryOp,
};
pub use stmt::{
    Block, CaseLabel, CatchClause, ConstructorTarget, ForInit, LocalVarDecl, Resource, Stmt,
    SwitchCase,
};
pub use types::{Primitive, TypeArg, TypeRef};

#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod display_tests;
#[cfg(test)]
#[path = "../tests/serde_tests.rs"]
mod serde_tests;
