//! Compilation unit, type declarations and their members.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;
use crate::stmt::Block;
use crate::types::TypeRef;

/// One Java source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationUnit {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<ImportDecl>,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// `import [static] a.b.C[.*];`
///
/// `path` never carries the trailing `.*`; `is_wildcard` records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDecl {
    pub path: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_wildcard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    /// Superclass for classes; super-interfaces for interfaces.
    #[serde(default)]
    pub extends: Vec<TypeRef>,
    #[serde(default)]
    pub implements: Vec<TypeRef>,
    #[serde(default)]
    pub enum_constants: Vec<EnumConstant>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDecl {
    pub fn is_interface_like(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members.iter().filter_map(|m| match m {
            Member::Constructor(c) => Some(c),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumConstant {
    pub name: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub args: Vec<Expr>,
    /// Constant-specific class body.
    #[serde(default)]
    pub body: Option<Vec<Member>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(Initializer),
    Type(TypeDecl),
}

/// `int a = 1, b[];`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarDeclarator {
    pub name: String,
    /// C-style dimensions written after the name (`int a[]`).
    #[serde(default)]
    pub extra_dims: u32,
    #[serde(default)]
    pub init: Option<Expr>,
}

impl VarDeclarator {
    /// Declared type once the C-style dimensions are folded in.
    pub fn effective_type(&self, base: &TypeRef) -> TypeRef {
        let mut ty = base.clone();
        for _ in 0..self.extra_dims {
            ty = TypeRef::Array {
                element: Box::new(ty),
            };
        }
        ty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    pub return_type: TypeRef,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    /// `None` for abstract, interface and native methods.
    #[serde(default)]
    pub body: Option<Block>,
    /// Annotation element default (`String value() default "";`).
    #[serde(default)]
    pub default_value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub throws: Vec<TypeRef>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initializer {
    #[serde(default)]
    pub is_static: bool,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Element type for varargs (`String... xs` has `ty` = `String`).
    pub ty: TypeRef,
    pub name: String,
    #[serde(default)]
    pub is_varargs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParam {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

impl Modifier {
    pub const fn java_name(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    #[serde(default)]
    pub keywords: Vec<Modifier>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Modifiers {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.keywords.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.has(Modifier::Final)
    }

    pub fn is_private(&self) -> bool {
        self.has(Modifier::Private)
    }

    pub fn is_abstract(&self) -> bool {
        self.has(Modifier::Abstract)
    }

    /// Annotation lookup by simple name (`Override` matches
    /// `java.lang.Override` too).
    pub fn annotation(&self, simple_name: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|a| a.simple_name() == simple_name)
    }

    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotation(simple_name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub args: Vec<AnnotationArg>,
}

impl Annotation {
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Annotation argument; an unnamed argument is the `value` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationArg {
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expr,
}
