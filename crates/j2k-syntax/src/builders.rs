//! Builder helpers for constructing syntax trees by hand.
//!
//! Front ends normally produce trees through serde; tests, benches and
//! embedders that synthesize Java use these instead of spelling out every
//! struct literal.

use crate::decl::{
    Annotation, CompilationUnit, ConstructorDecl, EnumConstant, FieldDecl, ImportDecl, Member,
    MethodDecl, Modifier, Modifiers, Param, TypeDecl, TypeKind, TypeParam, VarDeclarator,
};
use crate::expr::{AssignOp, BinaryOp, Expr, LambdaBody, LambdaParam, Literal, UnaryOp};
use crate::stmt::{Block, LocalVarDecl, Stmt};
use crate::types::{Primitive, TypeArg, TypeRef};

// =========================================================================
// Types
// =========================================================================

impl TypeRef {
    pub const fn primitive(primitive: Primitive) -> Self {
        Self::Primitive { primitive }
    }

    pub const fn int() -> Self {
        Self::primitive(Primitive::Int)
    }

    pub const fn long() -> Self {
        Self::primitive(Primitive::Long)
    }

    pub const fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub const fn double() -> Self {
        Self::primitive(Primitive::Double)
    }

    pub const fn char() -> Self {
        Self::primitive(Primitive::Char)
    }

    /// Named type without type arguments
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Named type with plain type arguments
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args: args.into_iter().map(|ty| TypeArg::Type { ty }).collect(),
        }
    }

    pub fn string() -> Self {
        Self::named("String")
    }

    pub fn array_of(element: TypeRef) -> Self {
        Self::Array {
            element: Box::new(element),
        }
    }
}

// =========================================================================
// Expressions
// =========================================================================

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    pub fn int(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Int { text: text.into() },
        }
    }

    pub fn long(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Long { text: text.into() },
        }
    }

    pub fn double(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Double { text: text.into() },
        }
    }

    pub fn float(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Float { text: text.into() },
        }
    }

    /// String literal; `text` is the raw content between the quotes
    pub fn string(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::String { text: text.into() },
        }
    }

    /// Char literal; `text` is the raw content between the quotes
    pub fn char(text: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::Char { text: text.into() },
        }
    }

    pub const fn bool(value: bool) -> Self {
        Self::Literal {
            value: Literal::Bool { value },
        }
    }

    pub const fn null() -> Self {
        Self::Literal {
            value: Literal::Null,
        }
    }

    pub const fn this() -> Self {
        Self::This { qualifier: None }
    }

    /// Unqualified method call
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            target: None,
            type_args: Vec::new(),
            name: name.into(),
            args,
        }
    }

    /// Method call on a receiver
    pub fn method(target: Expr, name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            target: Some(Box::new(target)),
            type_args: Vec::new(),
            name: name.into(),
            args,
        }
    }

    pub fn field(target: Expr, name: impl Into<String>) -> Self {
        Self::FieldAccess {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn binary(lhs: Expr, op: BinaryOp, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::compound(AssignOp::Assign, target, value)
    }

    pub fn compound(op: AssignOp, target: Expr, value: Expr) -> Self {
        Self::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Self::New {
            ty,
            args,
            body: None,
            outer: None,
        }
    }

    pub fn index(array: Expr, index: Expr) -> Self {
        Self::ArrayAccess {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    pub fn conditional(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn cast(ty: TypeRef, expr: Expr) -> Self {
        Self::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn instance_of(expr: Expr, ty: TypeRef) -> Self {
        Self::InstanceOf {
            expr: Box::new(expr),
            ty,
        }
    }

    /// Expression-bodied lambda with implicitly typed parameters
    pub fn lambda(params: &[&str], body: Expr) -> Self {
        Self::Lambda {
            params: params
                .iter()
                .map(|name| LambdaParam {
                    name: (*name).to_string(),
                    ty: TypeRef::Inferred,
                })
                .collect(),
            body: LambdaBody::Expr {
                expr: Box::new(body),
            },
        }
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Paren {
            expr: Box::new(self),
        }
    }
}

// =========================================================================
// Statements
// =========================================================================

impl Stmt {
    pub fn expr(expr: Expr) -> Self {
        Self::Expr { expr }
    }

    pub fn local(ty: TypeRef, name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::LocalVar(LocalVarDecl {
            modifiers: Modifiers::default(),
            ty,
            declarators: vec![VarDeclarator {
                name: name.into(),
                extra_dims: 0,
                init,
            }],
        })
    }

    pub fn final_local(ty: TypeRef, name: impl Into<String>, init: Expr) -> Self {
        Self::LocalVar(LocalVarDecl {
            modifiers: Modifiers::of(&[Modifier::Final]),
            ty,
            declarators: vec![VarDeclarator {
                name: name.into(),
                extra_dims: 0,
                init: Some(init),
            }],
        })
    }

    pub const fn ret(value: Option<Expr>) -> Self {
        Self::Return { value }
    }

    pub const fn brk() -> Self {
        Self::Break { label: None }
    }

    pub const fn cont() -> Self {
        Self::Continue { label: None }
    }

    pub fn block(statements: Vec<Stmt>) -> Self {
        Self::Block(Block::new(statements))
    }

    pub fn if_then(cond: Expr, then: Stmt, otherwise: Option<Stmt>) -> Self {
        Self::If {
            cond,
            then: Box::new(then),
            otherwise: otherwise.map(Box::new),
        }
    }

    pub fn while_loop(cond: Expr, body: Stmt) -> Self {
        Self::While {
            cond,
            body: Box::new(body),
        }
    }
}

// =========================================================================
// Declarations
// =========================================================================

impl Modifiers {
    pub fn of(keywords: &[Modifier]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, name: impl Into<String>) -> Self {
        self.annotations.push(Annotation {
            name: name.into(),
            args: Vec::new(),
        });
        self
    }
}

impl Param {
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            ty,
            name: name.into(),
            is_varargs: false,
        }
    }
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            enum_constants: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    /// Enum with argument-less constants
    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        let mut decl = Self::new(TypeKind::Enum, name);
        decl.enum_constants = constants
            .iter()
            .map(|c| EnumConstant {
                name: (*c).to_string(),
                annotations: Vec::new(),
                args: Vec::new(),
                body: None,
            })
            .collect();
        decl
    }

    #[must_use]
    pub fn with_modifiers(mut self, keywords: &[Modifier]) -> Self {
        self.modifiers.keywords.extend_from_slice(keywords);
        self
    }

    #[must_use]
    pub fn extending(mut self, ty: TypeRef) -> Self {
        self.extends.push(ty);
        self
    }

    #[must_use]
    pub fn implementing(mut self, ty: TypeRef) -> Self {
        self.implements.push(ty);
        self
    }

    #[must_use]
    pub fn with_type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(TypeParam {
            name: name.into(),
            bounds: Vec::new(),
        });
        self
    }

    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }
}

impl Member {
    pub fn field(
        keywords: &[Modifier],
        ty: TypeRef,
        name: impl Into<String>,
        init: Option<Expr>,
    ) -> Self {
        Self::Field(FieldDecl {
            modifiers: Modifiers::of(keywords),
            ty,
            declarators: vec![VarDeclarator {
                name: name.into(),
                extra_dims: 0,
                init,
            }],
        })
    }
}

impl MethodDecl {
    /// Method with an empty body
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            return_type,
            name: name.into(),
            params: Vec::new(),
            throws: Vec::new(),
            body: Some(Block::default()),
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_param(mut self, ty: TypeRef, name: impl Into<String>) -> Self {
        self.params.push(Param::new(ty, name));
        self
    }

    #[must_use]
    pub fn with_body(mut self, statements: Vec<Stmt>) -> Self {
        self.body = Some(Block::new(statements));
        self
    }

    /// Drop the body (abstract or interface method)
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn into_member(self) -> Member {
        Member::Method(self)
    }
}

impl ConstructorDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>, statements: Vec<Stmt>) -> Self {
        Self {
            modifiers: Modifiers::default(),
            type_params: Vec::new(),
            name: name.into(),
            params,
            throws: Vec::new(),
            body: Block::new(statements),
        }
    }

    pub fn into_member(self) -> Member {
        Member::Constructor(self)
    }
}

impl ImportDecl {
    /// `path` may end in `.*` for a wildcard import
    pub fn parse(path: &str, is_static: bool) -> Self {
        match path.strip_suffix(".*") {
            Some(prefix) => Self {
                path: prefix.to_string(),
                is_static,
                is_wildcard: true,
            },
            None => Self {
                path: path.to_string(),
                is_static,
                is_wildcard: false,
            },
        }
    }
}

impl CompilationUnit {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.map(str::to_string),
            imports: Vec::new(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_import(mut self, path: &str) -> Self {
        self.imports.push(ImportDecl::parse(path, false));
        self
    }

    #[must_use]
    pub fn with_static_import(mut self, path: &str) -> Self {
        self.imports.push(ImportDecl::parse(path, true));
        self
    }

    #[must_use]
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }
}
