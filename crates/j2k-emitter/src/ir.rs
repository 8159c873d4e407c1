//! Kotlin target tree.
//!
//! The converter produces these nodes and the printer renders them. Nodes own
//! their children and carry already-mapped names and types: nothing in here
//! refers back to the Java tree.

use bitflags::bitflags;

bitflags! {
    /// Kotlin modifier keywords, printed in the order declared here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KtModifiers: u16 {
        const PRIVATE   = 1 << 0;
        const PROTECTED = 1 << 1;
        const INTERNAL  = 1 << 2;
        const EXTERNAL  = 1 << 3;
        const ABSTRACT  = 1 << 4;
        const OPEN      = 1 << 5;
        const OVERRIDE  = 1 << 6;
        const INNER     = 1 << 7;
        const CONST     = 1 << 8;
    }
}

impl KtModifiers {
    /// Keyword spellings in canonical order.
    pub fn keywords(self) -> impl Iterator<Item = &'static str> {
        [
            (KtModifiers::PRIVATE, "private"),
            (KtModifiers::PROTECTED, "protected"),
            (KtModifiers::INTERNAL, "internal"),
            (KtModifiers::EXTERNAL, "external"),
            (KtModifiers::ABSTRACT, "abstract"),
            (KtModifiers::OPEN, "open"),
            (KtModifiers::OVERRIDE, "override"),
            (KtModifiers::INNER, "inner"),
            (KtModifiers::CONST, "const"),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, keyword)| keyword)
    }

    pub const VISIBILITY: KtModifiers = KtModifiers::PRIVATE
        .union(KtModifiers::PROTECTED)
        .union(KtModifiers::INTERNAL);
}

/// One translated compilation unit before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KotlinUnit {
    pub package: Option<String>,
    pub decls: Vec<KtDecl>,
}

// =========================================================================
// Types
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KtType {
    /// Possibly qualified name (`MutableMap.MutableEntry`).
    pub name: String,
    pub args: Vec<KtTypeArg>,
    pub nullable: bool,
}

impl KtType {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            nullable: false,
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn is_unit(&self) -> bool {
        self.name == "Unit" && self.args.is_empty() && !self.nullable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KtTypeArg {
    Type(KtType),
    Out(KtType),
    In(KtType),
    Star,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtTypeParam {
    pub name: String,
    pub bounds: Vec<KtType>,
}

// =========================================================================
// Declarations
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct KtAnnotation {
    pub name: String,
    pub args: Vec<KtExpr>,
}

impl KtAnnotation {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KtClassKind {
    Class,
    Interface,
    /// `fun interface`, constructible from a lambda.
    FunInterface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtSuperType {
    pub ty: KtType,
    /// Constructor call arguments; `None` for interfaces and for classes
    /// whose constructors delegate explicitly.
    pub call_args: Option<Vec<KtExpr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtEnumEntry {
    pub name: String,
    pub annotations: Vec<KtAnnotation>,
    pub args: Vec<KtExpr>,
    pub body: Option<Vec<KtDecl>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtClass {
    pub annotations: Vec<KtAnnotation>,
    pub modifiers: KtModifiers,
    pub kind: KtClassKind,
    pub name: String,
    pub type_params: Vec<KtTypeParam>,
    /// Primary constructor parameters (annotation classes only).
    pub primary_params: Vec<KtParam>,
    pub supertypes: Vec<KtSuperType>,
    pub enum_entries: Vec<KtEnumEntry>,
    pub members: Vec<KtDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Val,
    Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtParam {
    pub name: String,
    pub ty: KtType,
    pub vararg: bool,
    /// Declared as a property (`val x: T` in a primary constructor).
    pub property: Option<Binding>,
    pub default: Option<KtExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtFunction {
    pub annotations: Vec<KtAnnotation>,
    pub modifiers: KtModifiers,
    pub type_params: Vec<KtTypeParam>,
    pub name: String,
    pub params: Vec<KtParam>,
    /// `None` for `Unit`.
    pub return_type: Option<KtType>,
    /// `None` for abstract and external functions.
    pub body: Option<KtBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtProperty {
    pub annotations: Vec<KtAnnotation>,
    pub modifiers: KtModifiers,
    pub binding: Binding,
    pub name: String,
    pub ty: Option<KtType>,
    pub init: Option<KtExpr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationTarget {
    This,
    Super,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtDelegation {
    pub target: DelegationTarget,
    pub args: Vec<KtExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtConstructor {
    pub annotations: Vec<KtAnnotation>,
    pub modifiers: KtModifiers,
    pub params: Vec<KtParam>,
    pub delegation: Option<KtDelegation>,
    pub body: KtBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KtDecl {
    Class(KtClass),
    Function(KtFunction),
    Property(KtProperty),
    Constructor(KtConstructor),
    Init(KtBlock),
    Companion(Vec<KtDecl>),
    /// `// <text>` line.
    Comment(String),
    /// Declaration that could not be converted.
    Placeholder {
        reason: String,
        fragment: String,
    },
}

// =========================================================================
// Statements
// =========================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KtBlock {
    pub stmts: Vec<KtStmt>,
}

impl KtBlock {
    pub fn new(stmts: Vec<KtStmt>) -> Self {
        Self { stmts }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtCatch {
    pub name: String,
    pub ty: KtType,
    pub body: KtBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KtWhenBranch {
    /// Empty for the `else` branch.
    pub conditions: Vec<KtExpr>,
    pub body: KtBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KtStmt {
    Expr(KtExpr),
    Local {
        binding: Binding,
        name: String,
        ty: Option<KtType>,
        init: Option<KtExpr>,
    },
    Assign {
        target: KtExpr,
        op: &'static str,
        value: KtExpr,
    },
    If {
        cond: KtExpr,
        then: KtBlock,
        otherwise: Option<KtBlock>,
    },
    While {
        cond: KtExpr,
        body: KtBlock,
    },
    DoWhile {
        body: KtBlock,
        cond: KtExpr,
    },
    For {
        name: String,
        iterable: KtExpr,
        body: KtBlock,
    },
    When {
        subject: Option<KtExpr>,
        branches: Vec<KtWhenBranch>,
    },
    Return {
        label: Option<String>,
        value: Option<KtExpr>,
    },
    Break(Option<String>),
    Continue(Option<String>),
    Throw(KtExpr),
    Try {
        block: KtBlock,
        catches: Vec<KtCatch>,
        finally: Option<KtBlock>,
    },
    Labeled {
        label: String,
        body: Box<KtStmt>,
    },
    Decl(Box<KtDecl>),
}

// =========================================================================
// Expressions
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct KtLambda {
    pub label: Option<String>,
    /// Parameters with optional explicit types.
    pub params: Vec<(String, Option<KtType>)>,
    pub body: Vec<KtStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KtExpr {
    /// Literal already spelled in Kotlin syntax.
    Literal(String),
    /// Simple or qualified name, quoted per segment when printed.
    Name(String),
    This(Option<String>),
    Super(Option<String>),
    Field {
        target: Box<KtExpr>,
        name: String,
    },
    Call {
        target: Option<Box<KtExpr>>,
        name: String,
        type_args: Vec<KtType>,
        args: Vec<KtExpr>,
        trailing_lambda: Option<Box<KtLambda>>,
    },
    Index {
        target: Box<KtExpr>,
        index: Box<KtExpr>,
    },
    Prefix {
        op: &'static str,
        operand: Box<KtExpr>,
    },
    Postfix {
        op: &'static str,
        operand: Box<KtExpr>,
    },
    Binary {
        lhs: Box<KtExpr>,
        op: &'static str,
        rhs: Box<KtExpr>,
    },
    Is {
        expr: Box<KtExpr>,
        ty: KtType,
    },
    As {
        expr: Box<KtExpr>,
        ty: KtType,
    },
    If {
        cond: Box<KtExpr>,
        then: Box<KtExpr>,
        otherwise: Box<KtExpr>,
    },
    Lambda(Box<KtLambda>),
    /// `T::class` or `T::class.java`.
    ClassRef {
        ty: KtType,
        java: bool,
    },
    /// `X::m`, `::X`
    CallableRef {
        receiver: Option<Box<KtExpr>>,
        name: String,
    },
    Object {
        supertypes: Vec<KtSuperType>,
        members: Vec<KtDecl>,
    },
    /// Kotlin collection literal, only valid in annotation arguments.
    ArrayLiteral(Vec<KtExpr>),
    /// `name = value` annotation argument.
    NamedArg {
        name: String,
        value: Box<KtExpr>,
    },
    Paren(Box<KtExpr>),
    Placeholder {
        reason: String,
        fragment: String,
    },
}

// =========================================================================
// Builder helpers
// =========================================================================

impl KtExpr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Call without a receiver
    pub fn call(name: impl Into<String>, args: Vec<KtExpr>) -> Self {
        Self::Call {
            target: None,
            name: name.into(),
            type_args: Vec::new(),
            args,
            trailing_lambda: None,
        }
    }

    /// Call on a receiver
    pub fn method(target: KtExpr, name: impl Into<String>, args: Vec<KtExpr>) -> Self {
        Self::Call {
            target: Some(Box::new(target)),
            name: name.into(),
            type_args: Vec::new(),
            args,
            trailing_lambda: None,
        }
    }

    /// Call whose last argument is a trailing lambda
    pub fn with_lambda(
        target: Option<KtExpr>,
        name: impl Into<String>,
        args: Vec<KtExpr>,
        lambda: KtLambda,
    ) -> Self {
        Self::Call {
            target: target.map(Box::new),
            name: name.into(),
            type_args: Vec::new(),
            args,
            trailing_lambda: Some(Box::new(lambda)),
        }
    }

    pub fn field(target: KtExpr, name: impl Into<String>) -> Self {
        Self::Field {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn binary(lhs: KtExpr, op: &'static str, rhs: KtExpr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn not_null(self) -> Self {
        Self::Postfix {
            op: "!!",
            operand: Box::new(self),
        }
    }

    /// Wrap in parentheses unless the expression binds tighter than any
    /// operator it could be combined with.
    pub fn operand(self) -> Self {
        if self.is_atomic() {
            self
        } else {
            Self::Paren(Box::new(self))
        }
    }

    /// Expressions that can be used as a receiver or infix operand as-is.
    pub fn is_atomic(&self) -> bool {
        match self {
            KtExpr::Literal(text) => !text.starts_with('-'),
            KtExpr::Name(_)
            | KtExpr::This(_)
            | KtExpr::Super(_)
            | KtExpr::Field { .. }
            | KtExpr::Call { .. }
            | KtExpr::Index { .. }
            | KtExpr::Postfix { .. }
            | KtExpr::ClassRef { .. }
            | KtExpr::CallableRef { .. }
            | KtExpr::ArrayLiteral(_)
            | KtExpr::Paren(_) => true,
            KtExpr::Prefix { .. }
            | KtExpr::Binary { .. }
            | KtExpr::Is { .. }
            | KtExpr::As { .. }
            | KtExpr::If { .. }
            | KtExpr::Lambda(_)
            | KtExpr::Object { .. }
            | KtExpr::NamedArg { .. }
            | KtExpr::Placeholder { .. } => false,
        }
    }
}

impl KtLambda {
    pub fn new(params: Vec<String>, body: Vec<KtStmt>) -> Self {
        Self {
            label: None,
            params: params.into_iter().map(|p| (p, None)).collect(),
            body,
        }
    }
}
