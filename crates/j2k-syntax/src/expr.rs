//! Expressions, literals and operators.

use serde::{Deserialize, Serialize};

use crate::decl::Member;
use crate::stmt::Block;
use crate::types::TypeRef;

/// Literal with its source spelling preserved (`0x1F`, `017`, `1e3d`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Literal {
    Int { text: String },
    Long { text: String },
    Float { text: String },
    Double { text: String },
    /// Text between the quotes, escapes unprocessed.
    Char { text: String },
    /// Text between the quotes, escapes unprocessed.
    String { text: String },
    Bool { value: bool },
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Expr {
    Literal {
        value: Literal,
    },
    /// Simple or qualified name whose meaning the front end did not resolve
    /// further (`x`, `System.out`, `Color.RED`).
    Name {
        name: String,
    },
    FieldAccess {
        target: Box<Expr>,
        name: String,
    },
    MethodCall {
        #[serde(default)]
        target: Option<Box<Expr>>,
        #[serde(default)]
        type_args: Vec<TypeRef>,
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    New {
        ty: TypeRef,
        #[serde(default)]
        args: Vec<Expr>,
        /// Anonymous class body.
        #[serde(default)]
        body: Option<Vec<Member>>,
        /// `outer.new Inner()`
        #[serde(default)]
        outer: Option<Box<Expr>>,
    },
    /// `new int[n][]` has dims `[Some(n), None]`; `new int[] {..}` has
    /// dims `[None]` and an initializer.
    NewArray {
        element: TypeRef,
        dims: Vec<Option<Expr>>,
        #[serde(default)]
        init: Option<Vec<Expr>>,
    },
    /// Brace initializer in a declaration (`int[] a = {1, 2};`).
    ArrayInit {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Cast {
        ty: TypeRef,
        expr: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: TypeRef,
    },
    This {
        #[serde(default)]
        qualifier: Option<String>,
    },
    Super {
        #[serde(default)]
        qualifier: Option<String>,
    },
    ClassLiteral {
        ty: TypeRef,
    },
    Lambda {
        #[serde(default)]
        params: Vec<LambdaParam>,
        body: LambdaBody,
    },
    MethodRef {
        target: MethodRefTarget,
        name: String,
    },
    Paren {
        expr: Box<Expr>,
    },
    Unsupported {
        description: String,
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaParam {
    pub name: String,
    #[serde(default = "inferred")]
    pub ty: TypeRef,
}

fn inferred() -> TypeRef {
    TypeRef::Inferred
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum LambdaBody {
    Expr { expr: Box<Expr> },
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum MethodRefTarget {
    Expr { expr: Box<Expr> },
    Type { ty: TypeRef },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc | UnaryOp::PostInc => "++",
            UnaryOp::PreDec | UnaryOp::PostDec => "--",
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, UnaryOp::PostInc | UnaryOp::PostDec)
    }

    pub const fn is_increment(self) -> bool {
        matches!(
            self,
            UnaryOp::PreInc | UnaryOp::PreDec | UnaryOp::PostInc | UnaryOp::PostDec
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitOr,
    BitXor,
    And,
    Or,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,
}

impl AssignOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Rem => "%=",
            AssignOp::Shl => "<<=",
            AssignOp::Shr => ">>=",
            AssignOp::UShr => ">>>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
        }
    }

    /// Binary operator a compound assignment applies, `None` for `=`.
    pub const fn binary(self) -> Option<BinaryOp> {
        Some(match self {
            AssignOp::Assign => return None,
            AssignOp::Add => BinaryOp::Add,
            AssignOp::Sub => BinaryOp::Sub,
            AssignOp::Mul => BinaryOp::Mul,
            AssignOp::Div => BinaryOp::Div,
            AssignOp::Rem => BinaryOp::Rem,
            AssignOp::Shl => BinaryOp::Shl,
            AssignOp::Shr => BinaryOp::Shr,
            AssignOp::UShr => BinaryOp::UShr,
            AssignOp::BitAnd => BinaryOp::BitAnd,
            AssignOp::BitOr => BinaryOp::BitOr,
            AssignOp::BitXor => BinaryOp::BitXor,
        })
    }
}
