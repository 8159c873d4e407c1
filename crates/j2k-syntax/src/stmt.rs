//! Statements.

use serde::{Deserialize, Serialize};

use crate::decl::{Modifiers, TypeDecl, VarDeclarator};
use crate::expr::Expr;
use crate::types::TypeRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }
}

/// `final int a = 1, b;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalVarDecl {
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Stmt {
    Block(Block),
    LocalVar(LocalVarDecl),
    LocalClass(TypeDecl),
    Expr {
        expr: Expr,
    },
    If {
        cond: Expr,
        then: Box<Stmt>,
        #[serde(default)]
        otherwise: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        cond: Expr,
    },
    For {
        #[serde(default)]
        init: Vec<ForInit>,
        #[serde(default)]
        cond: Option<Expr>,
        #[serde(default)]
        update: Vec<Expr>,
        body: Box<Stmt>,
    },
    ForEach {
        #[serde(default)]
        modifiers: Modifiers,
        ty: TypeRef,
        name: String,
        iterable: Expr,
        body: Box<Stmt>,
    },
    Switch {
        selector: Expr,
        #[serde(default)]
        cases: Vec<SwitchCase>,
    },
    Return {
        #[serde(default)]
        value: Option<Expr>,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
    },
    Continue {
        #[serde(default)]
        label: Option<String>,
    },
    Throw {
        expr: Expr,
    },
    Try {
        #[serde(default)]
        resources: Vec<Resource>,
        block: Block,
        #[serde(default)]
        catches: Vec<CatchClause>,
        #[serde(default)]
        finally: Option<Block>,
    },
    Synchronized {
        lock: Expr,
        body: Block,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Assert {
        cond: Expr,
        #[serde(default)]
        message: Option<Expr>,
    },
    Empty,
    /// `this(...)` / `super(...)` as the first statement of a constructor.
    ConstructorCall {
        target: ConstructorTarget,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// A construct the front end recognized but could not model.
    Unsupported {
        description: String,
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstructorTarget {
    This,
    Super,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum ForInit {
    LocalVar(LocalVarDecl),
    Expr { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCase {
    pub labels: Vec<CaseLabel>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum CaseLabel {
    Expr { expr: Expr },
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum Resource {
    Decl {
        #[serde(default)]
        modifiers: Modifiers,
        ty: TypeRef,
        name: String,
        init: Expr,
    },
    /// Effectively final variable or field used as a resource.
    Expr { expr: Expr },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchClause {
    #[serde(default)]
    pub modifiers: Modifiers,
    /// More than one entry for a multi-catch.
    pub types: Vec<TypeRef>,
    pub name: String,
    pub body: Block,
}
