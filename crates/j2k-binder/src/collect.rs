//! Tree walk feeding the identifier index.
//!
//! Statements and expressions are walked only to reach local classes and
//! anonymous class bodies.

use rustc_hash::FxHashMap;
use tracing::warn;

use j2k_common::limits::MAX_BINDER_DEPTH;
use j2k_syntax::{
    Block, Expr, ForInit, LambdaBody, Member, MethodRefTarget, Resource, Stmt, TypeDecl,
};

use crate::index::{DeclKind, Entry};

#[derive(Default)]
pub(crate) struct Collector {
    entries: FxHashMap<String, Entry>,
    depth: u32,
    truncated: bool,
}

impl Collector {
    pub(crate) fn finish(self) -> FxHashMap<String, Entry> {
        self.entries
    }

    fn enter(&mut self) -> bool {
        if self.depth >= MAX_BINDER_DEPTH {
            if !self.truncated {
                warn!(limit = MAX_BINDER_DEPTH, "nesting too deep, index truncated");
                self.truncated = true;
            }
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn visit_type_decl(&mut self, decl: &TypeDecl) {
        if !self.enter() {
            return;
        }
        if !decl.name.is_empty() {
            // First declaration wins for duplicate simple names.
            self.entries
                .entry(decl.name.clone())
                .or_insert_with(|| Entry {
                    kind: DeclKind::from(decl.kind),
                    enum_constants: decl
                        .enum_constants
                        .iter()
                        .map(|c| c.name.clone())
                        .collect(),
                });
        }
        for constant in &decl.enum_constants {
            for arg in &constant.args {
                self.visit_expr(arg);
            }
            if let Some(body) = &constant.body {
                self.visit_members(body);
            }
        }
        self.visit_members(&decl.members);
        self.leave();
    }

    fn visit_members(&mut self, members: &[Member]) {
        for member in members {
            match member {
                Member::Field(field) => {
                    for declarator in &field.declarators {
                        if let Some(init) = &declarator.init {
                            self.visit_expr(init);
                        }
                    }
                }
                Member::Method(method) => {
                    if let Some(body) = &method.body {
                        self.visit_block(body);
                    }
                    if let Some(default) = &method.default_value {
                        self.visit_expr(default);
                    }
                }
                Member::Constructor(ctor) => self.visit_block(&ctor.body),
                Member::Initializer(init) => self.visit_block(&init.body),
                Member::Type(decl) => self.visit_type_decl(decl),
            }
        }
    }

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        if !self.enter() {
            return;
        }
        match stmt {
            Stmt::Block(block) => self.visit_block(block),
            Stmt::LocalVar(local) => {
                for declarator in &local.declarators {
                    if let Some(init) = &declarator.init {
                        self.visit_expr(init);
                    }
                }
            }
            Stmt::LocalClass(decl) => self.visit_type_decl(decl),
            Stmt::Expr { expr } | Stmt::Throw { expr } => self.visit_expr(expr),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                self.visit_expr(cond);
                self.visit_stmt(then);
                if let Some(otherwise) = otherwise {
                    self.visit_stmt(otherwise);
                }
            }
            Stmt::While { cond, body } | Stmt::DoWhile { body, cond } => {
                self.visit_expr(cond);
                self.visit_stmt(body);
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                for item in init {
                    match item {
                        ForInit::LocalVar(local) => {
                            for declarator in &local.declarators {
                                if let Some(init) = &declarator.init {
                                    self.visit_expr(init);
                                }
                            }
                        }
                        ForInit::Expr { expr } => self.visit_expr(expr),
                    }
                }
                if let Some(cond) = cond {
                    self.visit_expr(cond);
                }
                for expr in update {
                    self.visit_expr(expr);
                }
                self.visit_stmt(body);
            }
            Stmt::ForEach { iterable, body, .. } => {
                self.visit_expr(iterable);
                self.visit_stmt(body);
            }
            Stmt::Switch { selector, cases } => {
                self.visit_expr(selector);
                for case in cases {
                    for stmt in &case.body {
                        self.visit_stmt(stmt);
                    }
                }
            }
            Stmt::Return { value } => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            Stmt::Try {
                resources,
                block,
                catches,
                finally,
            } => {
                for resource in resources {
                    match resource {
                        Resource::Decl { init, .. } => self.visit_expr(init),
                        Resource::Expr { expr } => self.visit_expr(expr),
                    }
                }
                self.visit_block(block);
                for catch in catches {
                    self.visit_block(&catch.body);
                }
                if let Some(finally) = finally {
                    self.visit_block(finally);
                }
            }
            Stmt::Synchronized { lock, body } => {
                self.visit_expr(lock);
                self.visit_block(body);
            }
            Stmt::Labeled { body, .. } => self.visit_stmt(body),
            Stmt::Assert { cond, message } => {
                self.visit_expr(cond);
                if let Some(message) = message {
                    self.visit_expr(message);
                }
            }
            Stmt::ConstructorCall { args, .. } => {
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Stmt::Break { .. }
            | Stmt::Continue { .. }
            | Stmt::Empty
            | Stmt::Unsupported { .. } => {}
        }
        self.leave();
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if !self.enter() {
            return;
        }
        match expr {
            Expr::New {
                args, body, outer, ..
            } => {
                if let Some(outer) = outer {
                    self.visit_expr(outer);
                }
                for arg in args {
                    self.visit_expr(arg);
                }
                if let Some(body) = body {
                    self.visit_members(body);
                }
            }
            Expr::MethodCall { target, args, .. } => {
                if let Some(target) = target {
                    self.visit_expr(target);
                }
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            Expr::FieldAccess { target, .. } => self.visit_expr(target),
            Expr::NewArray { dims, init, .. } => {
                for dim in dims.iter().flatten() {
                    self.visit_expr(dim);
                }
                for element in init.iter().flatten() {
                    self.visit_expr(element);
                }
            }
            Expr::ArrayInit { elements } => {
                for element in elements {
                    self.visit_expr(element);
                }
            }
            Expr::ArrayAccess { array, index } => {
                self.visit_expr(array);
                self.visit_expr(index);
            }
            Expr::Unary { operand, .. } => self.visit_expr(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Assign { target, value, .. } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                self.visit_expr(cond);
                self.visit_expr(then);
                self.visit_expr(otherwise);
            }
            Expr::Cast { expr, .. } | Expr::InstanceOf { expr, .. } | Expr::Paren { expr } => {
                self.visit_expr(expr);
            }
            Expr::Lambda { body, .. } => match body {
                LambdaBody::Expr { expr } => self.visit_expr(expr),
                LambdaBody::Block(block) => self.visit_block(block),
            },
            Expr::MethodRef { target, .. } => {
                if let MethodRefTarget::Expr { expr } = target {
                    self.visit_expr(expr);
                }
            }
            Expr::Literal { .. }
            | Expr::Name { .. }
            | Expr::This { .. }
            | Expr::Super { .. }
            | Expr::ClassLiteral { .. }
            | Expr::Unsupported { .. } => {}
        }
        self.leave();
    }
}
