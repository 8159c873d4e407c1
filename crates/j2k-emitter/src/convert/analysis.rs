//! Read-only queries over Java statement trees.
//!
//! Walks stop descending into lambdas, local and anonymous classes where the
//! question is about the enclosing body only. Every walk is bounded by the
//! conversion depth limit; anything deeper fails conversion anyway.

use rustc_hash::FxHashSet;

use j2k_common::limits::MAX_CONVERSION_DEPTH;
use j2k_syntax::{
    Block, CaseLabel, Expr, ForInit, LambdaBody, MethodRefTarget, Resource, Stmt, UnaryOp,
};

/// Simple names assigned or incremented anywhere in `stmts`, lambdas
/// included.
pub(crate) fn assigned_names(stmts: &[Stmt]) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for stmt in stmts {
        collect_assigned_stmt(stmt, &mut names, 0);
    }
    names
}

fn collect_assigned_stmt(stmt: &Stmt, names: &mut FxHashSet<String>, depth: u32) {
    if depth > MAX_CONVERSION_DEPTH {
        return;
    }
    let depth = depth + 1;
    let expr = |e: &Expr, names: &mut FxHashSet<String>| collect_assigned_expr(e, names, depth);
    match stmt {
        Stmt::Block(block) => {
            for s in &block.statements {
                collect_assigned_stmt(s, names, depth);
            }
        }
        Stmt::LocalVar(decl) => {
            for d in &decl.declarators {
                if let Some(init) = &d.init {
                    expr(init, names);
                }
            }
        }
        Stmt::LocalClass(_) | Stmt::Empty | Stmt::Break { .. } | Stmt::Continue { .. } => {}
        Stmt::Unsupported { .. } => {}
        Stmt::Expr { expr: e } | Stmt::Throw { expr: e } => expr(e, names),
        Stmt::If {
            cond,
            then,
            otherwise,
        } => {
            expr(cond, names);
            collect_assigned_stmt(then, names, depth);
            if let Some(o) = otherwise {
                collect_assigned_stmt(o, names, depth);
            }
        }
        Stmt::While { cond, body } | Stmt::DoWhile { body, cond } => {
            expr(cond, names);
            collect_assigned_stmt(body, names, depth);
        }
        Stmt::For {
            init,
            cond,
            update,
            body,
        } => {
            for i in init {
                match i {
                    ForInit::LocalVar(decl) => {
                        for d in &decl.declarators {
                            if let Some(init) = &d.init {
                                expr(init, names);
                            }
                        }
                    }
                    ForInit::Expr { expr: e } => expr(e, names),
                }
            }
            if let Some(c) = cond {
                expr(c, names);
            }
            for u in update {
                expr(u, names);
            }
            collect_assigned_stmt(body, names, depth);
        }
        Stmt::ForEach { iterable, body, .. } => {
            expr(iterable, names);
            collect_assigned_stmt(body, names, depth);
        }
        Stmt::Switch { selector, cases } => {
            expr(selector, names);
            for case in cases {
                for label in &case.labels {
                    if let CaseLabel::Expr { expr: e } = label {
                        expr(e, names);
                    }
                }
                for s in &case.body {
                    collect_assigned_stmt(s, names, depth);
                }
            }
        }
        Stmt::Return { value } => {
            if let Some(v) = value {
                expr(v, names);
            }
        }
        Stmt::Try {
            resources,
            block,
            catches,
            finally,
        } => {
            for r in resources {
                match r {
                    Resource::Decl { init, .. } => expr(init, names),
                    Resource::Expr { expr: e } => expr(e, names),
                }
            }
            for s in &block.statements {
                collect_assigned_stmt(s, names, depth);
            }
            for c in catches {
                for s in &c.body.statements {
                    collect_assigned_stmt(s, names, depth);
                }
            }
            if let Some(f) = finally {
                for s in &f.statements {
                    collect_assigned_stmt(s, names, depth);
                }
            }
        }
        Stmt::Synchronized { lock, body } => {
            expr(lock, names);
            for s in &body.statements {
                collect_assigned_stmt(s, names, depth);
            }
        }
        Stmt::Labeled { body, .. } => collect_assigned_stmt(body, names, depth),
        Stmt::Assert { cond, message } => {
            expr(cond, names);
            if let Some(m) = message {
                expr(m, names);
            }
        }
        Stmt::ConstructorCall { args, .. } => {
            for a in args {
                expr(a, names);
            }
        }
    }
}

fn collect_assigned_expr(expr: &Expr, names: &mut FxHashSet<String>, depth: u32) {
    if depth > MAX_CONVERSION_DEPTH {
        return;
    }
    let depth = depth + 1;
    let visit = |e: &Expr, names: &mut FxHashSet<String>| collect_assigned_expr(e, names, depth);
    match expr {
        Expr::Assign { target, value, .. } => {
            if let Expr::Name { name } = target.as_ref()
                && !name.contains('.')
            {
                names.insert(name.clone());
            }
            visit(target, names);
            visit(value, names);
        }
        Expr::Unary { op, operand } => {
            if op.is_increment()
                && let Expr::Name { name } = operand.as_ref()
                && !name.contains('.')
            {
                names.insert(name.clone());
            }
            visit(operand, names);
        }
        Expr::Literal { .. }
        | Expr::Name { .. }
        | Expr::This { .. }
        | Expr::Super { .. }
        | Expr::ClassLiteral { .. }
        | Expr::Unsupported { .. } => {}
        Expr::FieldAccess { target, .. } => visit(target, names),
        Expr::MethodCall { target, args, .. } => {
            if let Some(t) = target {
                visit(t, names);
            }
            for a in args {
                visit(a, names);
            }
        }
        Expr::New { args, outer, .. } => {
            if let Some(o) = outer {
                visit(o, names);
            }
            for a in args {
                visit(a, names);
            }
        }
        Expr::NewArray { dims, init, .. } => {
            for d in dims.iter().flatten() {
                visit(d, names);
            }
            for e in init.iter().flatten() {
                visit(e, names);
            }
        }
        Expr::ArrayInit { elements } => {
            for e in elements {
                visit(e, names);
            }
        }
        Expr::ArrayAccess { array, index } => {
            visit(array, names);
            visit(index, names);
        }
        Expr::Binary { lhs, rhs, .. } => {
            visit(lhs, names);
            visit(rhs, names);
        }
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            visit(cond, names);
            visit(then, names);
            visit(otherwise, names);
        }
        Expr::Cast { expr, .. } | Expr::InstanceOf { expr, .. } | Expr::Paren { expr } => {
            visit(expr, names);
        }
        Expr::Lambda { body, .. } => match body {
            LambdaBody::Expr { expr } => visit(expr, names),
            LambdaBody::Block(block) => {
                for s in &block.statements {
                    collect_assigned_stmt(s, names, depth);
                }
            }
        },
        Expr::MethodRef { target, .. } => {
            if let MethodRefTarget::Expr { expr } = target {
                visit(expr, names);
            }
        }
    }
}

/// Control cannot fall off the end of `stmts`.
pub(crate) fn ends_with_jump(stmts: &[Stmt]) -> bool {
    stmts.last().is_some_and(is_jump)
}

fn is_jump(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Return { .. } | Stmt::Throw { .. } => {
            true
        }
        Stmt::Block(block) => ends_with_jump(&block.statements),
        Stmt::If {
            then,
            otherwise: Some(otherwise),
            ..
        } => is_jump(then) && is_jump(otherwise),
        Stmt::Synchronized { body, .. } => ends_with_jump(&body.statements),
        Stmt::Try {
            block,
            catches,
            finally: None,
            ..
        } => {
            ends_with_jump(&block.statements)
                && catches.iter().all(|c| ends_with_jump(&c.body.statements))
        }
        _ => false,
    }
}

/// An unlabeled `break` that would leave the enclosing `switch`.
pub(crate) fn breaks_out_of_switch(stmts: &[Stmt]) -> bool {
    stmts.iter().any(|s| switch_break(s, 0))
}

fn switch_break(stmt: &Stmt, depth: u32) -> bool {
    if depth > MAX_CONVERSION_DEPTH {
        return false;
    }
    let depth = depth + 1;
    match stmt {
        Stmt::Break { label: None } => true,
        Stmt::Block(block) => block.statements.iter().any(|s| switch_break(s, depth)),
        Stmt::If {
            then, otherwise, ..
        } => {
            switch_break(then, depth) || otherwise.as_ref().is_some_and(|o| switch_break(o, depth))
        }
        Stmt::Try {
            block,
            catches,
            finally,
            ..
        } => {
            block_breaks(block, depth)
                || catches.iter().any(|c| block_breaks(&c.body, depth))
                || finally.as_ref().is_some_and(|f| block_breaks(f, depth))
        }
        Stmt::Synchronized { body, .. } => block_breaks(body, depth),
        Stmt::Labeled { body, .. } => match body.as_ref() {
            Stmt::While { .. } | Stmt::DoWhile { .. } | Stmt::For { .. } | Stmt::ForEach { .. } => {
                false
            }
            other => switch_break(other, depth),
        },
        // Loops and nested switches own their unlabeled breaks.
        _ => false,
    }
}

fn block_breaks(block: &Block, depth: u32) -> bool {
    block.statements.iter().any(|s| switch_break(s, depth))
}

/// A `return` somewhere in `stmts` other than the final statement,
/// ignoring nested lambdas and classes.
pub(crate) fn has_inner_return(stmts: &[Stmt]) -> bool {
    let Some((last, rest)) = stmts.split_last() else {
        return false;
    };
    let last_nested = match last {
        Stmt::Return { .. } => false,
        other => contains_return(other, 0),
    };
    last_nested || rest.iter().any(|s| contains_return(s, 0))
}

fn contains_return(stmt: &Stmt, depth: u32) -> bool {
    if depth > MAX_CONVERSION_DEPTH {
        return false;
    }
    let depth = depth + 1;
    let any = |stmts: &[Stmt]| stmts.iter().any(|s| contains_return(s, depth));
    match stmt {
        Stmt::Return { .. } => true,
        Stmt::Block(block) => any(&block.statements),
        Stmt::If {
            then, otherwise, ..
        } => {
            contains_return(then, depth)
                || otherwise.as_ref().is_some_and(|o| contains_return(o, depth))
        }
        Stmt::While { body, .. }
        | Stmt::DoWhile { body, .. }
        | Stmt::For { body, .. }
        | Stmt::ForEach { body, .. }
        | Stmt::Labeled { body, .. } => contains_return(body, depth),
        Stmt::Switch { cases, .. } => cases.iter().any(|c| any(&c.body)),
        Stmt::Try {
            block,
            catches,
            finally,
            ..
        } => {
            any(&block.statements)
                || catches.iter().any(|c| any(&c.body.statements))
                || finally.as_ref().is_some_and(|f| any(&f.statements))
        }
        Stmt::Synchronized { body, .. } => any(&body.statements),
        _ => false,
    }
}

/// `++x`, `x++`, `--x`, `x--`, `x += 1` or `x -= 1` on `name`; `Some(true)`
/// for increments.
pub(crate) fn unit_step(expr: &Expr, name: &str) -> Option<bool> {
    let is_counter = |e: &Expr| matches!(e, Expr::Name { name: n } if n == name);
    match expr {
        Expr::Unary { op, operand } if is_counter(operand) => match op {
            UnaryOp::PreInc | UnaryOp::PostInc => Some(true),
            UnaryOp::PreDec | UnaryOp::PostDec => Some(false),
            _ => None,
        },
        Expr::Assign { op, target, value } if is_counter(target) => {
            let one = matches!(
                value.as_ref(),
                Expr::Literal { value: j2k_syntax::Literal::Int { text } } if text == "1"
            );
            match op {
                j2k_syntax::AssignOp::Add if one => Some(true),
                j2k_syntax::AssignOp::Sub if one => Some(false),
                _ => None,
            }
        }
        _ => None,
    }
}
