//! Statements.

use j2k_syntax::{
    AssignOp, Block, CatchClause, Expr, LambdaBody, LocalVarDecl, Literal, Primitive, Resource,
    Stmt, TypeKind, TypeRef, UnaryOp,
};

use crate::context::{ConversionContext, ReturnTarget, VarInfo};
use crate::errors::ConvertError;
use crate::ir::{Binding, KtBlock, KtCatch, KtExpr, KtLambda, KtStmt};

use super::declarations::Container;
use super::literals::{integer_value, widened_literal};
use super::types::declared_nullable;

/// Initializers that can never produce `null`.
fn is_non_null_initializer(init: &Expr) -> bool {
    matches!(
        init,
        Expr::New { .. }
            | Expr::Lambda { .. }
            | Expr::Literal {
                value: Literal::String { .. }
            }
    )
}

/// Best declared type for a `var` local, from its initializer.
fn inferred_type(init: &Expr) -> TypeRef {
    match init {
        Expr::Literal {
            value: Literal::String { .. },
        } => TypeRef::Named {
            name: "String".to_string(),
            args: Vec::new(),
        },
        Expr::New { ty, body: None, .. } => ty.clone(),
        Expr::NewArray { element, dims, .. } => {
            let mut ty = element.clone();
            for _ in dims {
                ty = TypeRef::Array {
                    element: Box::new(ty),
                };
            }
            ty
        }
        _ => TypeRef::Inferred,
    }
}

/// Integer literal respelled for a wider primitive target. Kotlin does not
/// widen `1` to `Double` or `Long` implicitly.
fn widened_expr(expr: &Expr, target: Primitive) -> Option<KtExpr> {
    match expr {
        Expr::Literal { value } => widened_literal(value, target).map(KtExpr::literal),
        Expr::Unary {
            op: UnaryOp::Minus,
            operand,
        } => match operand.as_ref() {
            Expr::Literal { value } if integer_value(value)? >= 0 => {
                let text = widened_literal(value, target)?;
                Some(KtExpr::Prefix {
                    op: "-",
                    operand: Box::new(KtExpr::literal(text)),
                })
            }
            _ => None,
        },
        Expr::Paren { expr } => widened_expr(expr, target),
        _ => None,
    }
}

/// `run { ... }`
pub(crate) fn run_block(stmts: Vec<KtStmt>) -> KtStmt {
    KtStmt::Expr(KtExpr::with_lambda(
        None,
        "run",
        Vec::new(),
        KtLambda::new(Vec::new(), stmts),
    ))
}

impl ConversionContext<'_> {
    pub(crate) fn convert_stmts(
        &mut self,
        stmts: &[Stmt],
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        for stmt in stmts {
            self.convert_stmt(stmt, out)?;
        }
        Ok(())
    }

    /// Statements of a block in their own scope.
    pub(crate) fn convert_block(&mut self, block: &Block) -> Result<KtBlock, ConvertError> {
        self.scoped(|ctx| {
            let mut out = Vec::with_capacity(block.statements.len());
            ctx.convert_stmts(&block.statements, &mut out)?;
            Ok(KtBlock::new(out))
        })
    }

    /// Body of an `if` branch or a loop: a block, or a single statement
    /// wrapped into one.
    pub(crate) fn convert_branch(&mut self, stmt: &Stmt) -> Result<KtBlock, ConvertError> {
        match stmt {
            Stmt::Block(block) => self.convert_block(block),
            other => self.scoped(|ctx| {
                let mut out = Vec::new();
                ctx.convert_stmt(other, &mut out)?;
                Ok(KtBlock::new(out))
            }),
        }
    }

    pub(crate) fn convert_stmt(
        &mut self,
        stmt: &Stmt,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        self.nested(|ctx| ctx.convert_stmt_inner(stmt, out))
    }

    fn convert_stmt_inner(
        &mut self,
        stmt: &Stmt,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        match stmt {
            Stmt::Block(block) => {
                let inner = self.convert_block(block)?;
                out.push(run_block(inner.stmts));
            }
            Stmt::LocalVar(decl) => self.convert_local_var(decl, out)?,
            Stmt::LocalClass(decl) => match decl.kind {
                TypeKind::Class => {
                    let converted = self.convert_type_decl(decl, Container::Local)?;
                    out.push(KtStmt::Decl(Box::new(converted)));
                }
                TypeKind::Interface | TypeKind::Enum | TypeKind::Annotation => {
                    let fragment = super::fragment_of(stmt);
                    out.push(self.stmt_placeholder("local type declaration", fragment));
                }
            },
            Stmt::Expr { expr } => self.convert_expr_stmt(expr, out)?,
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.convert_expr(cond)?;
                let then = self.convert_branch(then)?;
                let otherwise = match otherwise {
                    Some(stmt) => Some(self.convert_branch(stmt)?),
                    None => None,
                };
                out.push(KtStmt::If {
                    cond,
                    then,
                    otherwise,
                });
            }
            Stmt::While { .. } | Stmt::DoWhile { .. } | Stmt::For { .. } | Stmt::ForEach { .. } => {
                self.convert_loop(stmt, None, out)?;
            }
            Stmt::Switch { selector, cases } => self.convert_switch(stmt, selector, cases, out)?,
            Stmt::Return { value } => {
                let (label, returns) = match self.return_targets.last() {
                    Some(ReturnTarget::Lambda { .. }) => (Some("lambda".to_string()), None),
                    Some(ReturnTarget::Function { returns }) => (None, *returns),
                    None => (None, None),
                };
                let value = match (value, returns) {
                    (Some(value), Some(primitive)) => {
                        Some(self.convert_value(value, &TypeRef::Primitive { primitive })?)
                    }
                    (Some(value), None) => Some(self.convert_expr(value)?),
                    (None, _) => None,
                };
                out.push(KtStmt::Return { label, value });
            }
            Stmt::Break { label } => out.push(KtStmt::Break(label.clone())),
            Stmt::Continue { label } => {
                let update = self.continue_update(label.as_deref());
                for expr in &update {
                    self.convert_expr_stmt(expr, out)?;
                }
                out.push(KtStmt::Continue(label.clone()));
            }
            Stmt::Throw { expr } => {
                let expr = self.convert_expr(expr)?;
                out.push(KtStmt::Throw(expr));
            }
            Stmt::Try {
                resources,
                block,
                catches,
                finally,
            } => self.convert_try(resources, block, catches, finally.as_ref(), out)?,
            Stmt::Synchronized { lock, body } => {
                let lock = self.convert_expr(lock)?;
                let body = self.convert_block(body)?;
                out.push(KtStmt::Expr(KtExpr::with_lambda(
                    None,
                    "synchronized",
                    vec![lock],
                    KtLambda::new(Vec::new(), body.stmts),
                )));
            }
            Stmt::Labeled { label, body } => {
                super::require_name(label, "label")?;
                match body.as_ref() {
                    Stmt::While { .. }
                    | Stmt::DoWhile { .. }
                    | Stmt::For { .. }
                    | Stmt::ForEach { .. } => self.convert_loop(body, Some(label), out)?,
                    _ => {
                        let fragment = super::fragment_of(stmt);
                        out.push(self.stmt_placeholder("label on a statement that is not a loop", fragment));
                    }
                }
            }
            Stmt::Assert { cond, message } => {
                let cond = self.convert_expr(cond)?;
                let call = match message {
                    Some(message) => {
                        let message = self.convert_expr(message)?;
                        KtExpr::with_lambda(
                            None,
                            "assert",
                            vec![cond],
                            KtLambda::new(Vec::new(), vec![KtStmt::Expr(message)]),
                        )
                    }
                    None => KtExpr::call("assert", vec![cond]),
                };
                out.push(KtStmt::Expr(call));
            }
            Stmt::Empty => {}
            Stmt::ConstructorCall { .. } => {
                return Err(ConvertError::invalid(
                    "statement",
                    "explicit constructor call outside the start of a constructor",
                ));
            }
            Stmt::Unsupported { description, text } => {
                out.push(self.stmt_placeholder(description, text.clone()));
            }
        }
        Ok(())
    }

    /// Update expressions to run before a `continue` targeting `label` (or
    /// the innermost loop).
    fn continue_update(&self, label: Option<&str>) -> Vec<Expr> {
        let frame = match label {
            Some(label) => self
                .loops
                .iter()
                .rev()
                .find(|f| f.label.as_deref() == Some(label)),
            None => self.loops.last(),
        };
        frame.map(|f| f.update.clone()).unwrap_or_default()
    }

    /// Expression in statement position. Assignments and increments are
    /// statements in Kotlin.
    pub(crate) fn convert_expr_stmt(
        &mut self,
        expr: &Expr,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        match expr {
            Expr::Assign { op, target, value } => {
                let stmt = self.convert_assignment(*op, target, value)?;
                out.push(stmt);
            }
            Expr::Paren { expr } if matches!(expr.as_ref(), Expr::Assign { .. }) => {
                self.convert_expr_stmt(expr, out)?;
            }
            other => {
                let expr = self.convert_expr(other)?;
                out.push(KtStmt::Expr(expr));
            }
        }
        Ok(())
    }

    fn convert_local_var(
        &mut self,
        decl: &LocalVarDecl,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        let is_final = decl.modifiers.is_final();
        let binding = if is_final { Binding::Val } else { Binding::Var };
        for declarator in &decl.declarators {
            super::require_name(&declarator.name, "local variable")?;
            let ty = declarator.effective_type(&decl.ty);
            let init = declarator.init.as_ref();

            if ty == TypeRef::Inferred {
                let Some(init) = init else {
                    return Err(ConvertError::invalid(
                        "local variable",
                        format!("`var {}` has no initializer", declarator.name),
                    ));
                };
                let kt_init = self.convert_expr(init)?;
                self.declare_var(
                    &declarator.name,
                    VarInfo {
                        ty: inferred_type(init),
                        nullable: false,
                    },
                );
                out.push(KtStmt::Local {
                    binding,
                    name: declarator.name.clone(),
                    ty: None,
                    init: Some(kt_init),
                });
                continue;
            }

            let nullable = declared_nullable(&ty, &decl.modifiers)
                && !(is_final && init.is_some_and(is_non_null_initializer));
            let kt_ty = self.convert_type(&ty, nullable)?;
            let kt_init = match init {
                Some(init) => Some(self.convert_initializer(init, &ty)?),
                None => None,
            };
            self.declare_var(&declarator.name, VarInfo { ty, nullable });
            out.push(KtStmt::Local {
                binding,
                name: declarator.name.clone(),
                ty: Some(kt_ty),
                init: kt_init,
            });
        }
        Ok(())
    }

    /// Initializer of a field or local of declared type `ty`. Brace array
    /// initializers are only valid here; a lambda assigned to a named
    /// interface type becomes a SAM constructor call.
    pub(crate) fn convert_initializer(
        &mut self,
        init: &Expr,
        ty: &TypeRef,
    ) -> Result<KtExpr, ConvertError> {
        match init {
            Expr::ArrayInit { elements } => self.convert_array_literal(elements, ty),
            Expr::Lambda { params, body } if matches!(ty, TypeRef::Named { .. }) => {
                let lambda = self.convert_lambda(params, body)?;
                let mut sam = self.convert_type(ty, false)?;
                let type_args = sam
                    .args
                    .drain(..)
                    .map(|arg| match arg {
                        crate::ir::KtTypeArg::Type(t) => Some(t),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>()
                    .unwrap_or_default();
                Ok(KtExpr::Call {
                    target: None,
                    name: sam.name,
                    type_args,
                    args: Vec::new(),
                    trailing_lambda: Some(Box::new(lambda)),
                })
            }
            other => self.convert_value(other, ty),
        }
    }

    /// `expr` as a value of declared type `ty`.
    pub(crate) fn convert_value(&mut self, expr: &Expr, ty: &TypeRef) -> Result<KtExpr, ConvertError> {
        if let TypeRef::Primitive { primitive } = ty
            && let Some(widened) = widened_expr(expr, *primitive)
        {
            return Ok(widened);
        }
        self.convert_expr(expr)
    }

    fn convert_try(
        &mut self,
        resources: &[Resource],
        block: &Block,
        catches: &[CatchClause],
        finally: Option<&Block>,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        let body = if resources.is_empty() {
            self.convert_block(block)?
        } else {
            self.scoped(|ctx| ctx.convert_resources(resources, block))?
        };

        if !resources.is_empty() && catches.is_empty() && finally.is_none() {
            out.extend(body.stmts);
            return Ok(());
        }

        let mut kt_catches = Vec::new();
        for catch in catches {
            super::require_name(&catch.name, "catch parameter")?;
            if catch.types.is_empty() {
                return Err(ConvertError::invalid(
                    "catch clause",
                    format!("catch parameter `{}` has no type", catch.name),
                ));
            }
            // Multi-catch: one Kotlin catch per alternative.
            for ty in &catch.types {
                let kt_ty = self.convert_type_non_null(ty)?;
                let body = self.scoped(|ctx| {
                    ctx.declare_var(
                        &catch.name,
                        VarInfo {
                            ty: ty.clone(),
                            nullable: false,
                        },
                    );
                    ctx.convert_block(&catch.body)
                })?;
                kt_catches.push(KtCatch {
                    name: catch.name.clone(),
                    ty: kt_ty,
                    body,
                });
            }
        }
        let finally = match finally {
            Some(block) => Some(self.convert_block(block)?),
            None => None,
        };
        out.push(KtStmt::Try {
            block: body,
            catches: kt_catches,
            finally,
        });
        Ok(())
    }

    /// `r1.use { a -> r2.use { b -> body } }`
    fn convert_resources(
        &mut self,
        resources: &[Resource],
        block: &Block,
    ) -> Result<KtBlock, ConvertError> {
        let Some((first, rest)) = resources.split_first() else {
            return self.convert_block(block);
        };
        let (receiver, params) = match first {
            Resource::Decl {
                ty, name, init, ..
            } => {
                super::require_name(name, "resource")?;
                let receiver = self.convert_expr(init)?;
                let declared = if *ty == TypeRef::Inferred {
                    inferred_type(init)
                } else {
                    ty.clone()
                };
                self.declare_var(
                    name,
                    VarInfo {
                        ty: declared,
                        nullable: false,
                    },
                );
                (receiver, vec![name.clone()])
            }
            Resource::Expr { expr } => (self.convert_expr(expr)?, Vec::new()),
        };
        let inner = self.scoped(|ctx| ctx.convert_resources(rest, block))?;
        Ok(KtBlock::new(vec![KtStmt::Expr(KtExpr::with_lambda(
            Some(receiver.operand()),
            "use",
            Vec::new(),
            KtLambda::new(params, inner.stmts),
        ))]))
    }

    /// Java lambda to a Kotlin lambda. Block bodies turn a trailing
    /// `return e` into the result expression; other returns use
    /// `return@lambda`.
    pub(crate) fn convert_lambda(
        &mut self,
        params: &[j2k_syntax::LambdaParam],
        body: &LambdaBody,
    ) -> Result<KtLambda, ConvertError> {
        self.scoped(|ctx| {
            let mut kt_params = Vec::with_capacity(params.len());
            for param in params {
                super::require_name(&param.name, "lambda parameter")?;
                let declared = if param.ty == TypeRef::Inferred {
                    None
                } else {
                    let nullable = declared_nullable(&param.ty, &Default::default());
                    Some(ctx.convert_type(&param.ty, nullable)?)
                };
                ctx.declare_var(
                    &param.name,
                    VarInfo {
                        ty: param.ty.clone(),
                        nullable: declared.as_ref().is_some_and(|t| t.nullable),
                    },
                );
                kt_params.push((param.name.clone(), declared));
            }
            let saved_loops = std::mem::take(&mut ctx.loops);
            let result = ctx.convert_lambda_body(body);
            ctx.loops = saved_loops;
            let (label, stmts) = result?;
            Ok(KtLambda {
                label,
                params: kt_params,
                body: stmts,
            })
        })
    }

    fn convert_lambda_body(
        &mut self,
        body: &LambdaBody,
    ) -> Result<(Option<String>, Vec<KtStmt>), ConvertError> {
        match body {
            LambdaBody::Expr { expr } => {
                let mut out = Vec::new();
                self.convert_expr_stmt(expr, &mut out)?;
                Ok((None, out))
            }
            LambdaBody::Block(block) => {
                let labeled = super::analysis::has_inner_return(&block.statements);
                self.return_targets.push(ReturnTarget::Lambda { labeled });
                let result = self.scoped(|ctx| {
                    let mut out = Vec::new();
                    let (last, rest) = match block.statements.split_last() {
                        Some((last @ Stmt::Return { .. }, rest)) => (Some(last), rest),
                        _ => (None, block.statements.as_slice()),
                    };
                    ctx.convert_stmts(rest, &mut out)?;
                    if let Some(Stmt::Return { value: Some(value) }) = last {
                        let value = ctx.convert_expr(value)?;
                        out.push(KtStmt::Expr(value));
                    }
                    Ok(out)
                });
                self.return_targets.pop();
                let out = result?;
                Ok((labeled.then(|| "lambda".to_string()), out))
            }
        }
    }

    /// Statement form of `target op= value`.
    pub(crate) fn convert_assignment(
        &mut self,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
    ) -> Result<KtStmt, ConvertError> {
        let kt_target = self.convert_assign_target(target)?;
        let kt_value = self.convert_expr(value)?;
        Ok(match op.binary() {
            None => KtStmt::Assign {
                target: kt_target,
                op: "=",
                value: kt_value,
            },
            Some(binary) => match super::operators::infix_name(binary) {
                Some(infix) => KtStmt::Assign {
                    target: kt_target.clone(),
                    op: "=",
                    value: KtExpr::binary(
                        super::operators::infix_operand(kt_target),
                        infix,
                        super::operators::infix_operand(kt_value),
                    ),
                },
                None => KtStmt::Assign {
                    target: kt_target,
                    op: op.symbol(),
                    value: kt_value,
                },
            },
        })
    }
}
