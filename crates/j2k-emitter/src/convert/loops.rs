//! Loops.
//!
//! A classic `for` in canonical counting form becomes a range loop. Any
//! other `for` is lowered to its initializer followed by a `while` loop whose
//! body ends with the update; the update is repeated before every `continue`
//! that targets the loop.

use j2k_syntax::{BinaryOp, Expr, ForInit, Literal, Primitive, Stmt, TypeRef};

use crate::context::{ConversionContext, LoopFrame, VarInfo};
use crate::errors::ConvertError;
use crate::ir::{KtBlock, KtExpr, KtStmt};

use super::analysis::{assigned_names, ends_with_jump, unit_step};
use super::literals::integer_value;
use super::operators::infix_operand;
use super::statements::run_block;

/// `for (int i = a; i < b; i++)` taken apart.
struct CountingLoop<'s> {
    name: &'s str,
    ty: TypeRef,
    start: &'s Expr,
    bound: &'s Expr,
    op: BinaryOp,
}

fn counting_loop<'s>(
    init: &'s [ForInit],
    cond: Option<&'s Expr>,
    update: &'s [Expr],
    body: &'s Stmt,
) -> Option<CountingLoop<'s>> {
    let [ForInit::LocalVar(decl)] = init else {
        return None;
    };
    let [declarator] = decl.declarators.as_slice() else {
        return None;
    };
    let counter_type = declarator.effective_type(&decl.ty);
    if !matches!(
        counter_type,
        TypeRef::Primitive {
            primitive: Primitive::Int | Primitive::Long
        }
    ) {
        return None;
    }
    let start = declarator.init.as_ref()?;
    let name = declarator.name.as_str();
    let Some(Expr::Binary { op, lhs, rhs }) = cond else {
        return None;
    };
    if !matches!(lhs.as_ref(), Expr::Name { name: n } if n == name) {
        return None;
    }
    let [step] = update else {
        return None;
    };
    let increments = unit_step(step, name)?;
    let direction_ok = match op {
        BinaryOp::Lt | BinaryOp::Le => increments,
        BinaryOp::Gt | BinaryOp::Ge => !increments,
        _ => false,
    };
    if !direction_ok {
        return None;
    }
    if assigned_names(std::slice::from_ref(body)).contains(name) {
        return None;
    }
    Some(CountingLoop {
        name,
        ty: counter_type,
        start,
        bound: rhs,
        op: *op,
    })
}

impl ConversionContext<'_> {
    /// Run `f` with a loop frame pushed.
    fn in_loop<T>(
        &mut self,
        label: Option<&str>,
        update: Vec<Expr>,
        f: impl FnOnce(&mut Self) -> Result<T, ConvertError>,
    ) -> Result<T, ConvertError> {
        self.loops.push(LoopFrame {
            label: label.map(str::to_string),
            update,
        });
        let result = f(self);
        self.loops.pop();
        result
    }

    /// `while`, `do`, `for` or for-each statement, optionally labeled.
    pub(crate) fn convert_loop(
        &mut self,
        stmt: &Stmt,
        label: Option<&str>,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        let labeled = |kt: KtStmt| match label {
            Some(label) => KtStmt::Labeled {
                label: label.to_string(),
                body: Box::new(kt),
            },
            None => kt,
        };
        match stmt {
            Stmt::While { cond, body } => {
                let cond = self.convert_expr(cond)?;
                let body = self.in_loop(label, Vec::new(), |ctx| ctx.convert_branch(body))?;
                out.push(labeled(KtStmt::While { cond, body }));
            }
            Stmt::DoWhile { body, cond } => {
                let body = self.in_loop(label, Vec::new(), |ctx| ctx.convert_branch(body))?;
                let cond = self.convert_expr(cond)?;
                out.push(labeled(KtStmt::DoWhile { body, cond }));
            }
            Stmt::ForEach {
                modifiers,
                ty,
                name,
                iterable,
                body,
            } => {
                super::require_name(name, "loop variable")?;
                let iterable = self.convert_receiver(iterable)?;
                let body = self.scoped(|ctx| {
                    let nullable = *ty != TypeRef::Inferred
                        && super::types::declared_nullable(ty, modifiers);
                    ctx.declare_var(
                        name,
                        VarInfo {
                            ty: ty.clone(),
                            nullable,
                        },
                    );
                    ctx.in_loop(label, Vec::new(), |ctx| ctx.convert_branch(body))
                })?;
                out.push(labeled(KtStmt::For {
                    name: name.clone(),
                    iterable,
                    body,
                }));
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                if let Some(counting) = counting_loop(init, cond.as_ref(), update, body) {
                    let range = self.convert_range(&counting)?;
                    let body = self.scoped(|ctx| {
                        ctx.declare_var(
                            counting.name,
                            VarInfo {
                                ty: counting.ty.clone(),
                                nullable: false,
                            },
                        );
                        ctx.in_loop(label, Vec::new(), |ctx| ctx.convert_branch(body))
                    })?;
                    out.push(labeled(KtStmt::For {
                        name: counting.name.to_string(),
                        iterable: range,
                        body,
                    }));
                } else {
                    self.convert_while_for(init, cond.as_ref(), update, body, label, out)?;
                }
            }
            other => {
                return Err(ConvertError::invalid(
                    "loop",
                    format!("`{other}` is not a loop"),
                ));
            }
        }
        Ok(())
    }

    /// `a until b`, `a..b`, `a downTo b`
    fn convert_range(&mut self, counting: &CountingLoop<'_>) -> Result<KtExpr, ConvertError> {
        let start = infix_operand(self.convert_expr(counting.start)?);
        let (op, bound) = match counting.op {
            BinaryOp::Lt => ("until", self.convert_expr(counting.bound)?),
            BinaryOp::Le => ("..", self.convert_expr(counting.bound)?),
            BinaryOp::Ge => ("downTo", self.convert_expr(counting.bound)?),
            // `i > b` stops before `b`.
            _ => {
                let literal_value = match counting.bound {
                    Expr::Literal {
                        value: value @ Literal::Int { .. },
                    } => integer_value(value),
                    _ => None,
                };
                let bound = match (literal_value, counting.bound) {
                    (Some(value), _) if value < i64::from(i32::MAX) && value >= 0 => {
                        KtExpr::literal((value + 1).to_string())
                    }
                    (_, other) => {
                        KtExpr::binary(self.convert_expr(other)?.operand(), "+", KtExpr::literal("1"))
                    }
                };
                ("downTo", bound)
            }
        };
        Ok(KtExpr::binary(start, op, infix_operand(bound)))
    }

    fn convert_while_for(
        &mut self,
        init: &[ForInit],
        cond: Option<&Expr>,
        update: &[Expr],
        body: &Stmt,
        label: Option<&str>,
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        // Java scopes the counter to the loop; the enclosing block may
        // declare the same name again after it.
        let needs_scope = init.iter().any(|i| matches!(i, ForInit::LocalVar(_)));

        let convert = |ctx: &mut Self, out: &mut Vec<KtStmt>| -> Result<(), ConvertError> {
            for item in init {
                match item {
                    ForInit::LocalVar(decl) => {
                        let mut fresh = decl.clone();
                        // Counters are reassigned by the update.
                        fresh.modifiers.keywords.retain(|k| *k != j2k_syntax::Modifier::Final);
                        ctx.convert_stmt(&Stmt::LocalVar(fresh), out)?;
                    }
                    ForInit::Expr { expr } => ctx.convert_expr_stmt(expr, out)?,
                }
            }
            let kt_cond = match cond {
                Some(cond) => ctx.convert_expr(cond)?,
                None => KtExpr::literal("true"),
            };
            let mut body_stmts = ctx.in_loop(label, update.to_vec(), |ctx| {
                let body = ctx.convert_branch(body)?;
                Ok(body.stmts)
            })?;
            let body_jumps = match body {
                Stmt::Block(block) => ends_with_jump(&block.statements),
                other => ends_with_jump(std::slice::from_ref(other)),
            };
            if !body_jumps {
                for expr in update {
                    ctx.convert_expr_stmt(expr, &mut body_stmts)?;
                }
            }
            let kt_while = KtStmt::While {
                cond: kt_cond,
                body: KtBlock::new(body_stmts),
            };
            out.push(match label {
                Some(label) => KtStmt::Labeled {
                    label: label.to_string(),
                    body: Box::new(kt_while),
                },
                None => kt_while,
            });
            Ok(())
        };

        if needs_scope {
            let inner = self.scoped(|ctx| {
                let mut inner = Vec::new();
                convert(ctx, &mut inner)?;
                Ok(inner)
            })?;
            out.push(run_block(inner));
        } else {
            convert(self, out)?;
        }
        Ok(())
    }
}
