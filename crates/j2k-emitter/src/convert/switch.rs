//! `switch` to `when`.

use std::borrow::Cow;

use j2k_syntax::{Block, CaseLabel, Expr, Stmt, SwitchCase, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtBlock, KtStmt, KtWhenBranch};

use super::analysis::{breaks_out_of_switch, ends_with_jump};

/// Consecutive cases sharing one body.
struct CaseGroup<'s> {
    labels: Vec<&'s Expr>,
    is_default: bool,
    body: &'s [Stmt],
}

fn group_cases(cases: &[SwitchCase]) -> Vec<CaseGroup<'_>> {
    let mut groups = Vec::new();
    let mut labels = Vec::new();
    let mut is_default = false;
    for (i, case) in cases.iter().enumerate() {
        for label in &case.labels {
            match label {
                CaseLabel::Expr { expr } => labels.push(expr),
                CaseLabel::Default => is_default = true,
            }
        }
        if !case.body.is_empty() || i + 1 == cases.len() {
            groups.push(CaseGroup {
                labels: std::mem::take(&mut labels),
                is_default: std::mem::take(&mut is_default),
                body: &case.body,
            });
        }
    }
    groups
}

/// Body without its trailing unlabeled `break`, looking into a block that
/// ends the body (`case 1: { work(); break; }`).
fn strip_trailing_break(body: &[Stmt]) -> Cow<'_, [Stmt]> {
    match body.split_last() {
        Some((Stmt::Break { label: None }, rest)) => Cow::Borrowed(rest),
        Some((Stmt::Block(block), rest)) => match strip_trailing_break(&block.statements) {
            Cow::Borrowed(inner) if inner.len() == block.statements.len() => Cow::Borrowed(body),
            inner => {
                let mut owned = rest.to_vec();
                owned.push(Stmt::Block(Block::new(inner.into_owned())));
                Cow::Owned(owned)
            }
        },
        _ => Cow::Borrowed(body),
    }
}

impl ConversionContext<'_> {
    pub(crate) fn convert_switch(
        &mut self,
        stmt: &Stmt,
        selector: &Expr,
        cases: &[SwitchCase],
        out: &mut Vec<KtStmt>,
    ) -> Result<(), ConvertError> {
        let mut defaults = 0;
        for case in cases {
            if case.labels.is_empty() {
                return Err(ConvertError::invalid("switch", "case without labels"));
            }
            defaults += case
                .labels
                .iter()
                .filter(|l| matches!(l, CaseLabel::Default))
                .count();
        }
        if defaults > 1 {
            return Err(ConvertError::invalid("switch", "more than one default label"));
        }

        let groups = group_cases(cases);
        let last = groups.len().saturating_sub(1);
        let unsupported = groups.iter().enumerate().any(|(i, group)| {
            (i < last && !ends_with_jump(group.body))
                || breaks_out_of_switch(&strip_trailing_break(group.body))
        });
        if unsupported {
            let fragment = super::fragment_of(stmt);
            out.push(self.stmt_placeholder("switch with fall-through or inner break", fragment));
            return Ok(());
        }

        let enum_name = self.local_enum_of(selector);
        let subject = self.convert_expr(selector)?;

        let mut branches = Vec::with_capacity(groups.len());
        let mut default_branch = None;
        for group in &groups {
            let body = self.scoped(|ctx| {
                let mut stmts = Vec::new();
                ctx.convert_stmts(&strip_trailing_break(group.body), &mut stmts)?;
                Ok(KtBlock::new(stmts))
            })?;
            if group.is_default {
                default_branch = Some(KtWhenBranch {
                    conditions: Vec::new(),
                    body,
                });
                continue;
            }
            let mut conditions = Vec::with_capacity(group.labels.len());
            for label in &group.labels {
                conditions.push(match (&enum_name, label) {
                    (Some(enum_name), Expr::Name { name })
                        if self.index().enum_constants(enum_name).contains(name) =>
                    {
                        crate::ir::KtExpr::name(format!("{enum_name}.{name}"))
                    }
                    _ => self.convert_expr(label)?,
                });
            }
            branches.push(KtWhenBranch { conditions, body });
        }
        // A `when` statement over an enum or nullable subject must be
        // exhaustive.
        branches.push(default_branch.unwrap_or_else(|| KtWhenBranch {
            conditions: Vec::new(),
            body: KtBlock::new(Vec::new()),
        }));
        out.push(KtStmt::When {
            subject: Some(subject),
            branches,
        });
        Ok(())
    }

    /// Name of the unit-declared enum the selector is declared as.
    fn local_enum_of(&self, selector: &Expr) -> Option<String> {
        let info = match selector {
            Expr::Name { name } => self.lookup_var(name),
            Expr::FieldAccess { target, name } if matches!(target.as_ref(), Expr::This { qualifier: None }) => {
                self.lookup_field(name)
            }
            Expr::Paren { expr } => return self.local_enum_of(expr),
            _ => None,
        }?;
        let simple = match &info.ty {
            TypeRef::Named { .. } => info.ty.simple_name()?,
            _ => return None,
        };
        self.index().is_enum(simple).then(|| simple.to_string())
    }
}
