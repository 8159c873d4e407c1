//! Operators, casts and assignments used as values.

use j2k_syntax::{AssignOp, BinaryOp, Expr, Literal, Primitive, TypeRef, UnaryOp};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtExpr, KtLambda, KtStmt, KtType};

use super::types::kotlin_primitive;

/// Kotlin infix function for a Java bitwise or shift operator.
pub(crate) const fn infix_name(op: BinaryOp) -> Option<&'static str> {
    match op {
        BinaryOp::BitAnd => Some("and"),
        BinaryOp::BitOr => Some("or"),
        BinaryOp::BitXor => Some("xor"),
        BinaryOp::Shl => Some("shl"),
        BinaryOp::Shr => Some("shr"),
        BinaryOp::UShr => Some("ushr"),
        _ => None,
    }
}

/// Operand of an infix call (`and`, `shl`, `until`, ...). Arithmetic binds
/// tighter than infix calls in Kotlin; everything else below them needs
/// parentheses.
pub(crate) fn infix_operand(expr: KtExpr) -> KtExpr {
    match &expr {
        KtExpr::Binary { op, .. } if matches!(*op, "+" | "-" | "*" | "/" | "%") => expr,
        KtExpr::Prefix { .. } | KtExpr::Postfix { .. } => expr,
        _ => expr.operand(),
    }
}

/// Conversion function for a primitive cast target.
const fn conversion_function(primitive: Primitive) -> Option<&'static str> {
    match primitive {
        Primitive::Byte => Some("toByte"),
        Primitive::Short => Some("toShort"),
        Primitive::Int => Some("toInt"),
        Primitive::Long => Some("toLong"),
        Primitive::Float => Some("toFloat"),
        Primitive::Double => Some("toDouble"),
        Primitive::Char => Some("toChar"),
        Primitive::Boolean => None,
    }
}

/// Calls whose result is a `String` whatever the receiver.
const STRING_RESULT_CALLS: [&str; 5] = ["toString", "substring", "trim", "toUpperCase", "toLowerCase"];

fn is_string_type(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Named { name, .. } if name == "String" || name == "java.lang.String")
}

impl ConversionContext<'_> {
    /// Expression statically known to be a `String`.
    pub(crate) fn is_string_typed(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Literal {
                value: Literal::String { .. },
            } => true,
            Expr::Name { name } => self.lookup_var(name).is_some_and(|v| is_string_type(&v.ty)),
            Expr::FieldAccess { target, name } => {
                matches!(target.as_ref(), Expr::This { qualifier: None })
                    && self.lookup_field(name).is_some_and(|v| is_string_type(&v.ty))
            }
            Expr::Binary {
                op: BinaryOp::Add,
                lhs,
                rhs,
            } => self.is_string_typed(lhs) || self.is_string_typed(rhs),
            Expr::Paren { expr } => self.is_string_typed(expr),
            Expr::MethodCall { name, .. } => STRING_RESULT_CALLS.contains(&name.as_str()),
            _ => false,
        }
    }

    /// Variable, field or `this` with a declared reference type.
    fn is_declared_reference(&self, expr: &Expr) -> bool {
        let declared = |ty: &TypeRef| !matches!(ty, TypeRef::Primitive { .. } | TypeRef::Inferred);
        match expr {
            Expr::This { .. } => true,
            Expr::Name { name } => self.lookup_var(name).is_some_and(|v| declared(&v.ty)),
            Expr::FieldAccess { target, name } => {
                matches!(target.as_ref(), Expr::This { qualifier: None })
                    && self.lookup_field(name).is_some_and(|v| declared(&v.ty))
            }
            Expr::Paren { expr } => self.is_declared_reference(expr),
            _ => false,
        }
    }

    pub(crate) fn convert_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<KtExpr, ConvertError> {
        Ok(match op {
            UnaryOp::BitNot => KtExpr::method(self.convert_expr(operand)?.operand(), "inv", Vec::new()),
            UnaryOp::Plus | UnaryOp::Minus | UnaryOp::Not => KtExpr::Prefix {
                op: op.symbol(),
                operand: Box::new(self.convert_expr(operand)?.operand()),
            },
            UnaryOp::PreInc | UnaryOp::PreDec => KtExpr::Prefix {
                op: op.symbol(),
                operand: Box::new(self.convert_assign_target(operand)?),
            },
            UnaryOp::PostInc | UnaryOp::PostDec => KtExpr::Postfix {
                op: op.symbol(),
                operand: Box::new(self.convert_assign_target(operand)?),
            },
        })
    }

    pub(crate) fn convert_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<KtExpr, ConvertError> {
        if let Some(infix) = infix_name(op) {
            let lhs = infix_operand(self.convert_expr(lhs)?);
            let rhs = infix_operand(self.convert_expr(rhs)?);
            return Ok(KtExpr::binary(lhs, infix, rhs));
        }
        let symbol = match op {
            BinaryOp::Eq | BinaryOp::Ne
                if self.is_declared_reference(lhs) && self.is_declared_reference(rhs) =>
            {
                if op == BinaryOp::Eq { "===" } else { "!==" }
            }
            _ => op.symbol(),
        };
        let mut kt_lhs = self.convert_expr(lhs)?;
        if op == BinaryOp::Add && self.is_string_typed(rhs) && !self.is_string_typed(lhs) {
            kt_lhs = KtExpr::method(kt_lhs.operand(), "toString", Vec::new());
        }
        let kt_rhs = self.convert_expr(rhs)?;
        Ok(KtExpr::binary(kt_lhs, symbol, kt_rhs))
    }

    /// Assignment used as a value: `y.also { x = it }` or
    /// `run { x op= y; x }`.
    pub(crate) fn convert_assignment_value(
        &mut self,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
    ) -> Result<KtExpr, ConvertError> {
        if op == AssignOp::Assign {
            let kt_target = self.convert_assign_target(target)?;
            let kt_value = self.convert_expr(value)?;
            let assign = KtStmt::Assign {
                target: kt_target,
                op: "=",
                value: KtExpr::name("it"),
            };
            return Ok(KtExpr::with_lambda(
                Some(kt_value.operand()),
                "also",
                Vec::new(),
                KtLambda::new(Vec::new(), vec![assign]),
            ));
        }
        let stmt = self.convert_assignment(op, target, value)?;
        let result = self.convert_assign_target(target)?;
        Ok(KtExpr::with_lambda(
            None,
            "run",
            Vec::new(),
            KtLambda::new(Vec::new(), vec![stmt, KtStmt::Expr(result)]),
        ))
    }

    /// Left-hand side of an assignment or increment.
    pub(crate) fn convert_assign_target(&mut self, target: &Expr) -> Result<KtExpr, ConvertError> {
        match target {
            Expr::Name { name } if !name.contains('.') => {
                super::require_name(name, "assignment target")?;
                Ok(KtExpr::name(name.clone()))
            }
            Expr::Name { .. } | Expr::FieldAccess { .. } | Expr::ArrayAccess { .. } => {
                self.convert_expr(target)
            }
            Expr::Paren { expr } => self.convert_assign_target(expr),
            other => Err(ConvertError::invalid(
                "assignment",
                format!("`{other}` is not assignable"),
            )),
        }
    }

    /// `(int) x` → `x.toInt()`, `(T) x` → `x as T?`
    pub(crate) fn convert_cast(&mut self, ty: &TypeRef, expr: &Expr) -> Result<KtExpr, ConvertError> {
        let operand = self.convert_expr(expr)?.operand();
        if let TypeRef::Primitive { primitive } = ty {
            if let Some(function) = conversion_function(*primitive) {
                return Ok(KtExpr::method(operand, function, Vec::new()));
            }
            return Ok(KtExpr::As {
                expr: Box::new(operand),
                ty: KtType::simple(kotlin_primitive(*primitive)),
            });
        }
        let ty = self.convert_type(ty, true)?;
        Ok(KtExpr::As {
            expr: Box::new(operand),
            ty,
        })
    }
}
