//! Expression dispatch.

use j2k_syntax::{Expr, MethodRefTarget, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtExpr, KtType};

use super::literals::convert_literal;
use super::types::{kotlin_primitive, primitive_array};

impl ConversionContext<'_> {
    pub(crate) fn convert_expr(&mut self, expr: &Expr) -> Result<KtExpr, ConvertError> {
        self.nested(|ctx| ctx.convert_expr_inner(expr))
    }

    fn convert_expr_inner(&mut self, expr: &Expr) -> Result<KtExpr, ConvertError> {
        match expr {
            Expr::Literal { value } => Ok(KtExpr::Literal(convert_literal(value)?)),
            Expr::Name { name } => self.convert_name(name),
            Expr::FieldAccess { target, name } => {
                super::require_name(name, "field access")?;
                if name == "length" && self.is_declared_array(target) {
                    let receiver = self.convert_receiver(target)?;
                    return Ok(KtExpr::field(receiver, "size"));
                }
                let receiver = self.convert_member_target(target)?;
                Ok(KtExpr::field(receiver, name.clone()))
            }
            Expr::MethodCall {
                target,
                type_args,
                name,
                args,
            } => self.convert_call(target.as_deref(), type_args, name, args),
            Expr::New {
                ty,
                args,
                body,
                outer,
            } => self.convert_new(ty, args, body.as_deref(), outer.as_deref()),
            Expr::NewArray {
                element,
                dims,
                init,
            } => self.convert_new_array(element, dims, init.as_deref()),
            Expr::ArrayInit { .. } => Err(ConvertError::invalid(
                "expression",
                "array initializer outside a declaration",
            )),
            Expr::ArrayAccess { array, index } => {
                let target = self.convert_receiver(array)?;
                let index = self.convert_expr(index)?;
                Ok(KtExpr::Index {
                    target: Box::new(target),
                    index: Box::new(index),
                })
            }
            Expr::Unary { op, operand } => self.convert_unary(*op, operand),
            Expr::Binary { op, lhs, rhs } => self.convert_binary(*op, lhs, rhs),
            Expr::Assign { op, target, value } => self.convert_assignment_value(*op, target, value),
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => Ok(KtExpr::If {
                cond: Box::new(self.convert_expr(cond)?),
                then: Box::new(self.convert_expr(then)?),
                otherwise: Box::new(self.convert_expr(otherwise)?),
            }),
            Expr::Cast { ty, expr } => self.convert_cast(ty, expr),
            Expr::InstanceOf { expr, ty } => {
                let operand = self.convert_expr(expr)?.operand();
                let ty = self.convert_type(ty, false)?;
                Ok(KtExpr::Is {
                    expr: Box::new(operand),
                    ty,
                })
            }
            Expr::This { qualifier } => Ok(KtExpr::This(self.this_label(qualifier.as_deref()))),
            Expr::Super { .. } => Err(ConvertError::invalid(
                "expression",
                "`super` used outside a member access",
            )),
            Expr::ClassLiteral { ty } => self.convert_class_literal(ty),
            Expr::Lambda { params, body } => {
                Ok(KtExpr::Lambda(Box::new(self.convert_lambda(params, body)?)))
            }
            Expr::MethodRef { target, name } => self.convert_method_ref(expr, target, name),
            Expr::Paren { expr } => Ok(KtExpr::Paren(Box::new(self.convert_expr(expr)?))),
            Expr::Unsupported { description, text } => {
                Ok(self.expr_placeholder(description, text.clone()))
            }
        }
    }

    /// Simple or qualified name. A qualified name starting with a JDK type
    /// that maps to a Kotlin builtin keeps the Java class.
    fn convert_name(&mut self, name: &str) -> Result<KtExpr, ConvertError> {
        super::require_path(name, "name")?;
        let Some((first, rest)) = name.split_once('.') else {
            return Ok(KtExpr::name(name));
        };
        if let Some(info) = self.lookup_var(first) {
            let nullable = info.nullable;
            let is_array = info.ty.is_array();
            let mut receiver = KtExpr::name(first);
            if nullable {
                receiver = receiver.not_null();
            }
            if is_array && rest == "length" {
                return Ok(KtExpr::field(receiver, "size"));
            }
            return Ok(rest
                .split('.')
                .fold(receiver, |target, segment| KtExpr::field(target, segment)));
        }
        if let Some(qualified) = self.jdk_static_owner(first) {
            return Ok(KtExpr::name(format!("{qualified}.{rest}")));
        }
        Ok(KtExpr::name(name))
    }

    /// Qualified Java name of `name` when it is a JDK type mapped to a
    /// Kotlin builtin and nothing in scope shadows it.
    pub(crate) fn jdk_static_owner(&self, name: &str) -> Option<&'static str> {
        if self.lookup_var(name).is_some() || self.index().contains(name) {
            return None;
        }
        let jdk = self.jdk_type(name)?;
        (jdk.simple == name).then_some(jdk.qualified)
    }

    /// Receiver of a member access or call: nullable variables get `!!`,
    /// JDK types keep their Java class.
    pub(crate) fn convert_receiver(&mut self, expr: &Expr) -> Result<KtExpr, ConvertError> {
        match expr {
            Expr::Name { name } if !name.contains('.') => {
                if let Some(info) = self.lookup_var(name) {
                    let receiver = KtExpr::name(name.clone());
                    return Ok(if info.nullable {
                        receiver.not_null()
                    } else {
                        receiver
                    });
                }
                if let Some(qualified) = self.jdk_static_owner(name) {
                    return Ok(KtExpr::name(qualified));
                }
                self.convert_expr(expr)
            }
            Expr::FieldAccess { target, name }
                if matches!(target.as_ref(), Expr::This { qualifier: None }) =>
            {
                let converted = self.convert_expr(expr)?;
                Ok(if self.lookup_field(name).is_some_and(|f| f.nullable) {
                    converted.not_null()
                } else {
                    converted
                })
            }
            _ => Ok(self.convert_expr(expr)?.operand()),
        }
    }

    /// Target of a field access or call; handles `super`.
    pub(crate) fn convert_member_target(&mut self, target: &Expr) -> Result<KtExpr, ConvertError> {
        match target {
            Expr::Super { qualifier: None } => Ok(KtExpr::Super(None)),
            Expr::Super {
                qualifier: Some(qualifier),
            } => {
                super::require_path(qualifier, "super qualifier")?;
                let simple = qualifier.rsplit('.').next().unwrap_or(qualifier);
                let encloses = self.enclosing_types().any(|t| t.name == simple);
                if encloses {
                    Ok(KtExpr::Super(Some(simple.to_string())))
                } else {
                    // `Iface.super.m()` names a super-interface.
                    Ok(KtExpr::literal(format!("super<{simple}>")))
                }
            }
            other => self.convert_receiver(other),
        }
    }

    /// Label for `this`: none for the innermost named type.
    fn this_label(&self, qualifier: Option<&str>) -> Option<String> {
        let qualifier = qualifier?;
        let simple = qualifier.rsplit('.').next().unwrap_or(qualifier);
        match self.current_type() {
            Some(frame) if frame.name == simple => None,
            _ => Some(simple.to_string()),
        }
    }

    fn is_declared_array(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Name { name } => self.lookup_var(name).is_some_and(|v| v.ty.is_array()),
            Expr::FieldAccess { target, name } => {
                matches!(target.as_ref(), Expr::This { qualifier: None })
                    && self.lookup_field(name).is_some_and(|v| v.ty.is_array())
            }
            Expr::Paren { expr } => self.is_declared_array(expr),
            _ => false,
        }
    }

    /// `T::class.java`, `Int::class.javaPrimitiveType`, `java.lang.Void.TYPE`
    fn convert_class_literal(&mut self, ty: &TypeRef) -> Result<KtExpr, ConvertError> {
        match ty {
            TypeRef::Void => Ok(KtExpr::name("java.lang.Void.TYPE")),
            TypeRef::Primitive { primitive } => Ok(KtExpr::field(
                KtExpr::ClassRef {
                    ty: KtType::simple(kotlin_primitive(*primitive)),
                    java: false,
                },
                "javaPrimitiveType",
            )),
            _ => {
                let mut kt = self.convert_type_non_null(ty)?;
                if matches!(ty, TypeRef::Named { .. }) {
                    kt.args.clear();
                }
                Ok(KtExpr::ClassRef { ty: kt, java: true })
            }
        }
    }

    fn convert_method_ref(
        &mut self,
        expr: &Expr,
        target: &MethodRefTarget,
        name: &str,
    ) -> Result<KtExpr, ConvertError> {
        let is_new = name == "new";
        if !is_new {
            super::require_name(name, "method reference")?;
        }
        match target {
            MethodRefTarget::Type { ty } => match ty {
                TypeRef::Array { element } if is_new => match element.as_ref() {
                    TypeRef::Primitive { primitive } => Ok(KtExpr::CallableRef {
                        receiver: None,
                        name: primitive_array(*primitive).to_string(),
                    }),
                    _ => {
                        let fragment = super::fragment_of(expr);
                        Ok(self.expr_placeholder("array constructor reference", fragment))
                    }
                },
                TypeRef::Named { .. } => {
                    let type_name = self.bare_type_name(ty)?;
                    Ok(if is_new {
                        KtExpr::CallableRef {
                            receiver: None,
                            name: type_name,
                        }
                    } else {
                        KtExpr::CallableRef {
                            receiver: Some(Box::new(KtExpr::name(type_name))),
                            name: name.to_string(),
                        }
                    })
                }
                _ => Err(ConvertError::invalid(
                    "method reference",
                    format!("`{ty}` cannot qualify a method reference"),
                )),
            },
            MethodRefTarget::Expr { expr: target_expr } => {
                if is_new {
                    return Err(ConvertError::invalid(
                        "method reference",
                        "`new` reference on an expression",
                    ));
                }
                if let Expr::Super { .. } = target_expr.as_ref() {
                    let fragment = super::fragment_of(expr);
                    return Ok(self.expr_placeholder("super method reference", fragment));
                }
                let receiver = match target_expr.as_ref() {
                    Expr::Name { name } if !name.contains('.') && self.lookup_var(name).is_none() => {
                        // A type name; mapped if it is a Kotlin builtin.
                        let ty = TypeRef::Named {
                            name: name.clone(),
                            args: Vec::new(),
                        };
                        KtExpr::name(self.bare_type_name(&ty)?)
                    }
                    other => self.convert_expr(other)?.operand(),
                };
                Ok(KtExpr::CallableRef {
                    receiver: Some(Box::new(receiver)),
                    name: name.to_string(),
                })
            }
        }
    }
}
