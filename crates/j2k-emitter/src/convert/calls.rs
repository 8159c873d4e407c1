//! Method calls and instance creation.

use j2k_syntax::{Expr, Member, TypeArg, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtExpr, KtType};

/// Methods Kotlin does not expose on its builtin types; the compatibility
/// library provides extension functions with the same names.
const COMPAT_HELPERS: [&str; 5] = [
    "wait",
    "notify",
    "notifyAll",
    "equalsIgnoreCase",
    "compareToIgnoreCase",
];

fn is_system_out(target: &Expr) -> bool {
    match target {
        Expr::Name { name } => name == "System.out",
        Expr::FieldAccess { target, name } => {
            name == "out" && matches!(target.as_ref(), Expr::Name { name } if name == "System")
        }
        _ => false,
    }
}

impl ConversionContext<'_> {
    pub(crate) fn convert_call(
        &mut self,
        target: Option<&Expr>,
        type_args: &[TypeRef],
        name: &str,
        args: &[Expr],
    ) -> Result<KtExpr, ConvertError> {
        super::require_name(name, "method call")?;

        if let Some(target) = target
            && matches!(name, "println" | "print")
            && is_system_out(target)
            && !self.index().contains("System")
            && self.lookup_var("System").is_none()
        {
            let args = self.convert_args(args)?;
            return Ok(KtExpr::call(name, args));
        }

        if args.is_empty() && type_args.is_empty() {
            match (name, target) {
                ("getClass", None) => return Ok(KtExpr::name("javaClass")),
                ("getClass", Some(target)) => {
                    let receiver = self.convert_member_target(target)?;
                    return Ok(KtExpr::field(receiver, "javaClass"));
                }
                ("length", Some(target)) if self.is_string_typed(target) => {
                    let receiver = self.convert_receiver(target)?;
                    return Ok(KtExpr::field(receiver, "length"));
                }
                _ => {}
            }
        }

        if COMPAT_HELPERS.contains(&name) {
            self.record_compat_helper(name);
        }

        let receiver = match target {
            Some(target) => Some(Box::new(self.convert_member_target(target)?)),
            None => None,
        };
        let mut kt_type_args = Vec::with_capacity(type_args.len());
        for ty in type_args {
            kt_type_args.push(self.convert_type(ty, true)?);
        }
        let args = self.convert_args(args)?;
        Ok(KtExpr::Call {
            target: receiver,
            name: name.to_string(),
            type_args: kt_type_args,
            args,
            trailing_lambda: None,
        })
    }

    pub(crate) fn convert_args(&mut self, args: &[Expr]) -> Result<Vec<KtExpr>, ConvertError> {
        args.iter().map(|arg| self.convert_expr(arg)).collect()
    }

    /// `new T(args)`, `outer.new T(args)` and anonymous classes.
    pub(crate) fn convert_new(
        &mut self,
        ty: &TypeRef,
        args: &[Expr],
        body: Option<&[Member]>,
        outer: Option<&Expr>,
    ) -> Result<KtExpr, ConvertError> {
        let kt_args = self.convert_args(args)?;
        if let Some(members) = body {
            return self.convert_anonymous_class(ty, &kt_args, members);
        }
        let TypeRef::Named { args: java_type_args, .. } = ty else {
            return Err(ConvertError::invalid(
                "instance creation",
                format!("cannot instantiate `{ty}`"),
            ));
        };
        let name = self.bare_type_name(ty)?;
        let type_args = self.constructor_type_args(java_type_args)?;
        let target = match outer {
            Some(outer) => Some(Box::new(self.convert_receiver(outer)?)),
            None => None,
        };
        Ok(KtExpr::Call {
            target,
            name,
            type_args,
            args: kt_args,
            trailing_lambda: None,
        })
    }

    /// Explicit type arguments of a constructor call; the diamond has none.
    fn constructor_type_args(&mut self, args: &[TypeArg]) -> Result<Vec<KtType>, ConvertError> {
        args.iter()
            .map(|arg| match arg {
                TypeArg::Type { ty } => self.convert_type(ty, !ty.is_primitive()),
                _ => Err(ConvertError::invalid(
                    "instance creation",
                    "wildcard type argument in a constructor call",
                )),
            })
            .collect()
    }
}
