//! Fields, methods, constructors and initializers.

use j2k_syntax::{
    ConstructorDecl, ConstructorTarget, Expr, FieldDecl, Literal, Member, MethodDecl, Modifier,
    Modifiers, Param, Primitive, Stmt, TypeKind, TypeRef, UnaryOp,
};

use crate::context::{ConversionContext, ReturnTarget, VarInfo};
use crate::errors::ConvertError;
use crate::ir::{
    Binding, DelegationTarget, KtAnnotation, KtBlock, KtConstructor, KtDecl, KtDelegation,
    KtExpr, KtFunction, KtModifiers, KtParam, KtProperty, KtStmt,
};

use super::analysis::assigned_names;
use super::declarations::{Container, MemberEnv};
use super::modifiers::visibility;
use super::types::{declared_nullable, type_default};

/// Converted members split by destination.
type SplitMembers = (Vec<KtDecl>, Vec<KtDecl>);

/// Final primitive or `String` initialized with a literal.
fn is_const_candidate(ty: &TypeRef, init: Option<&Expr>) -> bool {
    let constant_type = match ty {
        TypeRef::Primitive { .. } => true,
        TypeRef::Named { name, args } => {
            args.is_empty() && (name == "String" || name == "java.lang.String")
        }
        _ => false,
    };
    let literal_init = match init {
        Some(Expr::Literal { value }) => !matches!(value, Literal::Null),
        Some(Expr::Unary {
            op: UnaryOp::Minus,
            operand,
        }) => matches!(operand.as_ref(), Expr::Literal { value } if !matches!(value, Literal::Null | Literal::String { .. } | Literal::Bool { .. })),
        _ => false,
    };
    constant_type && literal_init
}

fn primitive_of(ty: &TypeRef) -> Option<Primitive> {
    match ty {
        TypeRef::Primitive { primitive } => Some(*primitive),
        _ => None,
    }
}

/// Java methods Kotlin requires `override` on even without `@Override`.
pub(crate) fn overrides_any(method: &MethodDecl) -> bool {
    match (method.name.as_str(), method.params.as_slice()) {
        ("toString" | "hashCode", []) => true,
        ("equals", [param]) => {
            matches!(&param.ty, TypeRef::Named { name, .. } if name == "Object" || name == "java.lang.Object")
        }
        _ => false,
    }
}

/// `public static void main(String[] args)`
fn is_main(method: &MethodDecl) -> bool {
    let string_array = |p: &Param| {
        let element = if p.is_varargs {
            &p.ty
        } else if let TypeRef::Array { element } = &p.ty {
            element.as_ref()
        } else {
            return false;
        };
        matches!(element, TypeRef::Named { name, .. } if name == "String" || name == "java.lang.String")
    };
    method.name == "main"
        && method.modifiers.is_static()
        && method.modifiers.has(Modifier::Public)
        && method.return_type == TypeRef::Void
        && matches!(method.params.as_slice(), [p] if string_array(p))
}

impl ConversionContext<'_> {
    /// Convert the members of a type body into (instance, companion) lists.
    pub(crate) fn convert_members(
        &mut self,
        members: &[Member],
        env: &MemberEnv,
    ) -> Result<SplitMembers, ConvertError> {
        let markers = self.overload_markers(members);
        let mut instance = Vec::new();
        let mut companion = Vec::new();
        for (i, member) in members.iter().enumerate() {
            match member {
                Member::Field(field) => {
                    let in_companion = env.has_companion
                        && (field.modifiers.is_static() || env.is_interface_like());
                    let target = if in_companion {
                        &mut companion
                    } else {
                        &mut instance
                    };
                    let properties = self.convert_field(field, env, in_companion)?;
                    target.extend(properties);
                }
                Member::Method(method) => {
                    let in_companion = env.has_companion && method.modifiers.is_static();
                    let function = self.convert_method(method, env, in_companion)?;
                    let target = if in_companion {
                        &mut companion
                    } else {
                        &mut instance
                    };
                    if let Some(marker) = markers.get(&i) {
                        target.push(KtDecl::Comment(marker.clone()));
                    }
                    target.push(KtDecl::Function(function));
                }
                Member::Constructor(ctor) => {
                    instance.push(KtDecl::Constructor(self.convert_constructor(ctor, env)?));
                }
                Member::Initializer(init) => {
                    let body = self.convert_callable_body(&[], &init.body.statements, false, None)?;
                    if init.is_static && env.has_companion {
                        companion.push(KtDecl::Init(body));
                    } else {
                        instance.push(KtDecl::Init(body));
                    }
                }
                Member::Type(decl) => {
                    let container = Container::Member {
                        outer: env.owner_kind,
                    };
                    instance.push(self.convert_type_decl(decl, container)?);
                }
            }
        }
        Ok((instance, companion))
    }

    fn member_visibility(&self, modifiers: &Modifiers, env: &MemberEnv) -> KtModifiers {
        if env.is_interface_like() {
            // Interface members are public unless explicitly private.
            if modifiers.is_private() {
                KtModifiers::PRIVATE
            } else {
                KtModifiers::empty()
            }
        } else {
            visibility(modifiers, env.allows_internal)
        }
    }

    fn convert_field(
        &mut self,
        field: &FieldDecl,
        env: &MemberEnv,
        in_companion: bool,
    ) -> Result<Vec<KtDecl>, ConvertError> {
        let mut annotations = self.convert_annotations(&field.modifiers)?;
        if field.modifiers.has(Modifier::Volatile) {
            annotations.push(KtAnnotation::plain("Volatile"));
        }
        if field.modifiers.has(Modifier::Transient) {
            annotations.push(KtAnnotation::plain("Transient"));
        }
        let base_modifiers = self.member_visibility(&field.modifiers, env);
        let implicitly_final = env.is_interface_like();

        let mut out = Vec::with_capacity(field.declarators.len());
        for declarator in &field.declarators {
            super::require_name(&declarator.name, "field")?;
            let ty = declarator.effective_type(&field.ty);
            let init = declarator.init.as_ref();
            let is_final = field.modifiers.is_final() || implicitly_final;
            let is_const = in_companion && is_final && is_const_candidate(&ty, init);
            let mut modifiers = base_modifiers;
            if is_const {
                modifiers |= KtModifiers::CONST;
            }
            let nullable = !is_const && declared_nullable(&ty, &field.modifiers);
            let kt_ty = self.convert_type(&ty, nullable)?;
            let kt_init = match init {
                Some(init) => self.convert_initializer(init, &ty)?,
                None => type_default(&ty),
            };
            let binding = if is_final && init.is_some() {
                Binding::Val
            } else {
                Binding::Var
            };
            out.push(KtDecl::Property(KtProperty {
                annotations: annotations.clone(),
                modifiers,
                binding,
                name: declarator.name.clone(),
                ty: Some(kt_ty),
                init: Some(kt_init),
            }));
        }
        Ok(out)
    }

    fn convert_method(
        &mut self,
        method: &MethodDecl,
        env: &MemberEnv,
        in_companion: bool,
    ) -> Result<KtFunction, ConvertError> {
        super::require_name(&method.name, "method")?;
        let modifiers_in = &method.modifiers;

        let mut annotations = self.convert_annotations(modifiers_in)?;
        if modifiers_in.has(Modifier::Synchronized) {
            annotations.push(KtAnnotation::plain("Synchronized"));
        }
        if let Some(throws) = self.throws_annotation(&method.throws)? {
            annotations.push(throws);
        }
        if in_companion && is_main(method) {
            annotations.push(KtAnnotation::plain("JvmStatic"));
        }

        let is_static = modifiers_in.is_static();
        let is_override = !is_static
            && method.name != "finalize"
            && (modifiers_in.has_annotation("Override") || overrides_any(method));

        let mut modifiers = self.member_visibility(modifiers_in, env);
        if is_override {
            modifiers.remove(KtModifiers::INTERNAL);
            modifiers |= KtModifiers::OVERRIDE;
        }
        if modifiers_in.is_abstract() && !env.is_interface_like() {
            modifiers |= KtModifiers::ABSTRACT;
        }
        if modifiers_in.has(Modifier::Native) {
            modifiers |= KtModifiers::EXTERNAL;
        }
        let can_be_open = env.owner_open
            && !env.is_interface_like()
            && !modifiers_in.is_final()
            && !modifiers_in.is_private()
            && !is_static
            && !modifiers_in.is_abstract()
            && !is_override
            && method.body.is_some();
        if can_be_open {
            modifiers |= KtModifiers::OPEN;
        }

        let type_params = self.convert_type_params(&method.type_params)?;
        let return_type = self.convert_return_type(&method.return_type, modifiers_in)?;

        self.scoped(|ctx| {
            let params = ctx.convert_params(&method.params)?;
            let body = match &method.body {
                Some(block) => Some(ctx.convert_callable_body(
                    &method.params,
                    &block.statements,
                    false,
                    primitive_of(&method.return_type),
                )?),
                None => None,
            };
            Ok(KtFunction {
                annotations,
                modifiers,
                type_params,
                name: method.name.clone(),
                params,
                return_type,
                body,
            })
        })
    }

    fn convert_constructor(
        &mut self,
        ctor: &ConstructorDecl,
        env: &MemberEnv,
    ) -> Result<KtConstructor, ConvertError> {
        if ctor.name != env.class_name {
            return Err(ConvertError::invalid(
                "constructor",
                format!(
                    "constructor `{}` does not match class `{}`",
                    ctor.name, env.class_name
                ),
            ));
        }
        let mut annotations = self.convert_annotations(&ctor.modifiers)?;
        if let Some(throws) = self.throws_annotation(&ctor.throws)? {
            annotations.push(throws);
        }
        let modifiers = if env.owner_kind == TypeKind::Enum {
            KtModifiers::empty()
        } else {
            self.member_visibility(&ctor.modifiers, env)
        };

        self.scoped(|ctx| {
            let params = ctx.convert_params(&ctor.params)?;
            let statements = &ctor.body.statements;
            let (delegation, skip_first) = match statements.first() {
                Some(Stmt::ConstructorCall { target, args }) => {
                    let mut kt_args = Vec::with_capacity(args.len());
                    for arg in args {
                        kt_args.push(ctx.convert_expr(arg)?);
                    }
                    let target = match target {
                        ConstructorTarget::This => DelegationTarget::This,
                        ConstructorTarget::Super => DelegationTarget::Super,
                    };
                    (
                        Some(KtDelegation {
                            target,
                            args: kt_args,
                        }),
                        true,
                    )
                }
                _ if env.has_superclass => (
                    Some(KtDelegation {
                        target: DelegationTarget::Super,
                        args: Vec::new(),
                    }),
                    false,
                ),
                _ => (None, false),
            };
            let body = ctx.convert_callable_body(&ctor.params, statements, skip_first, None)?;
            Ok(KtConstructor {
                annotations,
                modifiers,
                params,
                delegation,
                body,
            })
        })
    }

    /// Parameters of a method, constructor or lambda, declared in the
    /// current scope.
    pub(crate) fn convert_params(&mut self, params: &[Param]) -> Result<Vec<KtParam>, ConvertError> {
        let mut out = Vec::with_capacity(params.len());
        for (i, param) in params.iter().enumerate() {
            super::require_name(&param.name, "parameter")?;
            if param.is_varargs && i + 1 != params.len() {
                return Err(ConvertError::invalid(
                    "parameter",
                    format!("varargs parameter `{}` is not the last one", param.name),
                ));
            }
            let nullable = declared_nullable(&param.ty, &param.modifiers);
            let ty = self.convert_type(&param.ty, nullable)?;
            let declared = if param.is_varargs {
                VarInfo {
                    ty: TypeRef::Array {
                        element: Box::new(param.ty.clone()),
                    },
                    nullable: false,
                }
            } else {
                VarInfo {
                    ty: param.ty.clone(),
                    nullable,
                }
            };
            self.declare_var(&param.name, declared);
            out.push(KtParam {
                name: param.name.clone(),
                ty,
                vararg: param.is_varargs,
                property: None,
                default: None,
            });
        }
        Ok(out)
    }

    /// Body of a method, constructor or initializer. Parameters reassigned in
    /// the body are shadowed by local `var`s first.
    pub(crate) fn convert_callable_body(
        &mut self,
        params: &[Param],
        statements: &[Stmt],
        skip_first: bool,
        returns: Option<Primitive>,
    ) -> Result<KtBlock, ConvertError> {
        let statements = if skip_first {
            statements.get(1..).unwrap_or_default()
        } else {
            statements
        };
        let assigned = assigned_names(statements);
        let saved_loops = std::mem::take(&mut self.loops);
        self.return_targets.push(ReturnTarget::Function { returns });
        let result = self.scoped(|ctx| {
            let mut out = Vec::new();
            for param in params {
                if assigned.contains(&param.name) {
                    out.push(KtStmt::Local {
                        binding: Binding::Var,
                        name: param.name.clone(),
                        ty: None,
                        init: Some(KtExpr::name(param.name.clone())),
                    });
                }
            }
            ctx.convert_stmts(statements, &mut out)?;
            Ok(KtBlock::new(out))
        });
        self.return_targets.pop();
        self.loops = saved_loops;
        result
    }
}
