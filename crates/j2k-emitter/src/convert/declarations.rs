//! Type declarations: classes, interfaces, enums, annotation types and
//! anonymous classes.

use rustc_hash::FxHashMap;

use j2k_binder::DeclKind;
use j2k_syntax::{Member, MethodDecl, TypeArg, TypeDecl, TypeKind, TypeRef};

use crate::context::{ConversionContext, TypeFrame, VarInfo};
use crate::errors::ConvertError;
use crate::ir::{
    Binding, KtClass, KtClassKind, KtDecl, KtEnumEntry, KtExpr, KtModifiers, KtParam,
    KtSuperType, KtType, KtTypeArg,
};

use super::members::overrides_any;
use super::modifiers::visibility;
use super::types::declared_nullable;

/// Where a type declaration sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    TopLevel,
    /// Member type of a class-like declaration.
    Member { outer: TypeKind },
    /// Class declared in a block.
    Local,
    Anonymous,
}

impl Container {
    const fn allows_internal(self) -> bool {
        match self {
            Container::TopLevel => true,
            Container::Member { outer } => {
                matches!(outer, TypeKind::Class | TypeKind::Enum)
            }
            Container::Local | Container::Anonymous => false,
        }
    }

    /// Static members can move to a companion object.
    const fn has_companion(self) -> bool {
        matches!(self, Container::TopLevel | Container::Member { .. })
    }
}

/// What member conversion needs to know about the declaration it is in.
#[derive(Debug, Clone)]
pub(crate) struct MemberEnv {
    pub(crate) owner_kind: TypeKind,
    pub(crate) class_name: String,
    /// Owner is `open` or `abstract`, so its methods may be overridden.
    pub(crate) owner_open: bool,
    pub(crate) allows_internal: bool,
    pub(crate) has_companion: bool,
    pub(crate) has_superclass: bool,
    /// Kotlin `inner class`, which cannot hold a companion object.
    pub(crate) is_inner: bool,
}

impl MemberEnv {
    pub(crate) const fn is_interface_like(&self) -> bool {
        matches!(self.owner_kind, TypeKind::Interface | TypeKind::Annotation)
    }
}

/// Interfaces commonly implemented by anonymous classes; used when the index
/// cannot tell whether a supertype needs constructor parentheses.
const KNOWN_INTERFACES: [&str; 16] = [
    "Runnable",
    "Callable",
    "Comparator",
    "Comparable",
    "Iterator",
    "Iterable",
    "Supplier",
    "Consumer",
    "BiConsumer",
    "Function",
    "BiFunction",
    "Predicate",
    "ActionListener",
    "UncaughtExceptionHandler",
    "InvocationHandler",
    "AutoCloseable",
];

/// Fields of a declaration by name, for receiver and equality rules.
fn field_table(members: &[Member]) -> FxHashMap<String, VarInfo> {
    let mut fields = FxHashMap::default();
    for member in members {
        if let Member::Field(field) = member {
            for declarator in &field.declarators {
                let ty = declarator.effective_type(&field.ty);
                let nullable = declared_nullable(&ty, &field.modifiers);
                fields.insert(declarator.name.clone(), VarInfo { ty, nullable });
            }
        }
    }
    fields
}

fn is_static_member(member: &Member) -> bool {
    match member {
        Member::Field(field) => field.modifiers.is_static(),
        Member::Method(method) => method.modifiers.is_static(),
        Member::Initializer(init) => init.is_static,
        Member::Constructor(_) | Member::Type(_) => false,
    }
}

/// An interface a lambda can implement: exactly one abstract non-generic
/// method, and either `@FunctionalInterface` or no supertypes that could
/// add more.
fn is_fun_interface(decl: &TypeDecl) -> bool {
    let abstract_methods: Vec<&MethodDecl> = decl
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Method(method)
                if method.body.is_none()
                    && !method.modifiers.is_static()
                    && !overrides_any(method) =>
            {
                Some(method)
            }
            _ => None,
        })
        .collect();
    let [method] = abstract_methods.as_slice() else {
        return false;
    };
    method.type_params.is_empty()
        && (decl.modifiers.has_annotation("FunctionalInterface") || decl.extends.is_empty())
}

impl ConversionContext<'_> {
    /// Convert a class-like declaration.
    pub(crate) fn convert_type_decl(
        &mut self,
        decl: &TypeDecl,
        container: Container,
    ) -> Result<KtDecl, ConvertError> {
        super::require_name(&decl.name, "type declaration")?;
        self.nested(|ctx| {
            let class = match decl.kind {
                TypeKind::Annotation => ctx.convert_annotation_type(decl, container)?,
                TypeKind::Class | TypeKind::Interface | TypeKind::Enum => {
                    ctx.convert_class_like(decl, container)?
                }
            };
            Ok(KtDecl::Class(class))
        })
    }

    fn convert_class_like(
        &mut self,
        decl: &TypeDecl,
        container: Container,
    ) -> Result<KtClass, ConvertError> {
        let annotations = self.convert_annotations(&decl.modifiers)?;
        let mut modifiers = visibility(&decl.modifiers, container.allows_internal());
        let enum_has_bodies = decl.enum_constants.iter().any(|c| c.body.is_some());
        let owner_open = match decl.kind {
            TypeKind::Class => {
                if decl.modifiers.is_abstract() {
                    modifiers |= KtModifiers::ABSTRACT;
                    true
                } else if !decl.modifiers.is_final() {
                    modifiers |= KtModifiers::OPEN;
                    true
                } else {
                    false
                }
            }
            TypeKind::Enum => enum_has_bodies,
            TypeKind::Interface | TypeKind::Annotation => true,
        };
        let is_inner = decl.kind == TypeKind::Class
            && !decl.modifiers.is_static()
            && matches!(
                container,
                Container::Member {
                    outer: TypeKind::Class | TypeKind::Enum
                }
            );
        if is_inner {
            modifiers |= KtModifiers::INNER;
        }

        let type_params = self.convert_type_params(&decl.type_params)?;
        let has_constructors = decl.constructors().next().is_some();
        let mut supertypes = Vec::new();
        let has_superclass = match decl.kind {
            TypeKind::Class => {
                if decl.extends.len() > 1 {
                    return Err(ConvertError::invalid(
                        "class declaration",
                        format!("class `{}` extends more than one class", decl.name),
                    ));
                }
                for ty in &decl.extends {
                    supertypes.push(KtSuperType {
                        ty: self.convert_supertype(ty)?,
                        call_args: (!has_constructors).then(Vec::new),
                    });
                }
                !decl.extends.is_empty()
            }
            TypeKind::Interface => {
                for ty in &decl.extends {
                    supertypes.push(KtSuperType {
                        ty: self.convert_supertype(ty)?,
                        call_args: None,
                    });
                }
                false
            }
            TypeKind::Enum | TypeKind::Annotation => false,
        };
        for ty in &decl.implements {
            supertypes.push(KtSuperType {
                ty: self.convert_supertype(ty)?,
                call_args: None,
            });
        }

        let env = MemberEnv {
            owner_kind: decl.kind,
            class_name: decl.name.clone(),
            owner_open,
            allows_internal: container.allows_internal(),
            has_companion: container.has_companion(),
            has_superclass,
            is_inner,
        };

        self.push_type(TypeFrame {
            name: decl.name.clone(),
            kind: decl.kind,
            is_static: decl.modifiers.is_static(),
            fields: field_table(&decl.members),
        });
        let result = self.convert_class_body(decl, &env);
        self.pop_type();
        let (enum_entries, members) = result?;

        Ok(KtClass {
            annotations,
            modifiers,
            kind: match decl.kind {
                TypeKind::Class => KtClassKind::Class,
                TypeKind::Interface if is_fun_interface(decl) => KtClassKind::FunInterface,
                TypeKind::Interface => KtClassKind::Interface,
                TypeKind::Enum => KtClassKind::Enum,
                TypeKind::Annotation => KtClassKind::Annotation,
            },
            name: decl.name.clone(),
            type_params,
            primary_params: Vec::new(),
            supertypes,
            enum_entries,
            members,
        })
    }

    fn convert_class_body(
        &mut self,
        decl: &TypeDecl,
        env: &MemberEnv,
    ) -> Result<(Vec<KtEnumEntry>, Vec<KtDecl>), ConvertError> {
        let mut enum_entries = Vec::with_capacity(decl.enum_constants.len());
        for constant in &decl.enum_constants {
            super::require_name(&constant.name, "enum constant")?;
            let annotations = self.convert_annotation_list(&constant.annotations)?;
            let mut args = Vec::with_capacity(constant.args.len());
            for arg in &constant.args {
                args.push(self.convert_expr(arg)?);
            }
            let body = match &constant.body {
                Some(members) => Some(self.convert_anonymous_members(members)?),
                None => None,
            };
            enum_entries.push(KtEnumEntry {
                name: constant.name.clone(),
                annotations,
                args,
                body,
            });
        }

        let (mut members, companion) = self.convert_members(&decl.members, env)?;
        if !companion.is_empty() {
            if env.is_inner {
                let statics = decl
                    .members
                    .iter()
                    .filter(|member| is_static_member(member))
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                let fragment = super::fragment_of(&statics);
                members.push(self.decl_placeholder("static members of an inner class", fragment));
            } else {
                members.push(KtDecl::Companion(companion));
            }
        }
        Ok((enum_entries, members))
    }

    /// Body of an anonymous class or an enum constant.
    pub(crate) fn convert_anonymous_members(
        &mut self,
        members: &[Member],
    ) -> Result<Vec<KtDecl>, ConvertError> {
        let env = MemberEnv {
            owner_kind: TypeKind::Class,
            class_name: String::new(),
            owner_open: false,
            allows_internal: false,
            has_companion: false,
            has_superclass: true,
            is_inner: false,
        };
        self.push_type(TypeFrame {
            name: String::new(),
            kind: TypeKind::Class,
            is_static: false,
            fields: field_table(members),
        });
        let result = self.convert_members(members, &env);
        self.pop_type();
        let (mut instance, statics) = result?;
        instance.extend(statics);
        Ok(instance)
    }

    /// `object : Super(args) { ... }`
    pub(crate) fn convert_anonymous_class(
        &mut self,
        ty: &TypeRef,
        args: &[KtExpr],
        members: &[Member],
    ) -> Result<KtExpr, ConvertError> {
        let supertype = self.convert_supertype(ty)?;
        let call_args = if !args.is_empty() {
            Some(args.to_vec())
        } else {
            let simple = ty.simple_name().unwrap_or_default();
            match self.index().kind_of(simple) {
                Some(DeclKind::Interface | DeclKind::Annotation) => None,
                Some(DeclKind::Class | DeclKind::Enum) => Some(Vec::new()),
                None if KNOWN_INTERFACES.contains(&simple) => None,
                None => Some(Vec::new()),
            }
        };
        let members = self.convert_anonymous_members(members)?;
        Ok(KtExpr::Object {
            supertypes: vec![KtSuperType {
                ty: supertype,
                call_args,
            }],
            members,
        })
    }

    /// Supertypes are never nullable; raw JDK generics get star projections.
    fn convert_supertype(&mut self, ty: &TypeRef) -> Result<KtType, ConvertError> {
        match ty {
            TypeRef::Named { .. } => self.convert_type(ty, false),
            _ => Err(ConvertError::invalid(
                "supertype",
                format!("`{ty}` cannot be a supertype"),
            )),
        }
    }

    /// `annotation class Name(val element: Type = default, ...)`
    fn convert_annotation_type(
        &mut self,
        decl: &TypeDecl,
        container: Container,
    ) -> Result<KtClass, ConvertError> {
        let annotations = self.convert_annotations(&decl.modifiers)?;
        let modifiers = visibility(&decl.modifiers, container.allows_internal());
        let mut params = Vec::new();
        let mut members = Vec::new();
        for member in &decl.members {
            match member {
                Member::Method(element) => {
                    super::require_name(&element.name, "annotation element")?;
                    let ty = self.convert_annotation_element_type(&element.return_type)?;
                    let default = match &element.default_value {
                        Some(value) => Some(self.convert_annotation_value(value)?),
                        None => None,
                    };
                    params.push(KtParam {
                        name: element.name.clone(),
                        ty,
                        vararg: false,
                        property: Some(Binding::Val),
                        default,
                    });
                }
                other => {
                    let fragment = super::fragment_of(other);
                    members.push(self.decl_placeholder(
                        "annotation type members other than elements",
                        fragment,
                    ));
                }
            }
        }
        Ok(KtClass {
            annotations,
            modifiers,
            kind: KtClassKind::Annotation,
            name: decl.name.clone(),
            type_params: Vec::new(),
            primary_params: params,
            supertypes: Vec::new(),
            enum_entries: Vec::new(),
            members,
        })
    }

    /// Non-null element type; `Class<...>` becomes `KClass<...>`.
    fn convert_annotation_element_type(&mut self, ty: &TypeRef) -> Result<KtType, ConvertError> {
        match ty {
            TypeRef::Named { name, args } if name == "Class" || name == "java.lang.Class" => {
                if self.index().contains("Class") && name == "Class" {
                    return self.convert_type_non_null(ty);
                }
                self.record_discovered_import("kotlin.reflect.KClass");
                let arg = match args.first() {
                    Some(TypeArg::Extends { bound }) => {
                        KtTypeArg::Out(self.convert_type_non_null(bound)?)
                    }
                    Some(TypeArg::Type { ty }) => KtTypeArg::Type(self.convert_type_non_null(ty)?),
                    Some(TypeArg::Super { bound }) => {
                        KtTypeArg::In(self.convert_type_non_null(bound)?)
                    }
                    Some(TypeArg::Wildcard) | None => KtTypeArg::Star,
                };
                Ok(KtType {
                    name: "KClass".to_string(),
                    args: vec![arg],
                    nullable: false,
                })
            }
            TypeRef::Array { element } => {
                if matches!(element.as_ref(), TypeRef::Primitive { .. }) {
                    return self.convert_type_non_null(ty);
                }
                let inner = self.convert_annotation_element_type(element)?;
                Ok(KtType {
                    name: "Array".to_string(),
                    args: vec![KtTypeArg::Type(inner)],
                    nullable: false,
                })
            }
            _ => self.convert_type_non_null(ty),
        }
    }
}
