//! Type references.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use j2k_syntax::{Modifiers, Primitive, TypeArg, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtExpr, KtType, KtTypeArg};

/// A JDK type with a Kotlin builtin counterpart.
#[derive(Debug)]
pub struct JdkType {
    pub simple: &'static str,
    pub qualified: &'static str,
    pub kotlin: &'static str,
    /// Number of type parameters, for star-projecting raw uses.
    pub arity: usize,
}

const fn jdk(
    simple: &'static str,
    qualified: &'static str,
    kotlin: &'static str,
    arity: usize,
) -> JdkType {
    JdkType {
        simple,
        qualified,
        kotlin,
        arity,
    }
}

static JDK_TYPES: [JdkType; 22] = [
    jdk("Object", "java.lang.Object", "Any", 0),
    jdk("String", "java.lang.String", "String", 0),
    jdk("CharSequence", "java.lang.CharSequence", "CharSequence", 0),
    jdk("Number", "java.lang.Number", "Number", 0),
    jdk("Comparable", "java.lang.Comparable", "Comparable", 1),
    jdk("Throwable", "java.lang.Throwable", "Throwable", 0),
    jdk("Iterable", "java.lang.Iterable", "MutableIterable", 1),
    jdk("Integer", "java.lang.Integer", "Int", 0),
    jdk("Long", "java.lang.Long", "Long", 0),
    jdk("Short", "java.lang.Short", "Short", 0),
    jdk("Byte", "java.lang.Byte", "Byte", 0),
    jdk("Double", "java.lang.Double", "Double", 0),
    jdk("Float", "java.lang.Float", "Float", 0),
    jdk("Character", "java.lang.Character", "Char", 0),
    jdk("Boolean", "java.lang.Boolean", "Boolean", 0),
    jdk("Iterator", "java.util.Iterator", "MutableIterator", 1),
    jdk("Collection", "java.util.Collection", "MutableCollection", 1),
    jdk("List", "java.util.List", "MutableList", 1),
    jdk("Set", "java.util.Set", "MutableSet", 1),
    jdk("Map", "java.util.Map", "MutableMap", 2),
    jdk(
        "Map.Entry",
        "java.util.Map.Entry",
        "MutableMap.MutableEntry",
        2,
    ),
    jdk("Entry", "java.util.Map.Entry", "MutableMap.MutableEntry", 2),
];

/// Lookup by simple (`List`, `Map.Entry`) or qualified name.
static JDK_BY_NAME: Lazy<FxHashMap<&'static str, &'static JdkType>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for ty in &JDK_TYPES {
        map.insert(ty.simple, ty);
        map.insert(ty.qualified, ty);
    }
    map
});

/// Mapping entry for a JDK type name, ignoring what the unit declares.
pub fn jdk_type_by_name(name: &str) -> Option<&'static JdkType> {
    JDK_BY_NAME.get(name).copied()
}

pub(crate) const fn kotlin_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Byte => "Byte",
        Primitive::Short => "Short",
        Primitive::Int => "Int",
        Primitive::Long => "Long",
        Primitive::Float => "Float",
        Primitive::Double => "Double",
        Primitive::Char => "Char",
        Primitive::Boolean => "Boolean",
    }
}

pub(crate) const fn primitive_array(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Byte => "ByteArray",
        Primitive::Short => "ShortArray",
        Primitive::Int => "IntArray",
        Primitive::Long => "LongArray",
        Primitive::Float => "FloatArray",
        Primitive::Double => "DoubleArray",
        Primitive::Char => "CharArray",
        Primitive::Boolean => "BooleanArray",
    }
}

/// Annotations that guarantee a non-null value.
const NOT_NULL_ANNOTATIONS: [&str; 3] = ["NotNull", "Nonnull", "NonNull"];

pub(crate) fn is_not_null_annotated(modifiers: &Modifiers) -> bool {
    NOT_NULL_ANNOTATIONS
        .iter()
        .any(|name| modifiers.has_annotation(name))
}

/// Conservative nullability of a declared Java type.
pub(crate) fn declared_nullable(ty: &TypeRef, modifiers: &Modifiers) -> bool {
    !matches!(
        ty,
        TypeRef::Primitive { .. } | TypeRef::Void | TypeRef::Inferred
    ) && !is_not_null_annotated(modifiers)
}

/// Kotlin value a Java field of this type starts with.
pub(crate) fn type_default(ty: &TypeRef) -> KtExpr {
    let text = match ty {
        TypeRef::Primitive { primitive } => match primitive {
            Primitive::Byte | Primitive::Short | Primitive::Int => "0",
            Primitive::Long => "0L",
            Primitive::Float => "0.0f",
            Primitive::Double => "0.0",
            Primitive::Char => "'\\u0000'",
            Primitive::Boolean => "false",
        },
        _ => "null",
    };
    KtExpr::literal(text)
}

impl ConversionContext<'_> {
    /// JDK mapping for `name` unless the unit declares a class of that
    /// simple name itself. Qualified JDK names always map.
    pub(crate) fn jdk_type(&self, name: &str) -> Option<&'static JdkType> {
        let ty = jdk_type_by_name(name)?;
        if name == ty.qualified {
            return Some(ty);
        }
        let first = name.split('.').next().unwrap_or(name);
        if self.index().contains(first) {
            None
        } else {
            Some(ty)
        }
    }

    /// Convert a type reference. `nullable` applies to the outermost type;
    /// type arguments and array elements are always nullable unless
    /// primitive.
    pub(crate) fn convert_type(
        &mut self,
        ty: &TypeRef,
        nullable: bool,
    ) -> Result<KtType, ConvertError> {
        self.convert_type_with(ty, nullable, true)
    }

    /// Same as [`Self::convert_type`] but with every nested type non-null.
    /// Annotation parameters and catch parameters need this.
    pub(crate) fn convert_type_non_null(&mut self, ty: &TypeRef) -> Result<KtType, ConvertError> {
        self.convert_type_with(ty, false, false)
    }

    fn convert_type_with(
        &mut self,
        ty: &TypeRef,
        nullable: bool,
        nested_nullable: bool,
    ) -> Result<KtType, ConvertError> {
        self.nested(|ctx| match ty {
            TypeRef::Primitive { primitive } => Ok(KtType::simple(kotlin_primitive(*primitive))),
            TypeRef::Void => Err(ConvertError::invalid(
                "type reference",
                "`void` is only valid as a return type",
            )),
            TypeRef::Inferred => Err(ConvertError::invalid(
                "type reference",
                "inferred type outside a local declaration",
            )),
            TypeRef::Named { name, args } => {
                super::require_path(name, "type reference")?;
                let mapped = ctx.jdk_type(name);
                let kotlin_name = mapped.map_or_else(|| name.clone(), |m| m.kotlin.to_string());
                let mut kt_args = Vec::with_capacity(args.len());
                for arg in args {
                    kt_args.push(ctx.convert_type_arg(arg, nested_nullable)?);
                }
                if kt_args.is_empty()
                    && let Some(m) = mapped
                {
                    kt_args.extend(std::iter::repeat_n(KtTypeArg::Star, m.arity));
                }
                Ok(KtType {
                    name: kotlin_name,
                    args: kt_args,
                    nullable,
                })
            }
            TypeRef::Array { element } => match element.as_ref() {
                TypeRef::Primitive { primitive } => {
                    Ok(KtType::simple(primitive_array(*primitive)).with_nullable(nullable))
                }
                other => {
                    let inner = ctx.convert_type_with(other, nested_nullable, nested_nullable)?;
                    Ok(KtType {
                        name: "Array".to_string(),
                        args: vec![KtTypeArg::Type(inner)],
                        nullable,
                    })
                }
            },
        })
    }

    fn convert_type_arg(
        &mut self,
        arg: &TypeArg,
        nested_nullable: bool,
    ) -> Result<KtTypeArg, ConvertError> {
        Ok(match arg {
            TypeArg::Type { ty } => KtTypeArg::Type(self.convert_type_with(
                ty,
                nested_nullable,
                nested_nullable,
            )?),
            TypeArg::Wildcard => KtTypeArg::Star,
            TypeArg::Extends { bound } => {
                KtTypeArg::Out(self.convert_type_with(bound, nested_nullable, nested_nullable)?)
            }
            TypeArg::Super { bound } => {
                KtTypeArg::In(self.convert_type_with(bound, nested_nullable, nested_nullable)?)
            }
        })
    }

    /// Return type of a method; `None` for `void`.
    pub(crate) fn convert_return_type(
        &mut self,
        ty: &TypeRef,
        modifiers: &Modifiers,
    ) -> Result<Option<KtType>, ConvertError> {
        if *ty == TypeRef::Void {
            return Ok(None);
        }
        let nullable = declared_nullable(ty, modifiers);
        self.convert_type(ty, nullable).map(Some)
    }

    /// Kotlin spelling of a type used as a class reference or constructor
    /// name: mapped, without type arguments or nullability.
    pub(crate) fn bare_type_name(&mut self, ty: &TypeRef) -> Result<String, ConvertError> {
        let mut kt = self.convert_type(ty, false)?;
        if matches!(ty, TypeRef::Named { .. }) {
            kt.args.clear();
        }
        Ok(kt.name)
    }

    /// Parameter type with nullability and type arguments erased, used to
    /// detect overloads that collide in Kotlin.
    pub(crate) fn erased_type_name(&self, ty: &TypeRef, varargs: bool) -> String {
        if varargs {
            return match ty {
                TypeRef::Primitive { primitive } => primitive_array(*primitive).to_string(),
                _ => "Array".to_string(),
            };
        }
        match ty {
            TypeRef::Primitive { primitive } => kotlin_primitive(*primitive).to_string(),
            TypeRef::Named { name, .. } => self
                .jdk_type(name)
                .map_or_else(|| name.clone(), |m| m.kotlin.to_string()),
            TypeRef::Array { element } => match element.as_ref() {
                TypeRef::Primitive { primitive } => primitive_array(*primitive).to_string(),
                _ => "Array".to_string(),
            },
            TypeRef::Void => "Unit".to_string(),
            TypeRef::Inferred => "Any".to_string(),
        }
    }
}
