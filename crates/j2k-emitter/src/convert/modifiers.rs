//! Modifier and annotation mapping.

use j2k_syntax::{Annotation, Expr, Modifier, Modifiers, TypeParam, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtAnnotation, KtExpr, KtModifiers, KtTypeParam};

/// Annotations that only carry information the Kotlin output expresses in
/// syntax (`override`, nullability) and are never re-emitted.
const CONSUMED_ANNOTATIONS: [&str; 8] = [
    "Override",
    "NotNull",
    "Nonnull",
    "NonNull",
    "Nullable",
    "CheckForNull",
    "FunctionalInterface",
    "SafeVarargs",
];

/// Java visibility keywords to Kotlin. Package-private becomes `internal`
/// where the declaration site allows it.
pub(crate) fn visibility(modifiers: &Modifiers, allows_internal: bool) -> KtModifiers {
    if modifiers.has(Modifier::Private) {
        KtModifiers::PRIVATE
    } else if modifiers.has(Modifier::Protected) {
        KtModifiers::PROTECTED
    } else if modifiers.has(Modifier::Public) || !allows_internal {
        KtModifiers::empty()
    } else {
        KtModifiers::INTERNAL
    }
}

impl ConversionContext<'_> {
    /// Re-emitted annotations of a declaration.
    pub(crate) fn convert_annotations(
        &mut self,
        modifiers: &Modifiers,
    ) -> Result<Vec<KtAnnotation>, ConvertError> {
        self.convert_annotation_list(&modifiers.annotations)
    }

    pub(crate) fn convert_annotation_list(
        &mut self,
        annotations: &[Annotation],
    ) -> Result<Vec<KtAnnotation>, ConvertError> {
        let mut out = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            super::require_path(&annotation.name, "annotation")?;
            let simple = annotation.simple_name();
            if CONSUMED_ANNOTATIONS.contains(&simple) {
                continue;
            }
            match simple {
                "Deprecated" => out.push(KtAnnotation {
                    name: "Deprecated".to_string(),
                    args: vec![KtExpr::literal("\"\"")],
                }),
                "SuppressWarnings" => {
                    let mut args = Vec::new();
                    for arg in &annotation.args {
                        match &arg.value {
                            Expr::ArrayInit { elements } => {
                                for element in elements {
                                    args.push(self.convert_annotation_value(element)?);
                                }
                            }
                            value => args.push(self.convert_annotation_value(value)?),
                        }
                    }
                    out.push(KtAnnotation {
                        name: "Suppress".to_string(),
                        args,
                    });
                }
                _ => {
                    let mut args = Vec::with_capacity(annotation.args.len());
                    for arg in &annotation.args {
                        let value = self.convert_annotation_value(&arg.value)?;
                        args.push(match &arg.name {
                            Some(name) if name != "value" => {
                                super::require_name(name, "annotation argument")?;
                                KtExpr::NamedArg {
                                    name: name.clone(),
                                    value: Box::new(value),
                                }
                            }
                            _ => value,
                        });
                    }
                    out.push(KtAnnotation {
                        name: annotation.name.clone(),
                        args,
                    });
                }
            }
        }
        Ok(out)
    }

    /// Annotation argument or element default: array initializers become
    /// collection literals and class literals drop `.java`.
    pub(crate) fn convert_annotation_value(&mut self, value: &Expr) -> Result<KtExpr, ConvertError> {
        match value {
            Expr::ArrayInit { elements } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.convert_annotation_value(element)?);
                }
                Ok(KtExpr::ArrayLiteral(items))
            }
            Expr::ClassLiteral { ty } if matches!(ty, TypeRef::Named { .. }) => {
                Ok(KtExpr::ClassRef {
                    ty: self.convert_type_non_null(ty).map(|mut kt| {
                        kt.args.clear();
                        kt
                    })?,
                    java: false,
                })
            }
            other => self.convert_expr(other),
        }
    }

    /// `@Throws(X::class, ...)` for a non-empty `throws` clause.
    pub(crate) fn throws_annotation(
        &mut self,
        throws: &[TypeRef],
    ) -> Result<Option<KtAnnotation>, ConvertError> {
        if throws.is_empty() {
            return Ok(None);
        }
        let mut args = Vec::with_capacity(throws.len());
        for ty in throws {
            let mut kt = self.convert_type_non_null(ty)?;
            kt.args.clear();
            args.push(KtExpr::ClassRef { ty: kt, java: false });
        }
        Ok(Some(KtAnnotation {
            name: "Throws".to_string(),
            args,
        }))
    }

    /// `<T : Bound?>`
    pub(crate) fn convert_type_params(
        &mut self,
        params: &[TypeParam],
    ) -> Result<Vec<KtTypeParam>, ConvertError> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            super::require_name(&param.name, "type parameter")?;
            let mut bounds = Vec::with_capacity(param.bounds.len());
            for bound in &param.bounds {
                bounds.push(self.convert_type(bound, true)?);
            }
            out.push(KtTypeParam {
                name: param.name.clone(),
                bounds,
            });
        }
        Ok(out)
    }
}
