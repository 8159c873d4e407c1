//! Array creation and brace initializers.

use j2k_syntax::{Expr, TypeRef};

use crate::context::ConversionContext;
use crate::errors::ConvertError;
use crate::ir::{KtExpr, KtLambda, KtStmt};

use super::types::{kotlin_primitive, primitive_array};

fn wrap_dims(element: &TypeRef, dims: usize) -> TypeRef {
    (0..dims).fold(element.clone(), |ty, _| TypeRef::array_of(ty))
}

impl ConversionContext<'_> {
    /// `{a, b}` for an array of type `ty`: `intArrayOf(a, b)` or
    /// `arrayOf<T?>(a, b)`.
    pub(crate) fn convert_array_literal(
        &mut self,
        elements: &[Expr],
        ty: &TypeRef,
    ) -> Result<KtExpr, ConvertError> {
        let TypeRef::Array { element } = ty else {
            return Err(ConvertError::invalid(
                "array initializer",
                format!("initializer for non-array type `{ty}`"),
            ));
        };
        let mut args = Vec::with_capacity(elements.len());
        for item in elements {
            let converted = match item {
                Expr::ArrayInit { elements } => self.convert_array_literal(elements, element)?,
                other => self.convert_expr(other)?,
            };
            args.push(converted);
        }
        match element.as_ref() {
            TypeRef::Primitive { primitive } => {
                let function = format!("{}ArrayOf", kotlin_primitive(*primitive).to_lowercase());
                Ok(KtExpr::call(function, args))
            }
            other => {
                let element_type = self.convert_type(other, true)?;
                Ok(KtExpr::Call {
                    target: None,
                    name: "arrayOf".to_string(),
                    type_args: vec![element_type],
                    args,
                    trailing_lambda: None,
                })
            }
        }
    }

    pub(crate) fn convert_new_array(
        &mut self,
        element: &TypeRef,
        dims: &[Option<Expr>],
        init: Option<&[Expr]>,
    ) -> Result<KtExpr, ConvertError> {
        if dims.is_empty() {
            return Err(ConvertError::invalid(
                "array creation",
                "array creation without dimensions",
            ));
        }
        if let Some(elements) = init {
            let ty = wrap_dims(element, dims.len());
            return self.convert_array_literal(elements, &ty);
        }
        self.sized_array(element, dims)
    }

    /// `dims[0]` must be a length; later missing lengths leave `null` slots.
    fn sized_array(
        &mut self,
        element: &TypeRef,
        dims: &[Option<Expr>],
    ) -> Result<KtExpr, ConvertError> {
        let Some((Some(length), rest)) = dims.split_first() else {
            return Err(ConvertError::invalid(
                "array creation",
                "missing length in the first dimension",
            ));
        };
        let length = self.convert_expr(length)?;
        match rest.first() {
            None => match element {
                TypeRef::Primitive { primitive } => {
                    Ok(KtExpr::call(primitive_array(*primitive), vec![length]))
                }
                other => self.array_of_nulls(other, length),
            },
            Some(Some(_)) => {
                let inner = self.sized_array(element, rest)?;
                Ok(KtExpr::with_lambda(
                    None,
                    "Array",
                    vec![length],
                    KtLambda::new(Vec::new(), vec![KtStmt::Expr(inner)]),
                ))
            }
            Some(None) => {
                let slot = wrap_dims(element, rest.len());
                self.array_of_nulls(&slot, length)
            }
        }
    }

    fn array_of_nulls(&mut self, slot: &TypeRef, length: KtExpr) -> Result<KtExpr, ConvertError> {
        let slot = self.convert_type(slot, false)?;
        Ok(KtExpr::Call {
            target: None,
            name: "arrayOfNulls".to_string(),
            type_args: vec![slot],
            args: vec![length],
            trailing_lambda: None,
        })
    }
}
