use thiserror::Error;

/// Fatal conversion failures.
///
/// Unsupported constructs are not errors: they become placeholders and the
/// rest of the unit still converts. These variants abort the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The tree violates the grammar (a node of the wrong kind in a slot,
    /// a missing mandatory child).
    #[error("malformed syntax tree in {context}: {message}")]
    StructuralInvalid {
        context: &'static str,
        message: String,
    },
    #[error("syntax tree nested deeper than {limit} levels")]
    NestingTooDeep { limit: u32 },
}

impl ConvertError {
    pub(crate) fn invalid(context: &'static str, message: impl Into<String>) -> Self {
        ConvertError::StructuralInvalid {
            context,
            message: message.into(),
        }
    }
}
