//! Centralized limits for the translator.
//!
//! Recursion in the converter follows the shape of the input tree, so a
//! pathological front end could hand over a tree deep enough to overflow the
//! stack. The converter counts its nesting depth against these limits and
//! fails the request instead.

/// Maximum nesting depth of declarations, statements and expressions the
/// converter will descend into before giving up on a request.
///
/// ```java
/// // 1 + (1 + (1 + (1 + ... 600 levels ... )))
/// ```
pub const MAX_CONVERSION_DEPTH: u32 = 512;

/// Maximum depth for the identifier index walk.
///
/// The binder walks the same statements and expressions as the converter,
/// so it shares the converter limit.
pub const MAX_BINDER_DEPTH: u32 = MAX_CONVERSION_DEPTH;

/// Upper bound on the number of characters of a source fragment copied into
/// a placeholder comment.
pub const MAX_PLACEHOLDER_FRAGMENT_CHARS: usize = 240;
