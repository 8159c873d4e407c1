//! Kotlin keyword table.
//!
//! Java identifiers that collide with Kotlin hard keywords have to be
//! back-quoted in the output. Soft and modifier keywords (`open`, `data`,
//! `value`, `by`, ...) are legal identifiers in Kotlin and stay as they are.

/// Kotlin hard keywords that are *not* Java keywords.
///
/// Java keywords (`class`, `if`, `this`, ...) can never appear as identifiers
/// in a well-formed Java tree, so only the Kotlin-only words matter here.
const KOTLIN_ONLY_HARD_KEYWORDS: [&str; 10] = [
    "as", "fun", "in", "is", "object", "typealias", "typeof", "val", "var", "when",
];

/// Returns `true` if `name` is a Kotlin hard keyword that needs quoting.
pub fn is_hard_keyword(name: &str) -> bool {
    KOTLIN_ONLY_HARD_KEYWORDS.contains(&name)
}

/// Quote a simple identifier if it is a Kotlin hard keyword.
///
/// ```
/// use j2k_common::quote_identifier;
/// assert_eq!(quote_identifier("in"), "`in`");
/// assert_eq!(quote_identifier("count"), "count");
/// ```
pub fn quote_identifier(name: &str) -> String {
    if is_hard_keyword(name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

/// Quote every segment of a dotted path (package names, qualified types).
///
/// A trailing `*` segment of a wildcard import is left alone.
pub fn quote_path(path: &str) -> String {
    path.split('.')
        .map(|segment| {
            if segment == "*" {
                segment.to_string()
            } else {
                quote_identifier(segment)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
