//! Overloads Kotlin cannot express.
//!
//! Java distinguishes overloads by erased parameter types. After mapping,
//! `f(Integer)` and `f(int)` both take `Int`, and a method `getX()` clashes
//! with the getter Kotlin generates for a property `x`. Such methods are kept
//! as they are and preceded by a marker comment.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use j2k_syntax::{Member, MethodDecl, Primitive, TypeRef};

use crate::context::ConversionContext;
use crate::ir_printer_helpers::MARKER;

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `(name, arity)` of the accessors Kotlin generates for the properties
/// converted from these fields.
fn generated_accessors(members: &[Member]) -> FxHashSet<(String, usize)> {
    let mut accessors = FxHashSet::default();
    for member in members {
        let Member::Field(field) = member else {
            continue;
        };
        if field.modifiers.is_private() || field.modifiers.is_static() {
            continue;
        }
        for declarator in &field.declarators {
            let cap = capitalize(&declarator.name);
            accessors.insert((format!("get{cap}"), 0));
            let ty = declarator.effective_type(&field.ty);
            if ty == (TypeRef::Primitive {
                primitive: Primitive::Boolean,
            }) {
                accessors.insert((format!("is{cap}"), 0));
            }
            let is_val = field.modifiers.is_final() && declarator.init.is_some();
            if !is_val {
                accessors.insert((format!("set{cap}"), 1));
            }
        }
    }
    accessors
}

impl ConversionContext<'_> {
    /// Marker comment per method index of `members` that needs one.
    pub(crate) fn overload_markers(&self, members: &[Member]) -> FxHashMap<usize, String> {
        let accessors = generated_accessors(members);
        let mut seen: FxHashSet<(&str, Vec<String>)> = FxHashSet::default();
        let mut markers = FxHashMap::default();
        for (i, member) in members.iter().enumerate() {
            let Member::Method(method) = member else {
                continue;
            };
            let erased = self.erased_params(method);
            let clashes_accessor = accessors.contains(&(method.name.clone(), method.params.len()));
            let key = (method.name.as_str(), erased.clone());
            let clashes_overload = !seen.insert(key);
            if clashes_overload || clashes_accessor {
                warn!(method = %method.name, "overload cannot be expressed without renaming");
                markers.insert(
                    i,
                    format!(
                        "{MARKER} overload {}({}) cannot be expressed without renaming",
                        method.name,
                        erased.join(", ")
                    ),
                );
            }
        }
        markers
    }

    fn erased_params(&self, method: &MethodDecl) -> Vec<String> {
        method
            .params
            .iter()
            .map(|p| self.erased_type_name(&p.ty, p.is_varargs))
            .collect()
    }
}
