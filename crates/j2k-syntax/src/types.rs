//! Type references.

use serde::{Deserialize, Serialize};

/// Java primitive types (everything except `void`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
}

impl Primitive {
    /// Java keyword spelling.
    pub const fn java_name(self) -> &'static str {
        match self {
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Char => "char",
            Primitive::Boolean => "boolean",
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean)
    }
}

/// A type as written in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum TypeRef {
    Primitive {
        primitive: Primitive,
    },
    Void,
    /// Class, interface or type-variable reference. `name` may be qualified
    /// (`java.util.List`, `Map.Entry`); type arguments apply to the last
    /// segment.
    Named {
        name: String,
        #[serde(default)]
        args: Vec<TypeArg>,
    },
    Array {
        element: Box<TypeRef>,
    },
    /// `var` locals and implicitly typed lambda parameters.
    Inferred,
}

impl TypeRef {
    /// Last segment of a named type, `None` for anything else.
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name.rsplit('.').next().unwrap_or(name)),
            _ => None,
        }
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive { .. })
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    /// Number of array dimensions and the innermost element type.
    pub fn array_parts(&self) -> (u32, &TypeRef) {
        let mut dims = 0;
        let mut current = self;
        while let TypeRef::Array { element } = current {
            dims += 1;
            current = element;
        }
        (dims, current)
    }
}

/// Type argument of a parameterized type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum TypeArg {
    Type { ty: TypeRef },
    /// `?`
    Wildcard,
    /// `? extends T`
    Extends { bound: TypeRef },
    /// `? super T`
    Super { bound: TypeRef },
}
