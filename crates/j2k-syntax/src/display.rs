//! Single-line Java rendering.
//!
//! Used when a construct cannot be translated and has to be carried over as
//! a commented-out fragment. The output is Java-like text on one line; it is
//! not guaranteed to re-parse.

use std::fmt::{self, Display, Formatter};

use crate::decl::{Annotation, Member, Modifiers, Param, TypeDecl, TypeKind, VarDeclarator};
use crate::expr::{Expr, LambdaBody, Literal, MethodRefTarget};
use crate::stmt::{Block, CaseLabel, ForInit, Resource, Stmt};
use crate::types::{TypeArg, TypeRef};

fn comma_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive { primitive } => f.write_str(primitive.java_name()),
            TypeRef::Void => f.write_str("void"),
            TypeRef::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    comma_list(f, args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeRef::Array { element } => write!(f, "{element}[]"),
            TypeRef::Inferred => f.write_str("var"),
        }
    }
}

impl Display for TypeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type { ty } => write!(f, "{ty}"),
            TypeArg::Wildcard => f.write_str("?"),
            TypeArg::Extends { bound } => write!(f, "? extends {bound}"),
            TypeArg::Super { bound } => write!(f, "? super {bound}"),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int { text }
            | Literal::Long { text }
            | Literal::Float { text }
            | Literal::Double { text } => f.write_str(text),
            Literal::Char { text } => write!(f, "'{text}'"),
            Literal::String { text } => write!(f, "\"{text}\""),
            Literal::Bool { value } => write!(f, "{value}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &arg.name {
                Some(name) => write!(f, "{name} = {}", arg.value)?,
                None => write!(f, "{}", arg.value)?,
            }
        }
        f.write_str(")")
    }
}

impl Display for Modifiers {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for annotation in &self.annotations {
            write!(f, "{annotation} ")?;
        }
        for keyword in &self.keywords {
            write!(f, "{} ", keyword.java_name())?;
        }
        Ok(())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value } => write!(f, "{value}"),
            Expr::Name { name } => f.write_str(name),
            Expr::FieldAccess { target, name } => write!(f, "{target}.{name}"),
            Expr::MethodCall {
                target,
                type_args,
                name,
                args,
            } => {
                if let Some(target) = target {
                    write!(f, "{target}.")?;
                }
                if !type_args.is_empty() {
                    f.write_str("<")?;
                    comma_list(f, type_args)?;
                    f.write_str(">")?;
                }
                write!(f, "{name}(")?;
                comma_list(f, args)?;
                f.write_str(")")
            }
            Expr::New {
                ty,
                args,
                body,
                outer,
            } => {
                if let Some(outer) = outer {
                    write!(f, "{outer}.")?;
                }
                write!(f, "new {ty}(")?;
                comma_list(f, args)?;
                f.write_str(")")?;
                if let Some(body) = body {
                    f.write_str(" {")?;
                    for member in body {
                        write!(f, " {member}")?;
                    }
                    f.write_str(" }")?;
                }
                Ok(())
            }
            Expr::NewArray {
                element,
                dims,
                init,
            } => {
                write!(f, "new {element}")?;
                for dim in dims {
                    match dim {
                        Some(size) => write!(f, "[{size}]")?,
                        None => f.write_str("[]")?,
                    }
                }
                if let Some(init) = init {
                    f.write_str(" {")?;
                    comma_list(f, init)?;
                    f.write_str("}")?;
                }
                Ok(())
            }
            Expr::ArrayInit { elements } => {
                f.write_str("{")?;
                comma_list(f, elements)?;
                f.write_str("}")
            }
            Expr::ArrayAccess { array, index } => write!(f, "{array}[{index}]"),
            Expr::Unary { op, operand } => {
                if op.is_postfix() {
                    write!(f, "{operand}{}", op.symbol())
                } else {
                    write!(f, "{}{operand}", op.symbol())
                }
            }
            Expr::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Expr::Assign { op, target, value } => {
                write!(f, "{target} {} {value}", op.symbol())
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => write!(f, "{cond} ? {then} : {otherwise}"),
            Expr::Cast { ty, expr } => write!(f, "({ty}) {expr}"),
            Expr::InstanceOf { expr, ty } => write!(f, "{expr} instanceof {ty}"),
            Expr::This { qualifier } => match qualifier {
                Some(q) => write!(f, "{q}.this"),
                None => f.write_str("this"),
            },
            Expr::Super { qualifier } => match qualifier {
                Some(q) => write!(f, "{q}.super"),
                None => f.write_str("super"),
            },
            Expr::ClassLiteral { ty } => write!(f, "{ty}.class"),
            Expr::Lambda { params, body } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if param.ty != TypeRef::Inferred {
                        write!(f, "{} ", param.ty)?;
                    }
                    f.write_str(&param.name)?;
                }
                f.write_str(") -> ")?;
                match body {
                    LambdaBody::Expr { expr } => write!(f, "{expr}"),
                    LambdaBody::Block(block) => write!(f, "{block}"),
                }
            }
            Expr::MethodRef { target, name } => match target {
                MethodRefTarget::Expr { expr } => write!(f, "{expr}::{name}"),
                MethodRefTarget::Type { ty } => write!(f, "{ty}::{name}"),
            },
            Expr::Paren { expr } => write!(f, "({expr})"),
            Expr::Unsupported { description, text } => {
                if text.is_empty() {
                    write!(f, "<{description}>")
                } else {
                    f.write_str(text)
                }
            }
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {stmt}")?;
        }
        f.write_str(" }")
    }
}

fn declarators(f: &mut Formatter<'_>, items: &[VarDeclarator]) -> fmt::Result {
    for (i, decl) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&decl.name)?;
        for _ in 0..decl.extra_dims {
            f.write_str("[]")?;
        }
        if let Some(init) = &decl.init {
            write!(f, " = {init}")?;
        }
    }
    Ok(())
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Block(block) => write!(f, "{block}"),
            Stmt::LocalVar(local) => {
                write!(f, "{}{} ", local.modifiers, local.ty)?;
                declarators(f, &local.declarators)?;
                f.write_str(";")
            }
            Stmt::LocalClass(decl) => write!(f, "{decl}"),
            Stmt::Expr { expr } => write!(f, "{expr};"),
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                write!(f, "if ({cond}) {then}")?;
                if let Some(otherwise) = otherwise {
                    write!(f, " else {otherwise}")?;
                }
                Ok(())
            }
            Stmt::While { cond, body } => write!(f, "while ({cond}) {body}"),
            Stmt::DoWhile { body, cond } => write!(f, "do {body} while ({cond});"),
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                f.write_str("for (")?;
                for (i, item) in init.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item {
                        ForInit::LocalVar(local) => {
                            write!(f, "{}{} ", local.modifiers, local.ty)?;
                            declarators(f, &local.declarators)?;
                        }
                        ForInit::Expr { expr } => write!(f, "{expr}")?,
                    }
                }
                f.write_str("; ")?;
                if let Some(cond) = cond {
                    write!(f, "{cond}")?;
                }
                f.write_str("; ")?;
                comma_list(f, update)?;
                write!(f, ") {body}")
            }
            Stmt::ForEach {
                modifiers,
                ty,
                name,
                iterable,
                body,
            } => write!(f, "for ({modifiers}{ty} {name} : {iterable}) {body}"),
            Stmt::Switch { selector, cases } => {
                write!(f, "switch ({selector}) {{")?;
                for case in cases {
                    for label in &case.labels {
                        match label {
                            CaseLabel::Expr { expr } => write!(f, " case {expr}:")?,
                            CaseLabel::Default => f.write_str(" default:")?,
                        }
                    }
                    for stmt in &case.body {
                        write!(f, " {stmt}")?;
                    }
                }
                f.write_str(" }")
            }
            Stmt::Return { value } => match value {
                Some(value) => write!(f, "return {value};"),
                None => f.write_str("return;"),
            },
            Stmt::Break { label } => match label {
                Some(label) => write!(f, "break {label};"),
                None => f.write_str("break;"),
            },
            Stmt::Continue { label } => match label {
                Some(label) => write!(f, "continue {label};"),
                None => f.write_str("continue;"),
            },
            Stmt::Throw { expr } => write!(f, "throw {expr};"),
            Stmt::Try {
                resources,
                block,
                catches,
                finally,
            } => {
                f.write_str("try ")?;
                if !resources.is_empty() {
                    f.write_str("(")?;
                    for (i, resource) in resources.iter().enumerate() {
                        if i > 0 {
                            f.write_str("; ")?;
                        }
                        match resource {
                            Resource::Decl {
                                modifiers,
                                ty,
                                name,
                                init,
                            } => write!(f, "{modifiers}{ty} {name} = {init}")?,
                            Resource::Expr { expr } => write!(f, "{expr}")?,
                        }
                    }
                    f.write_str(") ")?;
                }
                write!(f, "{block}")?;
                for catch in catches {
                    f.write_str(" catch (")?;
                    for (i, ty) in catch.types.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" | ")?;
                        }
                        write!(f, "{ty}")?;
                    }
                    write!(f, " {}) {}", catch.name, catch.body)?;
                }
                if let Some(finally) = finally {
                    write!(f, " finally {finally}")?;
                }
                Ok(())
            }
            Stmt::Synchronized { lock, body } => write!(f, "synchronized ({lock}) {body}"),
            Stmt::Labeled { label, body } => write!(f, "{label}: {body}"),
            Stmt::Assert { cond, message } => match message {
                Some(message) => write!(f, "assert {cond} : {message};"),
                None => write!(f, "assert {cond};"),
            },
            Stmt::Empty => f.write_str(";"),
            Stmt::ConstructorCall { target, args } => {
                f.write_str(match target {
                    crate::stmt::ConstructorTarget::This => "this(",
                    crate::stmt::ConstructorTarget::Super => "super(",
                })?;
                comma_list(f, args)?;
                f.write_str(");")
            }
            Stmt::Unsupported { description, text } => {
                if text.is_empty() {
                    write!(f, "<{description}>")
                } else {
                    f.write_str(text)
                }
            }
        }
    }
}

fn params(f: &mut Formatter<'_>, params: &[Param]) -> fmt::Result {
    f.write_str("(")?;
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if param.is_varargs {
            write!(f, "{}{}... {}", param.modifiers, param.ty, param.name)?;
        } else {
            write!(f, "{}{} {}", param.modifiers, param.ty, param.name)?;
        }
    }
    f.write_str(")")
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Member::Field(field) => {
                write!(f, "{}{} ", field.modifiers, field.ty)?;
                declarators(f, &field.declarators)?;
                f.write_str(";")
            }
            Member::Method(method) => {
                write!(
                    f,
                    "{}{} {}",
                    method.modifiers, method.return_type, method.name
                )?;
                params(f, &method.params)?;
                match &method.body {
                    Some(body) => write!(f, " {body}"),
                    None => f.write_str(";"),
                }
            }
            Member::Constructor(ctor) => {
                write!(f, "{}{}", ctor.modifiers, ctor.name)?;
                params(f, &ctor.params)?;
                write!(f, " {}", ctor.body)
            }
            Member::Initializer(init) => {
                if init.is_static {
                    f.write_str("static ")?;
                }
                write!(f, "{}", init.body)
            }
            Member::Type(decl) => write!(f, "{decl}"),
        }
    }
}

impl Display for TypeDecl {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = match self.kind {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "@interface",
        };
        write!(f, "{}{keyword} {} {{", self.modifiers, self.name)?;
        if !self.enum_constants.is_empty() {
            f.write_str(" ")?;
            for (i, constant) in self.enum_constants.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(&constant.name)?;
            }
            f.write_str(";")?;
        }
        for member in &self.members {
            write!(f, " {member}")?;
        }
        f.write_str(" }")
    }
}
