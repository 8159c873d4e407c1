//! Kotlin printer.
//!
//! Renders the Kotlin tree to text with four-space indentation. Declarations
//! and statements end with a newline; expressions never do, but may span
//! several lines when they contain lambdas or object bodies.

use j2k_common::{quote_identifier, quote_path};

use crate::ir::{
    Binding, DelegationTarget, KotlinUnit, KtAnnotation, KtBlock, KtClass, KtClassKind,
    KtConstructor, KtDecl, KtExpr, KtFunction, KtLambda, KtModifiers, KtParam, KtProperty,
    KtStmt, KtSuperType, KtType, KtTypeArg, KtTypeParam,
};

pub struct KotlinPrinter {
    pub(crate) output: String,
    pub(crate) indent_level: u32,
    pub(crate) indent_str: &'static str,
}

impl Default for KotlinPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl KotlinPrinter {
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Render one declaration.
    pub fn render_decl(decl: &KtDecl) -> String {
        let mut printer = Self::new();
        printer.emit_decl(decl);
        printer.finish()
    }

    /// Render one statement.
    pub fn render_stmt(stmt: &KtStmt) -> String {
        let mut printer = Self::new();
        printer.emit_stmt(stmt);
        printer.finish()
    }

    /// Render one expression.
    pub fn render_expr(expr: &KtExpr) -> String {
        let mut printer = Self::new();
        printer.emit_expr(expr);
        printer.finish()
    }

    pub fn render_type(ty: &KtType) -> String {
        let mut printer = Self::new();
        printer.emit_type(ty);
        printer.finish()
    }

    /// Declarations of a unit, separated by blank lines. Package and imports
    /// are the assembler's job.
    pub fn emit_unit_body(&mut self, unit: &KotlinUnit) {
        for (i, decl) in unit.decls.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.emit_decl(decl);
        }
    }

    // =====================================================================
    // Declarations
    // =====================================================================

    pub fn emit_decl(&mut self, decl: &KtDecl) {
        match decl {
            KtDecl::Class(class) => self.emit_class(class),
            KtDecl::Function(function) => self.emit_function(function),
            KtDecl::Property(property) => self.emit_property(property),
            KtDecl::Constructor(ctor) => self.emit_constructor(ctor),
            KtDecl::Init(body) => {
                self.write_indent();
                self.write("init ");
                self.emit_block(body);
                self.write_line();
            }
            KtDecl::Companion(members) => {
                self.write_indent();
                self.write("companion object {");
                self.write_line();
                self.increase_indent();
                self.emit_members(members);
                self.decrease_indent();
                self.write_indent();
                self.write("}");
                self.write_line();
            }
            KtDecl::Comment(text) => {
                self.write_indent();
                self.write("// ");
                self.write(text);
                self.write_line();
            }
            KtDecl::Placeholder { reason, fragment } => {
                self.emit_decl_placeholder(reason, fragment);
            }
        }
    }

    /// Members separated by blank lines, consecutive properties and comments
    /// kept together.
    pub(crate) fn emit_members(&mut self, members: &[KtDecl]) {
        let mut previous: Option<&KtDecl> = None;
        for member in members {
            if let Some(prev) = previous {
                let compact = matches!(prev, KtDecl::Comment(_))
                    || (matches!(prev, KtDecl::Property(_))
                        && matches!(member, KtDecl::Property(_)));
                if !compact {
                    self.write_line();
                }
            }
            self.emit_decl(member);
            previous = Some(member);
        }
    }

    fn emit_annotations(&mut self, annotations: &[KtAnnotation]) {
        for annotation in annotations {
            self.write_indent();
            self.emit_annotation(annotation);
            self.write_line();
        }
    }

    pub(crate) fn emit_annotation(&mut self, annotation: &KtAnnotation) {
        self.write("@");
        self.write(&quote_path(&annotation.name));
        if !annotation.args.is_empty() {
            self.write("(");
            self.emit_expr_list(&annotation.args);
            self.write(")");
        }
    }

    fn emit_modifiers(&mut self, modifiers: KtModifiers) {
        for keyword in modifiers.keywords() {
            self.write(keyword);
            self.write(" ");
        }
    }

    fn emit_type_params(&mut self, params: &[KtTypeParam]) {
        if params.is_empty() {
            return;
        }
        self.write("<");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&quote_identifier(&param.name));
            // Extra bounds need a `where` clause; only the first is kept inline.
            if let Some(bound) = param.bounds.first() {
                self.write(" : ");
                self.emit_type(bound);
            }
        }
        self.write(">");
    }

    fn emit_where_clause(&mut self, params: &[KtTypeParam]) {
        let extra: Vec<(&str, &KtType)> = params
            .iter()
            .flat_map(|p| p.bounds.iter().skip(1).map(move |b| (p.name.as_str(), b)))
            .collect();
        if extra.is_empty() {
            return;
        }
        self.write(" where ");
        for (i, (name, bound)) in extra.into_iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&quote_identifier(name));
            self.write(" : ");
            self.emit_type(bound);
        }
    }

    fn emit_params(&mut self, params: &[KtParam]) {
        self.write("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.vararg {
                self.write("vararg ");
            }
            match param.property {
                Some(Binding::Val) => self.write("val "),
                Some(Binding::Var) => self.write("var "),
                None => {}
            }
            self.write(&quote_identifier(&param.name));
            self.write(": ");
            self.emit_type(&param.ty);
            if let Some(default) = &param.default {
                self.write(" = ");
                self.emit_expr(default);
            }
        }
        self.write(")");
    }

    fn emit_supertypes(&mut self, supertypes: &[KtSuperType]) {
        for (i, supertype) in supertypes.iter().enumerate() {
            self.write(if i == 0 { " : " } else { ", " });
            self.emit_type(&supertype.ty);
            if let Some(args) = &supertype.call_args {
                self.write("(");
                self.emit_expr_list(args);
                self.write(")");
            }
        }
    }

    fn emit_class(&mut self, class: &KtClass) {
        self.emit_annotations(&class.annotations);
        self.write_indent();
        self.emit_modifiers(class.modifiers);
        self.write(match class.kind {
            KtClassKind::Class => "class ",
            KtClassKind::Interface => "interface ",
            KtClassKind::FunInterface => "fun interface ",
            KtClassKind::Enum => "enum class ",
            KtClassKind::Annotation => "annotation class ",
        });
        self.write(&quote_identifier(&class.name));
        self.emit_type_params(&class.type_params);
        if !class.primary_params.is_empty() {
            self.emit_params(&class.primary_params);
        }
        self.emit_supertypes(&class.supertypes);
        self.emit_where_clause(&class.type_params);
        if class.kind == KtClassKind::Annotation && class.members.is_empty() {
            self.write_line();
            return;
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        self.emit_enum_entries(class);
        if !class.enum_entries.is_empty() && !class.members.is_empty() {
            self.write_line();
        }
        self.emit_members(&class.members);
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn emit_enum_entries(&mut self, class: &KtClass) {
        let count = class.enum_entries.len();
        if count == 0 && class.kind == KtClassKind::Enum && !class.members.is_empty() {
            // Members of an enum without constants still follow a `;`.
            self.write_indent();
            self.write(";");
            self.write_line();
            return;
        }
        for (i, entry) in class.enum_entries.iter().enumerate() {
            for annotation in &entry.annotations {
                self.write_indent();
                self.emit_annotation(annotation);
                self.write_line();
            }
            self.write_indent();
            self.write(&quote_identifier(&entry.name));
            if !entry.args.is_empty() {
                self.write("(");
                self.emit_expr_list(&entry.args);
                self.write(")");
            }
            if let Some(body) = &entry.body {
                self.write(" {");
                self.write_line();
                self.increase_indent();
                self.emit_members(body);
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            if i + 1 < count {
                self.write(",");
            } else if !class.members.is_empty() {
                self.write(";");
            }
            self.write_line();
        }
    }

    fn emit_function(&mut self, function: &KtFunction) {
        self.emit_annotations(&function.annotations);
        self.write_indent();
        self.emit_modifiers(function.modifiers);
        self.write("fun ");
        if !function.type_params.is_empty() {
            self.emit_type_params(&function.type_params);
            self.write(" ");
        }
        self.write(&quote_identifier(&function.name));
        self.emit_params(&function.params);
        if let Some(ret) = &function.return_type {
            self.write(": ");
            self.emit_type(ret);
        }
        self.emit_where_clause(&function.type_params);
        if let Some(body) = &function.body {
            self.write(" ");
            self.emit_block(body);
        }
        self.write_line();
    }

    fn emit_property(&mut self, property: &KtProperty) {
        self.emit_annotations(&property.annotations);
        self.write_indent();
        self.emit_modifiers(property.modifiers);
        self.write(match property.binding {
            Binding::Val => "val ",
            Binding::Var => "var ",
        });
        self.write(&quote_identifier(&property.name));
        if let Some(ty) = &property.ty {
            self.write(": ");
            self.emit_type(ty);
        }
        if let Some(init) = &property.init {
            self.write(" = ");
            self.emit_expr(init);
        }
        self.write_line();
    }

    fn emit_constructor(&mut self, ctor: &KtConstructor) {
        self.emit_annotations(&ctor.annotations);
        self.write_indent();
        self.emit_modifiers(ctor.modifiers);
        self.write("constructor");
        self.emit_params(&ctor.params);
        if let Some(delegation) = &ctor.delegation {
            self.write(match delegation.target {
                DelegationTarget::This => " : this(",
                DelegationTarget::Super => " : super(",
            });
            self.emit_expr_list(&delegation.args);
            self.write(")");
        }
        self.write(" ");
        self.emit_block(&ctor.body);
        self.write_line();
    }

    // =====================================================================
    // Types
    // =====================================================================

    pub fn emit_type(&mut self, ty: &KtType) {
        self.write(&quote_path(&ty.name));
        if !ty.args.is_empty() {
            self.write("<");
            for (i, arg) in ty.args.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                match arg {
                    KtTypeArg::Type(t) => self.emit_type(t),
                    KtTypeArg::Out(t) => {
                        self.write("out ");
                        self.emit_type(t);
                    }
                    KtTypeArg::In(t) => {
                        self.write("in ");
                        self.emit_type(t);
                    }
                    KtTypeArg::Star => self.write("*"),
                }
            }
            self.write(">");
        }
        if ty.nullable {
            self.write("?");
        }
    }

    // =====================================================================
    // Statements
    // =====================================================================

    /// `{`, the statements one level deeper, and `}` without a newline.
    pub(crate) fn emit_block(&mut self, block: &KtBlock) {
        self.write("{");
        self.write_line();
        self.increase_indent();
        for stmt in &block.stmts {
            self.emit_stmt(stmt);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    pub fn emit_stmt(&mut self, stmt: &KtStmt) {
        if let KtStmt::Decl(decl) = stmt {
            self.emit_decl(decl);
            return;
        }
        self.write_indent();
        self.emit_stmt_inline(stmt);
        self.write_line();
    }

    /// Statement text starting at the current position, no trailing newline.
    pub(crate) fn emit_stmt_inline(&mut self, stmt: &KtStmt) {
        match stmt {
            KtStmt::Expr(expr) => self.emit_expr(expr),
            KtStmt::Local {
                binding,
                name,
                ty,
                init,
            } => {
                self.write(match binding {
                    Binding::Val => "val ",
                    Binding::Var => "var ",
                });
                self.write(&quote_identifier(name));
                if let Some(ty) = ty {
                    self.write(": ");
                    self.emit_type(ty);
                }
                if let Some(init) = init {
                    self.write(" = ");
                    self.emit_expr(init);
                }
            }
            KtStmt::Assign { target, op, value } => {
                self.emit_expr(target);
                self.write(" ");
                self.write(op);
                self.write(" ");
                self.emit_expr(value);
            }
            KtStmt::If {
                cond,
                then,
                otherwise,
            } => {
                self.write("if (");
                self.emit_expr(cond);
                self.write(") ");
                self.emit_block(then);
                let mut otherwise = otherwise.as_ref();
                while let Some(block) = otherwise {
                    if let [
                        KtStmt::If {
                            cond,
                            then,
                            otherwise: next,
                        },
                    ] = block.stmts.as_slice()
                    {
                        self.write(" else if (");
                        self.emit_expr(cond);
                        self.write(") ");
                        self.emit_block(then);
                        otherwise = next.as_ref();
                    } else {
                        self.write(" else ");
                        self.emit_block(block);
                        otherwise = None;
                    }
                }
            }
            KtStmt::While { cond, body } => {
                self.write("while (");
                self.emit_expr(cond);
                self.write(") ");
                self.emit_block(body);
            }
            KtStmt::DoWhile { body, cond } => {
                self.write("do ");
                self.emit_block(body);
                self.write(" while (");
                self.emit_expr(cond);
                self.write(")");
            }
            KtStmt::For {
                name,
                iterable,
                body,
            } => {
                self.write("for (");
                self.write(&quote_identifier(name));
                self.write(" in ");
                self.emit_expr(iterable);
                self.write(") ");
                self.emit_block(body);
            }
            KtStmt::When { subject, branches } => {
                self.write("when ");
                if let Some(subject) = subject {
                    self.write("(");
                    self.emit_expr(subject);
                    self.write(") ");
                }
                self.write("{");
                self.write_line();
                self.increase_indent();
                for branch in branches {
                    self.write_indent();
                    if branch.conditions.is_empty() {
                        self.write("else");
                    } else {
                        self.emit_expr_list(&branch.conditions);
                    }
                    self.write(" -> ");
                    self.emit_block(&branch.body);
                    self.write_line();
                }
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            KtStmt::Return { label, value } => {
                self.write("return");
                if let Some(label) = label {
                    self.write("@");
                    self.write(label);
                }
                if let Some(value) = value {
                    self.write(" ");
                    self.emit_expr(value);
                }
            }
            KtStmt::Break(label) => {
                self.write("break");
                if let Some(label) = label {
                    self.write("@");
                    self.write(label);
                }
            }
            KtStmt::Continue(label) => {
                self.write("continue");
                if let Some(label) = label {
                    self.write("@");
                    self.write(label);
                }
            }
            KtStmt::Throw(expr) => {
                self.write("throw ");
                self.emit_expr(expr);
            }
            KtStmt::Try {
                block,
                catches,
                finally,
            } => {
                self.write("try ");
                self.emit_block(block);
                for catch in catches {
                    self.write(" catch (");
                    self.write(&quote_identifier(&catch.name));
                    self.write(": ");
                    self.emit_type(&catch.ty);
                    self.write(") ");
                    self.emit_block(&catch.body);
                }
                if let Some(finally) = finally {
                    self.write(" finally ");
                    self.emit_block(finally);
                }
            }
            KtStmt::Labeled { label, body } => {
                self.write(label);
                self.write("@ ");
                self.emit_stmt_inline(body);
            }
            KtStmt::Decl(decl) => {
                // Declarations print whole lines; render them nested here.
                let text = Self::render_decl(decl);
                self.write(text.trim());
            }
        }
    }

    // =====================================================================
    // Expressions
    // =====================================================================

    pub(crate) fn emit_expr_list(&mut self, exprs: &[KtExpr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expr(expr);
        }
    }

    pub fn emit_expr(&mut self, expr: &KtExpr) {
        match expr {
            KtExpr::Literal(text) => self.write(text),
            KtExpr::Name(name) => self.write(&quote_path(name)),
            KtExpr::This(label) => {
                self.write("this");
                if let Some(label) = label {
                    self.write("@");
                    self.write(&quote_identifier(label));
                }
            }
            KtExpr::Super(label) => {
                self.write("super");
                if let Some(label) = label {
                    self.write("@");
                    self.write(&quote_identifier(label));
                }
            }
            KtExpr::Field { target, name } => {
                self.emit_expr(target);
                self.write(".");
                self.write(&quote_identifier(name));
            }
            KtExpr::Call {
                target,
                name,
                type_args,
                args,
                trailing_lambda,
            } => {
                if let Some(target) = target {
                    self.emit_expr(target);
                    self.write(".");
                }
                self.write(&quote_identifier(name));
                if !type_args.is_empty() {
                    self.write("<");
                    for (i, ty) in type_args.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        self.emit_type(ty);
                    }
                    self.write(">");
                }
                if !args.is_empty() || trailing_lambda.is_none() {
                    self.write("(");
                    self.emit_expr_list(args);
                    self.write(")");
                }
                if let Some(lambda) = trailing_lambda {
                    self.write(" ");
                    self.emit_lambda(lambda);
                }
            }
            KtExpr::Index { target, index } => {
                self.emit_expr(target);
                self.write("[");
                self.emit_expr(index);
                self.write("]");
            }
            KtExpr::Prefix { op, operand } => {
                self.write(op);
                self.emit_expr(operand);
            }
            KtExpr::Postfix { op, operand } => {
                self.emit_expr(operand);
                self.write(op);
            }
            KtExpr::Binary { lhs, op, rhs } => {
                self.emit_expr(lhs);
                if *op == ".." {
                    self.write(op);
                } else {
                    self.write(" ");
                    self.write(op);
                    self.write(" ");
                }
                self.emit_expr(rhs);
            }
            KtExpr::Is { expr, ty } => {
                self.emit_expr(expr);
                self.write(" is ");
                self.emit_type(ty);
            }
            KtExpr::As { expr, ty } => {
                self.emit_expr(expr);
                self.write(" as ");
                self.emit_type(ty);
            }
            KtExpr::If {
                cond,
                then,
                otherwise,
            } => {
                self.write("if (");
                self.emit_expr(cond);
                self.write(") ");
                self.emit_expr(then);
                self.write(" else ");
                self.emit_expr(otherwise);
            }
            KtExpr::Lambda(lambda) => self.emit_lambda(lambda),
            KtExpr::ClassRef { ty, java } => {
                self.emit_type(ty);
                self.write("::class");
                if *java {
                    self.write(".java");
                }
            }
            KtExpr::CallableRef { receiver, name } => {
                if let Some(receiver) = receiver {
                    self.emit_expr(receiver);
                }
                self.write("::");
                self.write(&quote_identifier(name));
            }
            KtExpr::Object {
                supertypes,
                members,
            } => {
                self.write("object");
                self.emit_supertypes(supertypes);
                self.write(" {");
                self.write_line();
                self.increase_indent();
                self.emit_members(members);
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            KtExpr::ArrayLiteral(elements) => {
                self.write("[");
                self.emit_expr_list(elements);
                self.write("]");
            }
            KtExpr::NamedArg { name, value } => {
                self.write(&quote_identifier(name));
                self.write(" = ");
                self.emit_expr(value);
            }
            KtExpr::Paren(inner) => {
                self.write("(");
                self.emit_expr(inner);
                self.write(")");
            }
            KtExpr::Placeholder { reason, fragment } => {
                self.emit_expr_placeholder(reason, fragment);
            }
        }
    }

    fn emit_lambda(&mut self, lambda: &KtLambda) {
        if let Some(label) = &lambda.label {
            self.write(label);
            self.write("@");
        }
        self.write("{");
        if !lambda.params.is_empty() {
            self.write(" ");
            for (i, (name, ty)) in lambda.params.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.write(&quote_identifier(name));
                if let Some(ty) = ty {
                    self.write(": ");
                    self.emit_type(ty);
                }
            }
            self.write(" ->");
        }
        if let [single] = lambda.body.as_slice()
            && let Some(inline) = Self::inline_stmt(single)
        {
            self.write(" ");
            self.write(&inline);
            self.write(" }");
            return;
        }
        if lambda.body.is_empty() {
            self.write(" }");
            return;
        }
        self.write_line();
        self.increase_indent();
        for stmt in &lambda.body {
            self.emit_stmt(stmt);
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    /// Single-line rendering of a simple statement, if it has one.
    fn inline_stmt(stmt: &KtStmt) -> Option<String> {
        if !matches!(
            stmt,
            KtStmt::Expr(_) | KtStmt::Assign { .. } | KtStmt::Return { .. } | KtStmt::Throw(_)
        ) {
            return None;
        }
        let mut printer = Self::new();
        printer.emit_stmt_inline(stmt);
        let text = printer.finish();
        (!text.contains('\n')).then_some(text)
    }
}
