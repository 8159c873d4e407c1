use super::*;

#[test]
fn renders_generic_and_array_types() {
    let ty = TypeRef::generic(
        "Map",
        vec![TypeRef::string(), TypeRef::array_of(TypeRef::int())],
    );
    assert_eq!(ty.to_string(), "Map<String, int[]>");

    let wildcard = TypeRef::Named {
        name: "List".into(),
        args: vec![TypeArg::Extends {
            bound: TypeRef::named("Number"),
        }],
    };
    assert_eq!(wildcard.to_string(), "List<? extends Number>");
}

#[test]
fn renders_expressions_on_one_line() {
    let expr = Expr::assign(
        Expr::name("x"),
        Expr::conditional(
            Expr::binary(Expr::name("a"), BinaryOp::Gt, Expr::int("0")),
            Expr::method(Expr::name("list"), "get", vec![Expr::int("0")]),
            Expr::null(),
        ),
    );
    assert_eq!(expr.to_string(), "x = a > 0 ? list.get(0) : null");
}

#[test]
fn renders_postfix_and_prefix_operators() {
    assert_eq!(
        Expr::unary(UnaryOp::PostInc, Expr::name("i")).to_string(),
        "i++"
    );
    assert_eq!(
        Expr::unary(UnaryOp::BitNot, Expr::name("m")).to_string(),
        "~m"
    );
}

#[test]
fn renders_switch_with_fallthrough() {
    let stmt = Stmt::Switch {
        selector: Expr::name("k"),
        cases: vec![
            SwitchCase {
                labels: vec![CaseLabel::Expr {
                    expr: Expr::int("1"),
                }],
                body: vec![Stmt::expr(Expr::call("a", vec![]))],
            },
            SwitchCase {
                labels: vec![CaseLabel::Default],
                body: vec![Stmt::brk()],
            },
        ],
    };
    assert_eq!(
        stmt.to_string(),
        "switch (k) { case 1: a(); default: break; }"
    );
}

#[test]
fn renders_try_with_resources_and_multi_catch() {
    let stmt = Stmt::Try {
        resources: vec![Resource::Decl {
            modifiers: Modifiers::default(),
            ty: TypeRef::named("Reader"),
            name: "r".into(),
            init: Expr::call("open", vec![]),
        }],
        block: Block::new(vec![Stmt::expr(Expr::method(
            Expr::name("r"),
            "read",
            vec![],
        ))]),
        catches: vec![CatchClause {
            modifiers: Modifiers::default(),
            types: vec![TypeRef::named("IOException"), TypeRef::named("Error")],
            name: "e".into(),
            body: Block::default(),
        }],
        finally: None,
    };
    assert_eq!(
        stmt.to_string(),
        "try (Reader r = open()) { r.read(); } catch (IOException | Error e) { }"
    );
}

#[test]
fn renders_members_with_modifiers() {
    let field = Member::field(
        &[Modifier::Private, Modifier::Static],
        TypeRef::int(),
        "count",
        Some(Expr::int("0")),
    );
    assert_eq!(field.to_string(), "private static int count = 0;");

    let method = MethodDecl::new("run", TypeRef::Void)
        .with_modifiers(Modifiers::of(&[Modifier::Public]).with_annotation("Override"))
        .into_member();
    assert_eq!(method.to_string(), "@Override public void run() { }");
}

#[test]
fn unsupported_prefers_source_text() {
    let with_text = Expr::Unsupported {
        description: "switch expression".into(),
        text: "switch (x) { case 1 -> 2; }".into(),
    };
    assert_eq!(with_text.to_string(), "switch (x) { case 1 -> 2; }");

    let without_text = Stmt::Unsupported {
        description: "yield".into(),
        text: String::new(),
    };
    assert_eq!(without_text.to_string(), "<yield>");
}

#[test]
fn effective_type_folds_c_style_dims() {
    let decl = VarDeclarator {
        name: "grid".into(),
        extra_dims: 2,
        init: None,
    };
    let ty = decl.effective_type(&TypeRef::int());
    assert_eq!(ty.to_string(), "int[][]");
    let (dims, element) = ty.array_parts();
    assert_eq!(dims, 2);
    assert_eq!(element, &TypeRef::int());
}
