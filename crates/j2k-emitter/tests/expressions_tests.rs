use crate::test_support::*;
use j2k_syntax::{
    BinaryOp, Expr, Member, MethodRefTarget, Modifier, Stmt, TypeRef, UnaryOp,
};

fn name(n: &str) -> Expr {
    Expr::name(n)
}

fn int_local(n: &str, value: &str) -> Stmt {
    Stmt::local(TypeRef::int(), n, Some(Expr::int(value)))
}

fn object_local(n: &str) -> Stmt {
    Stmt::local(TypeRef::named("Object"), n, Some(Expr::null()))
}

#[test]
fn system_out_println_becomes_println() {
    let system_out = Expr::field(name("System"), "out");
    let out = translate_stmts(vec![Stmt::expr(Expr::method(
        system_out,
        "println",
        vec![Expr::string("hi")],
    ))]);
    assert_line(&out, "println(\"hi\")");
}

#[test]
fn string_concatenation_with_non_string_left_operand() {
    let out = translate_stmts(vec![
        int_local("n", "1"),
        Stmt::local(
            TypeRef::string(),
            "s",
            Some(Expr::binary(name("n"), BinaryOp::Add, Expr::string("x"))),
        ),
    ]);
    assert_line(&out, "var s: String? = n.toString() + \"x\"");
}

#[test]
fn reference_equality_only_between_declared_references() {
    let out = translate_stmts(vec![
        object_local("a"),
        object_local("b"),
        int_local("x", "1"),
        Stmt::local(
            TypeRef::boolean(),
            "same",
            Some(Expr::binary(name("a"), BinaryOp::Eq, name("b"))),
        ),
        Stmt::local(
            TypeRef::boolean(),
            "differ",
            Some(Expr::binary(name("a"), BinaryOp::Ne, name("b"))),
        ),
        Stmt::local(
            TypeRef::boolean(),
            "zero",
            Some(Expr::binary(name("x"), BinaryOp::Eq, Expr::int("0"))),
        ),
    ]);
    assert_line(&out, "var same: Boolean = a === b");
    assert_line(&out, "var differ: Boolean = a !== b");
    assert_line(&out, "var zero: Boolean = x == 0");
}

#[test]
fn bitwise_operators_become_infix_calls() {
    let out = translate_stmts(vec![
        int_local("x", "5"),
        Stmt::local(
            TypeRef::int(),
            "a",
            Some(Expr::binary(name("x"), BinaryOp::BitAnd, Expr::int("1"))),
        ),
        Stmt::local(
            TypeRef::int(),
            "b",
            Some(Expr::binary(name("x"), BinaryOp::Shl, Expr::int("2"))),
        ),
        Stmt::local(
            TypeRef::int(),
            "c",
            Some(Expr::binary(
                Expr::binary(name("x"), BinaryOp::Add, Expr::int("1")),
                BinaryOp::UShr,
                Expr::int("3"),
            )),
        ),
        Stmt::local(
            TypeRef::int(),
            "d",
            Some(Expr::unary(UnaryOp::BitNot, name("x"))),
        ),
    ]);
    assert_line(&out, "var a: Int = x and 1");
    assert_line(&out, "var b: Int = x shl 2");
    assert_line(&out, "var c: Int = x + 1 ushr 3");
    assert_line(&out, "var d: Int = x.inv()");
}

#[test]
fn casts() {
    let out = translate_stmts(vec![
        int_local("x", "5"),
        object_local("o"),
        Stmt::local(TypeRef::long(), "l", Some(Expr::cast(TypeRef::long(), name("x")))),
        Stmt::local(
            TypeRef::string(),
            "s",
            Some(Expr::cast(TypeRef::string(), name("o"))),
        ),
    ]);
    assert_line(&out, "var l: Long = x.toLong()");
    assert_line(&out, "var s: String? = o as String?");
}

#[test]
fn conditional_and_instanceof() {
    let out = translate_stmts(vec![
        int_local("x", "5"),
        object_local("o"),
        Stmt::local(
            TypeRef::int(),
            "sign",
            Some(Expr::conditional(
                Expr::binary(name("x"), BinaryOp::Gt, Expr::int("0")),
                Expr::int("1"),
                Expr::int("2"),
            )),
        ),
        Stmt::local(
            TypeRef::boolean(),
            "text",
            Some(Expr::instance_of(name("o"), TypeRef::string())),
        ),
    ]);
    assert_line(&out, "var sign: Int = if (x > 0) 1 else 2");
    assert_line(&out, "var text: Boolean = o is String");
}

#[test]
fn nullable_receivers_get_not_null_assertion() {
    let field = Member::field(&[Modifier::Private], TypeRef::string(), "label", None);
    let unit = class_with_body(
        vec![field],
        vec![
            Stmt::local(TypeRef::string(), "t", Some(Expr::null())),
            Stmt::expr(Expr::method(name("t"), "trim", Vec::new())),
            Stmt::expr(Expr::method(
                Expr::field(Expr::this(), "label"),
                "trim",
                Vec::new(),
            )),
        ],
    );
    let out = translate(&unit);
    assert_line(&out, "t!!.trim()");
    assert_line(&out, "this.label!!.trim()");
}

#[test]
fn string_length_is_a_property() {
    let out = translate_stmts(vec![
        Stmt::final_local(TypeRef::string(), "s", Expr::string("abc")),
        Stmt::local(
            TypeRef::int(),
            "n",
            Some(Expr::method(name("s"), "length", Vec::new())),
        ),
    ]);
    assert_line(&out, "var n: Int = s.length");
}

#[test]
fn array_length_is_size() {
    let out = translate_stmts(vec![
        Stmt::local(
            TypeRef::array_of(TypeRef::int()),
            "arr",
            Some(Expr::NewArray {
                element: TypeRef::int(),
                dims: vec![Some(Expr::int("3"))],
                init: None,
            }),
        ),
        Stmt::local(
            TypeRef::int(),
            "n",
            Some(Expr::field(name("arr"), "length")),
        ),
        Stmt::local(
            TypeRef::int(),
            "first",
            Some(Expr::index(name("arr"), Expr::int("0"))),
        ),
    ]);
    assert_line(&out, "var arr: IntArray? = IntArray(3)");
    assert_line(&out, "var n: Int = arr!!.size");
    assert_line(&out, "var first: Int = arr!![0]");
}

#[test]
fn array_creation() {
    let strings = TypeRef::array_of(TypeRef::string());
    let grid = TypeRef::array_of(TypeRef::array_of(TypeRef::int()));
    let out = translate_stmts(vec![
        Stmt::local(
            TypeRef::array_of(TypeRef::int()),
            "a",
            Some(Expr::ArrayInit {
                elements: vec![Expr::int("1"), Expr::int("2")],
            }),
        ),
        Stmt::local(
            strings.clone(),
            "b",
            Some(Expr::ArrayInit {
                elements: vec![Expr::string("x")],
            }),
        ),
        Stmt::local(
            strings,
            "c",
            Some(Expr::NewArray {
                element: TypeRef::string(),
                dims: vec![Some(Expr::int("4"))],
                init: None,
            }),
        ),
        Stmt::local(
            grid.clone(),
            "d",
            Some(Expr::NewArray {
                element: TypeRef::int(),
                dims: vec![Some(Expr::int("2")), Some(Expr::int("3"))],
                init: None,
            }),
        ),
        Stmt::local(
            grid,
            "e",
            Some(Expr::NewArray {
                element: TypeRef::int(),
                dims: vec![Some(Expr::int("2")), None],
                init: None,
            }),
        ),
    ]);
    assert_line(&out, "var a: IntArray? = intArrayOf(1, 2)");
    assert_line(&out, "var b: Array<String?>? = arrayOf<String?>(\"x\")");
    assert_line(&out, "var c: Array<String?>? = arrayOfNulls<String>(4)");
    assert_line(&out, "var d: Array<IntArray?>? = Array(2) { IntArray(3) }");
    assert_line(&out, "var e: Array<IntArray?>? = arrayOfNulls<IntArray>(2)");
}

#[test]
fn brace_initializer_outside_declaration_is_rejected() {
    let unit = class_with_body(
        Vec::new(),
        vec![Stmt::expr(Expr::method(
            name("list"),
            "add",
            vec![Expr::ArrayInit {
                elements: vec![Expr::int("1")],
            }],
        ))],
    );
    assert!(try_translate(&unit).is_err());
}

#[test]
fn class_literals_and_get_class() {
    let out = translate_stmts(vec![
        Stmt::expr(Expr::call(
            "use",
            vec![Expr::ClassLiteral {
                ty: TypeRef::string(),
            }],
        )),
        Stmt::expr(Expr::call(
            "use",
            vec![Expr::ClassLiteral { ty: TypeRef::int() }],
        )),
        Stmt::expr(Expr::call("use", vec![Expr::call("getClass", Vec::new())])),
    ]);
    assert_line(&out, "use(String::class.java)");
    assert_line(&out, "use(Int::class.javaPrimitiveType)");
    assert_line(&out, "use(javaClass)");
}

#[test]
fn method_references() {
    let out = translate_stmts(vec![
        Stmt::expr(Expr::call(
            "use",
            vec![Expr::MethodRef {
                target: MethodRefTarget::Type {
                    ty: TypeRef::named("ArrayList"),
                },
                name: "new".to_string(),
            }],
        )),
        Stmt::expr(Expr::call(
            "use",
            vec![Expr::MethodRef {
                target: MethodRefTarget::Expr {
                    expr: Box::new(name("Helper")),
                },
                name: "run".to_string(),
            }],
        )),
        Stmt::expr(Expr::call(
            "use",
            vec![Expr::MethodRef {
                target: MethodRefTarget::Type {
                    ty: TypeRef::array_of(TypeRef::int()),
                },
                name: "new".to_string(),
            }],
        )),
    ]);
    assert_line(&out, "use(::ArrayList)");
    assert_line(&out, "use(Helper::run)");
    assert_line(&out, "use(::IntArray)");
}

#[test]
fn jdk_static_members_keep_the_java_class() {
    let out = translate_stmts(vec![Stmt::local(
        TypeRef::int(),
        "max",
        Some(name("Integer.MAX_VALUE")),
    )]);
    assert_line(&out, "var max: Int = java.lang.Integer.MAX_VALUE");
}

#[test]
fn assignment_used_as_value() {
    let out = translate_stmts(vec![
        int_local("x", "0"),
        Stmt::local(
            TypeRef::int(),
            "y",
            Some(Expr::assign(name("x"), Expr::int("3"))),
        ),
    ]);
    assert_line(&out, "var y: Int = 3.also { x = it }");
}

#[test]
fn generic_instance_creation() {
    let map = TypeRef::generic("HashMap", vec![TypeRef::string(), TypeRef::named("Integer")]);
    let out = translate_stmts(vec![Stmt::final_local(
        map.clone(),
        "m",
        Expr::new_object(map, Vec::new()),
    )]);
    assert_line(&out, "val m: HashMap<String?, Int?> = HashMap<String?, Int?>()");
}

#[test]
fn bare_super_is_rejected() {
    let unit = class_with_body(
        Vec::new(),
        vec![Stmt::expr(Expr::call(
            "use",
            vec![Expr::Super { qualifier: None }],
        ))],
    );
    assert!(try_translate(&unit).is_err());
}
