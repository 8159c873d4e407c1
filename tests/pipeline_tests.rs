//! End-to-end tests through the public API.

use j2k::{
    CompilationUnit, JsonFrontEnd, TranslationMode, Translator, generate_kotlin_code,
    translate_to_kotlin,
};
use j2k_syntax::{Expr, Member, MethodDecl, Modifier, Modifiers, Stmt, TypeDecl, TypeRef};
use rayon::prelude::*;

fn public_final(name: &str) -> TypeDecl {
    TypeDecl::class(name).with_modifiers(&[Modifier::Public, Modifier::Final])
}

#[test]
fn forward_reference_to_a_later_sibling_type() {
    // `A` uses `List` before the unit declares its own `List`.
    let a = public_final("A").with_member(Member::field(
        &[Modifier::Private],
        TypeRef::named("List"),
        "items",
        None,
    ));
    let list = public_final("List");
    let out = generate_kotlin_code(&CompilationUnit::new(None).with_type(a).with_type(list))
        .expect("translates");
    assert!(out.contains("private var items: List? = null"), "{out}");
    assert!(!out.contains("MutableList"), "{out}");
}

#[test]
fn unsupported_expression_degrades_locally() {
    let broken = MethodDecl::new("broken", TypeRef::int())
        .with_modifiers(Modifiers::of(&[Modifier::Public]))
        .with_body(vec![Stmt::ret(Some(Expr::Unsupported {
            description: "switch expression".to_string(),
            text: "switch (k) { default -> 1; }".to_string(),
        }))]);
    let fine = MethodDecl::new("fine", TypeRef::int())
        .with_modifiers(Modifiers::of(&[Modifier::Public]))
        .with_body(vec![Stmt::ret(Some(Expr::int("2")))]);
    let unit = CompilationUnit::new(None)
        .with_type(
            public_final("Calc")
                .with_member(broken.into_member())
                .with_member(fine.into_member()),
        )
        .with_type(public_final("Sibling"));
    let out = generate_kotlin_code(&unit).expect("translates");
    assert!(
        out.contains("return TODO(\"j2k: switch expression\") /* switch (k) { default -> 1; } */"),
        "{out}"
    );
    assert!(out.contains("fun fine(): Int {\nreturn 2\n}"), "{out}");
    assert!(out.contains("class Sibling {"), "{out}");
}

#[test]
fn compatibility_import_is_emitted_once_and_first() {
    let call = |recv: &str| {
        Stmt::expr(Expr::method(
            Expr::name(recv),
            "equalsIgnoreCase",
            vec![Expr::string("x")],
        ))
    };
    let method = |name: &str| {
        MethodDecl::new(name, TypeRef::Void)
            .with_modifiers(Modifiers::of(&[Modifier::Public]))
            .with_body(vec![
                Stmt::final_local(TypeRef::string(), "s", Expr::string("a")),
                call("s"),
            ])
            .into_member()
    };
    let unit = CompilationUnit::new(Some("p"))
        .with_import("java.io.File")
        .with_type(public_final("One").with_member(method("a")))
        .with_type(public_final("Two").with_member(method("b")));

    let translator = Translator::default();
    let compat = translator
        .translate_unit(&unit, TranslationMode::with_compatibility_imports())
        .expect("compat");
    assert_eq!(compat.imports, vec!["kotlin.compatibility.*", "java.io.File"]);
    assert_eq!(compat.text.matches("import kotlin.compatibility.*").count(), 1);

    let plain = translator
        .translate_unit(&unit, TranslationMode::plain())
        .expect("plain");
    assert_eq!(plain.imports, vec!["java.io.File"]);
}

#[test]
fn concurrent_requests_do_not_share_identifiers() {
    // Even units declare their own `List`; odd ones use the JDK type.
    let units: Vec<CompilationUnit> = (0..32)
        .map(|i| {
            let user = public_final(&format!("User{i}")).with_member(Member::field(
                &[Modifier::Private],
                TypeRef::named("List"),
                "items",
                None,
            ));
            let unit = CompilationUnit::new(None).with_type(user);
            if i % 2 == 0 {
                unit.with_type(public_final("List"))
            } else {
                unit
            }
        })
        .collect();
    let translator = Translator::default();
    let outputs: Vec<String> = units
        .par_iter()
        .map(|unit| {
            translator
                .translate(unit, TranslationMode::plain())
                .expect("translates")
        })
        .collect();
    for (i, out) in outputs.iter().enumerate() {
        let expected = if i % 2 == 0 {
            "private var items: List? = null"
        } else {
            "private var items: MutableList<*>? = null"
        };
        assert!(out.contains(expected), "unit {i}:\n{out}");
    }
}

#[test]
fn excessive_nesting_fails_the_request() {
    let outcome = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let mut expr = Expr::int("1");
            for _ in 0..2_000 {
                expr = Expr::binary(Expr::int("1"), j2k_syntax::BinaryOp::Add, expr.paren());
            }
            let method = MethodDecl::new("deep", TypeRef::int())
                .with_modifiers(Modifiers::of(&[Modifier::Public]))
                .with_body(vec![Stmt::ret(Some(expr))]);
            let unit =
                CompilationUnit::new(None).with_type(public_final("Deep").with_member(method.into_member()));
            generate_kotlin_code(&unit).map_err(|e| e.to_string())
        })
        .expect("spawn")
        .join()
        .expect("no panic");
    let err = outcome.expect_err("too deep");
    assert!(err.contains("nested deeper than"), "{err}");
}

#[test]
fn json_front_end_end_to_end() {
    let json = r#"{
        "package": "demo",
        "imports": [{ "path": "java.util", "isWildcard": true }],
        "types": [{
            "kind": "class",
            "name": "Greeter",
            "modifiers": { "keywords": ["public"] },
            "members": [{
                "node": "method",
                "modifiers": { "keywords": ["public"] },
                "returnType": { "node": "void" },
                "name": "greet",
                "params": [{ "ty": { "node": "named", "name": "String" }, "name": "who" }],
                "body": { "statements": [{
                    "node": "expr",
                    "expr": {
                        "node": "methodCall",
                        "target": { "node": "name", "name": "System.out" },
                        "name": "println",
                        "args": [{ "node": "name", "name": "who" }]
                    }
                }]}
            }]
        }]
    }"#;
    let expected = "package demo\nimport java.util.*\nopen class Greeter {\nopen fun greet(who: String?) {\nprintln(who)\n}\n}";
    assert_eq!(translate_to_kotlin(json).expect("translates"), expected);

    let unit = JsonFrontEnd::default().parse(json).expect("parses");
    let again = Translator::default()
        .translate(&unit, TranslationMode::plain())
        .expect("translates");
    assert_eq!(again, expected);
}
