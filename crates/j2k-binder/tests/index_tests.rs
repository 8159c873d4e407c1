use super::*;
use j2k_syntax::{
    CompilationUnit, ConstructorDecl, Expr, Member, MethodDecl, Stmt, TypeDecl, TypeRef,
};

fn anonymous_runnable() -> Expr {
    Expr::New {
        ty: TypeRef::named("Runnable"),
        args: vec![],
        body: Some(vec![Member::Type(TypeDecl::class("InsideAnonymous"))]),
        outer: None,
    }
}

#[test]
fn empty_unit_yields_empty_index() {
    let index = IdentifierIndex::build(&CompilationUnit::default());
    assert!(index.is_empty());
    assert_eq!(index.len(), 0);
    assert!(index.names().is_empty());
}

#[test]
fn collects_top_level_nested_and_local_names() {
    let method = MethodDecl::new("run", TypeRef::Void).with_body(vec![
        Stmt::LocalClass(TypeDecl::class("Local")),
        Stmt::expr(anonymous_runnable()),
    ]);
    let outer = TypeDecl::class("Outer")
        .with_member(Member::Type(TypeDecl::interface("Callback")))
        .with_member(method.into_member());
    let unit = CompilationUnit::new(Some("p"))
        .with_type(outer)
        .with_type(TypeDecl::enumeration("Color", &["RED", "GREEN"]));

    let index = IdentifierIndex::build(&unit);
    assert_eq!(
        index.names(),
        vec!["Callback", "Color", "InsideAnonymous", "Local", "Outer"]
    );
    assert_eq!(index.kind_of("Callback"), Some(DeclKind::Interface));
    assert_eq!(index.kind_of("String"), None);
    assert!(index.is_enum("Color"));
    assert_eq!(index.enum_constants("Color"), ["RED", "GREEN"]);
    assert!(index.enum_constants("Outer").is_empty());
}

#[test]
fn forward_references_are_visible() {
    // A refers to B, declared after it.
    let a = TypeDecl::class("A").with_member(Member::field(
        &[],
        TypeRef::named("B"),
        "b",
        None,
    ));
    let unit = CompilationUnit::new(None)
        .with_type(a)
        .with_type(TypeDecl::class("B"));
    let index = IdentifierIndex::build(&unit);
    assert!(index.contains("A"));
    assert!(index.contains("B"));
}

#[test]
fn first_declaration_wins_for_duplicates() {
    let ctor = ConstructorDecl::new(
        "Holder",
        vec![],
        vec![Stmt::LocalClass(TypeDecl::enumeration("Node", &["X"]))],
    );
    let holder = TypeDecl::class("Holder")
        .with_member(Member::Type(TypeDecl::class("Node")))
        .with_member(ctor.into_member());
    let index = IdentifierIndex::build(&CompilationUnit::new(None).with_type(holder));
    assert_eq!(index.kind_of("Node"), Some(DeclKind::Class));
    assert_eq!(index.len(), 2);
}

#[test]
fn indexes_are_independent_per_unit() {
    let first = CompilationUnit::new(None).with_type(TypeDecl::class("OnlyInFirst"));
    let second = CompilationUnit::new(None).with_type(TypeDecl::class("OnlyInSecond"));
    let a = IdentifierIndex::build(&first);
    let b = IdentifierIndex::build(&second);
    assert!(a.contains("OnlyInFirst") && !a.contains("OnlyInSecond"));
    assert!(b.contains("OnlyInSecond") && !b.contains("OnlyInFirst"));
}

#[test]
fn deep_expression_nesting_does_not_overflow() {
    let mut expr = Expr::int("0");
    for _ in 0..1_500 {
        expr = expr.paren();
    }
    let method = MethodDecl::new("deep", TypeRef::Void).with_body(vec![Stmt::expr(expr)]);
    let unit = CompilationUnit::new(None).with_type(
        TypeDecl::class("Deep")
            .with_member(method.into_member())
            .with_member(Member::Type(TypeDecl::class("AfterDeep"))),
    );
    let index = IdentifierIndex::build(&unit);
    assert!(index.contains("Deep"));
    assert!(index.contains("AfterDeep"));
}
