//! Translation Benchmark
//!
//! Whole-pipeline throughput: index, convert, assemble, normalize.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use j2k::{CompilationUnit, TranslationMode, Translator};
use j2k_syntax::{
    AssignOp, BinaryOp, Expr, ForInit, LocalVarDecl, Member, MethodDecl, Modifier, Modifiers,
    Stmt, TypeDecl, TypeRef, UnaryOp, VarDeclarator,
};

// =============================================================================
// Generated units
// =============================================================================

/// `for (int i = 0; i < n; i++) { sum += i; }`
fn counting_loop() -> Stmt {
    Stmt::For {
        init: vec![ForInit::LocalVar(LocalVarDecl {
            modifiers: Modifiers::default(),
            ty: TypeRef::int(),
            declarators: vec![VarDeclarator {
                name: "i".to_string(),
                extra_dims: 0,
                init: Some(Expr::int("0")),
            }],
        })],
        cond: Some(Expr::binary(Expr::name("i"), BinaryOp::Lt, Expr::name("n"))),
        update: vec![Expr::unary(UnaryOp::PostInc, Expr::name("i"))],
        body: Box::new(Stmt::expr(Expr::compound(
            AssignOp::Add,
            Expr::name("sum"),
            Expr::name("i"),
        ))),
    }
}

fn method(index: usize, statements: usize) -> Member {
    let mut body = vec![Stmt::local(TypeRef::int(), "sum", Some(Expr::int("0")))];
    for s in 0..statements {
        body.push(Stmt::local(
            TypeRef::string(),
            format!("v{s}"),
            Some(Expr::binary(
                Expr::name("sum"),
                BinaryOp::Add,
                Expr::string(format!("item {s}")),
            )),
        ));
    }
    body.push(counting_loop());
    body.push(Stmt::ret(Some(Expr::name("sum"))));
    MethodDecl::new(format!("compute{index}"), TypeRef::int())
        .with_modifiers(Modifiers::of(&[Modifier::Public]))
        .with_param(TypeRef::int(), "n")
        .with_body(body)
        .into_member()
}

/// One class with `methods` methods of `statements` statements each.
fn generate_unit(methods: usize, statements: usize) -> CompilationUnit {
    let mut class = TypeDecl::class("Generated")
        .with_modifiers(&[Modifier::Public])
        .with_member(Member::field(
            &[Modifier::Private],
            TypeRef::generic("List", vec![TypeRef::string()]),
            "names",
            None,
        ));
    for m in 0..methods {
        class = class.with_member(method(m, statements));
    }
    CompilationUnit::new(Some("bench"))
        .with_import("java.util.List")
        .with_type(class)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_translate(c: &mut Criterion) {
    let translator = Translator::default();
    let mut group = c.benchmark_group("translate");
    for methods in [1usize, 10, 100] {
        let unit = generate_unit(methods, 20);
        let bytes = translator
            .translate(&unit, TranslationMode::plain())
            .map(|text| text.len())
            .unwrap_or_default();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(methods), &unit, |b, unit| {
            b.iter(|| black_box(translator.translate(unit, TranslationMode::plain())))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let translator = Translator::default();
    let units: Vec<CompilationUnit> = (0..64).map(|_| generate_unit(10, 10)).collect();
    c.bench_function("translate_batch_64", |b| {
        b.iter(|| black_box(translator.translate_batch(&units, TranslationMode::plain())))
    });
}

criterion_group!(benches, bench_translate, bench_batch);
criterion_main!(benches);
