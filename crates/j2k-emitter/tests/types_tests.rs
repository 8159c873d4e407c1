use crate::convert::convert_literal;
use crate::test_support::*;
use j2k_syntax::{
    FieldDecl, Literal, Member, Modifier, Modifiers, TypeArg, TypeDecl, TypeRef, VarDeclarator,
};

fn literal(value: Literal) -> String {
    convert_literal(&value).expect("literal converts")
}

fn int(text: &str) -> String {
    literal(Literal::Int {
        text: text.to_string(),
    })
}

fn private_field(ty: TypeRef, name: &str) -> Member {
    Member::field(&[Modifier::Private], ty, name, None)
}

fn field_with(modifiers: Modifiers, ty: TypeRef, name: &str, init: Option<j2k_syntax::Expr>) -> Member {
    Member::Field(FieldDecl {
        modifiers,
        ty,
        declarators: vec![VarDeclarator {
            name: name.to_string(),
            extra_dims: 0,
            init,
        }],
    })
}

fn translate_fields(fields: Vec<Member>) -> String {
    let mut class = final_class("Test");
    for field in fields {
        class = class.with_member(field);
    }
    translate(&unit_of(class))
}

#[test]
fn integer_literals() {
    assert_eq!(int("42"), "42");
    assert_eq!(int("017"), "15");
    assert_eq!(int("0"), "0");
    assert_eq!(int("0x7FFFFFFF"), "0x7FFFFFFF");
    assert_eq!(int("0xFFFFFFFF"), "0xFFFFFFFF.toInt()");
    assert_eq!(int("037777777777"), "-1");
    assert_eq!(int("1_000"), "1_000");
}

#[test]
fn long_literals_use_upper_case_suffix() {
    let long = |text: &str| {
        literal(Literal::Long {
            text: text.to_string(),
        })
    };
    assert_eq!(long("10l"), "10L");
    assert_eq!(long("010L"), "8L");
    assert_eq!(long("0xFFFFFFFFFFFFFFFFL"), "-1L");
}

#[test]
fn floating_literals() {
    let double = |text: &str| {
        literal(Literal::Double {
            text: text.to_string(),
        })
    };
    let float = |text: &str| {
        literal(Literal::Float {
            text: text.to_string(),
        })
    };
    assert_eq!(double("1d"), "1.0");
    assert_eq!(double("1.5"), "1.5");
    assert_eq!(double("1e3"), "1e3");
    assert_eq!(double(".5"), "0.5");
    assert_eq!(double("1."), "1.0");
    assert_eq!(float("1.5f"), "1.5f");
    assert_eq!(float("1.f"), "1.0f");
}

#[test]
fn out_of_range_integer_is_rejected() {
    let result = convert_literal(&Literal::Int {
        text: "0x1FFFFFFFF".to_string(),
    });
    assert!(result.is_err());
}

#[test]
fn string_and_char_escapes() {
    let string = |text: &str| {
        literal(Literal::String {
            text: text.to_string(),
        })
    };
    let ch = |text: &str| {
        literal(Literal::Char {
            text: text.to_string(),
        })
    };
    assert_eq!(string("price $5"), "\"price \\$5\"");
    assert_eq!(string("\\101"), "\"\\u0041\"");
    assert_eq!(string("tab\\there"), "\"tab\\there\"");
    assert_eq!(ch("\\f"), "'\\u000c'");
    assert_eq!(ch("$"), "'$'");
    assert_eq!(ch("\\uuu0041"), "'\\u0041'");
}

#[test]
fn primitive_and_boxed_fields() {
    let out = translate_fields(vec![
        private_field(TypeRef::int(), "count"),
        private_field(TypeRef::named("Integer"), "boxed"),
        private_field(TypeRef::boolean(), "flag"),
        private_field(TypeRef::char(), "c"),
    ]);
    assert_line(&out, "private var count: Int = 0");
    assert_line(&out, "private var boxed: Int? = null");
    assert_line(&out, "private var flag: Boolean = false");
    assert_line(&out, "private var c: Char = '\\u0000'");
}

#[test]
fn collection_types_map_to_mutable_builtins() {
    let out = translate_fields(vec![
        private_field(TypeRef::generic("List", vec![TypeRef::string()]), "names"),
        private_field(TypeRef::named("Map"), "raw"),
        private_field(
            TypeRef::generic(
                "Map.Entry",
                vec![TypeRef::string(), TypeRef::named("Integer")],
            ),
            "entry",
        ),
        private_field(TypeRef::named("Object"), "any"),
    ]);
    assert_line(&out, "private var names: MutableList<String?>? = null");
    assert_line(&out, "private var raw: MutableMap<*, *>? = null");
    assert_line(
        &out,
        "private var entry: MutableMap.MutableEntry<String?, Int?>? = null",
    );
    assert_line(&out, "private var any: Any? = null");
}

#[test]
fn wildcards_become_projections() {
    let out = translate_fields(vec![
        private_field(
            TypeRef::Named {
                name: "List".to_string(),
                args: vec![TypeArg::Extends {
                    bound: TypeRef::named("Number"),
                }],
            },
            "numbers",
        ),
        private_field(
            TypeRef::Named {
                name: "Comparable".to_string(),
                args: vec![TypeArg::Super {
                    bound: TypeRef::string(),
                }],
            },
            "cmp",
        ),
        private_field(
            TypeRef::Named {
                name: "Set".to_string(),
                args: vec![TypeArg::Wildcard],
            },
            "anything",
        ),
    ]);
    assert_line(&out, "private var numbers: MutableList<out Number?>? = null");
    assert_line(&out, "private var cmp: Comparable<in String?>? = null");
    assert_line(&out, "private var anything: MutableSet<*>? = null");
}

#[test]
fn arrays() {
    let out = translate_fields(vec![
        private_field(TypeRef::array_of(TypeRef::int()), "ints"),
        private_field(TypeRef::array_of(TypeRef::string()), "strings"),
        private_field(
            TypeRef::array_of(TypeRef::array_of(TypeRef::double())),
            "grid",
        ),
    ]);
    assert_line(&out, "private var ints: IntArray? = null");
    assert_line(&out, "private var strings: Array<String?>? = null");
    assert_line(&out, "private var grid: Array<DoubleArray?>? = null");
}

#[test]
fn not_null_annotation_removes_nullability() {
    let modifiers = Modifiers::of(&[Modifier::Private]).with_annotation("NotNull");
    let out = translate_fields(vec![field_with(
        modifiers,
        TypeRef::string(),
        "name",
        Some(j2k_syntax::Expr::string("x")),
    )]);
    assert_line(&out, "private var name: String = \"x\"");
    assert!(!out.contains("@NotNull"));
}

#[test]
fn unit_declared_type_shadows_jdk_mapping() {
    let class = final_class("Test").with_member(private_field(TypeRef::named("List"), "items"));
    let unit = unit_of(class).with_type(TypeDecl::class("List"));
    let out = translate(&unit);
    assert_line(&out, "private var items: List? = null");
}

#[test]
fn keyword_identifiers_are_quoted() {
    let out = translate_fields(vec![private_field(TypeRef::int(), "in")]);
    assert_line(&out, "private var `in`: Int = 0");
}

#[test]
fn static_final_literals_become_constants() {
    let keywords = [Modifier::Public, Modifier::Static, Modifier::Final];
    let out = translate_fields(vec![
        Member::field(&keywords, TypeRef::int(), "MAX", Some(j2k_syntax::Expr::int("10"))),
        Member::field(
            &keywords,
            TypeRef::string(),
            "NAME",
            Some(j2k_syntax::Expr::string("n")),
        ),
        Member::field(
            &keywords,
            TypeRef::named("Object"),
            "LOCK",
            Some(j2k_syntax::Expr::new_object(TypeRef::named("Object"), vec![])),
        ),
    ]);
    assert_line(&out, "companion object {");
    assert_line(&out, "const val MAX: Int = 10");
    assert_line(&out, "const val NAME: String = \"n\"");
    assert_line(&out, "val LOCK: Any? = Any()");
}

#[test]
fn final_field_without_initializer_is_var_with_default() {
    let out = translate_fields(vec![Member::field(
        &[Modifier::Private, Modifier::Final],
        TypeRef::long(),
        "id",
        None,
    )]);
    assert_line(&out, "private var id: Long = 0L");
}
