use super::args::CliArgs;
use super::driver::{EMPTY_OUTPUT, WRONG_ARGUMENT_COUNT, exception_line, render, resolve_config};
use std::io::Write;
use std::path::PathBuf;

const CLASS_JSON: &str = r#"{
    "package": "demo",
    "types": [{
        "kind": "class",
        "name": "Point",
        "modifiers": { "keywords": ["public"] },
        "members": [{
            "node": "field",
            "modifiers": { "keywords": ["public"] },
            "ty": { "node": "primitive", "primitive": "int" },
            "declarators": [{ "name": "x" }]
        }]
    }]
}"#;

fn args_with(input: &str) -> CliArgs {
    CliArgs {
        inputs: vec![input.to_string()],
        ..CliArgs::default()
    }
}

#[test]
fn wrong_argument_count() {
    assert_eq!(render(&CliArgs::default()), WRONG_ARGUMENT_COUNT);
    let two = CliArgs {
        inputs: vec!["a".to_string(), "b".to_string()],
        ..CliArgs::default()
    };
    assert_eq!(render(&two), WRONG_ARGUMENT_COUNT);
}

#[test]
fn trivial_class() {
    assert_eq!(
        render(&args_with(CLASS_JSON)),
        "package demo\nopen class Point {\nvar x: Int = 0\n}"
    );
}

#[test]
fn empty_unit_reports_empty_output() {
    assert_eq!(render(&args_with("{}")), EMPTY_OUTPUT);
}

#[test]
fn malformed_input_is_one_exception_line() {
    let out = render(&args_with("{ \"types\": 7 }"));
    assert!(out.starts_with("EXCEPTION: "), "{out}");
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn structural_error_is_one_exception_line() {
    let json = r#"{ "types": [{ "kind": "class", "name": "1st" }] }"#;
    let out = render(&args_with(json));
    assert!(out.starts_with("EXCEPTION: malformed syntax tree"), "{out}");
}

#[test]
fn missing_library_root_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let args = CliArgs {
        library_roots: vec![dir.path().join("missing")],
        ..args_with(CLASS_JSON)
    };
    let out = render(&args);
    assert!(out.starts_with("EXCEPTION: library root"), "{out}");
    assert!(out.ends_with("does not exist"), "{out}");
}

#[test]
fn compat_flag_adds_imports() {
    let args = CliArgs {
        compat: true,
        ..args_with(CLASS_JSON)
    };
    assert_eq!(
        render(&args),
        "package demo\nimport kotlin.compatibility.*\nopen class Point {\nvar x: Int = 0\n}"
    );
}

#[test]
fn input_file_and_config_file() {
    let mut unit = tempfile::NamedTempFile::new().expect("temp file");
    unit.write_all(CLASS_JSON.as_bytes()).expect("write unit");
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    config
        .write_all(br#"{ "compatibilityImports": ["shim.*"] }"#)
        .expect("write config");

    let args = CliArgs {
        compat: true,
        config: Some(config.path().to_path_buf()),
        ..args_with(unit.path().to_str().expect("utf-8 path"))
    };
    assert_eq!(
        render(&args),
        "package demo\nimport shim.*\nopen class Point {\nvar x: Int = 0\n}"
    );
}

#[test]
fn flags_override_the_config_file() {
    let mut config = tempfile::NamedTempFile::new().expect("temp file");
    config
        .write_all(br#"{ "libraryRoots": ["/from/file"] }"#)
        .expect("write config");
    let args = CliArgs {
        raw: true,
        config: Some(config.path().to_path_buf()),
        library_roots: vec![PathBuf::from("/from/flag")],
        ..CliArgs::default()
    };
    let resolved = resolve_config(&args).expect("resolves");
    assert!(!resolved.normalize);
    assert_eq!(
        resolved.library_roots,
        vec![PathBuf::from("/from/file"), PathBuf::from("/from/flag")]
    );
}

#[test]
fn exception_line_is_single_line() {
    assert_eq!(exception_line("bad\n  input"), "EXCEPTION: bad input");
}
