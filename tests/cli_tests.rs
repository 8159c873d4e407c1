//! Runs the `j2k` binary.

use std::io::Write;
use std::process::Command;

fn j2k(args: &[&str]) -> (String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_j2k"))
        .args(args)
        .env_remove("J2K_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs");
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        output.status.success(),
    )
}

const INTERFACE_JSON: &str = r#"{ "types": [{ "kind": "interface", "name": "Shape" }] }"#;

#[test]
fn translates_inline_json() {
    let (out, ok) = j2k(&[INTERFACE_JSON]);
    assert!(ok);
    assert_eq!(out, "internal interface Shape {\n}\n");
}

#[test]
fn translates_a_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(INTERFACE_JSON.as_bytes()).expect("write unit");
    let (out, ok) = j2k(&[file.path().to_str().expect("utf-8 path")]);
    assert!(ok);
    assert_eq!(out, "internal interface Shape {\n}\n");
}

#[test]
fn failures_are_exception_lines_with_success_status() {
    let (out, ok) = j2k(&[]);
    assert!(ok);
    assert_eq!(out, "EXCEPTION: wrong number of arguments (should be 1).\n");

    let (out, ok) = j2k(&["{}"]);
    assert!(ok);
    assert_eq!(out, "EXCEPTION: generated code is empty.\n");

    let (out, ok) = j2k(&["[1, 2"]);
    assert!(ok);
    assert!(out.starts_with("EXCEPTION: "), "{out}");
    assert_eq!(out.lines().count(), 1);

    let (out, ok) = j2k(&["--no-such-flag", INTERFACE_JSON]);
    assert!(ok);
    assert!(out.starts_with("EXCEPTION: "), "{out}");
}
