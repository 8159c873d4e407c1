use super::args::CliArgs;
use crate::tracing_config::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn parses_flags_and_input() {
    let args = CliArgs::try_parse_from([
        "j2k",
        "--compat",
        "--raw",
        "--config",
        "j2k.json",
        "--library-root",
        "/opt/a",
        "--library-root",
        "/opt/b",
        "unit.json",
    ])
    .expect("valid arguments");
    assert!(args.compat);
    assert!(args.raw);
    assert_eq!(args.config, Some(PathBuf::from("j2k.json")));
    assert_eq!(
        args.library_roots,
        vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")]
    );
    assert_eq!(args.inputs, vec!["unit.json".to_string()]);
}

#[test]
fn input_count_is_left_to_the_driver() {
    let none = CliArgs::try_parse_from(["j2k"]).expect("no input parses");
    assert!(none.inputs.is_empty());
    let two = CliArgs::try_parse_from(["j2k", "a.json", "b.json"]).expect("two inputs parse");
    assert_eq!(two.inputs.len(), 2);
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(CliArgs::try_parse_from(["j2k", "--kotlin-version", "2", "a.json"]).is_err());
}

#[test]
fn verbosity_and_log_format() {
    let args = CliArgs::try_parse_from(["j2k", "-vv", "--log-format", "tree", "a.json"])
        .expect("valid arguments");
    assert_eq!(args.verbose, 2);
    assert_eq!(args.log_format, LogFormat::Tree);

    let quiet = CliArgs::try_parse_from(["j2k", "a.json"]).expect("valid arguments");
    assert_eq!(quiet.verbose, 0);
    assert_eq!(quiet.log_format, LogFormat::Text);
}
