//! Tests for the command facade: declaration, parsing and help text.

mod common;

use std::sync::Arc;

use common::{command, raw_args};
use getopti::{Callback, Command, CommandConfig, Error, OptionSpec, OptionValue};
use parking_lot::Mutex;

// =============================================================================
// HELP TEXT
// =============================================================================

#[test]
fn test_declared_option_help_line() {
    let cases = [
        (Some('a'), None, None, " -a"),
        (None, Some("long"), None, "     --long"),
        (Some('a'), Some("long"), None, " -a, --long"),
        (Some('a'), Some("long"), Some("VALUE"), " -a, --long VALUE"),
        (None, Some("long"), Some("[VALUE]"), "     --long [VALUE]"),
    ];

    for (short, long, parameter, label) in cases {
        let mut cmd = command();
        cmd.declare_from_parts(short, long, parameter, "description", None)
            .unwrap();
        assert_eq!(cmd.help(), format!("{:<26}description\n", label));
    }
}

#[test]
fn test_command_help_line() {
    let mut cmd = command();
    cmd.command("command", "description");
    assert_eq!(cmd.help(), format!("{:<26}description\n", " command"));
}

#[test]
fn test_help_keeps_call_order() {
    let mut cmd = command();
    cmd.usage("tool [options]");
    cmd.banner("options:");
    cmd.declare_from_parts(Some('q'), None, None, "quiet", None)
        .unwrap();

    let expected = format!(
        "Usage:\n  tool [options]\noptions:\n{:<26}quiet\n",
        " -q"
    );
    assert_eq!(cmd.help(), expected);
    assert_eq!(cmd.to_string(), expected);
}

#[test]
fn test_failed_declaration_adds_no_help() {
    let mut cmd = command();
    cmd.declare_from_parts(Some('a'), None, None, "first", None)
        .unwrap();
    let before = cmd.help().to_string();

    let err = cmd
        .declare_from_parts(Some('a'), Some("again"), None, "second", None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(cmd.help(), before);
}

#[test]
fn test_declare_without_flags_fails() {
    let mut cmd = command();
    let err = cmd
        .declare_from_parts(None, None, Some("VALUE"), "nothing", None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert!(cmd.help().is_empty());
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_parse_through_facade() {
    let mut cmd = command();
    cmd.declare_from_parts(Some('v'), Some("verbose"), None, "", None)
        .unwrap();
    cmd.declare_from_spec(
        OptionSpec::from_flags(&["o", "output"], Some("FILE")).unwrap(),
        "write here",
    )
    .unwrap();

    let result = cmd
        .parse(&raw_args(vec!["in.txt", "-v", "--output", "out.txt", "--", "-x"]))
        .unwrap();
    assert_eq!(result.matches.len(), 2);

    assert_eq!(cmd.get("v"), Some(&OptionValue::Flag(true)));
    assert_eq!(cmd.get("o"), Some(&OptionValue::from("out.txt")));
    assert_eq!(cmd.nonopts(), raw_args(vec!["in.txt"]).as_slice());
    assert_eq!(cmd.breakopts(), raw_args(vec!["-x"]).as_slice());
    assert_eq!(cmd.options().len(), 2);
}

#[test]
fn test_parse_errors_propagate() {
    let mut cmd = command();
    cmd.declare_from_parts(Some('o'), None, Some("FILE"), "", None)
        .unwrap();

    let err = cmd.parse(&raw_args(vec!["-o"])).unwrap_err();
    assert!(matches!(err, Error::MissingParameter { .. }));
    assert!(err.is_parse_error());

    let err = cmd.parse(&raw_args(vec!["-z"])).unwrap_err();
    assert_eq!(err.error_type(), "illegal_option");
}

#[test]
fn test_callback_through_facade() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback: Callback = Arc::new(move |value: &OptionValue| sink.lock().push(value.clone()));

    let mut cmd = command();
    cmd.declare_from_parts(Some('n'), Some("name"), Some("NAME"), "", Some(callback))
        .unwrap();
    cmd.parse(&raw_args(vec!["--name", "x", "-n", "y"])).unwrap();

    assert_eq!(
        *seen.lock(),
        vec![OptionValue::from("x"), OptionValue::from("y")]
    );
}

// =============================================================================
// FROM CONFIG
// =============================================================================

#[test]
fn test_from_config_builds_help_and_options() {
    let config = CommandConfig::from_toml(
        r#"
usage = "deploy [options] TARGET"
banner = "Deploy a build."

[layout]
columns = 80

[[option]]
short = "v"
long = "verbose"
description = "Print more output"

[[option]]
long = "tag"
parameter = "NAME[+]"
description = "Tag to apply"

[[option]]
short = "l"
parameter = "[LEVEL]"
default = "1"

[[command]]
name = "rollback"
description = "Undo the last deploy"
"#,
    )
    .unwrap();

    let mut cmd = Command::from_config(&config).unwrap();

    let expected = [
        "Usage:".to_string(),
        "  deploy [options] TARGET".to_string(),
        "Deploy a build.".to_string(),
        format!("{:<26}Print more output", " -v, --verbose"),
        format!("{:<26}Tag to apply", "     --tag NAME[+]"),
        " -l [LEVEL]".to_string(),
        format!("{:<26}Undo the last deploy", " rollback"),
    ];
    assert_eq!(cmd.help().lines().collect::<Vec<_>>(), expected);

    cmd.parse(&raw_args(vec!["-l", "--tag", "a", "--tag", "b", "prod"]))
        .unwrap();
    assert_eq!(cmd.get("l"), Some(&OptionValue::from("1")));
    assert_eq!(
        cmd.get("tag"),
        Some(&OptionValue::Multiple(vec!["a".into(), "b".into()]))
    );
    assert_eq!(cmd.get("verbose"), Some(&OptionValue::Flag(false)));
    assert_eq!(cmd.nonopts(), raw_args(vec!["prod"]).as_slice());
}

#[test]
fn test_from_config_rejects_duplicates() {
    let config = CommandConfig::from_toml(
        r#"
[layout]
columns = 80

[[option]]
short = "a"

[[option]]
short = "a"
long = "again"
"#,
    )
    .unwrap();

    let err = Command::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[test]
fn test_from_config_rejects_bad_flag_names() {
    let config = CommandConfig::from_toml("[layout]\ncolumns = 80\n\n[[option]]\nlong = \"bad name\"\n").unwrap();
    let err = Command::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
