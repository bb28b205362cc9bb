use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{debug, info};

use getopti::logging::init_tracing;
use getopti::{read_args, Command, CommandConfig, OptionMatch, OptionValue, OptionValueStore};

fn main() {
    init_tracing();

    if let Err(e) = run(read_args(1)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Shell,
}

impl Format {
    fn from_value(value: Option<&OptionValue>) -> anyhow::Result<Self> {
        match value.and_then(OptionValue::as_str) {
            None | Some("json") => Ok(Format::Json),
            Some("shell") => Ok(Format::Shell),
            Some(other) => bail!("unknown format '{}', expected json or shell", other),
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    options: &'a OptionValueStore,
    matches: &'a [OptionMatch],
    nonopts: &'a [String],
    breakopts: &'a [String],
}

fn cli() -> getopti::Result<Command> {
    let mut cmd = Command::new();
    cmd.usage("getopti --spec FILE [options] -- ARGS...");
    cmd.banner("");
    cmd.banner("Parse ARGS against the options declared in a TOML spec file.");
    cmd.banner("");
    cmd.banner("options:");
    cmd.declare_from_parts(
        Some('s'),
        Some("spec"),
        Some("FILE"),
        "TOML file declaring the options to parse",
        None,
    )?;
    cmd.declare_from_parts(
        Some('f'),
        Some("format"),
        Some("FORMAT"),
        "output format: json (default) or shell",
        None,
    )?;
    cmd.declare_from_parts(
        Some('h'),
        Some("help"),
        None,
        "show this help, or the spec's help when --spec is given",
        None,
    )?;
    cmd.declare_from_parts(Some('V'), Some("version"), None, "print version", None)?;
    Ok(cmd)
}

fn run(raw_args: Vec<String>) -> anyhow::Result<()> {
    let mut cli = cli()?;
    cli.parse(&raw_args)?;

    let flag = |name: &str| cli.get(name).is_some_and(OptionValue::as_bool);

    if flag("version") {
        println!("getopti {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let spec_path = cli
        .get("spec")
        .and_then(OptionValue::as_str)
        .map(PathBuf::from);

    let target = match &spec_path {
        Some(path) => {
            let config = CommandConfig::load(path)?;
            info!(spec = %path.display(), options = config.options.len(), "loaded spec");
            Some(Command::from_config(&config)?)
        }
        None => None,
    };

    if flag("help") {
        print!("{}", target.as_ref().unwrap_or(&cli));
        return Ok(());
    }

    let Some(mut target) = target else {
        bail!("missing --spec FILE (see --help)");
    };

    if let Some(arg) = cli.nonopts().first() {
        bail!("unexpected argument '{}' (arguments to parse go after --)", arg);
    }

    let format = Format::from_value(cli.get("format"))?;
    let args = cli.breakopts().to_vec();
    debug!(count = args.len(), ?format, "parsing arguments");

    target.parse(&args)?;

    match format {
        Format::Json => {
            let results = target.results();
            let report = Report {
                options: target.options(),
                matches: &results.matches,
                nonopts: &results.nonopts,
                breakopts: &results.breakopts,
            };
            let json = serde_json::to_string_pretty(&report).context("Failed to encode results")?;
            println!("{}", json);
        }
        Format::Shell => print!("{}", shell_assignments(&target)),
    }

    Ok(())
}

/// `NAME='value'` lines for every option, then `ARGS` with the non-options.
fn shell_assignments(cmd: &Command) -> String {
    let mut out = String::new();
    for (name, value) in cmd.options().iter() {
        let value = match value {
            OptionValue::Flag(true) => "1".to_string(),
            OptionValue::Flag(false) => "0".to_string(),
            OptionValue::Single(s) => s.clone(),
            OptionValue::Multiple(list) => list.join(" "),
        };
        out.push_str(&format!("{}={}\n", shell_name(name), shell_quote(&value)));
    }
    out.push_str(&format!("ARGS={}\n", shell_quote(&cmd.nonopts().join(" "))));
    out
}

fn shell_name(reference: &str) -> String {
    reference.to_ascii_uppercase().replace('-', "_")
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_shell_name_is_upper_snake() {
        assert_eq!(shell_name("dry-run"), "DRY_RUN");
        assert_eq!(shell_name("v"), "V");
    }

    #[test]
    fn test_format_defaults_to_json() {
        assert_eq!(Format::from_value(None).unwrap(), Format::Json);
        assert_eq!(
            Format::from_value(Some(&OptionValue::from("shell"))).unwrap(),
            Format::Shell
        );
        assert!(Format::from_value(Some(&OptionValue::from("xml"))).is_err());
    }

    #[test]
    fn test_format_unset_flag_is_json() {
        assert_eq!(
            Format::from_value(Some(&OptionValue::Flag(false))).unwrap(),
            Format::Json
        );
    }

    #[test]
    fn test_cli_declares_its_own_options() {
        let cli = cli().unwrap();
        assert!(cli.help().contains("--spec FILE"));
        assert!(cli.registry().spec("V").is_some());
    }

    #[test]
    fn test_run_without_spec_fails() {
        let err = run(vec![]).unwrap_err();
        assert!(err.to_string().contains("missing --spec"));
    }
}
