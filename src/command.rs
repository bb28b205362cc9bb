//! Command facade — declare options, parse arguments, render help.
//!
//! ```
//! use getopti::{Command, LayoutConfig, OptionSpec};
//!
//! let mut cmd = Command::with_layout(LayoutConfig::with_columns(80));
//! cmd.usage("deploy [options] TARGET");
//! cmd.declare_from_parts(Some('v'), Some("verbose"), None, "print more output", None)?;
//! cmd.declare_from_spec(OptionSpec::new(None, Some("tag"), Some("NAME[+]"))?, "tag to apply")?;
//!
//! let args: Vec<String> = ["-v", "--tag", "a", "prod"].iter().map(|s| s.to_string()).collect();
//! cmd.parse(&args)?;
//!
//! assert!(cmd.get("verbose").is_some_and(|v| v.as_bool()));
//! assert_eq!(cmd.nonopts(), ["prod"]);
//! # Ok::<(), getopti::Error>(())
//! ```

use std::fmt;

use crate::args::ParseResult;
use crate::config::{CommandConfig, LayoutConfig};
use crate::error::Result;
use crate::option::{Callback, OptionSpec, OptionValue};
use crate::output::HelpOutput;
use crate::registry::{OptionValueStore, Registry};

/// Declared options plus their generated help text.
#[derive(Debug)]
pub struct Command {
    registry: Registry,
    output: HelpOutput,
}

impl Command {
    /// A command with the default layout (terminal width probed once).
    pub fn new() -> Self {
        Self::with_layout(LayoutConfig::default())
    }

    pub fn with_layout(layout: LayoutConfig) -> Self {
        Self {
            registry: Registry::new(),
            output: HelpOutput::new(layout),
        }
    }

    /// Build a command from a declarative description.
    pub fn from_config(config: &CommandConfig) -> Result<Self> {
        config.validate()?;

        let mut command = Self::with_layout(config.layout.clone());
        if let Some(usage) = &config.usage {
            command.usage(usage);
        }
        if let Some(banner) = &config.banner {
            command.banner(banner);
        }

        for option in &config.options {
            let mut spec = OptionSpec::new(
                option.short,
                option.long.as_deref(),
                option.parameter.as_deref(),
            )?;
            if let Some(default) = &option.default {
                spec = spec.with_default(default.clone());
            }
            command.declare_from_spec(spec, &option.description)?;
        }

        for entry in &config.commands {
            command.command(&entry.name, &entry.description);
        }

        Ok(command)
    }

    /// Declare an option from its flags, parameter descriptor and callback.
    ///
    /// Fails with `InvalidArgument` if both flags are absent or a flag is
    /// already declared.
    pub fn declare_from_parts(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        parameter: Option<&str>,
        description: &str,
        callback: Option<Callback>,
    ) -> Result<()> {
        let mut spec = OptionSpec::new(short, long, parameter)?;
        if let Some(callback) = callback {
            spec = spec.with_callback(move |value| callback(value));
        }
        self.declare_from_spec(spec, description)
    }

    /// Declare a prepared option.
    pub fn declare_from_spec(&mut self, spec: OptionSpec, description: &str) -> Result<()> {
        let (short, long) = (spec.short(), spec.long().map(str::to_string));
        let parameter = spec.parameter().descriptor().map(str::to_string);

        self.registry.add(spec)?;
        self.output
            .option(short, long.as_deref(), parameter.as_deref(), description);
        Ok(())
    }

    /// Add a command line to the help text.
    pub fn command(&mut self, name: &str, description: &str) {
        self.output.command(name, description);
    }

    pub fn banner(&mut self, text: &str) {
        self.output.banner(text);
    }

    pub fn usage(&mut self, usage: &str) {
        self.output.usage(usage);
    }

    /// Parse `args`; see `Registry::parse`.
    pub fn parse(&mut self, args: &[String]) -> Result<&ParseResult> {
        self.registry.parse(args)
    }

    pub fn help(&self) -> &str {
        self.output.help()
    }

    /// Value of an option, by reference or either flag.
    pub fn get(&self, flag: &str) -> Option<&OptionValue> {
        self.registry.get(flag)
    }

    /// Every declared option's value, keyed by reference.
    pub fn options(&self) -> &OptionValueStore {
        self.registry.values()
    }

    pub fn results(&self) -> &ParseResult {
        self.registry.results()
    }

    pub fn nonopts(&self) -> &[String] {
        self.registry.nonopts()
    }

    pub fn breakopts(&self) -> &[String] {
        self.registry.breakopts()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.help())
    }
}
