//! Command-line option parsing.
//!
//! Options are declared with a short flag (`-v`), a long flag (`--verbose`)
//! or both, plus an optional parameter descriptor:
//!
//! - no descriptor: a boolean flag
//! - `"FILE"`: a value is required
//! - `"[LEVEL]"`: a value is optional
//! - `"TAG[+]"` / `"[TAG] [+]"`: the option may repeat and collects its values
//!
//! Parsing classifies every argument as an option occurrence, an option's
//! value, a non-option, or a break argument (anything after `--`). Short
//! flags bundle (`-abc`); only the last flag of a bundle may take the
//! following argument as its value, and a token that looks like an option is
//! never taken as a value.

pub mod args;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod option;
pub mod output;
pub mod registry;
pub mod source;
pub mod terminal;

pub use args::{Flag, OptionMatch, ParseResult, Rule, RuleTable};
pub use command::Command;
pub use config::{CommandConfig, ConfigError, LayoutConfig};
pub use error::{Error, Result};
pub use option::{Callback, OptionSpec, OptionValue, ParameterSpec};
pub use output::HelpOutput;
pub use registry::{OptionValueStore, Registry};
pub use source::read_args;
