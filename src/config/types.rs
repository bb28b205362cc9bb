use serde::{Deserialize, Serialize};

use crate::option::OptionValue;
use crate::terminal;

/// Narrowest description column the help layout accepts.
pub const MIN_DESCRIPTION_WIDTH: u16 = 10;

/// Help text layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Wrap width in columns. Probed from the terminal when unset.
    #[serde(default)]
    pub columns: Option<u16>,
    /// Right margin kept free when wrapping (default: 2).
    #[serde(default = "default_padding")]
    pub padding: u16,
    /// Width of the flag column, including the leading space (default: 26).
    #[serde(default = "default_option_padding")]
    pub option_padding: u16,
}

fn default_padding() -> u16 {
    2
}

fn default_option_padding() -> u16 {
    26
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: None,
            padding: default_padding(),
            option_padding: default_option_padding(),
        }
    }
}

impl LayoutConfig {
    /// Layout with a fixed wrap width.
    pub fn with_columns(columns: u16) -> Self {
        Self {
            columns: Some(columns),
            ..Self::default()
        }
    }

    /// Configured columns, or the terminal width when unset or zero.
    pub fn resolved_columns(&self) -> u16 {
        self.columns
            .filter(|c| *c > 0)
            .unwrap_or_else(terminal::columns)
    }

    /// Width available to descriptions next to the flag column.
    pub fn description_width(&self, columns: u16) -> usize {
        columns
            .saturating_sub(self.padding)
            .saturating_sub(self.option_padding)
            .max(MIN_DESCRIPTION_WIDTH) as usize
    }

    /// Width available to free text such as banners.
    pub fn text_width(&self, columns: u16) -> usize {
        columns
            .saturating_sub(self.padding)
            .max(MIN_DESCRIPTION_WIDTH) as usize
    }
}

/// Declarative description of a command's options and help text.
///
/// ```toml
/// usage = "deploy [options] TARGET"
///
/// [layout]
/// columns = 80
///
/// [[option]]
/// short = "v"
/// long = "verbose"
/// description = "Print more output"
///
/// [[option]]
/// long = "tag"
/// parameter = "NAME[+]"
/// description = "Tag to apply, may be repeated"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default, rename = "option")]
    pub options: Vec<OptionConfig>,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandEntry>,
}

/// One `[[option]]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
    #[serde(default)]
    pub short: Option<char>,
    #[serde(default)]
    pub long: Option<String>,
    /// Parameter descriptor, e.g. `"FILE"`, `"[LEVEL]"`, `"TAG[+]"`.
    #[serde(default)]
    pub parameter: Option<String>,
    /// Value for an optional parameter given without a value.
    #[serde(default)]
    pub default: Option<OptionValue>,
    #[serde(default)]
    pub description: String,
}

/// One `[[command]]` table (help output only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
