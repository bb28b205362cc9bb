//! Option definitions — flags, parameter descriptors, defaults, callbacks.
//!
//! A descriptor string is resolved once, at declaration time, into a
//! `ParameterSpec`:
//!
//! ```text
//! ""            → ParameterSpec::None       (boolean flag)
//! "VALUE"       → Required
//! "[VALUE]"     → Optional
//! "VALUE[+]"    → Required, multiple
//! "[VALUE] [+]" → Optional, multiple
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::args::{is_long_name, is_short_name, Rule};
use crate::error::{Error, Result};

/// Suffix marking a parameter that may be given multiple times.
pub const MULTIPLE_INDICATOR: &str = "[+]";

/// A value held for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag state; also the default for every option.
    Flag(bool),
    /// Single-value option (last write wins).
    Single(String),
    /// Multiple-allowed option (ordered, deduplicated).
    Multiple(Vec<String>),
}

impl OptionValue {
    pub fn as_bool(&self) -> bool {
        matches!(self, OptionValue::Flag(true))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Single(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptionValue::Multiple(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for OptionValue {
    fn default() -> Self {
        OptionValue::Flag(false)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Single(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Single(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::Multiple(value)
    }
}

/// Invoked once per occurrence with the resolved value.
pub type Callback = Arc<dyn Fn(&OptionValue) + Send + Sync>;

/// Parameter expectations, resolved from a descriptor string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParameterSpec {
    /// Boolean flag: never takes a value.
    #[default]
    None,
    /// A value must follow the flag.
    Required { descriptor: String, multiple: bool },
    /// A value may follow the flag.
    Optional { descriptor: String, multiple: bool },
}

impl ParameterSpec {
    /// Resolve a raw descriptor such as `"FILE"`, `"[LEVEL]"` or `"PATH[+]"`.
    ///
    /// Malformed brackets are not rejected: anything not wrapped in a single
    /// `[...]` pair is a required parameter.
    pub fn parse(raw: &str) -> Self {
        let descriptor = raw.trim();
        if descriptor.is_empty() {
            return ParameterSpec::None;
        }

        let (rest, multiple) = strip_multiple(descriptor);
        let descriptor = descriptor.to_string();

        if is_bracketed(rest) {
            ParameterSpec::Optional {
                descriptor,
                multiple,
            }
        } else {
            ParameterSpec::Required {
                descriptor,
                multiple,
            }
        }
    }

    /// The trimmed descriptor string, as shown in help output.
    pub fn descriptor(&self) -> Option<&str> {
        match self {
            ParameterSpec::None => None,
            ParameterSpec::Required { descriptor, .. }
            | ParameterSpec::Optional { descriptor, .. } => Some(descriptor),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, ParameterSpec::Required { .. })
    }

    pub fn is_multiple(&self) -> bool {
        match self {
            ParameterSpec::None => false,
            ParameterSpec::Required { multiple, .. } | ParameterSpec::Optional { multiple, .. } => {
                *multiple
            }
        }
    }

    /// The parser rule for this parameter.
    pub fn rule(&self) -> Rule {
        match self {
            ParameterSpec::None => Rule::FLAG,
            ParameterSpec::Required { .. } => Rule::REQUIRED,
            ParameterSpec::Optional { .. } => Rule::OPTIONAL,
        }
    }
}

/// Strip a `[+]` marker, either as a suffix (`VALUE[+]`, `[VALUE] [+]`) or
/// inside the optional wrapper (`[VALUE[+]]`).
fn strip_multiple(descriptor: &str) -> (&str, bool) {
    if let Some(rest) = descriptor.strip_suffix(MULTIPLE_INDICATOR) {
        // A bare "[+]" is an optional parameter named "+".
        if !rest.is_empty() {
            return (rest.trim_end(), true);
        }
    }

    if let Some(inner) = descriptor
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        if let Some(name) = inner.strip_suffix(MULTIPLE_INDICATOR) {
            if !name.trim().is_empty() {
                return (descriptor, true);
            }
        }
    }

    (descriptor, false)
}

/// The whole string is one `[...]` pair with something inside.
fn is_bracketed(s: &str) -> bool {
    s.len() > 2 && s.starts_with('[') && s.ends_with(']')
}

/// One declared option.
#[derive(Clone)]
pub struct OptionSpec {
    short: Option<char>,
    long: Option<String>,
    parameter: ParameterSpec,
    default: OptionValue,
    callback: Option<Callback>,
}

impl OptionSpec {
    /// Declare an option from its parts.
    ///
    /// Fails with `InvalidArgument` when neither flag is given, or when a
    /// flag does not follow the option grammar.
    pub fn new(short: Option<char>, long: Option<&str>, parameter: Option<&str>) -> Result<Self> {
        let long = long.filter(|l| !l.is_empty());

        if short.is_none() && long.is_none() {
            return Err(Error::invalid("a short or long option must be specified"));
        }
        if let Some(flag) = short {
            if !is_short_name(flag) {
                return Err(Error::invalid(format!(
                    "short option '{}' must be a single letter or digit",
                    flag
                )));
            }
        }
        if let Some(flag) = long {
            if !is_long_name(flag) {
                return Err(Error::invalid(format!(
                    "long option '{}' must be at least two letters, digits or dashes",
                    flag
                )));
            }
        }

        Ok(Self {
            short,
            long: long.map(str::to_string),
            parameter: parameter.map(ParameterSpec::parse).unwrap_or_default(),
            default: OptionValue::default(),
            callback: None,
        })
    }

    /// Declare an option from a flag list.
    ///
    /// A single entry longer than one character is a long flag. Otherwise the
    /// first entry is the short flag and the second, if any, the long flag.
    pub fn from_flags(flags: &[&str], parameter: Option<&str>) -> Result<Self> {
        let first = flags.first().copied().unwrap_or_default();
        let second = flags.get(1).copied().filter(|s| !s.is_empty());

        let mut chars = first.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Self::new(None, second, parameter),
            (Some(c), None) => Self::new(Some(c), second, parameter),
            (Some(_), Some(_)) if second.is_none() => Self::new(None, Some(first), parameter),
            (Some(_), Some(_)) => Err(Error::invalid(format!(
                "short option '{}' must be a single character",
                first
            ))),
        }
    }

    /// Value used when an optional parameter is given without a value.
    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&OptionValue) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn parameter(&self) -> &ParameterSpec {
        &self.parameter
    }

    pub fn default_value(&self) -> &OptionValue {
        &self.default
    }

    pub fn is_required(&self) -> bool {
        self.parameter.is_required()
    }

    pub fn is_multiple(&self) -> bool {
        self.parameter.is_multiple()
    }

    pub fn rule(&self) -> Rule {
        self.parameter.rule()
    }

    /// Canonical key: the long flag if present, else the short flag.
    pub fn reference(&self) -> String {
        match (&self.long, self.short) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            // Construction guarantees at least one flag.
            (None, None) => String::new(),
        }
    }

    /// Run the callback, if any.
    pub fn run_callback(&self, value: &OptionValue) {
        if let Some(callback) = &self.callback {
            callback(value);
        }
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference())
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("short", &self.short)
            .field("long", &self.long)
            .field("parameter", &self.parameter)
            .field("default", &self.default)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
