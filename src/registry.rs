//! Option registry — declared options → parser rules → stored values.
//!
//! Owns both the definitions (immutable once added) and the current values.
//! Short flags of options that also have a long flag are aliased to the long
//! flag, so every value is stored under the option's reference.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::args::{self, Flag, OptionMatch, ParseResult, RuleTable};
use crate::error::{Error, Result};
use crate::option::{OptionSpec, OptionValue, ParameterSpec};

/// Current value of every declared option, keyed by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionValueStore {
    values: BTreeMap<String, OptionValue>,
}

impl OptionValueStore {
    pub fn get(&self, reference: &str) -> Option<&OptionValue> {
        self.values.get(reference)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overwrite the value (last write wins).
    fn set(&mut self, reference: &str, value: OptionValue) {
        self.values.insert(reference.to_string(), value);
    }

    /// Append to a list value, skipping values already present.
    fn push(&mut self, reference: &str, value: &OptionValue) {
        let slot = self
            .values
            .entry(reference.to_string())
            .or_insert_with(|| OptionValue::Multiple(Vec::new()));
        if !matches!(slot, OptionValue::Multiple(_)) {
            *slot = OptionValue::Multiple(Vec::new());
        }

        let OptionValue::Multiple(list) = slot else {
            return;
        };
        let items: &[String] = match value {
            OptionValue::Single(s) => std::slice::from_ref(s),
            OptionValue::Multiple(v) => v,
            OptionValue::Flag(_) => &[],
        };
        for item in items {
            if !list.contains(item) {
                list.push(item.clone());
            }
        }
    }
}

/// Declared options plus the state of the last parse.
#[derive(Debug, Default)]
pub struct Registry {
    options: Vec<OptionSpec>,
    rules: RuleTable,
    short_to_long: HashMap<char, String>,
    by_reference: HashMap<String, usize>,
    values: OptionValueStore,
    results: ParseResult,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option.
    ///
    /// Fails with `InvalidArgument` if its short or long flag is already
    /// registered.
    pub fn add(&mut self, spec: OptionSpec) -> Result<()> {
        if let Some(short) = spec.short() {
            if self.rules.contains_short(short) {
                return Err(Error::invalid(format!(
                    "option '-{}' is already declared",
                    short
                )));
            }
        }
        if let Some(long) = spec.long() {
            if self.rules.contains_long(long) {
                return Err(Error::invalid(format!(
                    "option '--{}' is already declared",
                    long
                )));
            }
        }

        let rule = spec.rule();
        if let Some(short) = spec.short() {
            self.rules.insert_short(short, rule);
        }
        if let Some(long) = spec.long() {
            self.rules.insert_long(long, rule);
            if let Some(short) = spec.short() {
                self.short_to_long.insert(short, long.to_string());
            }
        }

        let reference = spec.reference();
        debug!(option = %reference, ?rule, "declared option");

        self.values.set(&reference, spec.default_value().clone());
        self.by_reference.insert(reference, self.options.len());
        self.options.push(spec);
        Ok(())
    }

    /// Parse `args`, store the matched values and run callbacks.
    ///
    /// Parsing again re-scans from scratch: non-options and break arguments
    /// are replaced, but values keep accumulating (multiple options append).
    pub fn parse(&mut self, args: &[String]) -> Result<&ParseResult> {
        let result = args::parse(args, &self.rules)?;

        for m in &result.matches {
            self.apply(m)?;
        }

        self.results = result;
        Ok(&self.results)
    }

    /// Store one occurrence and run its callback with the stored value.
    ///
    /// A multiple option without a value and without a string or list
    /// default stores nothing, so its callback does not run.
    fn apply(&mut self, m: &OptionMatch) -> Result<()> {
        let index = self.resolve(&m.flag).ok_or_else(|| match &m.flag {
            Flag::Short(c) => Error::illegal_short(*c),
            Flag::Long(s) => Error::illegal_long(s),
        })?;
        let spec = &self.options[index];
        let reference = spec.reference();

        let value = match (spec.parameter(), &m.value) {
            (ParameterSpec::None, _) => OptionValue::Flag(true),
            (_, Some(v)) => OptionValue::Single(v.clone()),
            (_, None) => spec.default_value().clone(),
        };

        if spec.is_multiple() {
            self.values.push(&reference, &value);
            if matches!(value, OptionValue::Flag(_)) {
                debug!(option = %reference, "no value to append, callback skipped");
                return Ok(());
            }
        } else {
            self.values.set(&reference, value.clone());
        }

        spec.run_callback(&value);
        Ok(())
    }

    /// Index of the option a parsed flag belongs to.
    fn resolve(&self, flag: &Flag) -> Option<usize> {
        let index = match flag {
            Flag::Short(c) => match self.short_to_long.get(c) {
                Some(long) => self.by_reference.get(long),
                None => self.by_reference.get(&c.to_string()),
            },
            Flag::Long(name) => self.by_reference.get(name),
        };
        index.copied()
    }

    /// Find a declared option by reference or by either of its flags.
    pub fn spec(&self, flag: &str) -> Option<&OptionSpec> {
        let mut chars = flag.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => Flag::Short(c),
            _ => Flag::Long(flag.to_string()),
        };
        self.resolve(&key).map(|i| &self.options[i])
    }

    /// Current value of an option, looked up by reference or either flag.
    pub fn get(&self, flag: &str) -> Option<&OptionValue> {
        self.spec(flag)
            .and_then(|spec| self.values.get(&spec.reference()))
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn values(&self) -> &OptionValueStore {
        &self.values
    }

    pub fn results(&self) -> &ParseResult {
        &self.results
    }

    pub fn nonopts(&self) -> &[String] {
        &self.results.nonopts
    }

    pub fn breakopts(&self) -> &[String] {
        &self.results.breakopts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_deduplicates() {
        let mut store = OptionValueStore::default();
        store.push("tag", &OptionValue::from("x"));
        store.push("tag", &OptionValue::from("x"));
        store.push("tag", &OptionValue::from("y"));
        assert_eq!(
            store.get("tag"),
            Some(&OptionValue::Multiple(vec!["x".into(), "y".into()]))
        );
    }

    #[test]
    fn test_push_flag_default_leaves_empty_list() {
        let mut store = OptionValueStore::default();
        store.set("tag", OptionValue::Flag(false));
        store.push("tag", &OptionValue::Flag(false));
        assert_eq!(store.get("tag"), Some(&OptionValue::Multiple(Vec::new())));
    }

    #[test]
    fn test_short_alias_resolves_to_long() {
        let mut registry = Registry::new();
        registry
            .add(OptionSpec::new(Some('v'), Some("verbose"), None).unwrap())
            .unwrap();
        assert_eq!(registry.resolve(&Flag::Short('v')), Some(0));
        assert_eq!(registry.resolve(&Flag::Long("verbose".into())), Some(0));
        assert_eq!(registry.spec("v").map(|s| s.reference()), Some("verbose".into()));
        assert!(registry.spec("x").is_none());
    }
}
