//! Parser rules — what each declared flag expects after it.

use std::collections::HashMap;

use crate::args::classifier::{is_long_name, is_short_name};
use crate::error::{Error, Result};

/// Rule string marker for short options (`a:` optional, `a::` required).
pub const INDICATOR_SHORT: char = ':';
/// Rule string marker for long options (`long=` optional, `long==` required).
pub const INDICATOR_LONG: char = '=';

/// Value expectations of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rule {
    /// The flag may take a value.
    pub accepts_value: bool,
    /// The flag must take a value.
    pub value_required: bool,
}

impl Rule {
    /// Boolean flag, no value.
    pub const FLAG: Rule = Rule {
        accepts_value: false,
        value_required: false,
    };
    /// Value present or absent.
    pub const OPTIONAL: Rule = Rule {
        accepts_value: true,
        value_required: false,
    };
    /// Exactly one value.
    pub const REQUIRED: Rule = Rule {
        accepts_value: true,
        value_required: true,
    };

    /// Rule from a requirement level: 0 flag, 1 optional, 2 required.
    fn from_level(level: usize) -> Option<Rule> {
        match level {
            0 => Some(Rule::FLAG),
            1 => Some(Rule::OPTIONAL),
            2 => Some(Rule::REQUIRED),
            _ => None,
        }
    }
}

/// Short rules keyed by character, long rules keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    short: HashMap<char, Rule>,
    long: HashMap<String, Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from getopt-style rule strings.
    ///
    /// Short rules are a run of flag characters, each optionally followed by
    /// one (`a:`) or two (`a::`) colons. Long rules are names optionally
    /// followed by one (`long=`) or two (`long==`) equals signs.
    pub fn from_getopt(short: &str, long: &[&str]) -> Result<Self> {
        let mut table = Self::new();

        let mut chars = short.chars().peekable();
        while let Some(flag) = chars.next() {
            if !is_short_name(flag) {
                return Err(Error::invalid(format!(
                    "invalid short option rule '{}' in '{}'",
                    flag, short
                )));
            }
            let mut level = 0;
            while chars.next_if_eq(&INDICATOR_SHORT).is_some() {
                level += 1;
            }
            let rule = Rule::from_level(level).ok_or_else(|| {
                Error::invalid(format!("too many '{}' after '{}'", INDICATOR_SHORT, flag))
            })?;
            table.insert_short(flag, rule);
        }

        for entry in long {
            let name = entry.trim_end_matches(INDICATOR_LONG);
            if !is_long_name(name) {
                return Err(Error::invalid(format!("invalid long option rule '{}'", entry)));
            }
            let level = entry.len() - name.len();
            let rule = Rule::from_level(level).ok_or_else(|| {
                Error::invalid(format!("too many '{}' after '{}'", INDICATOR_LONG, name))
            })?;
            table.insert_long(name, rule);
        }

        Ok(table)
    }

    pub fn insert_short(&mut self, flag: char, rule: Rule) {
        self.short.insert(flag, rule);
    }

    pub fn insert_long(&mut self, flag: impl Into<String>, rule: Rule) {
        self.long.insert(flag.into(), rule);
    }

    pub fn short(&self, flag: char) -> Option<Rule> {
        self.short.get(&flag).copied()
    }

    pub fn long(&self, flag: &str) -> Option<Rule> {
        self.long.get(flag).copied()
    }

    pub fn contains_short(&self, flag: char) -> bool {
        self.short.contains_key(&flag)
    }

    pub fn contains_long(&self, flag: &str) -> bool {
        self.long.contains_key(flag)
    }

    /// No rules of either kind.
    pub fn is_empty(&self) -> bool {
        self.short.is_empty() && self.long.is_empty()
    }
}
