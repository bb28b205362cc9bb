//! Argument parser — raw args + rule table → matches, non-options, break args.
//!
//! A single left-to-right pass. Tokens consumed as a value are skipped by
//! advancing the cursor, so they are never visited again. The first `--`
//! stops option parsing; every remaining token becomes a break argument.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::args::classifier::{classify, is_option, split_longopt, TokenKind};
use crate::args::rules::RuleTable;
use crate::error::{Error, Result};

/// A matched flag, without its leading dashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Flag {
    Short(char),
    Long(String),
}

impl Flag {
    pub fn is_short(&self) -> bool {
        matches!(self, Flag::Short(_))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Short(c) => write!(f, "{}", c),
            Flag::Long(s) => f.write_str(s),
        }
    }
}

impl PartialEq<&str> for Flag {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Flag::Short(c) => {
                let mut chars = other.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            Flag::Long(s) => s == other,
        }
    }
}

/// One option occurrence, in the order it was encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionMatch {
    pub flag: Flag,
    pub value: Option<String>,
}

impl OptionMatch {
    pub fn short(flag: char, value: Option<String>) -> Self {
        Self {
            flag: Flag::Short(flag),
            value,
        }
    }

    pub fn long(flag: impl Into<String>, value: Option<String>) -> Self {
        Self {
            flag: Flag::Long(flag.into()),
            value,
        }
    }
}

/// Result of parsing raw arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Option occurrences in encounter order.
    pub matches: Vec<OptionMatch>,
    /// Arguments that are neither options nor option values.
    pub nonopts: Vec<String>,
    /// Everything after the first `--`, verbatim.
    pub breakopts: Vec<String>,
}

/// Parse `args` against `rules`.
///
/// Fails with `IllegalOption` for an undeclared flag and `MissingParameter`
/// when a required value cannot be obtained. Either error aborts the parse.
pub fn parse(args: &[String], rules: &RuleTable) -> Result<ParseResult> {
    if args.is_empty() {
        return Ok(ParseResult::default());
    }

    if rules.is_empty() {
        // Nothing can match, so every argument is a non-option, `--` included.
        return Ok(ParseResult {
            matches: Vec::new(),
            nonopts: args.to_vec(),
            breakopts: Vec::new(),
        });
    }

    Parser::new(args, rules).run()
}

/// Cursor over the arguments plus the output accumulators.
struct Parser<'a> {
    args: &'a [String],
    rules: &'a RuleTable,
    pos: usize,
    result: ParseResult,
}

impl<'a> Parser<'a> {
    fn new(args: &'a [String], rules: &'a RuleTable) -> Self {
        Self {
            args,
            rules,
            pos: 0,
            result: ParseResult::default(),
        }
    }

    fn run(mut self) -> Result<ParseResult> {
        while let Some(arg) = self.args.get(self.pos) {
            self.pos += 1;
            let kind = classify(arg);
            debug!(arg = %arg, ?kind, "classified argument");

            match kind {
                TokenKind::Break => {
                    self.result
                        .breakopts
                        .extend(self.args[self.pos..].iter().cloned());
                    break;
                }
                TokenKind::Long => self.parse_longopt(arg)?,
                TokenKind::Short => self.parse_shortopt(arg)?,
                TokenKind::Plain => self.result.nonopts.push(arg.clone()),
            }
        }

        Ok(self.result)
    }

    /// Consume the next argument as a value unless it looks like an option.
    fn take_value(&mut self) -> Option<String> {
        match self.args.get(self.pos) {
            Some(next) if !is_option(next) => {
                trace!(value = %next, "consumed lookahead value");
                self.pos += 1;
                Some(next.clone())
            }
            Some(next) => {
                trace!(next = %next, "lookahead is option-shaped, not consumed");
                None
            }
            None => None,
        }
    }

    fn parse_longopt(&mut self, token: &str) -> Result<()> {
        let (name, inline) = split_longopt(token);
        let rule = self
            .rules
            .long(name)
            .ok_or_else(|| Error::illegal_long(name))?;

        let mut value = inline.map(str::to_string);
        if rule.accepts_value && value.is_none() {
            value = self.take_value();
            if value.is_none() && rule.value_required {
                return Err(Error::missing_long(name));
            }
        }

        self.result.matches.push(OptionMatch::long(name, value));
        Ok(())
    }

    fn parse_shortopt(&mut self, token: &str) -> Result<()> {
        // Short tokens are ASCII, so byte length equals char count.
        let flags = &token[1..];
        let last = flags.len() - 1;

        for (i, flag) in flags.chars().enumerate() {
            let rule = self
                .rules
                .short(flag)
                .ok_or_else(|| Error::illegal_short(flag))?;

            let mut value = None;
            if rule.accepts_value {
                // Only the last flag of a bundle may take the next argument.
                if i == last {
                    value = self.take_value();
                }
                if value.is_none() && rule.value_required {
                    return Err(Error::missing_short(flag, token));
                }
            }

            self.result.matches.push(OptionMatch::short(flag, value));
        }

        Ok(())
    }
}
