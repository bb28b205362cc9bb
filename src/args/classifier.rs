//! Argument classifier — lexical rules for option-shaped tokens.
//!
//! These predicates decide what the current token is, and whether a
//! following token may be consumed as a value. A token that looks like an
//! option is never taken as another option's value.

/// The literal token that ends option parsing.
pub const BREAK: &str = "--";

/// Kind of a single raw argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The literal `--` separator.
    Break,
    /// `--name` or `--name=value`.
    Long,
    /// `-a` or a bundle such as `-abc`.
    Short,
    /// Anything else.
    Plain,
}

/// Classify a raw argument.
pub fn classify(arg: &str) -> TokenKind {
    if arg == BREAK {
        TokenKind::Break
    } else if is_longopt(arg) {
        TokenKind::Long
    } else if is_shortopt(arg) {
        TokenKind::Short
    } else {
        TokenKind::Plain
    }
}

/// `-` followed by one or more ASCII alphanumerics and nothing else.
///
/// `-a`, `-0`, `-ab` and `-a1` are short options; `-`, `-a=` and `--a`
/// are not.
pub fn is_shortopt(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphanumeric()),
        None => false,
    }
}

/// `--`, an alphanumeric, then one or more alphanumerics or hyphens.
///
/// The name may be followed by `=` and an inline value: `--ab`, `--a-b`,
/// `--ab=` and `--ab=value` are long options; `--a` and `--a=` are not.
pub fn is_longopt(arg: &str) -> bool {
    match arg.strip_prefix(BREAK) {
        Some(rest) => {
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            is_long_name(name)
        }
        None => false,
    }
}

/// `--`, or any short or long option.
pub fn is_option(arg: &str) -> bool {
    arg == BREAK || is_shortopt(arg) || is_longopt(arg)
}

/// Whether `name` is a valid long flag name (without the leading dashes).
pub fn is_long_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphanumeric()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Whether `flag` is a valid short flag character.
pub fn is_short_name(flag: char) -> bool {
    flag.is_ascii_alphanumeric()
}

/// Split a long option token into its name and inline value.
///
/// An empty inline value (`--name=`) counts as no value.
pub fn split_longopt(arg: &str) -> (&str, Option<&str>) {
    let rest = arg.strip_prefix(BREAK).unwrap_or(arg);
    match rest.split_once('=') {
        Some((name, "")) => (name, None),
        Some((name, value)) => (name, Some(value)),
        None => (rest, None),
    }
}
