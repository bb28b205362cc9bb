//! Argument classification and parsing.
//!
//! ```text
//! raw args → classify each token → consume values by lookahead → ParseResult
//! ```
//!
//! The parser only knows rule tables (`Rule` per flag). Turning declared
//! options into rules, and results back into values, is the registry's job.

mod classifier;
mod parser;
mod rules;

pub use classifier::{
    classify, is_long_name, is_longopt, is_option, is_short_name, is_shortopt, split_longopt,
    TokenKind, BREAK,
};
pub use parser::{parse, Flag, OptionMatch, ParseResult};
pub use rules::{Rule, RuleTable, INDICATOR_LONG, INDICATOR_SHORT};
