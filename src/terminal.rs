//! Terminal width probe.

use tracing::debug;

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Current terminal width in columns.
///
/// Falls back to the `COLUMNS` environment variable, then to
/// `DEFAULT_COLUMNS`. A reported width of zero counts as unavailable.
pub fn columns() -> u16 {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols,
        _ => env_columns().unwrap_or_else(|| {
            debug!(default = DEFAULT_COLUMNS, "terminal width unavailable, using default");
            DEFAULT_COLUMNS
        }),
    }
}

fn env_columns() -> Option<u16> {
    let value = std::env::var("COLUMNS").ok()?;
    parse_columns(&value)
}

fn parse_columns(value: &str) -> Option<u16> {
    value.trim().parse().ok().filter(|c| *c > 0)
}
