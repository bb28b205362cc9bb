//! Help layout and declarative command configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CommandConfig, CommandEntry, LayoutConfig, OptionConfig, MIN_DESCRIPTION_WIDTH};
