use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{CommandConfig, LayoutConfig, MIN_DESCRIPTION_WIDTH};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl LayoutConfig {
    /// Validates the layout.
    ///
    /// Checks:
    /// - The flag column is at least two columns wide
    /// - A fixed width leaves room for descriptions next to the flag column
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.option_padding < 2 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "option_padding must be at least 2, got {}",
                    self.option_padding
                ),
            });
        }

        if let Some(columns) = self.columns.filter(|c| *c > 0) {
            let used = u32::from(self.padding) + u32::from(self.option_padding);
            if u32::from(columns) < used + u32::from(MIN_DESCRIPTION_WIDTH) {
                return Err(ConfigError::ValidationError {
                    message: format!(
                        "columns ({}) must leave at least {} columns after padding ({}) and option_padding ({})",
                        columns, MIN_DESCRIPTION_WIDTH, self.padding, self.option_padding
                    ),
                });
            }
        }

        Ok(())
    }
}

impl CommandConfig {
    /// Loads a command description from a TOML file.
    ///
    /// Returns an error if reading, parsing, or validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: CommandConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a command description held in memory.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CommandConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the command description.
    ///
    /// Checks:
    /// - The layout is valid
    /// - Every option names a short or long flag
    /// - Every command has a name
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;

        for (i, option) in self.options.iter().enumerate() {
            let has_long = option.long.as_deref().is_some_and(|l| !l.is_empty());
            if option.short.is_none() && !has_long {
                return Err(ConfigError::ValidationError {
                    message: format!("option #{} has neither a short nor a long flag", i + 1),
                });
            }
        }

        if let Some(i) = self.commands.iter().position(|c| c.name.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("command #{} has an empty name", i + 1),
            });
        }

        Ok(())
    }
}
