//! Error types for the combobox widget.
//!
//! Interaction itself never fails: events, prop updates and rendering degrade
//! gracefully. Errors only arise while setting a widget up.

use std::path::PathBuf;

/// Result type alias for combobox operations.
pub type Result<T> = std::result::Result<T, ComboboxError>;

/// Errors that can occur while configuring or mounting a combobox.
#[derive(Debug, thiserror::Error)]
pub enum ComboboxError {
    /// The configuration text is not valid TOML for [`ComboboxConfig`](crate::ComboboxConfig).
    #[error("Invalid combobox config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read combobox config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid value for config field '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// The portal layer the popover mounts into has been dropped.
    #[error("Portal layer has been dropped")]
    PortalClosed,
}

impl ComboboxError {
    /// Create a config I/O error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }

    /// Create a config validation error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
