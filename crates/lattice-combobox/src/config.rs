//! Combobox configuration.
//!
//! Configuration controls the matching rules of the default primitive and the
//! popover's metrics. It can be built in code or loaded from TOML:
//!
//! ```
//! use lattice_combobox::ComboboxConfig;
//!
//! let config = ComboboxConfig::from_toml_str(r#"
//! gutter = 4.0
//! limit = 25
//! case_sensitivity = "case_sensitive"
//! "#)?;
//! assert_eq!(config.limit, Some(25));
//! # Ok::<(), lattice_combobox::ComboboxError>(())
//! ```

use std::path::Path;

use lattice_combobox_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ComboboxError, Result};
use crate::model::CaseSensitivity;

/// Matching and layout settings for a combobox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComboboxConfig {
    /// Gap in pixels between the input and the popover.
    pub gutter: f32,
    /// Maximum number of matches, `None` for unlimited (`limit = 0` in TOML).
    #[serde(with = "limit_serde")]
    pub limit: Option<usize>,
    /// Minimum input length (in chars) before anything matches.
    pub min_value_length: usize,
    /// How matching treats letter case.
    pub case_sensitivity: CaseSensitivity,
    /// Whether focusing the input opens the popover.
    pub open_on_focus: bool,
    /// Height of one option row.
    pub row_height: f32,
    /// Rows shown before the list scrolls.
    pub max_visible_rows: usize,
    /// Vertical padding inside the popover frame.
    pub list_padding: f32,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            gutter: 2.0,
            limit: Some(10),
            min_value_length: 0,
            case_sensitivity: CaseSensitivity::CaseInsensitive,
            open_on_focus: false,
            row_height: 32.0,
            max_visible_rows: 8,
            list_padding: 6.0,
        }
    }
}

impl ComboboxConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing keys take their default values; unknown keys are rejected.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded combobox config");
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|err| ComboboxError::config_io(path, err))?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| ComboboxError::invalid_config("*", err.to_string()))
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("gutter", self.gutter),
            ("row_height", self.row_height),
            ("list_padding", self.list_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ComboboxError::invalid_config(
                    field,
                    format!("expected a finite, non-negative length, got {value}"),
                ));
            }
        }
        if self.row_height == 0.0 {
            return Err(ComboboxError::invalid_config("row_height", "must be positive"));
        }
        if self.max_visible_rows == 0 {
            return Err(ComboboxError::invalid_config(
                "max_visible_rows",
                "must be at least 1",
            ));
        }
        if self.limit == Some(0) {
            return Err(ComboboxError::invalid_config(
                "limit",
                "use no limit instead of a limit of 0",
            ));
        }
        Ok(())
    }

    /// Set the gutter using builder pattern.
    pub fn with_gutter(mut self, gutter: f32) -> Self {
        self.gutter = gutter;
        self
    }

    /// Set the match limit using builder pattern.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the minimum input length using builder pattern.
    pub fn with_min_value_length(mut self, min: usize) -> Self {
        self.min_value_length = min;
        self
    }

    /// Set case sensitivity using builder pattern.
    pub fn with_case_sensitivity(mut self, sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = sensitivity;
        self
    }

    /// Set whether focus opens the popover using builder pattern.
    pub fn with_open_on_focus(mut self, open: bool) -> Self {
        self.open_on_focus = open;
        self
    }

    /// Set the row height using builder pattern.
    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    /// Set the maximum visible rows using builder pattern.
    pub fn with_max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows;
        self
    }

    /// Set the list padding using builder pattern.
    pub fn with_list_padding(mut self, padding: f32) -> Self {
        self.list_padding = padding;
        self
    }

    /// Height of a popover showing `rows` rows, capped at `max_visible_rows`.
    pub fn list_height(&self, rows: usize) -> f32 {
        rows.min(self.max_visible_rows) as f32 * self.row_height + 2.0 * self.list_padding
    }
}

/// TOML has no null, so an unlimited match count is written as `0`.
mod limit_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(limit: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(limit.unwrap_or(0) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let limit = u64::deserialize(deserializer)?;
        Ok((limit > 0).then_some(limit as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = ComboboxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gutter, 2.0);
        assert_eq!(config.limit, Some(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ComboboxConfig::from_toml_str("open_on_focus = true\n").unwrap();
        assert!(config.open_on_focus);
        assert_eq!(config.row_height, 32.0);
        assert_eq!(config.case_sensitivity, CaseSensitivity::CaseInsensitive);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ComboboxConfig::from_toml_str("colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, ComboboxError::ConfigParse(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = ComboboxConfig::from_toml_str("gutter = -1.0\n").unwrap_err();
        assert!(matches!(err, ComboboxError::InvalidConfig { field: "gutter", .. }));

        let err = ComboboxConfig::from_toml_str("max_visible_rows = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ComboboxError::InvalidConfig {
                field: "max_visible_rows",
                ..
            }
        ));

        let err = ComboboxConfig::default().with_limit(Some(0)).validate().unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "limit = 3").unwrap();
        writeln!(file, "min_value_length = 1").unwrap();

        let config = ComboboxConfig::from_file(file.path()).unwrap();
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.min_value_length, 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ComboboxConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ComboboxError::ConfigIo { .. }));
    }

    #[test]
    fn test_zero_limit_means_unlimited() {
        let config = ComboboxConfig::from_toml_str("limit = 0\n").unwrap();
        assert_eq!(config.limit, None);

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("limit = 0"));
    }

    #[test]
    fn test_toml_round_trip_of_custom_config() {
        let config = ComboboxConfig::default()
            .with_gutter(6.0)
            .with_case_sensitivity(CaseSensitivity::CaseSensitive);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ComboboxConfig::from_toml_str(&text).unwrap(), config);
    }
}
