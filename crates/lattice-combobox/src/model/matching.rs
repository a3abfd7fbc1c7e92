//! Matching of filter text against suggestion values.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::ComboboxConfig;

/// Controls how matching handles letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    /// Case-sensitive matching ("Ap" won't match "apple").
    CaseSensitive,
    /// Case-insensitive matching ("ap" will match "Apple").
    #[default]
    CaseInsensitive,
}

impl CaseSensitivity {
    fn normalize(self, text: &str) -> Cow<'_, str> {
        match self {
            Self::CaseSensitive => Cow::Borrowed(text),
            Self::CaseInsensitive => Cow::Owned(text.to_lowercase()),
        }
    }
}

/// The rules a primitive applies when computing its match set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRules {
    /// Maximum number of matches, `None` for unlimited.
    pub limit: Option<usize>,
    /// Input shorter than this (in chars) matches nothing.
    pub min_value_length: usize,
    /// How letter case is compared.
    pub case_sensitivity: CaseSensitivity,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::from(&ComboboxConfig::default())
    }
}

impl From<&ComboboxConfig> for MatchRules {
    fn from(config: &ComboboxConfig) -> Self {
        Self {
            limit: config.limit,
            min_value_length: config.min_value_length,
            case_sensitivity: config.case_sensitivity,
        }
    }
}

impl MatchRules {
    /// Check a single value against the input, ignoring the limit.
    pub fn is_match(&self, value: &str, input: &str) -> bool {
        if input.chars().count() < self.min_value_length {
            return false;
        }
        if input.is_empty() {
            return true;
        }
        self.case_sensitivity
            .normalize(value)
            .contains(self.case_sensitivity.normalize(input).as_ref())
    }

    /// Compute the match set for `input` over `values`.
    ///
    /// Matches keep the order of `values`, including duplicates, and are
    /// truncated to `limit`.
    pub fn matches(&self, values: &[String], input: &str) -> Vec<String> {
        if input.chars().count() < self.min_value_length {
            return Vec::new();
        }

        let needle = self.case_sensitivity.normalize(input);
        let limit = self.limit.unwrap_or(usize::MAX);
        values
            .iter()
            .filter(|value| {
                needle.is_empty()
                    || self
                        .case_sensitivity
                        .normalize(value)
                        .contains(needle.as_ref())
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
