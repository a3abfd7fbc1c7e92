//! Suggestion data supplied by the combobox owner.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate the combobox can offer.
///
/// `value` is what the filter text is matched against and what is displayed
/// unless a `label` is given. Any other fields the owner attaches travel in
/// `extra` untouched and come back with the [`SelectedOption`].
///
/// ```
/// use lattice_combobox::Suggestion;
///
/// let user: Suggestion = serde_json::from_str(
///     r#"{ "id": "u1", "value": "Ada Lovelace", "email": "ada@example.com" }"#,
/// ).unwrap();
/// assert_eq!(user.display_text(), "Ada Lovelace");
/// assert_eq!(user.extra["email"], "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique identifier of the candidate.
    pub id: String,
    /// Text used for matching and default display.
    pub value: String,
    /// Richer text to show instead of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Opaque owner data.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Suggestion {
    /// Create a suggestion with an id and a value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            label: None,
            extra: Map::new(),
        }
    }

    /// Set the display label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach an opaque field using builder pattern.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The text a row shows: the label if present, else the value.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }

    /// The selection payload for this suggestion (everything but `value`).
    pub fn to_option(&self) -> SelectedOption {
        SelectedOption {
            id: self.id.clone(),
            label: self.label.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// A suggestion without its `value`, as reported on selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Identifier of the selected suggestion.
    pub id: String,
    /// Display label of the selected suggestion, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Opaque owner data carried over from the suggestion.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectedOption {
    /// An option carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            extra: Map::new(),
        }
    }
}

impl From<Suggestion> for SelectedOption {
    fn from(suggestion: Suggestion) -> Self {
        Self {
            id: suggestion.id,
            label: suggestion.label,
            extra: suggestion.extra,
        }
    }
}
