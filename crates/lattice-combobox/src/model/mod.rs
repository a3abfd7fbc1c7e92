//! Data model of the combobox: suggestions, matching and filtering.
//!
//! - [`Suggestion`] / [`SelectedOption`]: caller-owned candidates and the
//!   payload reported on selection
//! - [`MatchRules`]: how filter text is matched against suggestion values
//! - [`visible_items`] / [`VisibleItems`]: the pure derivation of the rows to
//!   show, and its memoized form

mod filter;
mod matching;
mod suggestion;

pub use filter::{VisibleItems, visible_items};
pub use matching::{CaseSensitivity, MatchRules};
pub use suggestion::{SelectedOption, Suggestion};
