//! Derivation of the visible suggestions from the current match set.

use std::collections::HashSet;
use std::sync::Arc;

use lattice_combobox_core::logging::targets;
use lattice_combobox_core::{Memo, Revision};

use super::suggestion::Suggestion;

/// Keep the suggestions whose value is in `matches`, in suggestion order.
///
/// The result is always a subset of `suggestions`. Every suggestion carrying
/// a matched value is kept, so duplicate values all show up.
pub fn visible_items(suggestions: &[Suggestion], matches: &[String]) -> Vec<Suggestion> {
    if matches.is_empty() {
        return Vec::new();
    }
    let matched: HashSet<&str> = matches.iter().map(String::as_str).collect();
    suggestions
        .iter()
        .filter(|s| matched.contains(s.value.as_str()))
        .cloned()
        .collect()
}

/// [`visible_items`] memoized on the revisions of its two inputs.
///
/// The key is `(suggestions revision, matches revision)`; bumping either one
/// forces a recompute on the next read, so stale rows cannot survive an
/// update of the suggestion list.
#[derive(Debug, Default)]
pub struct VisibleItems {
    memo: Memo<(Revision, Revision), Arc<[Suggestion]>>,
}

impl VisibleItems {
    /// Create an empty derivation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visible items for the given inputs and their revisions.
    pub fn get(
        &self,
        suggestions: (&[Suggestion], Revision),
        matches: (&[String], Revision),
    ) -> Arc<[Suggestion]> {
        self.memo.get_or_compute((suggestions.1, matches.1), || {
            tracing::trace!(
                target: targets::WIDGET,
                suggestions = suggestions.0.len(),
                matches = matches.0.len(),
                "recomputing visible items"
            );
            visible_items(suggestions.0, matches.0).into()
        })
    }

    /// Whether the cached items were derived from these revisions.
    pub fn is_fresh(&self, suggestions: Revision, matches: Revision) -> bool {
        self.memo.is_fresh(&(suggestions, matches))
    }
}
