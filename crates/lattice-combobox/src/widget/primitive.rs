//! The accessible-combobox state machine behind the widget.
//!
//! [`ComboboxPrimitive`] is the capability the [`Combobox`](super::Combobox)
//! drives: it owns the filter text, the popover's visibility, the match set
//! and the active row. [`ComboboxState`] is the default implementation; any
//! other type implementing the trait can be plugged into the widget.

use lattice_combobox_core::logging::targets;
use lattice_combobox_core::{Property, Revision};

use crate::config::ComboboxConfig;
use crate::geometry::{Rect, Size};
use crate::model::MatchRules;

use super::placement::{Placement, PlacementResult, place};

/// Capabilities of a combobox state machine.
pub trait ComboboxPrimitive {
    /// The current filter text.
    fn input_value(&self) -> String;

    /// Replace the filter text, recomputing matches.
    fn set_input_value(&mut self, value: String);

    /// Whether the popover is logically open.
    fn is_visible(&self) -> bool;

    /// Open the popover.
    fn show(&mut self);

    /// Close the popover.
    fn hide(&mut self);

    /// The values currently matching the filter text.
    fn matches(&self) -> Vec<String>;

    /// Revision of the match set; changes whenever [`matches`](Self::matches) does.
    fn matches_revision(&self) -> Revision;

    /// Replace the matchable values, one per suggestion, in order.
    fn set_values(&mut self, values: Vec<String>);

    /// The placement chosen by the last call to [`place`](Self::place).
    fn placement(&self) -> Placement;

    /// Position a popover of `popover_size` against `anchor` within `viewport`.
    fn place(&mut self, anchor: Rect, popover_size: Size, viewport: Rect) -> PlacementResult;

    /// Index of the active (virtually focused) row among the visible items.
    fn active(&self) -> Option<usize>;

    /// Set the active row.
    fn set_active(&mut self, active: Option<usize>);

    /// Apply the matching and placement settings of `config`.
    ///
    /// Primitives with their own rules may ignore it.
    fn configure(&mut self, config: &ComboboxConfig) {
        let _ = config;
    }
}

/// The default combobox state machine.
///
/// Matches are recomputed synchronously whenever the filter text or the
/// values change, and the active row is cleared whenever the match set
/// changes so it can never point at a row that moved.
#[derive(Debug)]
pub struct ComboboxState {
    rules: MatchRules,
    gutter: f32,
    input: Property<String>,
    values: Property<Vec<String>>,
    matches: Property<Vec<String>>,
    visible: bool,
    active: Option<usize>,
    placement: Placement,
}

impl Default for ComboboxState {
    fn default() -> Self {
        Self::new(&ComboboxConfig::default())
    }
}

impl ComboboxState {
    /// Create a state machine using the matching rules and gutter of `config`.
    pub fn new(config: &ComboboxConfig) -> Self {
        let state = Self {
            rules: MatchRules::from(config),
            gutter: config.gutter,
            input: Property::default(),
            values: Property::default(),
            matches: Property::default(),
            visible: false,
            active: None,
            placement: Placement::default(),
        };
        state.refresh_matches();
        state
    }

    /// The matching rules in use.
    pub fn rules(&self) -> MatchRules {
        self.rules
    }

    /// Replace the matching rules and recompute matches.
    pub fn set_rules(&mut self, rules: MatchRules) {
        self.rules = rules;
        if self.refresh_matches() {
            self.active = None;
        }
    }

    /// The matchable values.
    pub fn values(&self) -> Vec<String> {
        self.values.get()
    }

    fn refresh_matches(&self) -> bool {
        let matches = self
            .values
            .with(|values| self.input.with(|input| self.rules.matches(values, input)));
        let count = matches.len();
        let changed = self.matches.set(matches);
        if changed {
            tracing::trace!(target: targets::PRIMITIVE, count, "match set changed");
        }
        changed
    }
}

impl ComboboxPrimitive for ComboboxState {
    fn input_value(&self) -> String {
        self.input.get()
    }

    fn set_input_value(&mut self, value: String) {
        if self.input.set(value) && self.refresh_matches() {
            self.active = None;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        if !self.visible {
            tracing::trace!(target: targets::PRIMITIVE, "show");
            self.visible = true;
        }
    }

    fn hide(&mut self) {
        if self.visible {
            tracing::trace!(target: targets::PRIMITIVE, "hide");
            self.visible = false;
            self.active = None;
        }
    }

    fn matches(&self) -> Vec<String> {
        self.matches.get()
    }

    fn matches_revision(&self) -> Revision {
        self.matches.revision()
    }

    fn set_values(&mut self, values: Vec<String>) {
        if self.values.set(values) && self.refresh_matches() {
            self.active = None;
        }
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn place(&mut self, anchor: Rect, popover_size: Size, viewport: Rect) -> PlacementResult {
        let result = place(anchor, popover_size, viewport, self.gutter);
        if result.placement != self.placement {
            tracing::trace!(
                target: targets::PRIMITIVE,
                side = ?result.placement.side,
                align = ?result.placement.align,
                "placement changed"
            );
            self.placement = result.placement;
        }
        result
    }

    fn active(&self) -> Option<usize> {
        self.active
    }

    fn set_active(&mut self, active: Option<usize>) {
        self.active = active;
    }

    fn configure(&mut self, config: &ComboboxConfig) {
        self.gutter = config.gutter;
        self.set_rules(MatchRules::from(config));
    }
}

static_assertions::assert_impl_all!(ComboboxState: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn state_with(values: &[&str]) -> ComboboxState {
        let mut state = ComboboxState::default();
        state.set_values(values.iter().map(|v| v.to_string()).collect());
        state
    }

    #[test]
    fn test_empty_input_matches_all_values() {
        let state = state_with(&["Apple", "Banana"]);
        assert_eq!(state.matches(), vec!["Apple", "Banana"]);
    }

    #[test]
    fn test_input_filters_matches() {
        let mut state = state_with(&["Apple", "Banana", "Grape"]);
        let before = state.matches_revision();

        state.set_input_value("ap".into());
        assert_eq!(state.matches(), vec!["Apple", "Grape"]);
        assert!(state.matches_revision() > before);
        assert_eq!(state.input_value(), "ap");
    }

    #[test]
    fn test_unchanged_matches_keep_revision() {
        let mut state = state_with(&["Apple", "Banana"]);
        state.set_input_value("ap".into());
        let revision = state.matches_revision();

        // "app" still matches only Apple.
        state.set_input_value("app".into());
        assert_eq!(state.matches_revision(), revision);
    }

    #[test]
    fn test_match_change_resets_active() {
        let mut state = state_with(&["Apple", "Banana"]);
        state.set_active(Some(1));

        state.set_input_value("ban".into());
        assert_eq!(state.active(), None);
    }

    #[test]
    fn test_values_change_recomputes() {
        let mut state = state_with(&["Apple"]);
        state.set_input_value("an".into());
        assert!(state.matches().is_empty());

        state.set_values(vec!["Banana".into()]);
        assert_eq!(state.matches(), vec!["Banana"]);
    }

    #[test]
    fn test_show_hide() {
        let mut state = state_with(&["Apple"]);
        assert!(!state.is_visible());

        state.show();
        state.set_active(Some(0));
        assert!(state.is_visible());

        state.hide();
        assert!(!state.is_visible());
        assert_eq!(state.active(), None);
    }

    #[test]
    fn test_rules_from_config() {
        let config = ComboboxConfig::default().with_min_value_length(2);
        let mut state = ComboboxState::new(&config);
        state.set_values(vec!["Apple".into()]);

        state.set_input_value("a".into());
        assert!(state.matches().is_empty());

        state.set_rules(MatchRules {
            min_value_length: 0,
            ..state.rules()
        });
        assert_eq!(state.matches(), vec!["Apple"]);
    }

    #[test]
    fn test_place_uses_gutter_and_remembers_placement() {
        let mut state = ComboboxState::new(&ComboboxConfig::default().with_gutter(4.0));
        let viewport = Rect::new(0.0, 0.0, 400.0, 300.0);

        let below = state.place(
            Rect::new(10.0, 10.0, 100.0, 20.0),
            Size::new(100.0, 50.0),
            viewport,
        );
        assert_eq!(below.origin, Point::new(10.0, 34.0));
        assert_eq!(state.placement(), Placement::BOTTOM_START);

        state.place(
            Rect::new(10.0, 260.0, 100.0, 20.0),
            Size::new(100.0, 50.0),
            viewport,
        );
        assert_eq!(state.placement(), Placement::TOP_START);
    }
}
