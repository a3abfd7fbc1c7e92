//! Render description produced by [`Combobox::render`](super::Combobox::render).
//!
//! The widget is headless: instead of painting, it describes what to draw.
//! A host toolkit turns a [`ComboboxView`] into its own primitives and the
//! mounted [`PopoverView`]s of a [`PortalLayer`](super::PortalLayer) into a
//! floating layer above the document.

use std::collections::BTreeMap;

use accesskit::{Node, NodeId};

use crate::geometry::{Point, Rect};

use super::placement::{Placement, PopoverFrame};

/// Measures the widget's on-screen geometry.
///
/// The host implements this for whatever its layout engine knows. It is
/// queried while rendering, and the anchor width is sampled each time the
/// popover opens.
pub trait Measure {
    /// Bounds of the input container the popover hangs from.
    fn anchor_bounds(&self) -> Rect;
}

impl Measure for Rect {
    fn anchor_bounds(&self) -> Rect {
        *self
    }
}

/// Attributes forwarded to the rendered text input.
///
/// The input is always of kind `"search"`; see [`InputAttributes::KIND`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputAttributes {
    /// Hint text shown while the input is empty.
    pub placeholder: Option<String>,
    /// Form field name.
    pub name: Option<String>,
    /// Ignore every event.
    pub disabled: bool,
    /// Ignore edits; focus and navigation still work.
    pub read_only: bool,
    /// Request focus when first shown.
    pub autofocus: bool,
    /// Maximum input length in chars.
    pub max_length: Option<usize>,
    /// Whether the host should spellcheck the input.
    pub spellcheck: bool,
    /// Any other attributes, passed through verbatim.
    pub extra: BTreeMap<String, String>,
}

impl InputAttributes {
    /// The kind of the rendered input.
    pub const KIND: &'static str = "search";

    /// Create default attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the field name using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the read-only flag using builder pattern.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the autofocus flag using builder pattern.
    pub fn with_autofocus(mut self, autofocus: bool) -> Self {
        self.autofocus = autofocus;
        self
    }

    /// Set the maximum length using builder pattern.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the spellcheck flag using builder pattern.
    pub fn with_spellcheck(mut self, spellcheck: bool) -> Self {
        self.spellcheck = spellcheck;
        self
    }

    /// Add a pass-through attribute using builder pattern.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Everything the host draws for one combobox.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboboxView {
    /// Visible label above the input, if any.
    pub label: Option<String>,
    /// The text input.
    pub input: InputView,
    /// The popover, when it renders. Also mounted in the portal layer.
    pub popover: Option<PopoverView>,
}

impl ComboboxView {
    /// Accessibility nodes of the input, list and rows, keyed by id.
    ///
    /// The input comes first; the host attaches its id under its own focus
    /// parent and pushes all pairs into a `TreeUpdate`.
    pub fn accessibility_nodes(&self) -> Vec<(NodeId, Node)> {
        let mut nodes = vec![(self.input.node_id, self.input.accessibility.clone())];
        if let Some(popover) = &self.popover {
            nodes.push((popover.node_id, popover.accessibility.clone()));
            nodes.extend(
                popover
                    .rows
                    .iter()
                    .map(|row| (row.node_id, row.accessibility.clone())),
            );
        }
        nodes
    }
}

/// The text input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    /// Bounds reported by [`Measure::anchor_bounds`].
    pub bounds: Rect,
    /// Current filter text.
    pub value: String,
    /// Cursor position as a byte offset into `value`.
    pub cursor: usize,
    /// Draw the focus outline.
    pub focused: bool,
    /// Forwarded attributes.
    pub attributes: InputAttributes,
    /// Id of the input's accessibility node.
    pub node_id: NodeId,
    /// Accessibility node of the input.
    pub accessibility: Node,
}

/// The floating list of matches.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverView {
    pub placement: Placement,
    pub frame: PopoverFrame,
    /// Top-left corner in window coordinates.
    pub origin: Point,
    /// Laid-out width, the anchor width measured when the popover opened.
    pub width: f32,
    /// Height of the visible part of the list.
    pub height: f32,
    /// Upper bound on the width; always the full list width.
    pub max_width: f32,
    /// Vertical scroll of the rows, in pixels.
    pub scroll_offset: f32,
    /// One entry per visible item, in suggestion order.
    pub rows: Vec<OptionRow>,
    /// Id of the list's accessibility node, named by the input's `controls`.
    pub node_id: NodeId,
    /// Accessibility node of the list.
    pub accessibility: Node,
}

impl PopoverView {
    /// The popover's rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }

    /// The active row, if any.
    pub fn active_row(&self) -> Option<&OptionRow> {
        self.rows.iter().find(|row| row.active)
    }
}

/// One selectable row of the popover.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRow {
    /// Id of the suggestion this row shows.
    pub id: String,
    /// Label if present, else value.
    pub text: String,
    /// Row bounds in window coordinates, after scrolling.
    pub bounds: Rect,
    /// Highlighted by keyboard or pointer.
    pub active: bool,
    pub node_id: NodeId,
    /// Accessibility node of the row.
    pub accessibility: Node,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_builder() {
        let attributes = InputAttributes::new()
            .with_placeholder("Search people…")
            .with_name("mention")
            .with_max_length(40)
            .with_attribute("data-testid", "mention-input");

        assert_eq!(attributes.placeholder.as_deref(), Some("Search people…"));
        assert_eq!(attributes.max_length, Some(40));
        assert_eq!(attributes.extra["data-testid"], "mention-input");
        assert!(!attributes.disabled);
        assert_eq!(InputAttributes::KIND, "search");
    }

    #[test]
    fn test_rect_is_a_measure() {
        let bounds = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bounds.anchor_bounds(), bounds);
    }
}
