//! Accessibility description of the combobox.
//!
//! The input is exposed as a combo box that owns a list box popup. Keyboard
//! focus never leaves the input; the highlighted row is announced through
//! the input's active descendant instead.

use std::sync::atomic::{AtomicU64, Ordering};

use accesskit::{Node, NodeId, Role};

use crate::geometry::Rect;

use super::view::InputAttributes;

/// The accessibility roles the combobox uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibleRole {
    /// The text input with an attached popup.
    ComboBox,
    /// The popup list of options.
    ListBox,
    /// A single option in the list.
    ListBoxOption,
}

impl AccessibleRole {
    /// Convert to the AccessKit role.
    pub fn to_accesskit_role(self) -> Role {
        match self {
            AccessibleRole::ComboBox => Role::ComboBox,
            AccessibleRole::ListBox => Role::ListBox,
            AccessibleRole::ListBoxOption => Role::ListBoxOption,
        }
    }
}

static NEXT_WIDGET: AtomicU64 = AtomicU64::new(1);

/// A block of node ids owned by one combobox.
///
/// Each widget gets its own 32-bit range so ids never collide between
/// widgets: the input, the list, then one id per row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIds {
    base: u64,
}

impl NodeIds {
    /// Reserve a fresh block.
    pub fn allocate() -> Self {
        let widget = NEXT_WIDGET.fetch_add(1, Ordering::Relaxed);
        Self { base: widget << 32 }
    }

    /// Id of the input node.
    pub fn input(&self) -> NodeId {
        NodeId(self.base)
    }

    /// Id of the list node.
    pub fn list(&self) -> NodeId {
        NodeId(self.base | 1)
    }

    /// Id of the row at `index` among the visible items.
    pub fn row(&self, index: usize) -> NodeId {
        NodeId(self.base | (index as u64 + 2))
    }
}

/// State of the input that its node exposes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InputState<'a> {
    pub bounds: Rect,
    pub label: Option<&'a str>,
    pub value: &'a str,
    pub attributes: &'a InputAttributes,
    /// Whether the popover is rendered.
    pub expanded: bool,
    pub active: Option<usize>,
}

pub(crate) fn input_node(ids: &NodeIds, state: InputState<'_>) -> Node {
    let mut node = Node::new(AccessibleRole::ComboBox.to_accesskit_role());
    node.set_bounds(state.bounds.to_accesskit());
    if let Some(label) = state.label {
        node.set_label(label);
    }
    node.set_value(state.value);
    if let Some(placeholder) = state.attributes.placeholder.as_deref() {
        node.set_placeholder(placeholder);
    }
    if state.attributes.disabled {
        node.set_disabled();
    }
    if state.attributes.read_only {
        node.set_read_only();
    }

    node.set_expanded(state.expanded);
    if state.expanded {
        node.set_controls(vec![ids.list()]);
        if let Some(active) = state.active {
            node.set_active_descendant(ids.row(active));
        }
    }
    node
}

pub(crate) fn list_node(ids: &NodeIds, bounds: Rect, list_label: &str, rows: usize) -> Node {
    let mut node = Node::new(AccessibleRole::ListBox.to_accesskit_role());
    node.set_bounds(bounds.to_accesskit());
    node.set_label(list_label);
    node.set_children((0..rows).map(|index| ids.row(index)).collect::<Vec<_>>());
    node
}

pub(crate) fn row_node(bounds: Rect, text: &str, active: bool) -> Node {
    let mut node = Node::new(AccessibleRole::ListBoxOption.to_accesskit_role());
    node.set_bounds(bounds.to_accesskit());
    node.set_label(text);
    node.set_selected(active);
    node
}
