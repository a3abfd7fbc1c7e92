//! The searchable combobox widget.
//!
//! A `Combobox` is a search input that filters a list of suggestions as the
//! user types and shows the matches in a popover below (or above) the input.
//! Picking a row reports the option to the owner, clears the input and
//! closes the popover.
//!
//! The owner keeps the authoritative suggestion list and the input value;
//! the widget reports every change upward through its signals:
//!
//! - [`Combobox::input_changed`]: the full input text after each user edit
//! - [`Combobox::option_selected`]: the picked option, without its value
//!
//! # Example
//!
//! ```
//! use lattice_combobox::{Combobox, ComboboxEvent, Key, Rect, Suggestion};
//!
//! let mut combo = Combobox::new(
//!     "Fruit",
//!     vec![Suggestion::new("1", "Apple"), Suggestion::new("2", "Banana")],
//! );
//! combo.on_select_option(|option| println!("picked {}", option.id));
//!
//! combo.handle_event(&ComboboxEvent::text("ap"));
//! combo.handle_event(&ComboboxEvent::Key(Key::ArrowDown));
//!
//! let view = combo.render(&Rect::new(10.0, 10.0, 240.0, 32.0), Rect::new(0.0, 0.0, 800.0, 600.0));
//! let popover = view.popover.expect("matches are visible");
//! assert_eq!(popover.rows[0].text, "Apple");
//!
//! combo.handle_event(&ComboboxEvent::Key(Key::Enter));
//! assert_eq!(combo.value(), "");
//! assert!(!combo.is_open());
//! ```

use std::fmt;
use std::sync::Arc;

use lattice_combobox_core::logging::{PerfSpan, span_names, targets};
use lattice_combobox_core::{ConnectionId, Property, ReadOnlyProperty, Signal};

use crate::config::ComboboxConfig;
use crate::geometry::{Point, Rect, Size};
use crate::model::{SelectedOption, Suggestion, VisibleItems};

use super::accessibility::{self, InputState, NodeIds};
use super::events::{ComboboxEvent, Key};
use super::portal::{PortalHandle, PortalLayer, WeakPortalLayer};
use super::primitive::{ComboboxPrimitive, ComboboxState};
use super::text_field::TextField;
use super::view::{ComboboxView, InputAttributes, InputView, Measure, OptionRow, PopoverView};

/// A search input with a popover of matching suggestions.
///
/// `P` is the state machine driving visibility, matching and the active
/// row; [`ComboboxState`] unless a custom [`ComboboxPrimitive`] is given.
///
/// Hosts should not deliver [`ComboboxEvent::Blur`] for a press inside the
/// popover: the press selects the row and the input keeps focus.
pub struct Combobox<P = ComboboxState> {
    primitive: P,
    config: ComboboxConfig,
    list_label: String,
    label: Option<String>,
    attributes: InputAttributes,
    suggestions: Property<Vec<Suggestion>>,
    visible_items: VisibleItems,
    field: TextField,
    focused: bool,

    /// Visibility seen by the last render, to catch opens made through the primitive.
    was_visible: bool,
    /// Set by each open; the next render samples the anchor width.
    needs_measure: bool,
    /// Anchor width measured when the popover last opened.
    list_width: f32,
    /// Height of the rows area in the last rendered popover.
    rows_viewport: f32,
    scroll_offset: f32,
    anchor: Rect,
    popover_bounds: Option<Rect>,

    portal: Option<WeakPortalLayer>,
    mounted: Option<PortalHandle>,
    node_ids: NodeIds,

    // Signals
    /// Signal emitted with the full input text after each user edit.
    pub input_changed: Signal<String>,
    /// Signal emitted when an option is picked.
    pub option_selected: Signal<SelectedOption>,
}

impl Combobox<ComboboxState> {
    /// Create a combobox over `suggestions`.
    ///
    /// `list_label` names the popover list for assistive technology.
    pub fn new(list_label: impl Into<String>, suggestions: Vec<Suggestion>) -> Self {
        Self::with_primitive(list_label, suggestions, ComboboxState::default())
    }
}

impl<P: ComboboxPrimitive> Combobox<P> {
    /// Create a combobox driven by a custom primitive.
    pub fn with_primitive(
        list_label: impl Into<String>,
        suggestions: Vec<Suggestion>,
        mut primitive: P,
    ) -> Self {
        let config = ComboboxConfig::default();
        primitive.set_values(values_of(&suggestions));
        let mut field = TextField::new();
        field.set_text(&primitive.input_value());

        Self {
            primitive,
            rows_viewport: config.max_visible_rows as f32 * config.row_height,
            config,
            list_label: list_label.into(),
            label: None,
            attributes: InputAttributes::default(),
            suggestions: Property::new(suggestions),
            visible_items: VisibleItems::new(),
            field,
            focused: false,
            was_visible: false,
            needs_measure: false,
            list_width: 0.0,
            scroll_offset: 0.0,
            anchor: Rect::ZERO,
            popover_bounds: None,
            portal: None,
            mounted: None,
            node_ids: NodeIds::allocate(),
            input_changed: Signal::new(),
            option_selected: Signal::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Seed the input text using builder pattern. Does not emit.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the visible label using builder pattern.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the input attributes using builder pattern.
    pub fn with_attributes(mut self, attributes: InputAttributes) -> Self {
        self.set_attributes(attributes);
        self
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: ComboboxConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Mount the popover into `layer` using builder pattern.
    ///
    /// The widget keeps only a weak reference; if the layer is dropped the
    /// popover is no longer mounted, but the widget keeps working.
    pub fn with_portal(mut self, layer: &PortalLayer) -> Self {
        self.portal = Some(layer.downgrade());
        self
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// The current input text.
    pub fn value(&self) -> String {
        self.primitive.input_value()
    }

    /// Sync the input text from the owner. Does not emit.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.field.set_text(&value);
        // The field may have truncated the value to the maximum length.
        self.primitive.set_input_value(self.field.text().to_string());
    }

    /// The suggestion list.
    pub fn suggestions(&self) -> ReadOnlyProperty<'_, Vec<Suggestion>> {
        ReadOnlyProperty::new(&self.suggestions)
    }

    /// Replace the suggestion list.
    ///
    /// The matchable values are resynchronized and rows derived from the
    /// previous list are never shown again.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        let values = values_of(&suggestions);
        if self.suggestions.set(suggestions) {
            tracing::trace!(target: targets::WIDGET, count = values.len(), "suggestions replaced");
            self.primitive.set_values(values);
        }
    }

    /// The suggestions currently shown, in suggestion order.
    pub fn visible_items(&self) -> Arc<[Suggestion]> {
        let matches = self.primitive.matches();
        let matches_revision = self.primitive.matches_revision();
        self.suggestions.with(|suggestions| {
            self.visible_items.get(
                (suggestions, self.suggestions.revision()),
                (&matches, matches_revision),
            )
        })
    }

    /// The visible label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the visible label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// The accessible name of the popover list.
    pub fn list_label(&self) -> &str {
        &self.list_label
    }

    /// The input attributes.
    pub fn attributes(&self) -> &InputAttributes {
        &self.attributes
    }

    /// Replace the input attributes.
    ///
    /// Disabling the input closes the popover and drops focus.
    pub fn set_attributes(&mut self, attributes: InputAttributes) {
        self.field.set_max_length(attributes.max_length);
        if self.field.text() != self.primitive.input_value() {
            self.primitive.set_input_value(self.field.text().to_string());
        }
        if attributes.disabled {
            self.focused = false;
            self.hide_popup();
        }
        self.attributes = attributes;
    }

    /// The configuration.
    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ComboboxConfig) {
        self.primitive.configure(&config);
        self.rows_viewport = config.max_visible_rows as f32 * config.row_height;
        self.config = config;
    }

    /// The state machine driving the widget.
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    /// Whether the popover is logically open.
    ///
    /// An open popover with no matches renders nothing.
    pub fn is_open(&self) -> bool {
        self.primitive.is_visible()
    }

    /// Whether the input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The anchor width measured when the popover last opened.
    pub fn list_width(&self) -> f32 {
        self.list_width
    }

    /// Vertical scroll of the popover rows, in pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Index of the active row among the visible items.
    pub fn active_index(&self) -> Option<usize> {
        let count = self.visible_items().len();
        self.primitive.active().filter(|index| *index < count)
    }

    /// Whether the popover is currently mounted in a portal layer.
    pub fn is_mounted(&self) -> bool {
        self.mounted.as_ref().is_some_and(PortalHandle::is_attached)
    }

    // =========================================================================
    // Signal helpers
    // =========================================================================

    /// Connect a slot to [`input_changed`](Self::input_changed).
    pub fn on_change_input<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.input_changed.connect(slot)
    }

    /// Connect a slot to [`option_selected`](Self::option_selected).
    pub fn on_select_option<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&SelectedOption) + Send + Sync + 'static,
    {
        self.option_selected.connect(slot)
    }

    // =========================================================================
    // Popup
    // =========================================================================

    /// Open the popover.
    pub fn show_popup(&mut self) {
        if !self.primitive.is_visible() {
            self.primitive.show();
            self.needs_measure = true;
            self.scroll_offset = 0.0;
            tracing::trace!(target: targets::WIDGET, "popover opened");
        }
    }

    /// Close the popover.
    pub fn hide_popup(&mut self) {
        if self.primitive.is_visible() {
            self.primitive.hide();
            tracing::trace!(target: targets::WIDGET, "popover closed");
        }
        self.popover_bounds = None;
    }

    /// Pick the visible item at `index`.
    ///
    /// The input is cleared and the popover closed before any slot runs, so
    /// both [`option_selected`](Self::option_selected) and the following
    /// `input_changed("")` observe the final state. Returns `false` if there
    /// is no such row.
    pub fn select(&mut self, index: usize) -> bool {
        let items = self.visible_items();
        let Some(item) = items.get(index) else {
            return false;
        };
        let option = item.to_option();
        tracing::debug!(target: targets::WIDGET, id = %option.id, index, "option selected");

        let cleared = !self.primitive.input_value().is_empty();
        self.field.clear();
        if cleared {
            self.primitive.set_input_value(String::new());
        }
        self.hide_popup();

        self.option_selected.emit(option);
        if cleared {
            self.input_changed.emit(String::new());
        }
        true
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle an input event. Returns `true` if the widget consumed it.
    ///
    /// A disabled combobox ignores every event.
    pub fn handle_event(&mut self, event: &ComboboxEvent) -> bool {
        if self.attributes.disabled {
            return false;
        }
        let _span = PerfSpan::new(span_names::EVENT);
        self.sync_field();

        match event {
            ComboboxEvent::Focus => {
                self.focused = true;
                if self.config.open_on_focus {
                    self.show_popup();
                }
                true
            }
            ComboboxEvent::Blur => {
                self.focused = false;
                self.hide_popup();
                true
            }
            ComboboxEvent::Text(text) => self.edit(|field| field.insert(text)),
            ComboboxEvent::Clear => self.edit(TextField::clear),
            ComboboxEvent::Key(key) => self.handle_key(*key),
            ComboboxEvent::PointerMove(point) => self.handle_pointer_move(*point),
            ComboboxEvent::PointerPress(point) => self.handle_pointer_press(*point),
        }
    }

    fn handle_key(&mut self, key: Key) -> bool {
        let open = self.primitive.is_visible();
        let count = self.visible_items().len();

        match key {
            Key::ArrowDown | Key::ArrowUp if !open => {
                self.show_popup();
                true
            }
            Key::ArrowDown => {
                self.move_active(true, count);
                true
            }
            Key::ArrowUp => {
                self.move_active(false, count);
                true
            }
            Key::Home if open && count > 0 => {
                self.set_active_row(0, count);
                true
            }
            Key::End if open && count > 0 => {
                self.set_active_row(count - 1, count);
                true
            }
            Key::PageDown if open && count > 0 => {
                let step = self.config.max_visible_rows.max(1);
                let next = self
                    .active_index()
                    .map_or(step - 1, |index| index + step)
                    .min(count - 1);
                self.set_active_row(next, count);
                true
            }
            Key::PageUp if open && count > 0 => {
                let step = self.config.max_visible_rows.max(1);
                let next = self
                    .active_index()
                    .map_or(0, |index| index.saturating_sub(step));
                self.set_active_row(next, count);
                true
            }
            Key::PageDown | Key::PageUp => false,
            Key::Home => self.field.move_home(),
            Key::End => self.field.move_end(),
            Key::ArrowLeft => self.field.move_left(),
            Key::ArrowRight => self.field.move_right(),
            Key::Backspace => self.edit(TextField::backspace),
            Key::Delete => self.edit(TextField::delete),
            Key::Enter => match self.active_index() {
                Some(index) if open => self.select(index),
                _ => false,
            },
            Key::Escape => {
                if open {
                    self.hide_popup();
                    true
                } else {
                    self.apply_edit(TextField::clear, false)
                }
            }
            Key::Tab => false,
        }
    }

    fn handle_pointer_move(&mut self, point: Point) -> bool {
        let Some(index) = self.row_at(point) else {
            return false;
        };
        if self.primitive.active() != Some(index) {
            self.primitive.set_active(Some(index));
        }
        true
    }

    fn handle_pointer_press(&mut self, point: Point) -> bool {
        if let Some(index) = self.row_at(point) {
            return self.select(index);
        }
        if self.popover_bounds.is_some_and(|bounds| bounds.contains(point)) {
            return true;
        }
        if !self.anchor.contains(point) && self.primitive.is_visible() {
            self.hide_popup();
            return true;
        }
        false
    }

    /// Apply a text edit, report it and open the popover.
    fn edit(&mut self, apply: impl FnOnce(&mut TextField) -> bool) -> bool {
        self.apply_edit(apply, true)
    }

    fn apply_edit(&mut self, apply: impl FnOnce(&mut TextField) -> bool, open: bool) -> bool {
        if self.attributes.read_only || !apply(&mut self.field) {
            return false;
        }

        let text = self.field.text().to_string();
        if text != self.primitive.input_value() {
            tracing::trace!(target: targets::WIDGET, len = text.len(), "input edited");
            self.primitive.set_input_value(text.clone());
            self.input_changed.emit(text);
            if open {
                self.show_popup();
            }
        }
        true
    }

    /// Pick up input changes made through the primitive directly.
    fn sync_field(&mut self) {
        let value = self.primitive.input_value();
        if self.field.text() != value {
            self.field.set_text(&value);
        }
    }

    fn move_active(&mut self, forward: bool, count: usize) {
        if count == 0 {
            return;
        }
        let next = match (self.active_index(), forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        };
        self.set_active_row(next, count);
    }

    fn set_active_row(&mut self, index: usize, count: usize) {
        self.primitive.set_active(Some(index));
        self.ensure_row_visible(index, count);
    }

    /// Scroll so the row at `index` lies within the rows area.
    fn ensure_row_visible(&mut self, index: usize, count: usize) {
        let row_height = self.config.row_height;
        let top = index as f32 * row_height;
        let bottom = top + row_height;

        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.rows_viewport {
            self.scroll_offset = bottom - self.rows_viewport;
        }
        let max_scroll = (count as f32 * row_height - self.rows_viewport).max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, max_scroll);
    }

    /// The visible row under `point` in the last rendered popover.
    fn row_at(&self, point: Point) -> Option<usize> {
        let bounds = self.popover_bounds?;
        let padding = self.config.list_padding;
        if !bounds.contains(point)
            || point.y < bounds.top() + padding
            || point.y >= bounds.bottom() - padding
        {
            return None;
        }
        let offset = point.y - bounds.top() - padding + self.scroll_offset;
        let index = (offset / self.config.row_height) as usize;
        (index < self.visible_items().len()).then_some(index)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Describe what to draw and sync the portal layer.
    ///
    /// The anchor width is sampled from `measure` on the first render after
    /// each open, even when the popover closed and reopened in between. Nothing is rendered or mounted for the popover
    /// while there are no visible items.
    pub fn render(&mut self, measure: &dyn Measure, viewport: Rect) -> ComboboxView {
        let _span = PerfSpan::new(span_names::RENDER);
        self.sync_field();

        let anchor = measure.anchor_bounds();
        self.anchor = anchor;
        let visible = self.primitive.is_visible();
        if visible && (self.needs_measure || !self.was_visible) {
            self.needs_measure = false;
            self.list_width = anchor.width();
            tracing::trace!(target: targets::WIDGET, width = self.list_width, "measured list width");
        }
        self.was_visible = visible;

        let items = self.visible_items();
        let popover = (visible && !items.is_empty()).then(|| self.build_popover(&items, anchor, viewport));
        self.popover_bounds = popover.as_ref().map(PopoverView::bounds);
        self.sync_portal(popover.as_ref());

        let value = self.primitive.input_value();
        let accessibility = accessibility::input_node(
            &self.node_ids,
            InputState {
                bounds: anchor,
                label: self.label.as_deref(),
                value: &value,
                attributes: &self.attributes,
                expanded: popover.is_some(),
                active: self.active_index(),
            },
        );

        ComboboxView {
            label: self.label.clone(),
            input: InputView {
                bounds: anchor,
                cursor: self.field.cursor(),
                value,
                focused: self.focused,
                attributes: self.attributes.clone(),
                node_id: self.node_ids.input(),
                accessibility,
            },
            popover,
        }
    }

    fn build_popover(&mut self, items: &[Suggestion], anchor: Rect, viewport: Rect) -> PopoverView {
        let count = items.len();
        let row_height = self.config.row_height;
        let padding = self.config.list_padding;
        let width = self.list_width;

        let result = self.primitive.place(
            anchor,
            Size::new(width, self.config.list_height(count)),
            viewport,
        );
        let height = self.config.list_height(count).min(result.max_height);

        self.rows_viewport = (height - 2.0 * padding).max(0.0);
        let active = self.active_index();
        match active {
            Some(index) => self.ensure_row_visible(index, count),
            None => {
                let max_scroll = (count as f32 * row_height - self.rows_viewport).max(0.0);
                self.scroll_offset = self.scroll_offset.clamp(0.0, max_scroll);
            }
        }

        let origin = result.origin;
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let bounds = Rect::new(
                    origin.x,
                    origin.y + padding + index as f32 * row_height - self.scroll_offset,
                    width,
                    row_height,
                );
                let text = item.display_text().to_string();
                let active = active == Some(index);
                OptionRow {
                    id: item.id.clone(),
                    accessibility: accessibility::row_node(bounds, &text, active),
                    text,
                    bounds,
                    active,
                    node_id: self.node_ids.row(index),
                }
            })
            .collect();

        let bounds = result.rect(width, height);
        PopoverView {
            placement: result.placement,
            frame: result.placement.frame(),
            origin,
            width,
            height,
            max_width: width,
            scroll_offset: self.scroll_offset,
            rows,
            node_id: self.node_ids.list(),
            accessibility: accessibility::list_node(&self.node_ids, bounds, &self.list_label, count),
        }
    }

    fn sync_portal(&mut self, popover: Option<&PopoverView>) {
        let Some(view) = popover else {
            if self.mounted.take().is_some() {
                tracing::trace!(target: targets::PORTAL, "popover released");
            }
            return;
        };

        if let Some(handle) = &self.mounted {
            match handle.update(view.clone()) {
                Ok(()) => return,
                Err(err) => {
                    tracing::warn!(target: targets::PORTAL, %err, "portal layer gone, popover skipped");
                    self.mounted = None;
                    self.portal = None;
                    return;
                }
            }
        }

        let Some(portal) = &self.portal else {
            return;
        };
        match portal.mount(view.clone()) {
            Ok(handle) => self.mounted = Some(handle),
            Err(err) => {
                tracing::warn!(target: targets::PORTAL, %err, "portal layer gone, popover skipped");
                self.portal = None;
            }
        }
    }
}

impl<P> fmt::Debug for Combobox<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combobox")
            .field("list_label", &self.list_label)
            .field("label", &self.label)
            .field("suggestions", &self.suggestions.with(Vec::len))
            .field("focused", &self.focused)
            .field("list_width", &self.list_width)
            .field("mounted", &self.mounted.is_some())
            .finish_non_exhaustive()
    }
}

fn values_of(suggestions: &[Suggestion]) -> Vec<String> {
    suggestions.iter().map(|s| s.value.clone()).collect()
}

static_assertions::assert_impl_all!(Combobox: Send);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    const ANCHOR: Rect = Rect::new(20.0, 40.0, 240.0, 32.0);
    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn fruit() -> Vec<Suggestion> {
        vec![
            Suggestion::new("1", "Apple"),
            Suggestion::new("2", "Banana"),
            Suggestion::new("3", "Grape"),
        ]
    }

    fn type_text(combo: &mut Combobox, text: &str) {
        combo.handle_event(&ComboboxEvent::text(text));
    }

    fn key(combo: &mut Combobox, key: Key) -> bool {
        combo.handle_event(&ComboboxEvent::Key(key))
    }

    #[test]
    fn test_typing_emits_full_text_once_per_edit() {
        let mut combo = Combobox::new("Fruit", fruit());
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        combo.on_change_input(move |text| received_clone.lock().push(text.clone()));

        type_text(&mut combo, "a");
        type_text(&mut combo, "p");
        key(&mut combo, Key::Backspace);

        assert_eq!(*received.lock(), vec!["a", "ap", "a"]);
        assert!(combo.is_open());
    }

    #[test]
    fn test_set_value_does_not_echo() {
        let mut combo = Combobox::new("Fruit", fruit()).with_value("gr");
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        combo.on_change_input(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        combo.set_value("ban");
        assert_eq!(combo.value(), "ban");
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // Edits continue from the synced text.
        type_text(&mut combo, "a");
        assert_eq!(combo.value(), "bana");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_visible_items_follow_matches() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");
        let ids: Vec<_> = combo.visible_items().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_arrow_keys_open_then_wrap() {
        let mut combo = Combobox::new("Fruit", fruit());
        assert!(key(&mut combo, Key::ArrowDown));
        assert!(combo.is_open());
        assert_eq!(combo.active_index(), None);

        key(&mut combo, Key::ArrowDown);
        assert_eq!(combo.active_index(), Some(0));
        key(&mut combo, Key::ArrowUp);
        assert_eq!(combo.active_index(), Some(2));
        key(&mut combo, Key::ArrowDown);
        assert_eq!(combo.active_index(), Some(0));
    }

    #[test]
    fn test_home_end_and_paging() {
        let suggestions = (0..20)
            .map(|i| Suggestion::new(i.to_string(), format!("item {i}")))
            .collect();
        let config = ComboboxConfig::default()
            .with_limit(None)
            .with_max_visible_rows(5);
        let mut combo = Combobox::new("Items", suggestions).with_config(config);
        key(&mut combo, Key::ArrowDown);

        key(&mut combo, Key::End);
        assert_eq!(combo.active_index(), Some(19));
        key(&mut combo, Key::PageUp);
        assert_eq!(combo.active_index(), Some(14));
        key(&mut combo, Key::Home);
        assert_eq!(combo.active_index(), Some(0));
        key(&mut combo, Key::PageDown);
        assert_eq!(combo.active_index(), Some(5));
    }

    #[test]
    fn test_enter_selects_active_row() {
        let mut combo = Combobox::new("Fruit", fruit());
        let selected = Arc::new(Mutex::new(Vec::new()));
        let selected_clone = selected.clone();
        combo.on_select_option(move |option| selected_clone.lock().push(option.clone()));

        type_text(&mut combo, "an");
        key(&mut combo, Key::ArrowDown);
        assert!(key(&mut combo, Key::Enter));

        assert_eq!(*selected.lock(), vec![SelectedOption::with_id("2")]);
        assert_eq!(combo.value(), "");
        assert!(!combo.is_open());
    }

    #[test]
    fn test_enter_without_active_row_is_ignored() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "an");
        assert!(!key(&mut combo, Key::Enter));
        assert!(combo.is_open());
    }

    #[test]
    fn test_selection_state_is_final_when_slots_run() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        combo.on_change_input(move |text| seen_clone.lock().push(text.clone()));

        assert!(combo.select(0));
        assert_eq!(*seen.lock(), vec![String::new()]);
        assert!(!combo.select(5));
    }

    #[test]
    fn test_select_with_empty_input_does_not_emit_change() {
        let mut combo = Combobox::new("Fruit", fruit());
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        combo.on_change_input(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        key(&mut combo, Key::ArrowDown);
        assert!(combo.select(1));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_escape_hides_then_clears() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");

        assert!(key(&mut combo, Key::Escape));
        assert!(!combo.is_open());
        assert_eq!(combo.value(), "ap");

        assert!(key(&mut combo, Key::Escape));
        assert_eq!(combo.value(), "");
        assert!(!combo.is_open());
    }

    #[test]
    fn test_focus_and_blur() {
        let mut combo = Combobox::new("Fruit", fruit());
        combo.handle_event(&ComboboxEvent::Focus);
        assert!(combo.is_focused());
        assert!(!combo.is_open());

        type_text(&mut combo, "a");
        combo.handle_event(&ComboboxEvent::Blur);
        assert!(!combo.is_focused());
        assert!(!combo.is_open());
    }

    #[test]
    fn test_open_on_focus() {
        let config = ComboboxConfig::default().with_open_on_focus(true);
        let mut combo = Combobox::new("Fruit", fruit()).with_config(config);
        combo.handle_event(&ComboboxEvent::Focus);
        assert!(combo.is_open());
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut combo =
            Combobox::new("Fruit", fruit()).with_attributes(InputAttributes::new().with_disabled(true));
        assert!(!combo.handle_event(&ComboboxEvent::Focus));
        assert!(!combo.handle_event(&ComboboxEvent::text("a")));
        assert_eq!(combo.value(), "");
    }

    #[test]
    fn test_read_only_ignores_edits() {
        let mut combo = Combobox::new("Fruit", fruit())
            .with_value("ap")
            .with_attributes(InputAttributes::new().with_read_only(true));
        assert!(!combo.handle_event(&ComboboxEvent::text("p")));
        assert!(!key(&mut combo, Key::Backspace));
        assert!(combo.handle_event(&ComboboxEvent::Focus));
        assert_eq!(combo.value(), "ap");
    }

    #[test]
    fn test_max_length_applies_to_value() {
        let mut combo = Combobox::new("Fruit", fruit())
            .with_attributes(InputAttributes::new().with_max_length(3));
        type_text(&mut combo, "grape");
        assert_eq!(combo.value(), "gra");

        combo.set_value("banana");
        assert_eq!(combo.value(), "ban");
    }

    #[test]
    fn test_render_measures_width_on_open() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");

        let view = combo.render(&ANCHOR, VIEWPORT);
        let popover = view.popover.unwrap();
        assert_eq!(combo.list_width(), 240.0);
        assert_eq!(popover.width, 240.0);
        assert_eq!(popover.max_width, 240.0);

        // Resizing while open keeps the measured width until it reopens.
        let wider = Rect::new(20.0, 40.0, 300.0, 32.0);
        assert_eq!(combo.render(&wider, VIEWPORT).popover.unwrap().width, 240.0);

        key(&mut combo, Key::Escape);
        combo.render(&wider, VIEWPORT);
        key(&mut combo, Key::ArrowDown);
        assert_eq!(combo.render(&wider, VIEWPORT).popover.unwrap().width, 300.0);
    }

    #[test]
    fn test_reopen_between_renders_measures_again() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "a");
        assert_eq!(combo.render(&ANCHOR, VIEWPORT).popover.unwrap().width, 240.0);

        let wider = Rect::new(20.0, 40.0, 400.0, 32.0);
        key(&mut combo, Key::Escape);
        key(&mut combo, Key::ArrowDown);
        assert_eq!(combo.render(&wider, VIEWPORT).popover.unwrap().width, 400.0);

        // Selecting closes; typing again reopens before the next render.
        assert!(combo.select(0));
        type_text(&mut combo, "b");
        assert_eq!(combo.render(&ANCHOR, VIEWPORT).popover.unwrap().width, 240.0);
    }

    #[test]
    fn test_render_popover_geometry() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");
        let popover = combo.render(&ANCHOR, VIEWPORT).popover.unwrap();

        // Two rows of 32 plus 6 padding on each side, 2 below the anchor.
        assert_eq!(popover.height, 2.0 * 32.0 + 12.0);
        assert_eq!(popover.origin, Point::new(20.0, 74.0));
        assert!(popover.frame.top_anchor);
        assert_eq!(popover.rows[1].bounds, Rect::new(20.0, 74.0 + 6.0 + 32.0, 240.0, 32.0));
    }

    #[test]
    fn test_no_items_renders_nothing() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "zzz");
        assert!(combo.is_open());

        let view = combo.render(&ANCHOR, VIEWPORT);
        assert!(view.popover.is_none());
        assert_eq!(view.input.accessibility.is_expanded(), Some(false));
    }

    #[test]
    fn test_pointer_hover_and_press() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");
        let popover = combo.render(&ANCHOR, VIEWPORT).popover.unwrap();
        let grape = popover.rows[1].bounds;
        let center = Point::new(grape.left() + 5.0, grape.top() + 5.0);

        assert!(combo.handle_event(&ComboboxEvent::PointerMove(center)));
        assert_eq!(combo.active_index(), Some(1));

        let selected = Arc::new(Mutex::new(None));
        let selected_clone = selected.clone();
        combo.on_select_option(move |option| *selected_clone.lock() = Some(option.id.clone()));

        assert!(combo.handle_event(&ComboboxEvent::PointerPress(center)));
        assert_eq!(selected.lock().as_deref(), Some("3"));
        assert!(!combo.is_open());
    }

    #[test]
    fn test_press_outside_hides() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");
        combo.render(&ANCHOR, VIEWPORT);

        // Inside the input: left to the host.
        assert!(!combo.handle_event(&ComboboxEvent::PointerPress(Point::new(30.0, 50.0))));
        assert!(combo.is_open());

        assert!(combo.handle_event(&ComboboxEvent::PointerPress(Point::new(700.0, 500.0))));
        assert!(!combo.is_open());
    }

    #[test]
    fn test_active_row_scrolls_into_view() {
        let suggestions = (0..10)
            .map(|i| Suggestion::new(i.to_string(), format!("row {i}")))
            .collect();
        let config = ComboboxConfig::default().with_max_visible_rows(3);
        let mut combo = Combobox::new("Rows", suggestions).with_config(config);
        key(&mut combo, Key::ArrowDown);
        combo.render(&ANCHOR, VIEWPORT);

        key(&mut combo, Key::End);
        let popover = combo.render(&ANCHOR, VIEWPORT).popover.unwrap();
        // Ten rows of 32 in a three-row viewport: scrolled to the bottom.
        assert_eq!(popover.scroll_offset, 7.0 * 32.0);
        assert!(popover.rows[9].active);

        key(&mut combo, Key::Home);
        assert_eq!(combo.scroll_offset(), 0.0);
    }

    #[test]
    fn test_accessibility_tree() {
        let mut combo = Combobox::new("Fruit", fruit()).with_label("Favourite fruit");
        key(&mut combo, Key::ArrowDown);
        key(&mut combo, Key::ArrowDown);
        let view = combo.render(&ANCHOR, VIEWPORT);

        let input = &view.input.accessibility;
        assert_eq!(input.role(), accesskit::Role::ComboBox);
        assert_eq!(input.label(), Some("Favourite fruit"));
        assert_eq!(input.is_expanded(), Some(true));

        let popover = view.popover.unwrap();
        assert_eq!(popover.accessibility.role(), accesskit::Role::ListBox);
        assert_eq!(popover.accessibility.label(), Some("Fruit"));
        assert_eq!(popover.accessibility.children().len(), 3);
        assert_eq!(input.active_descendant(), Some(popover.accessibility.children()[0]));
        assert_eq!(popover.rows[0].accessibility.is_selected(), Some(true));
    }

    #[test]
    fn test_accessibility_references_resolve_to_view_ids() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "a");
        key(&mut combo, Key::ArrowDown);
        key(&mut combo, Key::ArrowDown);
        let view = combo.render(&ANCHOR, VIEWPORT);
        let popover = view.popover.as_ref().unwrap();

        let row_ids: Vec<_> = popover.rows.iter().map(|row| row.node_id).collect();
        assert_eq!(popover.accessibility.children(), row_ids.as_slice());
        assert_eq!(view.input.accessibility.controls(), &[popover.node_id]);
        let active = popover.active_row().unwrap();
        assert_eq!(active.text, "Banana");
        assert_eq!(view.input.accessibility.active_descendant(), Some(active.node_id));

        // Every referenced id is among the nodes handed to the host.
        let nodes = view.accessibility_nodes();
        assert_eq!(nodes.len(), 2 + popover.rows.len());
        assert_eq!(nodes[0].0, view.input.node_id);
        for id in row_ids.iter().chain([&popover.node_id]) {
            assert!(nodes.iter().any(|(node_id, _)| node_id == id));
        }

        key(&mut combo, Key::Escape);
        let closed = combo.render(&ANCHOR, VIEWPORT);
        assert_eq!(closed.accessibility_nodes().len(), 1);
    }

    #[test]
    fn test_portal_mounts_and_unmounts() {
        let layer = PortalLayer::new();
        let mut combo = Combobox::new("Fruit", fruit()).with_portal(&layer);

        type_text(&mut combo, "ap");
        combo.render(&ANCHOR, VIEWPORT);
        assert_eq!(layer.len(), 1);
        assert!(combo.is_mounted());

        type_text(&mut combo, "p");
        combo.render(&ANCHOR, VIEWPORT);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.views()[0].rows.len(), 1);

        key(&mut combo, Key::Escape);
        combo.render(&ANCHOR, VIEWPORT);
        assert!(layer.is_empty());

        key(&mut combo, Key::ArrowDown);
        combo.render(&ANCHOR, VIEWPORT);
        assert_eq!(layer.len(), 1);
        drop(combo);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_dropped_portal_is_skipped() {
        let layer = PortalLayer::new();
        let mut combo = Combobox::new("Fruit", fruit()).with_portal(&layer);
        drop(layer);

        type_text(&mut combo, "ap");
        let view = combo.render(&ANCHOR, VIEWPORT);
        assert!(view.popover.is_some());
        assert!(!combo.is_mounted());
    }

    #[test]
    fn test_set_suggestions_while_open() {
        let mut combo = Combobox::new("Fruit", fruit());
        type_text(&mut combo, "ap");
        assert_eq!(combo.visible_items().len(), 2);

        combo.set_suggestions(vec![Suggestion::new("9", "Papaya")]);
        let items = combo.visible_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "9");
        assert_eq!(combo.suggestions().with(Vec::len), 1);
    }
}
