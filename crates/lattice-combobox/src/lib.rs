//! Lattice Combobox - a searchable dropdown input for the document editor.
//!
//! The combobox is a search field that filters a list of suggestions as the
//! user types, shows the matches in a floating popover, and reports the
//! picked option back to its owner. It is headless: the host translates its
//! platform events into [`ComboboxEvent`]s and draws the [`ComboboxView`]
//! returned by [`Combobox::render`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_combobox::prelude::*;
//! use parking_lot::Mutex;
//!
//! let layer = PortalLayer::new();
//! let mut mention = Combobox::new(
//!     "People",
//!     vec![
//!         Suggestion::new("u1", "Ada Lovelace"),
//!         Suggestion::new("u2", "Grace Hopper").with_label("Grace Hopper (admin)"),
//!     ],
//! )
//! .with_portal(&layer)
//! .with_attributes(InputAttributes::new().with_placeholder("Search people…"));
//!
//! let picked = Arc::new(Mutex::new(None));
//! let picked_clone = picked.clone();
//! mention.on_select_option(move |option| *picked_clone.lock() = Some(option.clone()));
//!
//! mention.handle_event(&ComboboxEvent::text("gr"));
//! let view = mention.render(&Rect::new(0.0, 0.0, 280.0, 32.0), Rect::new(0.0, 0.0, 1024.0, 768.0));
//!
//! // The popover is mounted in the portal layer as well as returned.
//! assert_eq!(layer.len(), 1);
//! let row = &view.popover.as_ref().unwrap().rows[0];
//! assert_eq!(row.text, "Grace Hopper (admin)");
//!
//! mention.select(0);
//! assert_eq!(picked.lock().as_ref().map(|o| o.id.as_str()), Some("u2"));
//! assert!(!mention.is_open());
//! ```

mod config;
mod error;
pub mod geometry;
pub mod model;
pub mod prelude;
pub mod widget;

pub use config::ComboboxConfig;
pub use error::{ComboboxError, Result};
pub use geometry::{Point, Rect, Size};
pub use model::{CaseSensitivity, MatchRules, SelectedOption, Suggestion, VisibleItems, visible_items};
pub use widget::{
    Align, Combobox, ComboboxEvent, ComboboxPrimitive, ComboboxState, ComboboxView,
    InputAttributes, InputView, Key, Measure, OptionRow, Placement, PopoverFrame, PopoverView,
    PortalHandle, PortalLayer, Side, WeakPortalLayer,
};

/// Reactive building blocks the widget is made of.
pub mod reactive {
    pub use lattice_combobox_core::*;
}
