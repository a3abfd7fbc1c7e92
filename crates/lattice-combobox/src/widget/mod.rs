//! The combobox widget and its collaborators.
//!
//! - [`Combobox`]: the widget itself, driven by events and rendered into a
//!   [`ComboboxView`]
//! - [`ComboboxPrimitive`] / [`ComboboxState`]: the state machine behind it
//! - [`place`] / [`Placement`]: popover positioning against the input
//! - [`PortalLayer`]: the floating layer the popover is mounted into
//! - [`TextField`]: grapheme-aware editing of the input text
//!
//! # Overview
//!
//! The widget is headless. The host feeds it [`ComboboxEvent`]s, calls
//! [`Combobox::render`] with something implementing [`Measure`], and draws
//! the returned description. Floating content is read from the
//! [`PortalLayer`] so it can be drawn above the rest of the document.

mod accessibility;
mod combobox;
mod events;
mod placement;
mod portal;
mod primitive;
mod text_field;
mod view;

pub use accessibility::{AccessibleRole, NodeIds};
pub use combobox::Combobox;
pub use events::{ComboboxEvent, Key};
pub use placement::{Align, Placement, PlacementResult, PopoverFrame, Side, place};
pub use portal::{PortalHandle, PortalKey, PortalLayer, WeakPortalLayer};
pub use primitive::{ComboboxPrimitive, ComboboxState};
pub use text_field::TextField;
pub use view::{ComboboxView, InputAttributes, InputView, Measure, OptionRow, PopoverView};
