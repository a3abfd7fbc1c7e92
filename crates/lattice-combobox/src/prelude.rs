//! Prelude module for the lattice combobox.
//!
//! ```
//! use lattice_combobox::prelude::*;
//! ```
//!
//! This provides access to:
//! - The widget (`Combobox`, `ComboboxEvent`, `Key`)
//! - Suggestion data (`Suggestion`, `SelectedOption`)
//! - Rendering (`ComboboxView`, `PopoverView`, `PortalLayer`, `Measure`)
//! - Geometry types (`Point`, `Size`, `Rect`)

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use lattice_combobox_core::{ConnectionId, Property, Signal};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{
    Combobox, ComboboxEvent, ComboboxPrimitive, ComboboxState, InputAttributes, Key,
};

// ============================================================================
// Data Model and Configuration
// ============================================================================

pub use crate::config::ComboboxConfig;
pub use crate::model::{CaseSensitivity, SelectedOption, Suggestion};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::widget::{ComboboxView, Measure, OptionRow, Placement, PopoverView, PortalLayer};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::geometry::{Point, Rect, Size};
