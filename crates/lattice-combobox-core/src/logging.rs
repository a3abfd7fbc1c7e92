//! Logging facilities for the lattice combobox.
//!
//! The combobox uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the host application installs a subscriber:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("lattice_combobox=debug"))
//!     .init();
//! ```
//!
//! Every event is emitted with one of the targets in [`targets`], so a filter
//! directive such as `lattice_combobox::portal=trace` isolates one subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_combobox_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_combobox_core::signal";
    /// Property and memo target.
    pub const PROPERTY: &str = "lattice_combobox_core::property";
    /// Combobox widget target (events, selection, rendering).
    pub const WIDGET: &str = "lattice_combobox::widget";
    /// Combobox primitive target (matches, visibility, placement).
    pub const PRIMITIVE: &str = "lattice_combobox::primitive";
    /// Portal layer target (mount/unmount of floating content).
    pub const PORTAL: &str = "lattice_combobox::portal";
    /// Configuration loading target.
    pub const CONFIG: &str = "lattice_combobox::config";
}

/// Span names used for tracing.
pub mod span_names {
    /// Event dispatch into the combobox.
    pub const EVENT: &str = "combobox_event";
    /// Render pass of the combobox.
    pub const RENDER: &str = "combobox_render";
}

/// A guard that records the duration of an operation as a tracing span.
///
/// The span is entered on creation and exited when the guard is dropped.
///
/// ```
/// use lattice_combobox_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("filter_suggestions");
///     // ... work ...
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "lattice_combobox_core::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
