//! Core systems for the lattice combobox.
//!
//! This crate provides the reactive building blocks the combobox widget is
//! assembled from:
//!
//! - **Signal/Slot System**: [`Signal`] notifies connected slots when a widget
//!   reports something upward (typed text, a selected option)
//! - **Property System**: [`Property`] wraps a value with change detection and
//!   a revision counter
//! - **Memoized Derivations**: [`Memo`] caches a derived value keyed on the
//!   revisions it was computed from
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_combobox_core::Signal;
//!
//! let input_changed = Signal::<String>::new();
//!
//! let conn_id = input_changed.connect(|text| {
//!     println!("Filter is now: {}", text);
//! });
//!
//! input_changed.emit("ap".to_string());
//! input_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use lattice_combobox_core::{Memo, Property};
//!
//! let words = Property::new(vec!["apple".to_string(), "banana".to_string()]);
//! let longest = Memo::new();
//!
//! let len = longest.get_or_compute(words.revision(), || {
//!     words.with(|w| w.iter().map(String::len).max().unwrap_or(0))
//! });
//! assert_eq!(len, 6);
//!
//! // A change bumps the revision, so the memo recomputes.
//! assert!(words.set(vec!["cherry pie".to_string()]));
//! let len = longest.get_or_compute(words.revision(), || {
//!     words.with(|w| w.iter().map(String::len).max().unwrap_or(0))
//! });
//! assert_eq!(len, 10);
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{Result, SignalError};
pub use property::{Memo, Property, ReadOnlyProperty, Revision};
pub use signal::{ConnectionId, Signal};
