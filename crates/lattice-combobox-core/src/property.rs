//! Property system for the lattice combobox.
//!
//! Properties are the data backbone of the widget: every piece of state that
//! something else derives from lives in a [`Property`], and every derivation
//! lives in a [`Memo`] keyed on the revisions of its inputs.
//!
//! # Property Types
//!
//! - **Property<T>**: a value with change detection and a revision counter
//! - **ReadOnlyProperty<T>**: a borrowed read-only view of a property
//! - **Memo<K, T>**: a derived value recomputed only when its key changes
//!
//! # Example
//!
//! ```
//! use lattice_combobox_core::{Property, Signal};
//!
//! struct Filter {
//!     text: Property<String>,
//!     text_changed: Signal<String>,
//! }
//!
//! impl Filter {
//!     fn set_text(&self, text: String) {
//!         if self.text.set(text.clone()) {
//!             self.text_changed.emit(text);
//!         }
//!     }
//! }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::logging::targets;

/// Monotonic change counter of a [`Property`].
///
/// Two reads that observe the same revision observed the same value.
pub type Revision = u64;

/// A reactive property that tracks changes.
///
/// `Property<T>` wraps a value and provides change detection. `set()` compares
/// the new value with the current one, stores it only if it differs, and
/// bumps the [`Revision`] so memoized derivations know to recompute.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
    revision: AtomicU64,
}

impl<T> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
            revision: AtomicU64::new(0),
        }
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// The current revision. Increments on every stored change.
    pub fn revision(&self) -> Revision {
        self.revision.load(Ordering::Acquire)
    }

    fn bump(&self) {
        let revision = self.revision.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(target: targets::PROPERTY, revision, "property changed");
    }
}

impl<T: Clone> Property<T> {
    /// Get the current value.
    ///
    /// This clones the value. For large types, use `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            drop(current);
            self.bump();
            true
        } else {
            false
        }
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &*self.value.read())
            .field("revision", &self.revision())
            .finish()
    }
}

/// A read-only view of a property.
///
/// Useful for exposing state publicly while keeping the setter private.
pub struct ReadOnlyProperty<'a, T> {
    inner: &'a Property<T>,
}

impl<'a, T> ReadOnlyProperty<'a, T> {
    /// Create a read-only view of a property.
    pub fn new(property: &'a Property<T>) -> Self {
        Self { inner: property }
    }

    /// Access the value through a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with(f)
    }

    /// The revision of the underlying property.
    pub fn revision(&self) -> Revision {
        self.inner.revision()
    }
}

impl<T: Clone> ReadOnlyProperty<'_, T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }
}

/// A derived value memoized on a key.
///
/// The key is usually a tuple of the [`Revision`]s the value was computed
/// from. `get_or_compute` runs the computation only when the key differs from
/// the one the cached value was computed with, so the cache can never outlive
/// the inputs it was derived from.
pub struct Memo<K, T> {
    cached: Mutex<Option<(K, T)>>,
}

impl<K: PartialEq, T: Clone> Memo<K, T> {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(None),
        }
    }

    /// Return the cached value for `key`, computing it if the key changed.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> T
    where
        F: FnOnce() -> T,
    {
        let mut cached = self.cached.lock();
        if let Some((cached_key, value)) = cached.as_ref()
            && *cached_key == key
        {
            return value.clone();
        }

        tracing::trace!(target: targets::PROPERTY, "memo recomputing");
        let value = compute();
        *cached = Some((key, value.clone()));
        value
    }

    /// Check whether a value is cached for `key`.
    pub fn is_fresh(&self, key: &K) -> bool {
        matches!(self.cached.lock().as_ref(), Some((cached_key, _)) if cached_key == key)
    }
}

impl<K: PartialEq, T: Clone> Default for Memo<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Memo<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("key", &self.cached.lock().as_ref().map(|(k, _)| k))
            .finish()
    }
}
