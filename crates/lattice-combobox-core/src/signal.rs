//! Signal/slot system for the lattice combobox.
//!
//! Signals are how a widget reports upward: the combobox emits
//! `input_changed` for every edit of its filter text and `option_selected`
//! once per user selection. Owners connect slots (closures) to react.
//!
//! Emission is synchronous: every connected slot runs on the emitting thread
//! before `emit` returns. The slot list is snapshotted before invocation, so a
//! slot may connect or disconnect slots on the same signal without
//! deadlocking; such changes take effect from the next emission.
//!
//! # Example
//!
//! ```
//! use lattice_combobox_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SignalError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot, failing if the ID is not connected.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<()> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Returns the number of slots invoked (0 when blocked).
    #[tracing::instrument(skip_all, target = "lattice_combobox_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return 0;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(
            signal.try_disconnect(conn_id),
            Err(SignalError::InvalidConnection)
        );
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        assert_eq!(signal.emit(2), 0);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_multiple_connections() {
        let signal = Signal::<String>::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count_clone = count.clone();
            signal.connect(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(signal.connection_count(), 3);
        assert_eq!(signal.emit("test".to_string()), 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_slot_can_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let id_cell: Arc<Mutex<Option<ConnectionId>>> = Arc::new(Mutex::new(None));
        let signal_clone = signal.clone();
        let id_clone = id_cell.clone();
        let calls_clone = calls.clone();
        let id = signal.connect(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = id_clone.lock().take() {
                signal_clone.disconnect(id);
            }
        });
        *id_cell.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
