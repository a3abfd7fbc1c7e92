//! Portal layer for floating content.
//!
//! A [`PortalLayer`] is a shared registry of popovers that the host draws
//! above normal document flow, in mount order. Widgets mount into it through
//! a [`WeakPortalLayer`] so that they never keep the layer alive, and hold the
//! returned [`PortalHandle`] for as long as their content should stay
//! mounted. Dropping the handle unmounts the content.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use lattice_combobox_core::logging::targets;
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{ComboboxError, Result};

use super::view::PopoverView;

new_key_type! {
    /// Identifier of a mounted popover.
    pub struct PortalKey;
}

#[derive(Default)]
struct PortalInner {
    entries: SlotMap<PortalKey, PopoverView>,
    /// Mount order, bottom-most first.
    order: Vec<PortalKey>,
    dirty: AtomicBool,
}

impl PortalInner {
    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

/// Shared registry of mounted popovers.
///
/// Cloning is cheap and yields another handle to the same layer.
#[derive(Clone, Default)]
pub struct PortalLayer {
    inner: Arc<Mutex<PortalInner>>,
}

impl PortalLayer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A non-owning reference for widgets to mount through.
    pub fn downgrade(&self) -> WeakPortalLayer {
        WeakPortalLayer {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Mount a popover on top of everything already mounted.
    pub fn mount(&self, view: PopoverView) -> PortalHandle {
        let mut inner = self.inner.lock();
        let key = inner.entries.insert(view);
        inner.order.push(key);
        inner.mark_dirty();
        tracing::debug!(target: targets::PORTAL, ?key, mounted = inner.order.len(), "popover mounted");

        PortalHandle {
            key,
            layer: Arc::downgrade(&self.inner),
        }
    }

    /// Number of mounted popovers.
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    /// Whether nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The content mounted under `key`.
    pub fn get(&self, key: PortalKey) -> Option<PopoverView> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Snapshot of all mounted popovers, bottom-most first.
    pub fn views(&self) -> Vec<PopoverView> {
        let inner = self.inner.lock();
        inner
            .order
            .iter()
            .filter_map(|key| inner.entries.get(*key).cloned())
            .collect()
    }

    /// Check and clear the dirty flag, set whenever mounted content changes.
    pub fn take_dirty(&self) -> bool {
        self.inner.lock().dirty.swap(false, Ordering::SeqCst)
    }
}

impl fmt::Debug for PortalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalLayer")
            .field("mounted", &self.len())
            .finish()
    }
}

/// A non-owning reference to a [`PortalLayer`].
#[derive(Clone, Default)]
pub struct WeakPortalLayer {
    inner: Weak<Mutex<PortalInner>>,
}

impl WeakPortalLayer {
    /// Mount a popover, failing if the layer has been dropped.
    pub fn mount(&self, view: PopoverView) -> Result<PortalHandle> {
        let inner = self.inner.upgrade().ok_or(ComboboxError::PortalClosed)?;
        Ok(PortalLayer { inner }.mount(view))
    }

    /// Whether the layer still exists.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for WeakPortalLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakPortalLayer")
            .field("alive", &self.is_alive())
            .finish()
    }
}

/// Ownership of one mounted popover. Unmounts on drop.
pub struct PortalHandle {
    key: PortalKey,
    layer: Weak<Mutex<PortalInner>>,
}

impl PortalHandle {
    /// Key of the mounted content.
    pub fn key(&self) -> PortalKey {
        self.key
    }

    /// Replace the mounted content in place, keeping its stacking position.
    pub fn update(&self, view: PopoverView) -> Result<()> {
        let layer = self.layer.upgrade().ok_or(ComboboxError::PortalClosed)?;
        let mut inner = layer.lock();
        let slot = inner
            .entries
            .get_mut(self.key)
            .ok_or(ComboboxError::PortalClosed)?;
        if *slot != view {
            *slot = view;
            inner.mark_dirty();
        }
        Ok(())
    }

    /// Whether the content is still mounted.
    pub fn is_attached(&self) -> bool {
        self.layer
            .upgrade()
            .is_some_and(|layer| layer.lock().entries.contains_key(self.key))
    }
}

impl Drop for PortalHandle {
    fn drop(&mut self) {
        let Some(layer) = self.layer.upgrade() else {
            return;
        };
        let mut inner = layer.lock();
        if inner.entries.remove(self.key).is_some() {
            let key = self.key;
            inner.order.retain(|k| *k != key);
            inner.mark_dirty();
            tracing::debug!(target: targets::PORTAL, ?key, "popover unmounted");
        }
    }
}

impl fmt::Debug for PortalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalHandle")
            .field("key", &self.key)
            .field("attached", &self.is_attached())
            .finish()
    }
}

static_assertions::assert_impl_all!(PortalLayer: Send, Sync);
static_assertions::assert_impl_all!(PortalHandle: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::widget::placement::Placement;
    use accesskit::{Node, NodeId, Role};

    fn popover(width: f32) -> PopoverView {
        PopoverView {
            placement: Placement::BOTTOM_START,
            frame: Placement::BOTTOM_START.frame(),
            origin: Point::ZERO,
            width,
            height: 44.0,
            max_width: width,
            scroll_offset: 0.0,
            rows: Vec::new(),
            node_id: NodeId(1),
            accessibility: Node::new(Role::ListBox),
        }
    }

    #[test]
    fn test_mount_and_drop() {
        let layer = PortalLayer::new();
        let handle = layer.mount(popover(100.0));
        assert_eq!(layer.len(), 1);
        assert!(handle.is_attached());
        assert!(layer.take_dirty());

        drop(handle);
        assert!(layer.is_empty());
        assert!(layer.take_dirty());
    }

    #[test]
    fn test_update_in_place_keeps_order() {
        let layer = PortalLayer::new();
        let first = layer.mount(popover(100.0));
        let _second = layer.mount(popover(200.0));
        layer.take_dirty();

        first.update(popover(150.0)).unwrap();
        let widths: Vec<f32> = layer.views().iter().map(|v| v.width).collect();
        assert_eq!(widths, vec![150.0, 200.0]);
        assert!(layer.take_dirty());

        // Identical content does not dirty the layer.
        first.update(popover(150.0)).unwrap();
        assert!(!layer.take_dirty());
    }

    #[test]
    fn test_weak_layer_does_not_keep_layer_alive() {
        let layer = PortalLayer::new();
        let weak = layer.downgrade();
        let handle = weak.mount(popover(100.0)).unwrap();
        assert_eq!(layer.get(handle.key()).map(|v| v.width), Some(100.0));

        drop(layer);
        assert!(!weak.is_alive());
        assert!(!handle.is_attached());
        assert!(matches!(
            weak.mount(popover(100.0)),
            Err(ComboboxError::PortalClosed)
        ));
        assert!(matches!(
            handle.update(popover(120.0)),
            Err(ComboboxError::PortalClosed)
        ));
    }
}
