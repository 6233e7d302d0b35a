use std::cell::RefCell;
use std::rc::Rc;

use super::{WindowId, WindowPatch, WindowRecord, WindowSpec, WindowStore};

/// Handle to the shared window store; the only way to change a window.
///
/// Clones share one store. All operations are synchronous and total: an id
/// that no longer exists turns the call into a no-op, so callers racing a
/// close against a pending update need no special handling.
///
/// The store is borrowed only for the duration of a single call, never
/// across calls, so handles may be used freely from nested UI code.
#[derive(Debug, Clone, Default)]
pub struct WindowRegistry {
    store: Rc<RefCell<WindowStore>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: WindowStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }

    /// Open a new window on top of every existing one and return its id.
    pub fn open_window(&self, spec: WindowSpec) -> WindowId {
        let mut store = self.store.borrow_mut();
        let id = store.insert(spec);
        tracing::debug!(
            window_id = %id,
            z_index = store.next_z_index().saturating_sub(1),
            "opened window"
        );
        id
    }

    pub fn close_window(&self, id: WindowId) {
        if self.store.borrow_mut().remove(id) {
            tracing::debug!(window_id = %id, "closed window");
        }
    }

    /// Flip the minimized flag.
    ///
    /// This toggles rather than sets: two independent callers that both
    /// "want the window hidden" will cancel each other out. Use
    /// [`WindowRegistry::update_window`] with an explicit value when set
    /// semantics are needed.
    pub fn minimize_window(&self, id: WindowId) {
        let mut minimized = None;
        self.store.borrow_mut().modify(id, |window| {
            window.minimized = !window.minimized;
            minimized = Some(window.minimized);
        });
        if let Some(minimized) = minimized {
            tracing::debug!(window_id = %id, minimized, "toggled minimize");
        }
    }

    /// Flip the maximized flag. Same toggle caveat as `minimize_window`.
    /// Stored geometry is untouched, so un-maximizing restores it.
    pub fn maximize_window(&self, id: WindowId) {
        let mut maximized = None;
        self.store.borrow_mut().modify(id, |window| {
            window.maximized = !window.maximized;
            maximized = Some(window.maximized);
        });
        if let Some(maximized) = maximized {
            tracing::debug!(window_id = %id, maximized, "toggled maximize");
        }
    }

    pub fn update_window(&self, id: WindowId, patch: WindowPatch) {
        if !self.store.borrow_mut().patch(id, patch) {
            tracing::trace!(window_id = %id, "update for missing window ignored");
        }
    }

    pub fn bring_to_front(&self, id: WindowId) {
        if let Some(z_index) = self.store.borrow_mut().raise(id) {
            tracing::trace!(window_id = %id, z_index, "brought window to front");
        }
    }

    /// Immutable view of every window in insertion order.
    pub fn windows(&self) -> Rc<[WindowRecord]> {
        self.store.borrow().snapshot()
    }

    pub fn get(&self, id: WindowId) -> Option<WindowRecord> {
        self.store.borrow().get(id).cloned()
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.store.borrow().get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.borrow().is_empty()
    }

    /// Visible (non-minimized) windows ordered bottom to top.
    pub fn stacking_order(&self) -> Vec<WindowRecord> {
        let mut visible: Vec<WindowRecord> = self
            .windows()
            .iter()
            .filter(|window| !window.is_minimized())
            .cloned()
            .collect();
        visible.sort_by_key(|window| window.z_index());
        visible
    }

    pub fn topmost(&self) -> Option<WindowId> {
        self.windows()
            .iter()
            .filter(|window| !window.is_minimized())
            .max_by_key(|window| window.z_index())
            .map(|window| window.id())
    }
}
