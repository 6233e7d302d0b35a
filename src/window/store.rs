use std::rc::Rc;

use super::{WindowId, WindowPatch, WindowRecord, WindowSpec};
use crate::constants::BASE_Z_INDEX;

/// Authoritative window list plus the stacking counter.
///
/// The list keeps insertion order, not stacking order. Every mutation builds
/// a new list from the current one and swaps it in, so a snapshot handed out
/// earlier never changes underneath its holder.
#[derive(Debug)]
pub struct WindowStore {
    windows: Rc<[WindowRecord]>,
    next_z_index: u64,
    next_seq: u64,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowStore {
    pub fn new() -> Self {
        Self::with_base_z_index(BASE_Z_INDEX)
    }

    pub fn with_base_z_index(base: u64) -> Self {
        Self {
            windows: Rc::from(Vec::new()),
            next_z_index: base,
            next_seq: 1,
        }
    }

    pub fn snapshot(&self) -> Rc<[WindowRecord]> {
        Rc::clone(&self.windows)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The value the next open or bring-to-front will receive.
    pub fn next_z_index(&self) -> u64 {
        self.next_z_index
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|window| window.id == id)
    }

    fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|window| window.id == id)
    }

    fn take_z_index(&mut self) -> u64 {
        let z = self.next_z_index;
        self.next_z_index = z.saturating_add(1);
        z
    }

    /// Build a record from `spec`, append it and return its id.
    pub fn insert(&mut self, spec: WindowSpec) -> WindowId {
        let id = WindowId::from_seq(self.next_seq);
        self.next_seq = self.next_seq.saturating_add(1);
        let z_index = self.take_z_index();
        let mut next = self.windows.to_vec();
        next.push(WindowRecord::from_spec(id, z_index, spec));
        self.windows = Rc::from(next);
        id
    }

    pub fn remove(&mut self, id: WindowId) -> bool {
        if self.position(id).is_none() {
            return false;
        }
        let next: Vec<WindowRecord> = self
            .windows
            .iter()
            .filter(|window| window.id != id)
            .cloned()
            .collect();
        self.windows = Rc::from(next);
        true
    }

    /// Replace the record for `id` with a modified copy. Returns false when
    /// the id is unknown.
    pub fn modify(&mut self, id: WindowId, f: impl FnOnce(&mut WindowRecord)) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let mut next = self.windows.to_vec();
        f(&mut next[pos]);
        self.windows = Rc::from(next);
        true
    }

    pub fn patch(&mut self, id: WindowId, patch: WindowPatch) -> bool {
        self.modify(id, |window| window.apply(patch))
    }

    /// Restack `id` above everything issued so far. The counter only moves
    /// when the id exists.
    pub fn raise(&mut self, id: WindowId) -> Option<u64> {
        self.position(id)?;
        let z = self.take_z_index();
        self.modify(id, |window| window.z_index = z);
        Some(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::WindowContent;
    use crate::window::FloatRect;

    fn spec(title: &str) -> WindowSpec {
        WindowSpec::new(
            title,
            WindowContent::Text(String::new()),
            FloatRect::new(0, 0, 200, 150),
        )
    }

    #[test]
    fn insert_assigns_ids_and_z_from_counters() {
        let mut store = WindowStore::new();
        let a = store.insert(spec("a"));
        let b = store.insert(spec("b"));
        assert_ne!(a, b);
        assert_eq!(store.get(a).unwrap().z_index(), BASE_Z_INDEX);
        assert_eq!(store.get(b).unwrap().z_index(), BASE_Z_INDEX + 1);
        assert_eq!(store.next_z_index(), BASE_Z_INDEX + 2);
    }

    #[test]
    fn snapshot_is_not_torn_by_later_mutation() {
        let mut store = WindowStore::new();
        let a = store.insert(spec("a"));
        let before = store.snapshot();
        store.patch(a, WindowPatch::new().position(40, 50));
        store.insert(spec("b"));
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].x(), 0);
        let after = store.snapshot();
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].x(), 40);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = WindowStore::with_base_z_index(5);
        let a = store.insert(spec("a"));
        store.remove(a);
        assert!(!store.remove(a));
        assert!(!store.patch(a, WindowPatch::new().title("x")));
        assert_eq!(store.raise(a), None);
        // raising a missing id does not consume a stacking value
        assert_eq!(store.next_z_index(), 6);
    }

    #[test]
    fn insertion_order_survives_restacking() {
        let mut store = WindowStore::new();
        let a = store.insert(spec("a"));
        let b = store.insert(spec("b"));
        store.raise(a);
        let ids: Vec<WindowId> = store.snapshot().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
