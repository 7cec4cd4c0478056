//! Contiguous entry table addressed by stable integer handles.
//!
//! Backs [`RecencyList`](crate::ds::RecencyList): every resident cache entry
//! lives in one slot, and list links refer to neighbours by [`SlotId`] instead
//! of by reference. Vacated slots go on a free list and are reused by the next
//! insert, so a cache that churns at full capacity never grows its table.
//!
//! Vacant slots form a singly linked chain threaded through the table itself,
//! so no side allocation tracks them.
//!
//! ```text
//!   slots:     [ Occupied(a) | Vacant(next: 3) | Occupied(c) | Vacant(next: -) ]
//!   free_head: 1 ─► 3
//!   len:       2
//! ```

use std::collections::TryReserveError;
use std::mem;

/// Stable handle to an occupied slot.
///
/// A handle stays valid until its slot is removed; after that the index may be
/// handed out again for an unrelated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    /// Reserves room for `additional` more slots, reporting allocation
    /// failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.slots.try_reserve(additional)
    }

    /// Stores `value`, preferring a vacated slot over growing the table.
    pub fn insert(&mut self, value: T) -> SlotId {
        let Some(idx) = self.free_head else {
            self.slots.push(Slot::Occupied(value));
            self.len += 1;
            return SlotId(self.slots.len() - 1);
        };

        let previous = mem::replace(&mut self.slots[idx], Slot::Occupied(value));
        if let Slot::Vacant { next_free } = previous {
            self.free_head = next_free;
        }
        self.len += 1;
        SlotId(idx)
    }

    /// Vacates the slot and returns its value; `None` if already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if let Slot::Vacant { .. } = slot {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = mem::replace(slot, vacant) else {
            return None;
        };
        self.free_head = Some(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Reserved storage is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.len);

        let mut vacant = 0usize;
        let mut cursor = self.free_head;
        while let Some(idx) = cursor {
            vacant += 1;
            assert!(vacant <= self.slots.len(), "free chain cycles");
            match self.slots.get(idx) {
                Some(Slot::Vacant { next_free }) => cursor = *next_free,
                _ => panic!("free chain reaches non-vacant slot {idx}"),
            }
        }
        assert_eq!(self.len + vacant, self.slots.len());
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_reuses_vacated_slot() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert("c");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id3), Some(&"c"));
        assert_eq!(id1.index(), id3.index());
        arena.debug_validate_invariants();
    }

    #[test]
    fn double_remove_is_noop() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
        arena.debug_validate_invariants();
    }

    #[test]
    fn out_of_range_handle_is_absent() {
        let mut arena: SlotArena<u8> = SlotArena::new();
        let bogus = SlotId(42);
        assert!(!arena.contains(bogus));
        assert_eq!(arena.get(bogus), None);
        assert_eq!(arena.get_mut(bogus), None);
        assert_eq!(arena.remove(bogus), None);
    }

    #[test]
    fn churn_at_fixed_size_does_not_grow_table() {
        let mut arena = SlotArena::new();
        let mut ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        for round in 0..100 {
            let victim = ids.remove(0);
            arena.remove(victim);
            ids.push(arena.insert(round));
        }
        assert_eq!(arena.len(), 4);
        assert!(ids.iter().all(|id| id.index() < 4));
        arena.debug_validate_invariants();
    }

    #[test]
    fn vacated_slots_are_reused_most_recent_first() {
        let mut arena = SlotArena::new();
        let ids: Vec<_> = (0..5).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);
        arena.debug_validate_invariants();

        assert_eq!(arena.insert(30).index(), 3);
        assert_eq!(arena.insert(10).index(), 1);
        assert_eq!(arena.insert(50).index(), 5);
        assert_eq!(arena.len(), 6);
        arena.debug_validate_invariants();
    }

    #[test]
    fn try_reserve_reports_overflow_without_panicking() {
        let mut arena: SlotArena<u64> = SlotArena::new();
        assert!(arena.try_reserve(usize::MAX).is_err());
        assert!(arena.try_reserve(16).is_ok());
        let id = arena.insert(1);
        assert_eq!(arena.get(id), Some(&1));
    }

    #[test]
    fn get_mut_and_clear() {
        let mut arena = SlotArena::new();
        let id = arena.insert(String::from("x"));
        if let Some(value) = arena.get_mut(id) {
            value.push('y');
        }
        assert_eq!(arena.get(id).map(String::as_str), Some("xy"));

        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(id));
        arena.debug_validate_invariants();
    }
}
