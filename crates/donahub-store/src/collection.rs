//! Insertion-ordered concurrent collection.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::record::Record;

struct Slot<E> {
    seq: u64,
    entity: E,
}

/// Records of one type keyed by id.
///
/// Each record keeps the sequence number it got on first insert, so
/// replacing a record never moves it and removing one never reorders the
/// rest.
pub struct Collection<E: Record> {
    slots: DashMap<E::Id, Slot<E>>,
    next_seq: AtomicU64,
}

impl<E: Record> fmt::Debug for Collection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &E::KIND)
            .field("len", &self.slots.len())
            .finish()
    }
}

impl<E: Record> Default for Collection<E> {
    fn default() -> Self {
        Self {
            slots: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl<E: Record> Collection<E> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the record with the given id.
    pub fn get(&self, id: &E::Id) -> Option<E> {
        self.slots.get(id).map(|slot| slot.entity.clone())
    }

    /// Whether a record with the given id exists.
    pub fn contains(&self, id: &E::Id) -> bool {
        self.slots.contains_key(id)
    }

    /// Insert or replace in place.
    pub fn put(&self, entity: E) {
        match self.slots.entry(entity.id()) {
            Entry::Occupied(mut occupied) => occupied.get_mut().entity = entity,
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                vacant.insert(Slot { seq, entity });
            }
        }
    }

    /// Remove and return the record.
    pub fn remove(&self, id: &E::Id) -> Option<E> {
        self.slots.remove(id).map(|(_, slot)| slot.entity)
    }

    /// Records matching `predicate`, in insertion order.
    pub fn filter<F>(&self, predicate: F) -> Vec<E>
    where
        F: Fn(&E) -> bool,
    {
        let mut matched: Vec<(u64, E)> = self
            .slots
            .iter()
            .filter(|slot| predicate(&slot.entity))
            .map(|slot| (slot.seq, slot.entity.clone()))
            .collect();
        matched.sort_by_key(|(seq, _)| *seq);
        matched.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Number of records matching `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&E) -> bool,
    {
        self.slots
            .iter()
            .filter(|slot| predicate(&slot.entity))
            .count()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.slots.clear();
    }
}
