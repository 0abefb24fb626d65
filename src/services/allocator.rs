// Per-entity-type identifier allocator
//
// Design Decision: Counter map seeded once, incremented forever
//
// Deriving the next id by scanning a collection on every create is O(n) per
// insert. The allocator scans once, on first use of an entity type, and
// hands out `last + 1` in O(1) from then on. Counters for different types
// live under different keys and never affect each other.
//
// Seeding is first-writer-wins: once a counter exists, later seeds are
// ignored and do not even consume their id iterator. A dataset loaded after
// allocation has started cannot raise the counter; the store rejects a
// colliding insert with DuplicateId instead.

use crate::models::EntityId;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Issues strictly increasing ids per entity type
///
/// Thread Safety: counters sit behind a std Mutex that is only held for the
/// duration of one map operation and never across an `.await`, so ids are
/// issued synchronously and concurrent creates cannot collide.
///
/// Usage:
///     let allocator = IdAllocator::new();
///     allocator.seed("appointment", existing.iter().map(|a| a.id));
///     let id = allocator.allocate("appointment");
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // A panic elsewhere cannot leave a half-written counter behind
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Next id for `entity_type`: last issued + 1, starting from 1
    pub fn allocate(&self, entity_type: &str) -> EntityId {
        let mut counters = self.counters();

        let next = match counters.get_mut(entity_type) {
            Some(last) => {
                *last += 1;
                *last
            }
            None => {
                counters.insert(entity_type.to_owned(), 1);
                1
            }
        };

        tracing::trace!(entity_type, id = next, "allocated id");
        EntityId::new(next)
    }

    /// Start the counter at the maximum of `ids` (0 when empty)
    ///
    /// No-op when a counter for `entity_type` already exists. Returns
    /// whether the seed took effect.
    pub fn seed<I>(&self, entity_type: &str, ids: I) -> bool
    where
        I: IntoIterator<Item = EntityId>,
    {
        let mut counters = self.counters();

        if let Some(current) = counters.get(entity_type) {
            tracing::trace!(entity_type, current, "counter exists, seed ignored");
            return false;
        }

        let max = ids.into_iter().map(EntityId::get).max().unwrap_or(0);
        counters.insert(entity_type.to_owned(), max);

        tracing::debug!(entity_type, last_issued = max, "seeded id counter");
        true
    }

    /// Drop the counter so the next call starts fresh
    ///
    /// Meant for test isolation.
    pub fn reset(&self, entity_type: &str) {
        if self.counters().remove(entity_type).is_some() {
            tracing::debug!(entity_type, "reset id counter");
        }
    }

    /// Last id issued (or seeded) for `entity_type`, without allocating
    pub fn last_issued(&self, entity_type: &str) -> Option<u64> {
        self.counters().get(entity_type).copied()
    }
}
