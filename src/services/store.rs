// Ordered in-memory collection backing the mock backend
//
// Insertion order is creation order; updates replace a record at its
// current index and deletes shift later records down without reordering
// them. Ids are unique within a store.

use crate::error::{CaseDeskError, Result};
use crate::models::{Entity, EntityId};

/// Ordered records of one entity type
#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    records: Vec<E>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, keeping their order
    ///
    /// # Errors
    /// - DuplicateId if two records share an id
    pub fn from_records(records: Vec<E>) -> Result<Self> {
        let mut store = Self::with_capacity(records.len());
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clones of all records in store order
    pub fn all(&self) -> Vec<E> {
        self.records.clone()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.records.iter().map(Entity::id)
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Append a record
    ///
    /// # Errors
    /// - DuplicateId if a record with the same id is already stored
    pub fn insert(&mut self, record: E) -> Result<()> {
        let id = record.id();
        if self.get(id).is_some() {
            return Err(CaseDeskError::DuplicateId {
                entity: E::ENTITY_TYPE,
                id: id.get(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace the record at `index`, keeping its position
    ///
    /// Returns the previous record, or `None` if `index` is out of range.
    pub fn replace(&mut self, index: usize, record: E) -> Option<E> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Remove the record with `id`, preserving the order of the rest
    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        self.position(id).map(|index| self.records.remove(index))
    }
}
