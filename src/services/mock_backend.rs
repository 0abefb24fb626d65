// In-memory backend that simulates a server
//
// Design Decision: Synchronous critical sections between one latency wait
//
// Each operation first awaits the simulated latency, then does all of its
// reads and writes under the store lock without awaiting again. Two
// operations can overlap only during their latency waits, never inside a
// read-modify-write. Concurrent updates to the same id are
// last-write-wins.

use super::config::BackendMode;
use super::context::BackendContext;
use super::store::EntityStore;
use super::traits::EntityBackend;
use crate::error::{CaseDeskError, Result};
use crate::models::{apply_patch, Deleted, Entity, EntityId, NewRecord};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serves CRUD from an `EntityStore` with artificial latency
///
/// Usage:
///     let backend = MockBackend::<Case>::with_records(ctx, fixtures::cases())?;
///     let case = backend.create(draft).await?;
pub struct MockBackend<E: Entity> {
    store: Mutex<EntityStore<E>>,
    ctx: BackendContext,
}

impl<E: Entity> MockBackend<E> {
    /// Empty store
    pub fn new(ctx: BackendContext) -> Self {
        Self {
            store: Mutex::new(EntityStore::new()),
            ctx,
        }
    }

    /// Store preloaded with `records`; seeds the allocator from them
    ///
    /// The allocator is only touched once the records load cleanly.
    ///
    /// # Errors
    /// - DuplicateId if two records share an id
    pub fn with_records(ctx: BackendContext, records: Vec<E>) -> Result<Self> {
        let store = EntityStore::from_records(records)?;
        let seeded = ctx.allocator.seed(E::ENTITY_TYPE, store.ids());

        tracing::info!(
            entity_type = E::ENTITY_TYPE,
            records = store.len(),
            seeded,
            "loaded mock store"
        );

        Ok(Self {
            store: Mutex::new(store),
            ctx,
        })
    }

    fn store(&self) -> MutexGuard<'_, EntityStore<E>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current records without simulated latency
    pub fn snapshot(&self) -> Vec<E> {
        self.store().all()
    }

    fn not_found(id: EntityId) -> CaseDeskError {
        CaseDeskError::not_found(E::ENTITY_TYPE, id)
    }
}

#[async_trait]
impl<E: Entity> EntityBackend<E> for MockBackend<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        self.ctx.simulate_latency().await;
        Ok(self.store().all())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<E> {
        self.ctx.simulate_latency().await;
        self.store()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        self.ctx.simulate_latency().await;

        let mut store = self.store();

        // First create of a type seeds from whatever the store holds
        self.ctx.allocator.seed(E::ENTITY_TYPE, store.ids());
        let id = self.ctx.allocator.allocate(E::ENTITY_TYPE);

        let meta = NewRecord {
            id,
            now: self.ctx.clock.now(),
            position: store.len() + 1,
        };
        let record = E::from_draft(draft, &meta);
        store.insert(record.clone())?;

        tracing::info!(entity_type = E::ENTITY_TYPE, %id, "created record");
        Ok(record)
    }

    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E> {
        self.ctx.simulate_latency().await;

        let mut store = self.store();
        let index = store.position(id).ok_or_else(|| Self::not_found(id))?;
        let current = store.get(id).ok_or_else(|| Self::not_found(id))?;

        let mut merged = apply_patch(current, &patch)?;
        merged.touch(self.ctx.clock.now());
        store.replace(index, merged.clone());

        tracing::info!(entity_type = E::ENTITY_TYPE, %id, "updated record");
        Ok(merged)
    }

    async fn delete(&self, id: EntityId) -> Result<Deleted> {
        self.ctx.simulate_latency().await;

        self.store().remove(id).ok_or_else(|| Self::not_found(id))?;

        tracing::info!(entity_type = E::ENTITY_TYPE, %id, "deleted record");
        Ok(Deleted::ok())
    }

    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }
}
