// Entity services: the CRUD API consumed by the UI layer
//
// A service is a thin dispatcher over one `EntityBackend` chosen at
// startup. Its own job is id coercion: ids may arrive as numbers or as
// numeric strings, and input that is not an id at all is reported as
// NotFound carrying the raw input instead of being rejected differently.

use super::config::BackendMode;
use super::traits::EntityBackend;
use crate::error::{CaseDeskError, Result};
use crate::models::{Appointment, Case, Client, Deleted, Entity, EntityId, IntoEntityId};
use std::sync::Arc;

pub type AppointmentService = EntityService<Appointment>;
pub type CaseService = EntityService<Case>;
pub type ClientService = EntityService<Client>;

/// CRUD over one entity type
///
/// Cloning is cheap and clones share the same backend.
///
/// Usage:
///     let cases = CaseService::new(Arc::new(MockBackend::new(ctx)));
///     let case = cases.create(NewCase { title: "X".into(), client_name: "Y".into(), ..Default::default() }).await?;
///     let same = cases.get_by_id("1").await?;
pub struct EntityService<E: Entity> {
    backend: Arc<dyn EntityBackend<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(backend: Arc<dyn EntityBackend<E>>) -> Self {
        Self { backend }
    }

    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    fn coerce(id: impl IntoEntityId) -> Result<EntityId> {
        id.into_entity_id()
            .map_err(|invalid| CaseDeskError::not_found(E::ENTITY_TYPE, invalid.0))
    }

    pub async fn get_all(&self) -> Result<Vec<E>> {
        self.backend.get_all().await
    }

    /// # Errors
    /// - NotFound carrying `id` when no record matches
    pub async fn get_by_id(&self, id: impl IntoEntityId) -> Result<E> {
        let id = Self::coerce(id)?;
        self.backend.get_by_id(id).await
    }

    pub async fn create(&self, draft: E::Draft) -> Result<E> {
        self.backend.create(draft).await
    }

    /// # Errors
    /// - NotFound carrying `id` when no record matches; nothing changes
    pub async fn update(&self, id: impl IntoEntityId, patch: E::Patch) -> Result<E> {
        let id = Self::coerce(id)?;
        self.backend.update(id, patch).await
    }

    /// # Errors
    /// - NotFound carrying `id` when no record matches
    pub async fn delete(&self, id: impl IntoEntityId) -> Result<Deleted> {
        let id = Self::coerce(id)?;
        self.backend.delete(id).await
    }
}
