// HTTP backend that forwards every operation to the server
//
// No client-side field synthesis: create and update return the server's
// record as-is. The only synthesized value is the `{success: true}` of
// delete, which ignores the response body. A 404 on an id route is reported
// as NotFound carrying that id; every other non-2xx stays an Api error.

use super::config::BackendMode;
use super::http::{ApiClient, ApiRequest};
use super::traits::EntityBackend;
use crate::error::{CaseDeskError, Result};
use crate::models::{Deleted, Entity, EntityId};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct RemoteBackend<E: Entity> {
    client: Arc<ApiClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> RemoteBackend<E> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn record_path(id: EntityId) -> String {
        format!("{}/{}", E::ENDPOINT, id)
    }

    fn map_missing(id: EntityId) -> impl FnOnce(CaseDeskError) -> CaseDeskError {
        move |err| match err {
            CaseDeskError::Api { status: 404, .. } => CaseDeskError::not_found(E::ENTITY_TYPE, id),
            other => other,
        }
    }
}

#[async_trait]
impl<E: Entity> EntityBackend<E> for RemoteBackend<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        self.client.send_as(ApiRequest::get(E::ENDPOINT)).await
    }

    async fn get_by_id(&self, id: EntityId) -> Result<E> {
        self.client
            .send_as(ApiRequest::get(Self::record_path(id)))
            .await
            .map_err(Self::map_missing(id))
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        let request = ApiRequest::post(E::ENDPOINT).json(&draft)?;
        let created: E = self.client.send_as(request).await?;

        tracing::info!(entity_type = E::ENTITY_TYPE, id = %created.id(), "created remote record");
        Ok(created)
    }

    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E> {
        let request = ApiRequest::put(Self::record_path(id)).json(&patch)?;
        self.client
            .send_as(request)
            .await
            .map_err(Self::map_missing(id))
    }

    async fn delete(&self, id: EntityId) -> Result<Deleted> {
        self.client
            .send_discarding_body(ApiRequest::delete(Self::record_path(id)))
            .await
            .map_err(Self::map_missing(id))?;

        tracing::info!(entity_type = E::ENTITY_TYPE, %id, "deleted remote record");
        Ok(Deleted::ok())
    }

    fn mode(&self) -> BackendMode {
        BackendMode::Live
    }
}
