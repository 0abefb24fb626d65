// Core trait definitions for service layer dependency injection
//
// Design Decision: One backend trait, two strategies
//
// Every entity service talks to an `EntityBackend`. The in-memory
// `MockBackend` and the HTTP `RemoteBackend` both implement it, and the
// choice between them is made once when the services are built. Time and
// simulated latency are traits too, so tests can pin timestamps and skip
// sleeping.
//
// All traits are marked Send + Sync to work with tokio's async runtime,
// which requires thread-safe types for spawning tasks across threads.

use super::auth::Session;
use super::config::BackendMode;
use crate::error::Result;
use crate::models::{Deleted, Entity, EntityId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use std::time::Duration;

/// CRUD contract shared by the mock and remote backends
///
/// Usage:
///     let backend: Arc<dyn EntityBackend<Case>> = Arc::new(MockBackend::new(ctx));
///     let case = backend.create(draft).await?;
#[async_trait]
pub trait EntityBackend<E: Entity>: Send + Sync {
    /// All records, in store order
    async fn get_all(&self) -> Result<Vec<E>>;

    /// # Errors
    /// - NotFound when no record has this id
    async fn get_by_id(&self, id: EntityId) -> Result<E>;

    async fn create(&self, draft: E::Draft) -> Result<E>;

    /// Shallow-merge `patch` into the record and return the merged record
    ///
    /// # Errors
    /// - NotFound when no record has this id; nothing is modified
    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E>;

    /// # Errors
    /// - NotFound when no record has this id
    async fn delete(&self, id: EntityId) -> Result<Deleted>;

    fn mode(&self) -> BackendMode;
}

/// Login/logout contract shared by the mock and remote auth backends
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    async fn logout(&self, session: &Session) -> Result<()>;

    fn mode(&self) -> BackendMode;
}

/// Source of "now" for audit timestamps
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Simulated I/O latency for the mock backend
///
/// Production uses `TokioDelay`; tests inject `NoDelay` or a mock so they
/// never race real timers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Configuration consumed by the services layer
///
/// Loaded once at startup and never written afterwards.
#[cfg_attr(test, automock)]
pub trait ConfigService: Send + Sync {
    /// Mock or live; decides which backend every service gets
    fn backend_mode(&self) -> BackendMode;

    /// Base URL the remote backend prefixes to every endpoint
    fn api_base_url(&self) -> String;

    /// Simulated latency applied by the mock backend to every operation
    fn mock_latency(&self) -> Duration;
}
