// Service layer: entity services over swappable backends
//
// Design Decision: Strategy per service, chosen once at startup
//
// Each entity service holds one `EntityBackend`: either `MockBackend`
// (in-memory store, id allocator, simulated latency) or `RemoteBackend`
// (HTTP through `ApiClient`). Shared mock state lives in an explicit
// `BackendContext` rather than module-level globals, so tests build their
// own and never leak counters into each other.
//
// Architecture Pattern: Ports and Adapters (Hexagonal Architecture)
// - Traits define "ports" (EntityBackend, AuthBackend, Clock, Delay, ConfigService)
// - Services implement the public API using ports
// - Adapters (MockBackend, RemoteBackend, SystemClock, TokioDelay) connect to infrastructure
//
// Usage Example:
//     // Mock mode
//     let ctx = BackendContext::new(Duration::from_millis(500));
//     let cases = CaseService::new(Arc::new(MockBackend::new(ctx)));
//
//     // Live mode
//     let client = Arc::new(ApiClient::new("http://localhost:3000/api"));
//     let cases = CaseService::new(Arc::new(RemoteBackend::new(client)));

pub mod allocator;
pub mod auth;
pub mod clock;
pub mod config;
pub mod context;
pub mod entities;
pub mod http;
pub mod mock_backend;
#[cfg(test)]
pub mod mocks;
pub mod remote_backend;
pub mod store;
pub mod traits;

// Re-export commonly used types
pub use allocator::IdAllocator;
pub use auth::{AuthService, MockAuthBackend, RemoteAuthBackend, Session, User, UserRole};
pub use clock::{NoDelay, SystemClock, TokioDelay};
pub use config::{BackendMode, EnvConfigService};
pub use context::{BackendContext, DEFAULT_MOCK_LATENCY};
pub use entities::{AppointmentService, CaseService, ClientService, EntityService};
pub use http::{ApiClient, ApiRequest};
pub use mock_backend::MockBackend;
pub use remote_backend::RemoteBackend;
pub use store::EntityStore;
pub use traits::{AuthBackend, Clock, ConfigService, Delay, EntityBackend};
