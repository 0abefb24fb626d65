// Library interface for casedesk
// Entity services for the case-management UI:
// - Appointments, cases and clients with get_all/get_by_id/create/update/delete
// - An in-memory mock backend (id allocator + ordered stores + simulated latency)
// - A JSON-over-HTTP backend for a real server
// - One configuration-derived switch choosing between them at startup

pub mod app_builder;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use app_builder::{AppBuilder, AppServices};
pub use error::{CaseDeskError, Result};
pub use models::{
    Appointment, AppointmentPatch, Case, CasePatch, Client, ClientPatch, Deleted, Entity,
    EntityId, NewAppointment, NewCase, NewClient,
};
pub use services::{
    ApiClient, AppointmentService, AuthService, BackendContext, BackendMode, CaseService,
    ClientService, ConfigService, EntityBackend, EntityService, EnvConfigService, IdAllocator,
    MockBackend, RemoteBackend,
};
