// AppBuilder pattern for dependency construction and injection
//
// Design Decision: The application root owns all service state
//
// The builder resolves configuration once, picks the backend strategy once,
// and wires every service with it. In mock mode it also creates the shared
// BackendContext (allocator, clock, latency) and loads the seed fixtures.
// Nothing here is global: two builders produce two independent worlds.
//
// Usage Example:
//     // Production (reads CASEDESK_* from the environment)
//     let services = AppBuilder::new().build()?;
//
//     // Testing
//     let services = AppBuilder::new()
//         .with_config(Arc::new(config))
//         .with_delay(Arc::new(NoDelay))
//         .with_fixtures(false)
//         .build()?;

use crate::error::Result;
use crate::fixtures;
use crate::models::{Appointment, Case, Client, Entity};
use crate::services::{
    ApiClient, AppointmentService, AuthBackend, AuthService, BackendContext, BackendMode,
    CaseService, ClientService, Clock, ConfigService, Delay, EntityBackend, EntityService,
    EnvConfigService, IdAllocator, MockAuthBackend, MockBackend, RemoteAuthBackend,
    RemoteBackend,
};
use std::sync::Arc;

/// All wired services, ready for the UI layer
///
/// Cloning is cheap; clones share backends and state.
#[derive(Clone)]
pub struct AppServices {
    pub mode: BackendMode,
    pub appointments: AppointmentService,
    pub cases: CaseService,
    pub clients: ClientService,
    pub auth: Arc<AuthService>,
    /// Present in mock mode only
    pub context: Option<BackendContext>,
}

impl AppServices {
    /// The shared id allocator, when running against mock stores
    pub fn allocator(&self) -> Option<&Arc<IdAllocator>> {
        self.context.as_ref().map(|ctx| &ctx.allocator)
    }
}

/// Builder for the services container
pub struct AppBuilder {
    config: Option<Arc<dyn ConfigService>>,
    mode: Option<BackendMode>,
    clock: Option<Arc<dyn Clock>>,
    delay: Option<Arc<dyn Delay>>,
    http: Option<reqwest::Client>,
    load_fixtures: bool,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            mode: None,
            clock: None,
            delay: None,
            http: None,
            load_fixtures: true,
        }
    }

    /// Use this config instead of reading the environment
    pub fn with_config(mut self, config: Arc<dyn ConfigService>) -> Self {
        self.config = Some(config);
        self
    }

    /// Force a backend mode regardless of configuration
    pub fn with_mode(mut self, mode: BackendMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Override the clock used for audit timestamps (mock mode)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Override the latency simulator (mock mode)
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Use a preconfigured reqwest client (live mode)
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Whether mock stores start with the seed datasets (default true)
    pub fn with_fixtures(mut self, load: bool) -> Self {
        self.load_fixtures = load;
        self
    }

    /// Resolve configuration and wire every service
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Configuration cannot be loaded from the environment
    /// - A seed dataset contains duplicate ids
    pub fn build(self) -> Result<AppServices> {
        let config: Arc<dyn ConfigService> = match self.config.clone() {
            Some(config) => config,
            None => Arc::new(EnvConfigService::load()?),
        };

        let mode = self.mode.unwrap_or_else(|| config.backend_mode());
        tracing::info!(%mode, "selected backend");

        match mode {
            BackendMode::Mock => self.build_mock(config.as_ref()),
            BackendMode::Live => Ok(self.build_live(config.as_ref())),
        }
    }

    fn build_mock(self, config: &dyn ConfigService) -> Result<AppServices> {
        let mut ctx = BackendContext::new(config.mock_latency());
        if let Some(clock) = self.clock {
            ctx = ctx.with_clock(clock);
        }
        if let Some(delay) = self.delay {
            ctx = ctx.with_delay(delay);
        }

        let load = self.load_fixtures;
        let appointments = mock_service::<Appointment>(&ctx, load.then(fixtures::appointments))?;
        let cases = mock_service::<Case>(&ctx, load.then(fixtures::cases))?;
        let clients = mock_service::<Client>(&ctx, load.then(fixtures::clients))?;

        let users = if load { fixtures::users() } else { Vec::new() };
        let auth_backend: Arc<dyn AuthBackend> = Arc::new(MockAuthBackend::new(ctx.clone(), users));

        Ok(AppServices {
            mode: BackendMode::Mock,
            appointments,
            cases,
            clients,
            auth: Arc::new(AuthService::new(auth_backend)),
            context: Some(ctx),
        })
    }

    fn build_live(self, config: &dyn ConfigService) -> AppServices {
        let base_url = config.api_base_url();
        tracing::info!(%base_url, "using remote API");

        let client = Arc::new(match self.http {
            Some(http) => ApiClient::with_client(http, base_url),
            None => ApiClient::new(base_url),
        });

        let auth_backend: Arc<dyn AuthBackend> = Arc::new(RemoteAuthBackend::new(client.clone()));

        AppServices {
            mode: BackendMode::Live,
            appointments: remote_service(&client),
            cases: remote_service(&client),
            clients: remote_service(&client),
            auth: Arc::new(AuthService::new(auth_backend)),
            context: None,
        }
    }
}

fn mock_service<E: Entity>(
    ctx: &BackendContext,
    records: Option<Vec<E>>,
) -> Result<EntityService<E>> {
    let backend = match records {
        Some(records) => MockBackend::with_records(ctx.clone(), records)?,
        None => MockBackend::new(ctx.clone()),
    };
    let backend: Arc<dyn EntityBackend<E>> = Arc::new(backend);
    Ok(EntityService::new(backend))
}

fn remote_service<E: Entity>(client: &Arc<ApiClient>) -> EntityService<E> {
    let backend: Arc<dyn EntityBackend<E>> = Arc::new(RemoteBackend::new(Arc::clone(client)));
    EntityService::new(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mocks::test_helpers::*;

    fn mock_builder() -> AppBuilder {
        AppBuilder::new()
            .with_config(Arc::new(create_mock_config(BackendMode::Mock)))
            .with_delay(Arc::new(create_instant_delay()))
    }

    #[tokio::test]
    async fn test_mock_mode_loads_fixtures_and_seeds() {
        let services = mock_builder().build().unwrap();

        assert_eq!(services.mode, BackendMode::Mock);
        assert_eq!(services.appointments.mode(), BackendMode::Mock);
        assert_eq!(services.appointments.get_all().await.unwrap().len(), 6);
        assert_eq!(
            services.allocator().unwrap().last_issued("appointment"),
            Some(6)
        );
        assert_eq!(services.allocator().unwrap().last_issued("case"), Some(3));
    }

    #[tokio::test]
    async fn test_without_fixtures_stores_start_empty() {
        let services = mock_builder().with_fixtures(false).build().unwrap();

        assert!(services.cases.get_all().await.unwrap().is_empty());
        assert!(services.auth.login("jane@casedesk.test", "pw").await.is_err());
    }

    #[tokio::test]
    async fn test_services_share_one_allocator_partitioned_by_type() {
        let services = mock_builder().with_fixtures(false).build().unwrap();
        let allocator = services.allocator().unwrap();

        allocator.allocate("case");
        allocator.allocate("case");

        assert_eq!(allocator.last_issued("case"), Some(2));
        assert_eq!(allocator.last_issued("appointment"), None);
    }

    #[test]
    fn test_live_mode_from_config() {
        let services = AppBuilder::new()
            .with_config(Arc::new(create_mock_config(BackendMode::Live)))
            .build()
            .unwrap();

        assert_eq!(services.mode, BackendMode::Live);
        assert_eq!(services.cases.mode(), BackendMode::Live);
        assert_eq!(services.auth.mode(), BackendMode::Live);
        assert!(services.context.is_none());
        assert!(services.allocator().is_none());
    }

    #[test]
    fn test_with_mode_overrides_config() {
        let services = AppBuilder::new()
            .with_config(Arc::new(create_mock_config(BackendMode::Mock)))
            .with_mode(BackendMode::Live)
            .build()
            .unwrap();

        assert_eq!(services.clients.mode(), BackendMode::Live);
    }
}
