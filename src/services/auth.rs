// Authentication service
//
// Login/logout over the same mock/live split as the entity services. The
// mock backend checks credentials against a fixture user list; the remote
// backend posts to `/auth/login` and `/auth/logout`. The service keeps the
// current session in memory only.

use super::config::BackendMode;
use super::context::BackendContext;
use super::http::{ApiClient, ApiRequest};
use super::traits::AuthBackend;
use crate::error::{CaseDeskError, Result};
use crate::models::EntityId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Attorney,
    Paralegal,
    #[default]
    Staff,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

fn invalid_credentials() -> CaseDeskError {
    CaseDeskError::Api {
        status: 401,
        message: "Invalid email or password".to_string(),
    }
}

/// Accepts any non-empty password for a known user email
pub struct MockAuthBackend {
    users: Vec<User>,
    ctx: BackendContext,
}

impl MockAuthBackend {
    pub fn new(ctx: BackendContext, users: Vec<User>) -> Self {
        Self { users, ctx }
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        self.ctx.simulate_latency().await;

        if password.is_empty() {
            return Err(invalid_credentials());
        }

        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
            .ok_or_else(invalid_credentials)?;

        let token = format!(
            "mock-token-{}-{}",
            user.id,
            self.ctx.clock.now().timestamp_millis()
        );

        Ok(Session { user, token })
    }

    async fn logout(&self, _session: &Session) -> Result<()> {
        self.ctx.simulate_latency().await;
        Ok(())
    }

    fn mode(&self) -> BackendMode {
        BackendMode::Mock
    }
}

pub struct RemoteAuthBackend {
    client: Arc<ApiClient>,
}

impl RemoteAuthBackend {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthBackend for RemoteAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = ApiRequest::post(LOGIN_ENDPOINT).json(&Credentials { email, password })?;
        self.client.send_as(request).await
    }

    async fn logout(&self, session: &Session) -> Result<()> {
        let request = ApiRequest::post(LOGOUT_ENDPOINT).bearer(&session.token)?;
        self.client.send_discarding_body(request).await
    }

    fn mode(&self) -> BackendMode {
        BackendMode::Live
    }
}

/// Holds the current session on top of an `AuthBackend`
///
/// Usage:
///     let session = auth.login("jane@firm.test", "secret").await?;
///     auth.logout().await?;
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    session: RwLock<Option<Session>>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self {
            backend,
            session: RwLock::new(None),
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.backend.mode()
    }

    /// # Errors
    /// - Api 401 on bad credentials (both backends)
    /// - Network / Parse from the remote backend
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.backend.login(email, password).await?;

        tracing::info!(user_id = %session.user.id, mode = %self.mode(), "logged in");
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(session)
    }

    /// Clear the session; the backend is told when one existed
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match previous {
            Some(session) => {
                tracing::info!(user_id = %session.user.id, "logging out");
                self.backend.logout(&session).await
            }
            None => Ok(()),
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mocks::test_helpers::*;

    fn users() -> Vec<User> {
        vec![User {
            id: EntityId::new(1),
            name: "Jane Counsel".to_string(),
            email: "jane@firm.test".to_string(),
            role: UserRole::Attorney,
        }]
    }

    fn service() -> AuthService {
        let backend = MockAuthBackend::new(test_context_at(fixed_now()), users());
        AuthService::new(Arc::new(backend))
    }

    #[tokio::test]
    async fn test_mock_login_case_insensitive_email() {
        let auth = service();

        let session = auth.login("JANE@firm.test", "hunter2").await.unwrap();

        assert_eq!(session.user.id, EntityId::new(1));
        assert_eq!(
            session.token,
            format!("mock-token-1-{}", fixed_now().timestamp_millis())
        );
        assert_eq!(auth.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_mock_login_rejects_unknown_user_and_empty_password() {
        let auth = service();

        for (email, password) in [("nobody@firm.test", "pw"), ("jane@firm.test", "")] {
            match auth.login(email, password).await {
                Err(CaseDeskError::Api { status, message }) => {
                    assert_eq!(status, 401);
                    assert_eq!(message, "Invalid email or password");
                }
                other => panic!("Expected 401, got {other:?}"),
            }
        }
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let auth = service();
        auth.login("jane@firm.test", "pw").await.unwrap();

        auth.logout().await.unwrap();
        assert!(!auth.is_authenticated());

        // Second logout has nothing to do
        auth.logout().await.unwrap();
    }
}
