// Mock test helpers and common mock patterns
//
// Design Decision: Centralized mock helpers for consistent testing
//
// Provides reusable mockall constructors with sensible defaults. Tests can
// override specific behaviors while inheriting baseline setup.
//
// Usage:
//     use crate::services::mocks::test_helpers::*;
//     let ctx = test_context_at(fixed_now());
//     let backend = MockBackend::<Case>::new(ctx);

#[cfg(test)]
pub mod test_helpers {
    pub use super::super::traits::{MockClock, MockConfigService, MockDelay};
    use super::super::config::BackendMode;
    use super::super::context::BackendContext;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;

    /// 2024-01-15T09:30:00Z
    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
    }

    /// Clock that always returns `now`
    pub fn create_fixed_clock(now: DateTime<Utc>) -> MockClock {
        let mut mock = MockClock::new();
        mock.expect_now().returning(move || now);
        mock
    }

    /// Delay that returns immediately, any number of times
    pub fn create_instant_delay() -> MockDelay {
        let mut mock = MockDelay::new();
        mock.expect_wait().returning(|_| ());
        mock
    }

    /// Config service with test defaults
    ///
    /// Default behavior:
    /// - backend_mode() returns `mode`
    /// - api_base_url() returns "http://127.0.0.1:9/api"
    /// - mock_latency() returns zero
    pub fn create_mock_config(mode: BackendMode) -> MockConfigService {
        let mut mock = MockConfigService::new();

        mock.expect_backend_mode().returning(move || mode);
        mock.expect_api_base_url()
            .returning(|| "http://127.0.0.1:9/api".to_string());
        mock.expect_mock_latency().returning(|| Duration::ZERO);

        mock
    }

    /// Fresh allocator, wall clock, no latency
    pub fn test_context() -> BackendContext {
        BackendContext::new(Duration::ZERO).with_delay(Arc::new(create_instant_delay()))
    }

    /// Fresh allocator, clock pinned to `now`, no latency
    pub fn test_context_at(now: DateTime<Utc>) -> BackendContext {
        test_context().with_clock(Arc::new(create_fixed_clock(now)))
    }
}
