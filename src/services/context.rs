// Shared state handed to every mock backend
//
// Holds what would otherwise be process-wide globals: the id allocator, the
// clock and the latency simulator. The application root builds one context
// and clones it into each backend; clones share the same allocator.

use super::allocator::IdAllocator;
use super::clock::{NoDelay, SystemClock, TokioDelay};
use super::traits::{Clock, Delay};
use std::sync::Arc;
use std::time::Duration;

/// Default simulated latency for mock operations
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct BackendContext {
    pub allocator: Arc<IdAllocator>,
    pub clock: Arc<dyn Clock>,
    pub delay: Arc<dyn Delay>,
    pub latency: Duration,
}

impl BackendContext {
    /// Wall clock and real sleeping, with the given latency
    pub fn new(latency: Duration) -> Self {
        Self {
            allocator: Arc::new(IdAllocator::new()),
            clock: Arc::new(SystemClock),
            delay: Arc::new(TokioDelay),
            latency,
        }
    }

    /// Wall clock, no sleeping; for tests and tooling
    pub fn instant() -> Self {
        Self::new(Duration::ZERO).with_delay(Arc::new(NoDelay))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    /// Apply the simulated latency
    pub async fn simulate_latency(&self) {
        self.delay.wait(self.latency).await;
    }
}

impl Default for BackendContext {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_LATENCY)
    }
}

impl std::fmt::Debug for BackendContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendContext")
            .field("allocator", &self.allocator)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
