// Configuration service implementation
//
// Design Decision: Environment variables resolved once at startup
//
// Only three settings reach the services layer: whether to serve from the
// in-memory mock stores, where the real API lives, and how much latency the
// mock should simulate. They are read once (a `.env` file is honored via
// dotenvy) and cached; nothing writes them afterwards.
//
// Mock mode is the default. Live mode needs an explicit opt-out, so a
// missing or misspelled variable never sends traffic to a real server.

use super::context::DEFAULT_MOCK_LATENCY;
use super::traits::ConfigService;
use crate::error::{CaseDeskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const USE_MOCK_VAR: &str = "CASEDESK_USE_MOCK";
pub const API_BASE_URL_VAR: &str = "CASEDESK_API_BASE_URL";
pub const MOCK_LATENCY_VAR: &str = "CASEDESK_MOCK_LATENCY_MS";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Which backend serves every entity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// In-memory stores with simulated latency
    Mock,
    /// HTTP requests against the configured base URL
    Live,
}

impl BackendMode {
    /// Mode from the raw mock flag
    ///
    /// Only an explicit false-like value (`false`, `0`, `no`, `off`, any
    /// case) selects live mode; anything else, including absence, is mock.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("false" | "0" | "no" | "off") => BackendMode::Live,
            _ => BackendMode::Mock,
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendMode::Mock => f.write_str("mock"),
            BackendMode::Live => f.write_str("live"),
        }
    }
}

/// Environment-backed configuration
///
/// Environment Variables:
/// - CASEDESK_USE_MOCK (optional): `false` selects live mode; default mock
/// - CASEDESK_API_BASE_URL (optional): defaults to http://localhost:3000/api
/// - CASEDESK_MOCK_LATENCY_MS (optional): defaults to 500
///
/// Usage:
///     let config = EnvConfigService::load()?;
///     let mode = config.backend_mode();
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfigService {
    mode: BackendMode,
    api_base_url: String,
    mock_latency: Duration,
}

impl EnvConfigService {
    pub fn new(mode: BackendMode, api_base_url: impl Into<String>, mock_latency: Duration) -> Self {
        Self {
            mode,
            api_base_url: api_base_url.into(),
            mock_latency,
        }
    }

    /// Load from the process environment (after reading `.env` if present)
    ///
    /// # Errors
    /// - CASEDESK_MOCK_LATENCY_MS is not a whole number
    pub fn load() -> Result<Self> {
        // Load .env file (ignore if not found)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a dotenv file only, ignoring the process environment
    ///
    /// # Errors
    /// - File missing or malformed
    /// - CASEDESK_MOCK_LATENCY_MS is not a whole number
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let vars = dotenvy::from_path_iter(path)
            .map_err(|e| CaseDeskError::Env(format!("Failed to open {}: {}", path.display(), e)))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .map_err(|e| CaseDeskError::Env(format!("Failed to parse {}: {}", path.display(), e)))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Resolve settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = BackendMode::from_flag(lookup(USE_MOCK_VAR).as_deref());

        let api_base_url = lookup(API_BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let mock_latency = match lookup(MOCK_LATENCY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| {
                    CaseDeskError::Config(format!(
                        "{MOCK_LATENCY_VAR} must be a whole number of milliseconds, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_MOCK_LATENCY,
        };

        Ok(Self {
            mode,
            api_base_url,
            mock_latency,
        })
    }
}

impl ConfigService for EnvConfigService {
    fn backend_mode(&self) -> BackendMode {
        self.mode
    }

    fn api_base_url(&self) -> String {
        self.api_base_url.clone()
    }

    fn mock_latency(&self) -> Duration {
        self.mock_latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serialize config tests to avoid env var conflicts
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_mock_is_default() {
        assert_eq!(BackendMode::from_flag(None), BackendMode::Mock);
        assert_eq!(BackendMode::from_flag(Some("true")), BackendMode::Mock);
        assert_eq!(BackendMode::from_flag(Some("")), BackendMode::Mock);
        assert_eq!(BackendMode::from_flag(Some("flase")), BackendMode::Mock);
    }

    #[test]
    fn test_only_explicit_false_selects_live() {
        for flag in ["false", "FALSE", " False ", "0", "no", "off"] {
            assert_eq!(BackendMode::from_flag(Some(flag)), BackendMode::Live, "{flag}");
        }
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = EnvConfigService::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.backend_mode(), BackendMode::Mock);
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.mock_latency(), Duration::from_millis(500));
    }

    #[test]
    fn test_custom_values() {
        let config = EnvConfigService::from_lookup(lookup_from(&[
            (USE_MOCK_VAR, "false"),
            (API_BASE_URL_VAR, "https://api.example.com/v1"),
            (MOCK_LATENCY_VAR, "25"),
        ]))
        .unwrap();

        assert_eq!(config.backend_mode(), BackendMode::Live);
        assert_eq!(config.api_base_url(), "https://api.example.com/v1");
        assert_eq!(config.mock_latency(), Duration::from_millis(25));
    }

    #[test]
    fn test_invalid_latency_is_config_error() {
        let result = EnvConfigService::from_lookup(lookup_from(&[(MOCK_LATENCY_VAR, "fast")]));

        match result {
            Err(CaseDeskError::Config(msg)) => assert!(msg.contains(MOCK_LATENCY_VAR)),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_from_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{USE_MOCK_VAR}=false").unwrap();
        writeln!(file, "{API_BASE_URL_VAR}=http://10.0.0.5:8080/api").unwrap();
        writeln!(file, "# comment lines are fine").unwrap();

        let config = EnvConfigService::from_env_file(file.path()).unwrap();

        assert_eq!(config.backend_mode(), BackendMode::Live);
        assert_eq!(config.api_base_url(), "http://10.0.0.5:8080/api");
        assert_eq!(config.mock_latency(), DEFAULT_MOCK_LATENCY);
    }

    #[test]
    fn test_missing_env_file_is_env_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EnvConfigService::from_env_file(&dir.path().join("absent.env"));
        assert!(matches!(result, Err(CaseDeskError::Env(_))));
    }

    #[test]
    fn test_load_reads_process_environment() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();

        std::env::set_var(USE_MOCK_VAR, "off");
        std::env::set_var(API_BASE_URL_VAR, "http://example.test/api");
        std::env::remove_var(MOCK_LATENCY_VAR);

        let config = EnvConfigService::load().unwrap();
        assert_eq!(config.backend_mode(), BackendMode::Live);
        assert_eq!(config.api_base_url(), "http://example.test/api");

        // Cleanup
        std::env::remove_var(USE_MOCK_VAR);
        std::env::remove_var(API_BASE_URL_VAR);
    }
}
