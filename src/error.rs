// Centralized error handling using thiserror for type-safe error management
//
// Design Decision: One error enum shared by both backends
//
// The mock and live backends must fail in the same vocabulary so that
// callers (the UI layer) can match on a failure without knowing which
// backend served the call. NotFound in particular is produced in-process by
// the mock backend and mapped from an HTTP 404 by the remote backend.
//
// Extension Points: Add new error variants as needed for specific failure modes

use thiserror::Error;

/// Main error type for casedesk
///
/// Error Handling Strategy:
/// - Nothing is retried and nothing is swallowed; every variant is scoped to
///   the single operation that produced it.
/// - HTTP transport errors: Automatically converted via #[from] Network variant
/// - Serde errors: Automatically converted via #[from] Serde variant
#[derive(Debug, Error)]
pub enum CaseDeskError {
    /// No record with the requested id exists
    ///
    /// `id` is the id as the caller supplied it, so a non-numeric input is
    /// reported verbatim rather than being lost during coercion.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A record with this id is already in the store
    ///
    /// Only reachable when a store was loaded after its allocator counter was
    /// already running (seeding is first-writer-wins).
    #[error("{entity} with id {id} already exists")]
    DuplicateId { entity: &'static str, id: u64 },

    /// The request never obtained a response (DNS, connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    ///
    /// `message` is the `message` field of a JSON error body when present,
    /// otherwise derived from the status line.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON, or not the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Environment variable or dotenv file could not be read
    #[error("Environment error: {0}")]
    Env(String),

    /// Local JSON (de)serialization failed, e.g. while merging a patch
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CaseDeskError {
    /// Build a NotFound error for an entity type
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CaseDeskError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True for NotFound, regardless of which backend produced it
    pub fn is_not_found(&self) -> bool {
        matches!(self, CaseDeskError::NotFound { .. })
    }
}

/// Type alias for Result with CaseDeskError
pub type Result<T> = std::result::Result<T, CaseDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CaseDeskError::not_found("case", 99999);
        assert_eq!(err.to_string(), "case with id 99999 not found");

        let err = CaseDeskError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
    }

    #[test]
    fn test_not_found_keeps_raw_id() {
        let err = CaseDeskError::not_found("appointment", "abc");
        match &err {
            CaseDeskError::NotFound { entity, id } => {
                assert_eq!(*entity, "appointment");
                assert_eq!(id, "abc");
            }
            _ => panic!("Expected NotFound variant"),
        }
        assert!(err.is_not_found());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CaseDeskError = serde_err.into();

        match err {
            CaseDeskError::Serde(_) => {}
            _ => panic!("Expected Serde variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<i32> {
            Err(CaseDeskError::Config("test error".to_string()))
        }

        assert!(returns_error().is_err());
    }
}
