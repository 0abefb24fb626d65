// Entity records served by the services layer
//
// Every entity type plugs into the generic store and backends through the
// `Entity` trait: it names its id namespace and endpoint, knows how to turn
// caller-supplied fields into a full record, and how to refresh its audit
// timestamp. Wire format is camelCase JSON for all types.

mod appointment;
mod case;
mod client;
mod id;

pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, AppointmentType, NewAppointment,
};
pub use case::{
    Case, CaseDocument, CaseNote, CasePatch, CasePriority, CaseStatus, NewCase, TimelineEntry,
    TimelineKind, CASE_NUMBER_PREFIX,
};
pub use client::{Client, ClientPatch, ClientStatus, NewClient};
pub use id::{EntityId, IntoEntityId, InvalidEntityId};

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// A record type with its own id namespace, store and endpoint
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Caller-supplied fields for `create`
    type Draft: Serialize + Clone + Debug + Send + Sync + 'static;

    /// Partial fields for `update`; absent fields must not serialize
    type Patch: Serialize + Clone + Debug + Send + Sync + 'static;

    /// Allocator key, also used in error messages
    const ENTITY_TYPE: &'static str;

    /// Collection path relative to the API base URL
    const ENDPOINT: &'static str;

    fn id(&self) -> EntityId;

    /// Build a complete record from a draft plus generated fields
    fn from_draft(draft: Self::Draft, meta: &NewRecord) -> Self;

    /// Refresh the audit timestamp after an update
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Fields generated by the store at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRecord {
    pub id: EntityId,
    pub now: DateTime<Utc>,
    /// 1-based position the record will take in its store
    pub position: usize,
}

/// Result of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
}

impl Deleted {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Patch field that can also be cleared
///
/// Absent key -> `None` (leave alone), `null` -> `Some(None)` (clear),
/// value -> `Some(Some(v))`. Plain `Option<Option<T>>` deserializes `null`
/// as `None`, so clearable fields use this with `#[serde(default)]`.
pub(crate) fn clearable<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Shallow-merge the fields present in `patch` over `record`
///
/// Top-level keys of the patch replace the record's keys wholesale; nested
/// values are not merged. An explicit `null` clears the field. `id` is
/// never taken from the patch.
pub fn apply_patch<E: Entity>(record: &E, patch: &E::Patch) -> Result<E> {
    let mut merged = serde_json::to_value(record)?;

    if let (Value::Object(fields), Value::Object(changes)) =
        (&mut merged, serde_json::to_value(patch)?)
    {
        for (key, value) in changes {
            if key == "id" {
                continue;
            }
            fields.insert(key, value);
        }
    }

    Ok(serde_json::from_value(merged)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_client() -> Client {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Client::from_draft(
            NewClient {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
            &NewRecord {
                id: EntityId::new(3),
                now,
                position: 1,
            },
        )
    }

    #[test]
    fn test_apply_patch_replaces_only_present_fields() {
        let client = sample_client();
        let patch = ClientPatch {
            email: Some("ada@analytical.org".to_string()),
            ..Default::default()
        };

        let merged = apply_patch(&client, &patch).unwrap();

        assert_eq!(merged.email, "ada@analytical.org");
        assert_eq!(merged.name, client.name);
        assert_eq!(merged.phone, client.phone);
        assert_eq!(merged.id, client.id);
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let client = sample_client();
        let merged = apply_patch(&client, &ClientPatch::default()).unwrap();
        assert_eq!(merged, client);
    }

    #[test]
    fn test_null_in_patch_clears_optional_field() {
        let client = sample_client();
        let patch: ClientPatch =
            serde_json::from_value(serde_json::json!({ "phone": null })).unwrap();
        assert_eq!(patch.phone, Some(None));

        let merged = apply_patch(&client, &patch).unwrap();

        assert_eq!(merged.phone, None);
        assert_eq!(merged.email, client.email);
    }

    #[test]
    fn test_absent_key_is_not_a_clear() {
        let patch: ClientPatch =
            serde_json::from_value(serde_json::json!({ "name": "Ada" })).unwrap();
        assert_eq!(patch.phone, None);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "name": "Ada" })
        );
    }

    #[test]
    fn test_deleted_wire_shape() {
        let json = serde_json::to_value(Deleted::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }
}
