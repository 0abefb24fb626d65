use super::{Entity, EntityId, NewRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Case numbers are this prefix plus the store position, zero-padded to 3
pub const CASE_NUMBER_PREFIX: &str = "CASE-2024-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    #[default]
    Open,
    InProgress,
    Pending,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// One entry of a case's append-only history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub event: String,
    #[serde(rename = "type", default)]
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseNote {
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: EntityId,
    pub case_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<EntityId>,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub priority: CasePriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub opened_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub documents: Vec<CaseDocument>,
    #[serde(default)]
    pub notes: Vec<CaseNote>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    pub title: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default)]
    pub priority: CasePriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Partial update of a case
///
/// The case number, audit dates, timeline, documents and notes are not
/// patchable. Optional fields take `Some(None)` (`null` on the wire) to
/// clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub client_id: Option<Option<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub case_type: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<CasePriority>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub assigned_to: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl Case {
    pub fn case_number_for(position: usize) -> String {
        format!("{CASE_NUMBER_PREFIX}{position:03}")
    }
}

impl Entity for Case {
    type Draft = NewCase;
    type Patch = CasePatch;

    const ENTITY_TYPE: &'static str = "case";
    const ENDPOINT: &'static str = "/cases";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewCase, meta: &NewRecord) -> Self {
        Self {
            id: meta.id,
            case_number: Self::case_number_for(meta.position),
            title: draft.title,
            description: draft.description,
            client_id: draft.client_id,
            client_name: draft.client_name,
            case_type: draft.case_type,
            status: draft.status,
            priority: draft.priority,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            opened_date: meta.now,
            last_updated: meta.now,
            timeline: vec![TimelineEntry {
                date: meta.now,
                event: "Case opened".to_string(),
                kind: TimelineKind::Info,
            }],
            documents: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_case_number_padding() {
        assert_eq!(Case::case_number_for(1), "CASE-2024-001");
        assert_eq!(Case::case_number_for(42), "CASE-2024-042");
        assert_eq!(Case::case_number_for(1234), "CASE-2024-1234");
    }

    #[test]
    fn test_new_case_gets_opened_timeline() {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap();
        let case = Case::from_draft(
            NewCase {
                title: "X".to_string(),
                client_name: "Y".to_string(),
                ..Default::default()
            },
            &NewRecord {
                id: EntityId::new(1),
                now,
                position: 1,
            },
        );

        assert_eq!(case.timeline.len(), 1);
        assert_eq!(case.timeline[0].event, "Case opened");
        assert_eq!(case.timeline[0].kind, TimelineKind::Info);
        assert_eq!(case.timeline[0].date, now);
        assert!(case.documents.is_empty());
        assert!(case.notes.is_empty());
        assert_eq!(case.opened_date, case.last_updated);
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = CasePatch {
            status: Some(CaseStatus::InProgress),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "in-progress" }));
    }

    #[test]
    fn test_patch_null_round_trips_as_clear() {
        let patch: CasePatch =
            serde_json::from_value(serde_json::json!({ "assignedTo": null, "dueDate": null }))
                .unwrap();
        assert_eq!(patch.assigned_to, Some(None));
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.description, None);

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "assignedTo": null, "dueDate": null }));
    }
}
