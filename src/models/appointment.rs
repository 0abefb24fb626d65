use super::{Entity, EntityId, NewRecord};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn default_duration() -> u32 {
    60
}

/// Kind of meeting an appointment represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    #[default]
    Consultation,
    FollowUp,
    CourtHearing,
    Meeting,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// A scheduled meeting with a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: EntityId,
    pub title: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<EntityId>,
    pub date: NaiveDate,
    /// Local wall-clock start, `HH:MM`
    pub time: String,
    /// Minutes
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(rename = "type", default)]
    pub kind: AppointmentType,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies to create an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub title: String,
    pub client_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<EntityId>,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(rename = "type", default)]
    pub kind: AppointmentType,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAppointment {
    /// Draft with the required fields; everything else defaulted
    pub fn new(
        title: impl Into<String>,
        client_name: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            client_name: client_name.into(),
            client_email: None,
            case_id: None,
            date,
            time: time.into(),
            duration: default_duration(),
            kind: AppointmentType::default(),
            status: AppointmentStatus::default(),
            location: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub client_email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub case_id: Option<Option<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AppointmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub location: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "super::clearable")]
    pub notes: Option<Option<String>>,
}

impl Entity for Appointment {
    type Draft = NewAppointment;
    type Patch = AppointmentPatch;

    const ENTITY_TYPE: &'static str = "appointment";
    const ENDPOINT: &'static str = "/appointments";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(draft: NewAppointment, meta: &NewRecord) -> Self {
        Self {
            id: meta.id,
            title: draft.title,
            client_name: draft.client_name,
            client_email: draft.client_email,
            case_id: draft.case_id,
            date: draft.date,
            time: draft.time,
            duration: draft.duration,
            kind: draft.kind,
            status: draft.status,
            location: draft.location,
            notes: draft.notes,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
