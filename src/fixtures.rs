// Literal seed datasets for mock mode
//
// All records are fictional. The builder loads these into the mock stores
// and seeds the id allocator from them, so the first appointment created
// in a fresh mock session gets id 7.

use crate::models::{
    Appointment, AppointmentStatus, AppointmentType, Case, CaseDocument, CaseNote,
    CasePriority, CaseStatus, Client, ClientStatus, EntityId, TimelineEntry, TimelineKind,
};
use crate::services::auth::{User, UserRole};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

// Literal data only; every dataset is built by the tests below, so a
// mistyped date fails there
fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture date out of range")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    let naive = day(y, m, d)
        .and_hms_opt(h, min, 0)
        .expect("fixture time out of range");
    Utc.from_utc_datetime(&naive)
}

fn id(raw: u64) -> EntityId {
    EntityId::new(raw)
}

#[allow(clippy::too_many_arguments)]
fn appointment(
    raw_id: u64,
    title: &str,
    client_name: &str,
    case_id: Option<u64>,
    date: NaiveDate,
    time: &str,
    kind: AppointmentType,
    status: AppointmentStatus,
) -> Appointment {
    let created = at(2024, 1, 2, 9, 0);
    Appointment {
        id: id(raw_id),
        title: title.to_string(),
        client_name: client_name.to_string(),
        client_email: None,
        case_id: case_id.map(id),
        date,
        time: time.to_string(),
        duration: 60,
        kind,
        status,
        location: Some("Main office".to_string()),
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn appointments() -> Vec<Appointment> {
    use AppointmentStatus::*;
    use AppointmentType::*;

    vec![
        appointment(1, "Initial consultation", "Maria Gonzalez", Some(1), day(2024, 1, 15), "09:00", Consultation, Completed),
        appointment(2, "Document review", "James Whitaker", Some(2), day(2024, 1, 16), "11:30", Meeting, Confirmed),
        appointment(3, "Custody hearing", "Maria Gonzalez", Some(1), day(2024, 1, 22), "14:00", CourtHearing, Scheduled),
        appointment(4, "Follow-up call", "Priya Natarajan", Some(3), day(2024, 1, 24), "10:00", FollowUp, Scheduled),
        appointment(5, "Contract walkthrough", "James Whitaker", Some(2), day(2024, 1, 25), "15:30", Meeting, Cancelled),
        appointment(6, "Intake", "Tom Becker", None, day(2024, 1, 29), "13:00", Consultation, Scheduled),
    ]
}

pub fn cases() -> Vec<Case> {
    vec![
        Case {
            id: id(1),
            case_number: Case::case_number_for(1),
            title: "Gonzalez custody arrangement".to_string(),
            description: Some("Modification of existing custody order".to_string()),
            client_id: Some(id(1)),
            client_name: "Maria Gonzalez".to_string(),
            case_type: Some("Family".to_string()),
            status: CaseStatus::InProgress,
            priority: CasePriority::High,
            assigned_to: Some("Jane Counsel".to_string()),
            due_date: Some(day(2024, 2, 28)),
            opened_date: at(2024, 1, 3, 10, 0),
            last_updated: at(2024, 1, 15, 16, 45),
            timeline: vec![
                TimelineEntry {
                    date: at(2024, 1, 3, 10, 0),
                    event: "Case opened".to_string(),
                    kind: TimelineKind::Info,
                },
                TimelineEntry {
                    date: at(2024, 1, 15, 16, 45),
                    event: "Petition filed".to_string(),
                    kind: TimelineKind::Success,
                },
            ],
            documents: vec![CaseDocument {
                name: "petition.pdf".to_string(),
                url: None,
                uploaded_at: Some(at(2024, 1, 15, 16, 40)),
            }],
            notes: vec![CaseNote {
                date: at(2024, 1, 15, 17, 0),
                author: Some("Jane Counsel".to_string()),
                content: "Client prefers mediation before the hearing.".to_string(),
            }],
        },
        Case {
            id: id(2),
            case_number: Case::case_number_for(2),
            title: "Whitaker supplier dispute".to_string(),
            description: None,
            client_id: Some(id(2)),
            client_name: "James Whitaker".to_string(),
            case_type: Some("Contract".to_string()),
            status: CaseStatus::Open,
            priority: CasePriority::Medium,
            assigned_to: Some("Omar Haddad".to_string()),
            due_date: None,
            opened_date: at(2024, 1, 8, 9, 15),
            last_updated: at(2024, 1, 8, 9, 15),
            timeline: vec![TimelineEntry {
                date: at(2024, 1, 8, 9, 15),
                event: "Case opened".to_string(),
                kind: TimelineKind::Info,
            }],
            documents: Vec::new(),
            notes: Vec::new(),
        },
        Case {
            id: id(3),
            case_number: Case::case_number_for(3),
            title: "Natarajan visa renewal".to_string(),
            description: Some("H-1B extension".to_string()),
            client_id: Some(id(3)),
            client_name: "Priya Natarajan".to_string(),
            case_type: Some("Immigration".to_string()),
            status: CaseStatus::Pending,
            priority: CasePriority::Urgent,
            assigned_to: None,
            due_date: Some(day(2024, 2, 1)),
            opened_date: at(2024, 1, 10, 14, 30),
            last_updated: at(2024, 1, 20, 11, 0),
            timeline: vec![
                TimelineEntry {
                    date: at(2024, 1, 10, 14, 30),
                    event: "Case opened".to_string(),
                    kind: TimelineKind::Info,
                },
                TimelineEntry {
                    date: at(2024, 1, 20, 11, 0),
                    event: "Awaiting employer letter".to_string(),
                    kind: TimelineKind::Warning,
                },
            ],
            documents: Vec::new(),
            notes: Vec::new(),
        },
    ]
}

pub fn clients() -> Vec<Client> {
    let client = |raw_id: u64, name: &str, email: &str, phone: Option<&str>, status: ClientStatus| {
        let created = at(2024, 1, 2, 8, 0);
        Client {
            id: id(raw_id),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            address: None,
            status,
            created_at: created,
            updated_at: created,
        }
    };

    vec![
        client(1, "Maria Gonzalez", "maria.gonzalez@example.com", Some("555-0101"), ClientStatus::Active),
        client(2, "James Whitaker", "j.whitaker@example.com", Some("555-0102"), ClientStatus::Active),
        client(3, "Priya Natarajan", "priya.n@example.com", None, ClientStatus::Active),
        client(4, "Tom Becker", "tbecker@example.com", Some("555-0104"), ClientStatus::Inactive),
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: id(1),
            name: "Jane Counsel".to_string(),
            email: "jane@casedesk.test".to_string(),
            role: UserRole::Attorney,
        },
        User {
            id: id(2),
            name: "Omar Haddad".to_string(),
            email: "omar@casedesk.test".to_string(),
            role: UserRole::Paralegal,
        },
        User {
            id: id(3),
            name: "Admin".to_string(),
            email: "admin@casedesk.test".to_string(),
            role: UserRole::Admin,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;
    use std::collections::HashSet;

    fn assert_unique_ids<E: Entity>(records: &[E]) {
        let ids: HashSet<_> = records.iter().map(Entity::id).collect();
        assert_eq!(ids.len(), records.len(), "{} ids repeat", E::ENTITY_TYPE);
    }

    #[test]
    fn test_helpers_keep_literal_dates() {
        assert_eq!(day(2024, 2, 29).to_string(), "2024-02-29");
        assert_eq!(at(2024, 1, 2, 9, 0).to_rfc3339(), "2024-01-02T09:00:00+00:00");
    }

    #[test]
    #[should_panic(expected = "fixture date out of range")]
    fn test_mistyped_date_is_loud() {
        day(2024, 2, 30);
    }

    #[test]
    fn test_no_fixture_date_falls_back_to_epoch() {
        let epoch = NaiveDate::default();
        assert!(appointments().iter().all(|a| a.date != epoch));
        assert!(cases().iter().all(|c| c.opened_date.date_naive() != epoch));
        assert!(clients().iter().all(|c| c.created_at.date_naive() != epoch));
    }

    #[test]
    fn test_fixture_ids_unique() {
        assert_unique_ids(&appointments());
        assert_unique_ids(&cases());
        assert_unique_ids(&clients());
    }

    #[test]
    fn test_appointment_max_id_is_six() {
        let max = appointments().iter().map(|a| a.id.get()).max();
        assert_eq!(max, Some(6));
    }

    #[test]
    fn test_fixture_cases_start_with_opened_entry() {
        for case in cases() {
            assert_eq!(case.timeline[0].event, "Case opened");
            assert_eq!(case.timeline[0].date, case.opened_date);
        }
    }
}
