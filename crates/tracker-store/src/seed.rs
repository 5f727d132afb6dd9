//! Demonstration dataset
//!
//! Three clients, four projects, three activities and one meeting note with
//! fixed ids and cross-references, so a fresh repository has something to
//! show.

use crate::model::{
    Activity, ActivityType, AppData, Client, MeetingNote, Project, ProjectStatus,
};

#[allow(clippy::too_many_arguments)]
fn client(
    id: &str,
    company_name: &str,
    contact_person: &str,
    email: &str,
    phone: &str,
    address: &str,
    notes: &str,
    now: &str,
) -> Client {
    Client {
        id: id.into(),
        company_name: company_name.into(),
        contact_person: contact_person.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        notes: notes.into(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    client_id: &str,
    title: &str,
    description: &str,
    status: ProjectStatus,
    amount: u64,
    (start_date, end_date): (&str, &str),
    now: &str,
) -> Project {
    Project {
        id: id.into(),
        client_id: client_id.into(),
        title: title.into(),
        description: description.into(),
        status,
        amount,
        start_date: start_date.into(),
        end_date: end_date.into(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: &str,
    project_id: &str,
    client_id: &str,
    kind: ActivityType,
    title: &str,
    description: &str,
    date: &str,
    now: &str,
) -> Activity {
    Activity {
        id: id.into(),
        project_id: project_id.into(),
        client_id: client_id.into(),
        kind,
        title: title.into(),
        description: description.into(),
        date: date.into(),
        created_at: now.into(),
    }
}

const KICKOFF_MINUTES: &str = "Date: 2026-02-10 14:00-15:30\n\
Place: Sample Trading head office\n\
Attendees: Tanaka (GM), Yamada (manager); ours: Suzuki, Sasaki\n\
\n\
Agenda\n\
1. Current order-to-cash workflow\n\
2. Where to digitize first\n\
3. Schedule\n\
\n\
Discussion\n\
- Paperless ordering is the most urgent item\n\
- Inventory visibility is a second candidate\n\
- Client wants full start from April";

/// The demonstration dataset with every timestamp set to `now`.
pub fn seed_data(now: &str) -> AppData {
    let clients = vec![
        client(
            "c1",
            "Sample Trading Co., Ltd.",
            "Taro Tanaka",
            "tanaka@sample.co.jp",
            "03-1234-5678",
            "1-1-1 Marunouchi, Chiyoda-ku, Tokyo",
            "Possible annual contract",
            now,
        ),
        client(
            "c2",
            "Test Industries LLC",
            "Hanako Suzuki",
            "suzuki@test-ind.co.jp",
            "06-9876-5432",
            "2-2-2 Umeda, Kita-ku, Osaka",
            "Interested in digital transformation",
            now,
        ),
        client(
            "c3",
            "Innovation Inc.",
            "Jiro Sato",
            "sato@innovation.co.jp",
            "052-111-2222",
            "3-3-3 Sakae, Naka-ku, Nagoya",
            "Considering support for a new business launch",
            now,
        ),
    ];

    let projects = vec![
        project(
            "p1",
            "c1",
            "DX consulting",
            "Digitizing core business processes",
            ProjectStatus::Proposal,
            5_000_000,
            ("2026-03-01", "2026-08-31"),
            now,
        ),
        project(
            "p2",
            "c2",
            "Organization reform",
            "Reviewing the org structure and proposing improvements",
            ProjectStatus::Prospect,
            3_000_000,
            ("2026-04-01", "2026-09-30"),
            now,
        ),
        project(
            "p3",
            "c1",
            "IT strategy support",
            "Mid-term IT strategy planning",
            ProjectStatus::Won,
            8_000_000,
            ("2026-01-01", "2026-06-30"),
            now,
        ),
        project(
            "p4",
            "c3",
            "New business planning",
            "Feasibility study for a new business",
            ProjectStatus::Negotiation,
            4_500_000,
            ("2026-05-01", "2026-10-31"),
            now,
        ),
    ];

    let activities = vec![
        activity(
            "a1",
            "p1",
            "c1",
            ActivityType::Meeting,
            "Kickoff hearing",
            "Walked through the current workflow and agreed on digitization priorities.",
            "2026-02-10",
            now,
        ),
        activity(
            "a2",
            "p3",
            "c1",
            ActivityType::Appointment,
            "Interim report",
            "Presented the interim IT strategy report; direction agreed.",
            "2026-02-05",
            now,
        ),
        activity(
            "a3",
            "p2",
            "c2",
            ActivityType::Call,
            "Follow-up call",
            "Confirmed when the proposal will be sent.",
            "2026-02-11",
            now,
        ),
    ];

    let meeting_notes = vec![MeetingNote {
        id: "mn1".into(),
        project_id: "p1".into(),
        client_id: "c1".into(),
        activity_id: Some("a1".into()),
        file_name: "kickoff-hearing-minutes.txt".into(),
        content: KICKOFF_MINUTES.into(),
        uploaded_at: now.into(),
    }];

    AppData {
        clients,
        projects,
        activities,
        meeting_notes,
    }
}
