use serde::Serialize;

use crate::period::Snapshot;
use crate::ratio::{average_session_length, latest_session, participation_rate};

use super::{Kpi, SeriesPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionsSummary {
    pub kpis: Vec<Kpi>,
    /// Attendees per session, oldest first
    pub attendance: Vec<SeriesPoint>,
}

fn latest_attendance(snapshot: &Snapshot) -> u32 {
    latest_session(&snapshot.sessions).map_or(0, |s| s.attendee_count)
}

pub fn sessions_summary(current: &Snapshot, previous: Option<&Snapshot>) -> SessionsSummary {
    let attendees = latest_attendance(current);
    let participation = participation_rate(&current.sessions, &current.users);
    let length = average_session_length(&current.sessions);

    let mut sessions: Vec<_> = current.sessions.iter().collect();
    sessions.sort_by_key(|s| s.date);
    let attendance = sessions
        .into_iter()
        .map(|s| SeriesPoint {
            x: s.date,
            y: s.attendee_count as f64,
        })
        .collect();

    SessionsSummary {
        kpis: vec![
            Kpi::new(
                "Latest Attendance",
                attendees.to_string(),
                "Participants in last session",
            )
            .with_trend(
                attendees as f64,
                previous.map(|p| latest_attendance(p) as f64),
            ),
            Kpi::new(
                "Participation Rate",
                format!("{participation}%"),
                "Of active users attended",
            )
            .with_trend(
                participation as f64,
                previous.map(|p| participation_rate(&p.sessions, &p.users) as f64),
            ),
            Kpi::new("Avg Session Length", format!("{length} min"), "Average duration")
                .with_trend(
                    length as f64,
                    previous.map(|p| average_session_length(&p.sessions) as f64),
                ),
        ],
        attendance,
    }
}
