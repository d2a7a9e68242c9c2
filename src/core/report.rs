//! Duty session reports.
//!
//! [`generate_session_report`] gathers a session, its teacher, the floor roster and the recorded
//! entries, and [`render`] turns them into the plain-text report handed to the school office.
//! Rendering is a pure function of its arguments, so the same inputs always give the same text.

use crate::{
    core::{
        attendance::get_entries_for_session,
        duty_session::{get_session_with_teacher, get_sessions_on_date, session_floor},
        floor::{Floor, FloorLayout},
        student::get_students_on_floor,
        summary::{AttendanceSummary, summarize},
    },
    entities::{Student, Teacher, attendance_entry, duty_session, student, teacher},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, prelude::*};
use std::collections::{HashMap, HashSet};

/// Everything needed to render one duty session report.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// The session being reported on
    pub session: duty_session::Model,
    /// Teacher who took the session
    pub teacher: teacher::Model,
    /// Floor roster, followed by any recorded students no longer on the floor
    pub roster: Vec<student::Model>,
    /// Recorded entries in roster order
    pub entries: Vec<attendance_entry::Model>,
    /// Counts over `entries`
    pub summary: AttendanceSummary,
}

impl SessionReport {
    /// Renders the report text.
    #[must_use]
    pub fn render(&self) -> String {
        render(
            &self.session,
            &self.teacher,
            &self.roster,
            &self.entries,
            &self.summary,
        )
    }

    /// Roster students with no recorded entry. These are not counted as absent.
    #[must_use]
    pub fn unrecorded(&self) -> Vec<&student::Model> {
        let recorded: HashSet<i64> = self.entries.iter().map(|e| e.student_id).collect();
        self.roster
            .iter()
            .filter(|student| !recorded.contains(&student.id))
            .collect()
    }
}

/// Builds the report for a duty session.
///
/// Entries are ordered by the floor roster (grade, section, name). Entries for students who
/// have since left the floor or the school are kept and listed after the roster, by entry id.
pub async fn generate_session_report(
    db: &DatabaseConnection,
    layout: &FloorLayout,
    session_id: i64,
) -> Result<SessionReport> {
    let (session, teacher) = get_session_with_teacher(db, session_id).await?;
    let floor = session_floor(&session)?;
    let mut roster = get_students_on_floor(db, layout, floor).await?;
    let mut entries = get_entries_for_session(db, session_id).await?;

    let position: HashMap<i64, usize> = roster
        .iter()
        .enumerate()
        .map(|(index, student)| (student.id, index))
        .collect();

    let off_roster: Vec<i64> = entries
        .iter()
        .map(|entry| entry.student_id)
        .filter(|id| !position.contains_key(id))
        .collect();
    if !off_roster.is_empty() {
        let extra = Student::find()
            .filter(student::Column::Id.is_in(off_roster))
            .order_by_asc(student::Column::Id)
            .all(db)
            .await?;
        roster.extend(extra);
    }

    entries.sort_by_key(|entry| {
        (
            position.get(&entry.student_id).copied().unwrap_or(usize::MAX),
            entry.id,
        )
    });
    let summary = summarize(&entries);

    tracing::info!(
        "Generated report for session {} ({} entries)",
        session_id,
        summary.total
    );

    Ok(SessionReport {
        session,
        teacher,
        roster,
        entries,
        summary,
    })
}

/// One row of the daily overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOverview {
    /// The duty session
    pub session: duty_session::Model,
    /// Name of the teacher on duty
    pub teacher_name: String,
    /// Floor the session covers
    pub floor: Floor,
    /// Counts over the session's entries
    pub summary: AttendanceSummary,
}

/// Summaries for every duty session held on `date`, ordered by floor.
pub async fn daily_overview(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<SessionOverview>> {
    let sessions = get_sessions_on_date(db, date).await?;
    let mut overview = Vec::with_capacity(sessions.len());

    for session in sessions {
        let teacher_name = Teacher::find_by_id(session.teacher_id)
            .one(db)
            .await?
            .ok_or(Error::TeacherNotFound {
                id: session.teacher_id,
            })?
            .full_name;
        let floor = session_floor(&session)?;
        let entries = get_entries_for_session(db, session.id).await?;
        overview.push(SessionOverview {
            summary: summarize(&entries),
            session,
            teacher_name,
            floor,
        });
    }

    Ok(overview)
}

/// Formats one detail line (without numbering) for an entry.
///
/// Produces `Name (9G) - Present (Late) - Notes: ...`, dropping the late marker and notes when
/// they do not apply.
#[must_use]
pub fn format_entry_line(
    entry: &attendance_entry::Model,
    student: Option<&student::Model>,
) -> String {
    let (name, class) = student.map_or_else(
        || (format!("Unknown student #{}", entry.student_id), "?".to_string()),
        |s| (s.full_name.clone(), format!("{}{}", s.grade, s.section)),
    );

    let mut line = format!("{name} ({class}) - {}", entry.status);
    if entry.is_late {
        line.push_str(" (Late)");
    }
    if let Some(notes) = entry.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        line.push_str(" - Notes: ");
        line.push_str(notes);
    }
    line
}

/// Renders a duty session report.
///
/// The roster is only used to look up student names and classes; the detail list follows the
/// order of `entries` exactly.
#[must_use]
pub fn render(
    session: &duty_session::Model,
    teacher: &teacher::Model,
    roster: &[student::Model],
    entries: &[attendance_entry::Model],
    summary: &AttendanceSummary,
) -> String {
    let students: HashMap<i64, &student::Model> =
        roster.iter().map(|student| (student.id, student)).collect();

    let mut lines = vec![
        "Duty Attendance Report".to_string(),
        format!(
            "Teacher: {} ({})",
            teacher.full_name, teacher.employee_number
        ),
        format!("Date: {}", session.date.format("%Y-%m-%d")),
        format!("Floor: {}", session.floor),
        String::new(),
        "Summary".to_string(),
    ];

    lines.extend(
        summary
            .labelled()
            .iter()
            .map(|(label, count)| format!("  {label}: {count}")),
    );

    lines.push(String::new());
    lines.push("Details".to_string());
    if entries.is_empty() {
        lines.push("  (no attendance recorded)".to_string());
    }
    lines.extend(entries.iter().enumerate().map(|(index, entry)| {
        let student = students.get(&entry.student_id).copied();
        format!("  {}. {}", index + 1, format_entry_line(entry, student))
    }));

    let mut report = lines.join("\n");
    report.push('\n');
    report
}
