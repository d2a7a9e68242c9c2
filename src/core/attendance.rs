//! Attendance entry business logic - recording and looking up per-student statuses.
//!
//! Recording is an upsert: the first write for a (session, student) pair inserts an entry and
//! later writes overwrite it (last write wins). The lookup and the write run in one database
//! transaction, and the unique index on the pair rejects any duplicate that slips past.

use crate::{
    core::{
        duty_session::{require_session, session_floor},
        floor::FloorLayout,
        student::require_active_student,
    },
    entities::{AttendanceEntry, AttendanceStatus, attendance_entry},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// What the duty teacher records for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceInput {
    /// Student being recorded
    pub student_id: i64,
    /// Attendance status
    pub status: AttendanceStatus,
    /// Arrived late
    pub is_late: bool,
    /// Optional remark; blank remarks are dropped
    pub notes: Option<String>,
}

impl AttendanceInput {
    /// An on-time entry without notes.
    #[must_use]
    pub const fn new(student_id: i64, status: AttendanceStatus) -> Self {
        Self {
            student_id,
            status,
            is_late: false,
            notes: None,
        }
    }

    /// Marks the entry late.
    #[must_use]
    pub const fn late(mut self) -> Self {
        self.is_late = true;
        self
    }

    /// Attaches a remark.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    fn cleaned_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(ToString::to_string)
    }
}

/// Records (inserts or overwrites) one student's attendance in a duty session.
///
/// The student must be active and their class must sit on the session's floor under `layout`.
pub async fn record_attendance(
    db: &DatabaseConnection,
    layout: &FloorLayout,
    session_id: i64,
    input: AttendanceInput,
) -> Result<attendance_entry::Model> {
    let txn = db.begin().await?;

    let session = require_session(&txn, session_id).await?;
    let floor = session_floor(&session)?;
    let student = require_active_student(&txn, input.student_id).await?;
    if !layout.contains(floor, student.class()?) {
        return Err(Error::StudentNotOnFloor {
            student_id: student.id,
            floor: floor.number(),
        });
    }

    let existing = AttendanceEntry::find()
        .filter(attendance_entry::Column::DutySessionId.eq(session_id))
        .filter(attendance_entry::Column::StudentId.eq(input.student_id))
        .one(&txn)
        .await?;

    let notes = input.cleaned_notes();
    let now = chrono::Utc::now();
    let result = if let Some(entry) = existing {
        let mut active: attendance_entry::ActiveModel = entry.into();
        active.status = Set(input.status);
        active.is_late = Set(input.is_late);
        active.notes = Set(notes);
        active.recorded_at = Set(now);
        active.update(&txn).await?
    } else {
        let entry = attendance_entry::ActiveModel {
            duty_session_id: Set(session_id),
            student_id: Set(input.student_id),
            status: Set(input.status),
            is_late: Set(input.is_late),
            notes: Set(notes),
            recorded_at: Set(now),
            ..Default::default()
        };
        entry.insert(&txn).await?
    };

    txn.commit().await?;
    tracing::debug!(
        "Recorded {} for student {} in session {}",
        result.status,
        result.student_id,
        session_id
    );
    Ok(result)
}

/// Records several students in one call.
///
/// Each entry is written independently; an error stops the run but keeps entries already
/// written.
pub async fn record_session_attendance(
    db: &DatabaseConnection,
    layout: &FloorLayout,
    session_id: i64,
    inputs: Vec<AttendanceInput>,
) -> Result<Vec<attendance_entry::Model>> {
    let mut recorded = Vec::with_capacity(inputs.len());
    for input in inputs {
        recorded.push(record_attendance(db, layout, session_id, input).await?);
    }
    tracing::info!(
        "Recorded {} attendance entries for session {}",
        recorded.len(),
        session_id
    );
    Ok(recorded)
}

/// Entry lookup: every attendance entry of a session, in recording order.
pub async fn get_entries_for_session(
    db: &DatabaseConnection,
    session_id: i64,
) -> Result<Vec<attendance_entry::Model>> {
    AttendanceEntry::find()
        .filter(attendance_entry::Column::DutySessionId.eq(session_id))
        .order_by_asc(attendance_entry::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// One student's entry in a session, if recorded.
pub async fn get_entry(
    db: &DatabaseConnection,
    session_id: i64,
    student_id: i64,
) -> Result<Option<attendance_entry::Model>> {
    AttendanceEntry::find()
        .filter(attendance_entry::Column::DutySessionId.eq(session_id))
        .filter(attendance_entry::Column::StudentId.eq(student_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Removes one student's entry from a session. Returns whether an entry existed.
pub async fn delete_entry(db: &DatabaseConnection, session_id: i64, student_id: i64) -> Result<bool> {
    let removed = AttendanceEntry::delete_many()
        .filter(attendance_entry::Column::DutySessionId.eq(session_id))
        .filter(attendance_entry::Column::StudentId.eq(student_id))
        .exec(db)
        .await?;
    Ok(removed.rows_affected > 0)
}
