//! Duty session business logic.
//!
//! A session is opened by a teacher for one floor on one date and is never edited afterwards.
//! Deleting a session removes its attendance entries in the same database transaction.

use crate::{
    core::{floor::Floor, teacher::require_active_teacher},
    entities::{AttendanceEntry, DutySession, Teacher, attendance_entry, duty_session, teacher},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Opens a duty session for an active teacher.
pub async fn create_session(
    db: &DatabaseConnection,
    teacher_id: i64,
    date: NaiveDate,
    floor: Floor,
) -> Result<duty_session::Model> {
    require_active_teacher(db, teacher_id).await?;

    let session = duty_session::ActiveModel {
        teacher_id: Set(teacher_id),
        date: Set(date),
        floor: Set(floor.number()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = session.insert(db).await?;
    tracing::info!(
        "Teacher {} opened session {} for floor {} on {}",
        teacher_id,
        result.id,
        floor,
        date
    );
    Ok(result)
}

/// Finds a duty session by id.
pub async fn get_session_by_id(
    db: &DatabaseConnection,
    session_id: i64,
) -> Result<Option<duty_session::Model>> {
    DutySession::find_by_id(session_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads a duty session or fails with [`Error::SessionNotFound`].
pub async fn require_session<C>(db: &C, session_id: i64) -> Result<duty_session::Model>
where
    C: ConnectionTrait,
{
    DutySession::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or(Error::SessionNotFound { id: session_id })
}

/// Session/teacher lookup used before reporting.
///
/// Fails with [`Error::SessionNotFound`] or [`Error::TeacherNotFound`]. Soft-deleted teachers are
/// still returned so old sessions stay reportable.
pub async fn get_session_with_teacher(
    db: &DatabaseConnection,
    session_id: i64,
) -> Result<(duty_session::Model, teacher::Model)> {
    let session = require_session(db, session_id).await?;
    let teacher = Teacher::find_by_id(session.teacher_id)
        .one(db)
        .await?
        .ok_or(Error::TeacherNotFound {
            id: session.teacher_id,
        })?;
    Ok((session, teacher))
}

/// Duty floor of a stored session.
pub fn session_floor(session: &duty_session::Model) -> Result<Floor> {
    Floor::try_from(session.floor)
}

/// All sessions on a date, ordered by floor.
pub async fn get_sessions_on_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<duty_session::Model>> {
    DutySession::find()
        .filter(duty_session::Column::Date.eq(date))
        .order_by_asc(duty_session::Column::Floor)
        .order_by_asc(duty_session::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// A teacher's sessions, newest date first.
pub async fn get_sessions_for_teacher(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Vec<duty_session::Model>> {
    DutySession::find()
        .filter(duty_session::Column::TeacherId.eq(teacher_id))
        .order_by_desc(duty_session::Column::Date)
        .order_by_desc(duty_session::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a session together with all of its attendance entries.
pub async fn delete_session(db: &DatabaseConnection, session_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    require_session(&txn, session_id).await?;

    let removed = AttendanceEntry::delete_many()
        .filter(attendance_entry::Column::DutySessionId.eq(session_id))
        .exec(&txn)
        .await?;
    DutySession::delete_by_id(session_id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(
        "Deleted session {} and {} attendance entries",
        session_id,
        removed.rows_affected
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::attendance::{AttendanceInput, get_entries_for_session, record_attendance};
    use crate::core::floor::FloorLayout;
    use crate::entities::AttendanceStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_session_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let teacher = create_test_teacher(&db, "Ms. Rahma").await?;

        let session = create_session(&db, teacher.id, test_date(), Floor::Third).await?;
        assert_eq!(session.teacher_id, teacher.id);
        assert_eq!(session.date, test_date());
        assert_eq!(session_floor(&session)?, Floor::Third);

        let (found, found_teacher) = get_session_with_teacher(&db, session.id).await?;
        assert_eq!(found, session);
        assert_eq!(found_teacher, teacher);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_session_unknown_teacher() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_session(&db, 42, test_date(), Floor::Second).await;
        assert!(matches!(result, Err(Error::TeacherNotFound { id: 42 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_session_lookup_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_session_with_teacher(&db, 7).await;
        assert!(matches!(result, Err(Error::SessionNotFound { id: 7 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_sessions_by_date_and_teacher() -> Result<()> {
        let db = setup_test_db().await?;
        let rahma = create_test_teacher(&db, "Ms. Rahma").await?;
        let budi = create_test_teacher(&db, "Mr. Budi").await?;
        let next_day = test_date().succ_opt().unwrap();

        let fourth = create_session(&db, rahma.id, test_date(), Floor::Fourth).await?;
        let second = create_session(&db, budi.id, test_date(), Floor::Second).await?;
        let later = create_session(&db, rahma.id, next_day, Floor::Third).await?;

        let on_date = get_sessions_on_date(&db, test_date()).await?;
        assert_eq!(on_date, vec![second, fourth.clone()]);

        let rahma_sessions = get_sessions_for_teacher(&db, rahma.id).await?;
        assert_eq!(rahma_sessions, vec![later, fourth]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_session_removes_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let layout = FloorLayout::default();
        let teacher = create_test_teacher(&db, "Ms. Rahma").await?;
        let student = create_test_student(&db, "Adi", 8, "A").await?;
        let session = create_session(&db, teacher.id, test_date(), Floor::Third).await?;

        record_attendance(
            &db,
            &layout,
            session.id,
            AttendanceInput::new(student.id, AttendanceStatus::Present),
        )
        .await?;

        delete_session(&db, session.id).await?;

        assert!(get_session_by_id(&db, session.id).await?.is_none());
        assert!(get_entries_for_session(&db, session.id).await?.is_empty());

        let result = delete_session(&db, session.id).await;
        assert!(matches!(result, Err(Error::SessionNotFound { .. })));

        Ok(())
    }
}
