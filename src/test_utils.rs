//! Shared test utilities for `AttendanceBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{duty_session, floor::Floor, student, teacher},
    entities,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// School day used by tests that need a session date.
#[must_use]
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 12).unwrap_or_default()
}

/// Creates a test teacher whose employee number is `T-<name>`.
pub async fn create_test_teacher(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::teacher::Model> {
    teacher::create_teacher(db, format!("T-{name}"), name.to_string()).await
}

/// Creates a test student whose student number is `S-<name>`.
pub async fn create_test_student(
    db: &DatabaseConnection,
    name: &str,
    grade: i32,
    section: &str,
) -> Result<entities::student::Model> {
    student::create_student(db, format!("S-{name}"), name.to_string(), grade, section).await
}

/// Sets up a floor 3 duty session for "Ms. Rahma" on [`test_date`].
///
/// Returns (db, session, students) where students are Adi (8A), Bayu (8B) and Citra (9G),
/// already in roster order.
pub async fn setup_with_session() -> Result<(
    DatabaseConnection,
    entities::duty_session::Model,
    Vec<entities::student::Model>,
)> {
    let db = setup_test_db().await?;
    let teacher = create_test_teacher(&db, "Ms. Rahma").await?;
    let students = vec![
        create_test_student(&db, "Adi", 8, "A").await?,
        create_test_student(&db, "Bayu", 8, "B").await?,
        create_test_student(&db, "Citra", 9, "G").await?,
    ];
    let session = duty_session::create_session(&db, teacher.id, test_date(), Floor::Third).await?;
    Ok((db, session, students))
}
