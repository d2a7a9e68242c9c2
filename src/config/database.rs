//! Database configuration module for `AttendanceBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Creation is idempotent, which lets the
//! binary call [`create_tables`] on every start.

use crate::entities::{
    AttendanceEntry, AttendanceEntryColumn, DutySession, Student, Teacher, User,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Default `SQLite` location used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/attendance_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file (created if missing) when no environment variable is set.
/// The parent directory of a file-backed `SQLite` database is created on demand.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if let Some(parent) = sqlite_parent_dir(&database_url) {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

fn sqlite_parent_dir(database_url: &str) -> Option<&Path> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables (if missing) plus the one-entry-per-student-per-session unique index.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Teacher).await?;
    create_table(db, Student).await?;
    create_table(db, User).await?;
    create_table(db, DutySession).await?;
    create_table(db, AttendanceEntry).await?;

    let builder = db.get_database_backend();
    let unique_entry = Index::create()
        .name("idx_attendance_entries_session_student")
        .table(AttendanceEntry)
        .col(AttendanceEntryColumn::DutySessionId)
        .col(AttendanceEntryColumn::StudentId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&unique_entry)).await?;

    tracing::debug!("Database tables ready");
    Ok(())
}
