//! Unified error type for `AttendanceBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Domain failures (an unknown class,
//! a missing duty session) are distinct variants so callers can react to them without string
//! matching; storage failures are wrapped from `SeaORM`.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input failed a business rule (empty name, duplicate number, ...)
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
    },

    /// The (grade, section) pair is not in the class catalogue
    #[error("Invalid class: grade {grade}, section {section}")]
    InvalidClass {
        /// Grade as supplied by the caller
        grade: String,
        /// Section as supplied by the caller
        section: String,
    },

    /// The floor number is not one of the building's duty floors
    #[error("Invalid floor: {floor}")]
    InvalidFloor {
        /// Floor as supplied by the caller
        floor: i32,
    },

    /// No duty session with this id
    #[error("Duty session not found: {id}")]
    SessionNotFound {
        /// Requested session id
        id: i64,
    },

    /// No (active) student with this id
    #[error("Student not found: {id}")]
    StudentNotFound {
        /// Requested student id
        id: i64,
    },

    /// No (active) teacher with this id
    #[error("Teacher not found: {id}")]
    TeacherNotFound {
        /// Requested teacher id
        id: i64,
    },

    /// No user account with this username
    #[error("User not found: {username}")]
    UserNotFound {
        /// Requested username
        username: String,
    },

    /// The student's class does not belong to the duty session's floor
    #[error("Student {student_id} is not on floor {floor}")]
    StudentNotOnFloor {
        /// Student that was being recorded
        student_id: i64,
        /// Floor of the duty session
        floor: i32,
    },

    /// Storage layer failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (reading configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
