//! Core business logic - floor mapping, attendance recording and reporting.
//!
//! `class` and `floor` are pure functions over the class catalogue. `summary` and the rendering
//! half of `report` are pure functions over entity models and do no I/O. The remaining modules
//! read and write the database through `SeaORM`.

/// Attendance entry recording and lookup
pub mod attendance;
/// Grade/section catalogue
pub mod class;
/// Duty session lifecycle
pub mod duty_session;
/// Class-to-floor mapping
pub mod floor;
/// Session reports and daily overview
pub mod report;
/// Student enrolment and floor rosters
pub mod student;
/// Attendance aggregation
pub mod summary;
/// Teacher records
pub mod teacher;
/// User accounts
pub mod user;
