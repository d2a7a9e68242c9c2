//! Attendance entry entity - One student's recorded status for one duty session.
//!
//! At most one entry exists per (`duty_session_id`, `student_id`); the pair carries a unique
//! index created alongside the table in `config::database::create_tables`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recorded attendance status. Exactly one per entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// In school
    #[sea_orm(string_value = "present")]
    Present,
    /// Away with illness
    #[sea_orm(string_value = "sick")]
    Sick,
    /// Away with permission
    #[sea_orm(string_value = "permission")]
    Permission,
    /// Away without notice
    #[sea_orm(string_value = "absent")]
    Absent,
}

impl AttendanceStatus {
    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Sick => "Sick",
            Self::Permission => "Permission",
            Self::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attendance entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Session the entry was recorded in
    pub duty_session_id: i64,
    /// Student the entry is about
    pub student_id: i64,
    /// Attendance status
    pub status: AttendanceStatus,
    /// Arrived late; counted independently of `status`
    pub is_late: bool,
    /// Free-form remark from the duty teacher
    pub notes: Option<String>,
    /// When the entry was last written
    pub recorded_at: DateTimeUtc,
}

/// Defines relationships between `AttendanceEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one duty session
    #[sea_orm(
        belongs_to = "super::duty_session::Entity",
        from = "Column::DutySessionId",
        to = "super::duty_session::Column::Id"
    )]
    DutySession,
    /// Each entry is about one student
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::duty_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DutySession.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
