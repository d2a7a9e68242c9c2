//! Duty session entity - One teacher supervising one floor on one date.
//!
//! Sessions are never edited after creation; floor and date are fixed. Deleting a session
//! removes its attendance entries with it (see `core::duty_session::delete_session`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Duty session database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "duty_sessions")]
pub struct Model {
    /// Unique identifier for the session
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Teacher on duty
    pub teacher_id: i64,
    /// School day the session covers
    pub date: Date,
    /// Floor number (2, 3 or 4)
    pub floor: i32,
    /// When the session was opened
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `DutySession` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one teacher
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id"
    )]
    Teacher,
    /// One session has many attendance entries
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    AttendanceEntries,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
