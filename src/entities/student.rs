//! Student entity - A pupil enrolled in one class of the catalogue.
//!
//! Grade and section are stored raw; `core::student` validates them against the class
//! catalogue before anything is written.

use crate::core::class::ClassIdentifier;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Student database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    /// Unique identifier for the student
    #[sea_orm(primary_key)]
    pub id: i64,
    /// School-issued student number
    #[sea_orm(unique)]
    pub student_number: String,
    /// Full name as shown on reports
    pub full_name: String,
    /// Grade number (7, 8 or 9)
    pub grade: i32,
    /// Section letter within the grade (`"A"`..`"G"`)
    pub section: String,
    /// Soft delete flag - deleted students drop off rosters but keep their history
    pub is_deleted: bool,
}

impl Model {
    /// The student's class, validated against the catalogue.
    pub fn class(&self) -> crate::errors::Result<ClassIdentifier> {
        ClassIdentifier::parse(self.grade, &self.section)
    }
}

/// Defines relationships between Student and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One student has many attendance entries
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    AttendanceEntries,
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
