//! Teacher entity - Staff who take duty sessions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    /// Unique identifier for the teacher
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Staff employee number, printed on reports next to the name
    #[sea_orm(unique)]
    pub employee_number: String,
    /// Full name as shown on reports
    pub full_name: String,
    /// Soft delete flag - deleted teachers cannot take new sessions
    pub is_deleted: bool,
}

/// Defines relationships between Teacher and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One teacher has many duty sessions
    #[sea_orm(has_many = "super::duty_session::Entity")]
    DutySessions,
}

impl Related<super::duty_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DutySessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
