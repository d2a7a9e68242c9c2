//! User entity - Login accounts for administrators and duty teachers.
//!
//! Credentials live with the authentication service; this table only records who may use the
//! tool and in which role.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What a user account may do
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserRole {
    /// Manages students, teachers and accounts
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Records attendance for their own duty sessions
    #[sea_orm(string_value = "teacher")]
    Teacher,
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name
    #[sea_orm(unique)]
    pub username: String,
    /// Display name
    pub full_name: String,
    /// Account role
    pub role: UserRole,
    /// Linked teacher record, set only for `UserRole::Teacher`
    pub teacher_id: Option<i64>,
    /// Deactivated accounts are kept for audit but cannot be used
    pub is_active: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A teacher account belongs to one teacher record
    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::TeacherId",
        to = "super::teacher::Column::Id"
    )]
    Teacher,
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
