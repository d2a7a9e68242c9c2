//! User account business logic.
//!
//! Administrators have no teacher record; teacher accounts must point at an active one.
//! Passwords and sessions belong to the authentication service and are not handled here.

use crate::{
    core::teacher::require_active_teacher,
    entities::{User, UserRole, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all active user accounts ordered by username.
pub async fn get_all_active_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .filter(user::Column::IsActive.eq(true))
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user account by username (active or not).
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a user account.
///
/// `teacher_id` is required for [`UserRole::Teacher`] and forbidden for [`UserRole::Admin`].
pub async fn create_user(
    db: &DatabaseConnection,
    username: String,
    full_name: String,
    role: UserRole,
    teacher_id: Option<i64>,
) -> Result<user::Model> {
    let username = username.trim().to_string();
    let full_name = full_name.trim().to_string();

    if username.is_empty() || username.contains(char::is_whitespace) {
        return Err(Error::Validation {
            message: "Username must be a single non-empty word".to_string(),
        });
    }
    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Full name cannot be empty".to_string(),
        });
    }

    match (role, teacher_id) {
        (UserRole::Admin, Some(_)) => {
            return Err(Error::Validation {
                message: "Admin accounts cannot be linked to a teacher".to_string(),
            });
        }
        (UserRole::Teacher, None) => {
            return Err(Error::Validation {
                message: "Teacher accounts must be linked to a teacher".to_string(),
            });
        }
        (UserRole::Teacher, Some(id)) => {
            require_active_teacher(db, id).await?;
        }
        (UserRole::Admin, None) => {}
    }

    if get_user_by_username(db, &username).await?.is_some() {
        return Err(Error::Validation {
            message: format!("Username {username} is already taken"),
        });
    }

    let user = user::ActiveModel {
        username: Set(username),
        full_name: Set(full_name),
        role: Set(role),
        teacher_id: Set(teacher_id),
        is_active: Set(true),
        ..Default::default()
    };

    let result = user.insert(db).await?;
    tracing::info!("Created {:?} account {}", result.role, result.username);
    Ok(result)
}

/// Deactivates a user account. The row is kept so the username stays reserved.
pub async fn deactivate_user(db: &DatabaseConnection, username: &str) -> Result<user::Model> {
    let user = get_user_by_username(db, username)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            username: username.to_string(),
        })?;

    let mut active: user::ActiveModel = user.into();
    active.is_active = Set(false);
    let result = active.update(db).await?;
    tracing::info!("Deactivated account {}", result.username);
    Ok(result)
}
