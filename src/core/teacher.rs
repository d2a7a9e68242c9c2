//! Teacher business logic - creating, listing and retiring teacher records.

use crate::{
    entities::{Teacher, teacher},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all active (non-deleted) teachers, ordered alphabetically by name.
pub async fn get_all_active_teachers(db: &DatabaseConnection) -> Result<Vec<teacher::Model>> {
    Teacher::find()
        .filter(teacher::Column::IsDeleted.eq(false))
        .order_by_asc(teacher::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a teacher by primary key, including soft-deleted ones.
///
/// Reports for old sessions still need the name of a teacher who has since left.
pub async fn get_teacher_by_id(
    db: &DatabaseConnection,
    teacher_id: i64,
) -> Result<Option<teacher::Model>> {
    Teacher::find_by_id(teacher_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active teacher by employee number.
pub async fn get_teacher_by_employee_number(
    db: &DatabaseConnection,
    employee_number: &str,
) -> Result<Option<teacher::Model>> {
    Teacher::find()
        .filter(teacher::Column::EmployeeNumber.eq(employee_number.trim()))
        .filter(teacher::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads an active teacher or fails with [`Error::TeacherNotFound`].
pub async fn require_active_teacher<C>(db: &C, teacher_id: i64) -> Result<teacher::Model>
where
    C: ConnectionTrait,
{
    Teacher::find_by_id(teacher_id)
        .one(db)
        .await?
        .filter(|teacher| !teacher.is_deleted)
        .ok_or(Error::TeacherNotFound { id: teacher_id })
}

/// Creates a teacher record after validating the name and employee number.
///
/// Employee numbers are unique across all teacher records, deleted ones included.
pub async fn create_teacher(
    db: &DatabaseConnection,
    employee_number: String,
    full_name: String,
) -> Result<teacher::Model> {
    let employee_number = employee_number.trim().to_string();
    let full_name = full_name.trim().to_string();

    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Teacher name cannot be empty".to_string(),
        });
    }
    if employee_number.is_empty() {
        return Err(Error::Validation {
            message: "Employee number cannot be empty".to_string(),
        });
    }

    let taken = Teacher::find()
        .filter(teacher::Column::EmployeeNumber.eq(employee_number.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::Validation {
            message: format!("Employee number {employee_number} is already registered"),
        });
    }

    let teacher = teacher::ActiveModel {
        employee_number: Set(employee_number),
        full_name: Set(full_name),
        is_deleted: Set(false),
        ..Default::default()
    };

    let result = teacher.insert(db).await?;
    tracing::info!("Created teacher {} ({})", result.full_name, result.id);
    Ok(result)
}

/// Soft-deletes a teacher. Their past sessions and reports are kept.
pub async fn delete_teacher(db: &DatabaseConnection, teacher_id: i64) -> Result<teacher::Model> {
    let teacher = require_active_teacher(db, teacher_id).await?;

    let mut active: teacher::ActiveModel = teacher.into();
    active.is_deleted = Set(true);
    let result = active.update(db).await?;
    tracing::info!("Deleted teacher {}", teacher_id);
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_teacher_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_teacher(&db, "T-001".to_string(), "  ".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_teacher(&db, String::new(), "Ms. Rahma".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_teacher_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let teacher = create_teacher(&db, " T-001 ".to_string(), "Ms. Rahma".to_string()).await?;
        assert_eq!(teacher.employee_number, "T-001");
        assert_eq!(teacher.full_name, "Ms. Rahma");
        assert!(!teacher.is_deleted);

        let found = get_teacher_by_employee_number(&db, "T-001").await?;
        assert_eq!(found.unwrap().id, teacher.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_employee_number_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_teacher(&db, "Ms. Rahma").await?;

        let result = create_teacher(&db, "T-Ms. Rahma".to_string(), "Other".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_teacher_hides_from_active_list() -> Result<()> {
        let db = setup_test_db().await?;
        let rahma = create_test_teacher(&db, "Ms. Rahma").await?;
        let budi = create_test_teacher(&db, "Mr. Budi").await?;

        delete_teacher(&db, rahma.id).await?;

        let active = get_all_active_teachers(&db).await?;
        assert_eq!(active, vec![budi]);

        // Still resolvable by id for historical reports
        let retired = get_teacher_by_id(&db, rahma.id).await?.unwrap();
        assert!(retired.is_deleted);

        let result = require_active_teacher(&db, rahma.id).await;
        assert!(matches!(result, Err(Error::TeacherNotFound { .. })));

        Ok(())
    }
}
