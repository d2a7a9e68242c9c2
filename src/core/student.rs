//! Student business logic - enrolment, class changes and floor rosters.
//!
//! Every write validates the class against the catalogue, so stored rows always name a real
//! class. Roster queries are built from the [`FloorLayout`] rules instead of hard-coded class
//! lists, which keeps them in step with [`FloorLayout::floor_of`].

use crate::{
    core::{
        class::ClassIdentifier,
        floor::{Floor, FloorLayout},
    },
    entities::{Student, student},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Select, Set, prelude::*};

fn roster_order(query: Select<Student>) -> Select<Student> {
    query
        .order_by_asc(student::Column::Grade)
        .order_by_asc(student::Column::Section)
        .order_by_asc(student::Column::FullName)
}

/// Retrieves all active students ordered by grade, section and name.
pub async fn get_all_active_students(db: &DatabaseConnection) -> Result<Vec<student::Model>> {
    roster_order(Student::find().filter(student::Column::IsDeleted.eq(false)))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the active students of one class ordered by name.
pub async fn get_students_in_class(
    db: &DatabaseConnection,
    class: ClassIdentifier,
) -> Result<Vec<student::Model>> {
    Student::find()
        .filter(student::Column::IsDeleted.eq(false))
        .filter(student::Column::Grade.eq(class.grade.number()))
        .filter(student::Column::Section.eq(class.section.to_string()))
        .order_by_asc(student::Column::FullName)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Roster lookup: every active student whose class sits on `floor` under `layout`.
///
/// Ordered by grade, section and name; this is the order reports list students in.
pub async fn get_students_on_floor(
    db: &DatabaseConnection,
    layout: &FloorLayout,
    floor: Floor,
) -> Result<Vec<student::Model>> {
    let on_floor = layout
        .rules_for(floor)
        .fold(Condition::any(), |condition, rule| {
            let sections: Vec<String> = rule.sections.iter().map(ToString::to_string).collect();
            condition.add(
                Condition::all()
                    .add(student::Column::Grade.eq(rule.grade.number()))
                    .add(student::Column::Section.is_in(sections)),
            )
        });

    let roster = roster_order(
        Student::find()
            .filter(student::Column::IsDeleted.eq(false))
            .filter(on_floor),
    )
    .all(db)
    .await?;

    tracing::debug!("Floor {} roster has {} students", floor, roster.len());
    Ok(roster)
}

/// Finds a student by primary key, including soft-deleted ones.
pub async fn get_student_by_id(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Option<student::Model>> {
    Student::find_by_id(student_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active student by student number.
pub async fn get_student_by_number(
    db: &DatabaseConnection,
    student_number: &str,
) -> Result<Option<student::Model>> {
    Student::find()
        .filter(student::Column::StudentNumber.eq(student_number.trim()))
        .filter(student::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads an active student or fails with [`Error::StudentNotFound`].
pub async fn require_active_student<C>(db: &C, student_id: i64) -> Result<student::Model>
where
    C: ConnectionTrait,
{
    Student::find_by_id(student_id)
        .one(db)
        .await?
        .filter(|student| !student.is_deleted)
        .ok_or(Error::StudentNotFound { id: student_id })
}

/// Enrols a student in a catalogue class.
///
/// Student numbers are unique across all student records, deleted ones included.
pub async fn create_student(
    db: &DatabaseConnection,
    student_number: String,
    full_name: String,
    grade: i32,
    section: &str,
) -> Result<student::Model> {
    let class = ClassIdentifier::parse(grade, section)?;
    let student_number = student_number.trim().to_string();
    let full_name = full_name.trim().to_string();

    if full_name.is_empty() {
        return Err(Error::Validation {
            message: "Student name cannot be empty".to_string(),
        });
    }
    if student_number.is_empty() {
        return Err(Error::Validation {
            message: "Student number cannot be empty".to_string(),
        });
    }

    let taken = Student::find()
        .filter(student::Column::StudentNumber.eq(student_number.as_str()))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::Validation {
            message: format!("Student number {student_number} is already registered"),
        });
    }

    let student = student::ActiveModel {
        student_number: Set(student_number),
        full_name: Set(full_name),
        grade: Set(class.grade.number()),
        section: Set(class.section.to_string()),
        is_deleted: Set(false),
        ..Default::default()
    };

    let result = student.insert(db).await?;
    tracing::info!("Enrolled student {} in {}", result.id, class);
    Ok(result)
}

/// Moves a student to another class.
pub async fn update_student_class(
    db: &DatabaseConnection,
    student_id: i64,
    grade: i32,
    section: &str,
) -> Result<student::Model> {
    let class = ClassIdentifier::parse(grade, section)?;
    let student = require_active_student(db, student_id).await?;

    let mut active: student::ActiveModel = student.into();
    active.grade = Set(class.grade.number());
    active.section = Set(class.section.to_string());
    let result = active.update(db).await?;
    tracing::info!("Moved student {} to {}", student_id, class);
    Ok(result)
}

/// Soft-deletes a student. Recorded attendance is kept.
pub async fn delete_student(db: &DatabaseConnection, student_id: i64) -> Result<student::Model> {
    let student = require_active_student(db, student_id).await?;

    let mut active: student::ActiveModel = student.into();
    active.is_deleted = Set(true);
    let result = active.update(db).await?;
    tracing::info!("Deleted student {}", student_id);
    Ok(result)
}
