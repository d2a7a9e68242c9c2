//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attendance_entry;
pub mod duty_session;
pub mod student;
pub mod teacher;
pub mod user;

// Re-export specific types to avoid conflicts
pub use attendance_entry::{
    AttendanceStatus, Column as AttendanceEntryColumn, Entity as AttendanceEntry,
    Model as AttendanceEntryModel,
};
pub use duty_session::{
    Column as DutySessionColumn, Entity as DutySession, Model as DutySessionModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
pub use teacher::{Column as TeacherColumn, Entity as Teacher, Model as TeacherModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, UserRole};
