//! Data models for students and courses.
//!
//! This module defines the core data structures:
//!
//! - [`Student`]: An enrolled person with an ordered list of course references
//! - [`Course`]: A course offering
//! - [`CourseRef`]: A course reference that is either a bare ID or an embedded course
//! - [`FieldUpdate`]: Per-field intent of a partial update (keep, clear, or set)

mod course;
mod student;
mod types;

pub use course::{Course, CoursePatch, NewCourse};
pub use student::{NewStudent, Student, StudentFilter, StudentPatch};
pub use types::{CourseRef, FieldUpdate};
