use serde::{Deserialize, Serialize};

use super::course::Course;
use crate::error::{CampusError, Result};

/// A student's reference to a course.
///
/// Stored documents hold bare IDs; seed fixtures and joined reads may carry the
/// whole course instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawCourseRef")]
pub enum CourseRef {
    Reference(String),
    Expanded(Course),
}

impl CourseRef {
    pub fn id(&self) -> &str {
        match self {
            CourseRef::Reference(id) => id,
            CourseRef::Expanded(course) => &course.id,
        }
    }

    pub fn is_expanded(&self) -> bool {
        matches!(self, CourseRef::Expanded(_))
    }

    /// Drop any embedded course, keeping only its ID.
    pub fn into_reference(self) -> Self {
        match self {
            CourseRef::Expanded(course) => CourseRef::Reference(course.id),
            reference => reference,
        }
    }
}

impl From<String> for CourseRef {
    fn from(id: String) -> Self {
        CourseRef::Reference(id)
    }
}

impl From<&str> for CourseRef {
    fn from(id: &str) -> Self {
        CourseRef::Reference(id.to_string())
    }
}

impl From<Course> for CourseRef {
    fn from(course: Course) -> Self {
        CourseRef::Expanded(course)
    }
}

/// Accepted input shapes: `"id"`, a full course object, or `{ id: "..." }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCourseRef {
    Id(String),
    Expanded(Course),
    IdOnly { id: String },
}

impl From<RawCourseRef> for CourseRef {
    fn from(raw: RawCourseRef) -> Self {
        match raw {
            RawCourseRef::Id(id) | RawCourseRef::IdOnly { id } => CourseRef::Reference(id),
            RawCourseRef::Expanded(course) => CourseRef::Expanded(course),
        }
    }
}

/// What a partial update does to one field.
///
/// `Keep` is the field being absent from the request, `Clear` an explicit null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Rejects `Clear` for a field that must always hold a value.
    pub fn require(&self, field: &'static str) -> Result<()> {
        match self {
            FieldUpdate::Clear => Err(CampusError::MissingField(field)),
            _ => Ok(()),
        }
    }

    pub fn apply_required(self, field: &'static str, target: &mut T) -> Result<()> {
        match self {
            FieldUpdate::Keep => Ok(()),
            FieldUpdate::Clear => Err(CampusError::MissingField(field)),
            FieldUpdate::Set(value) => {
                *target = value;
                Ok(())
            }
        }
    }

    pub fn apply_optional(self, target: &mut Option<T>) {
        match self {
            FieldUpdate::Keep => {}
            FieldUpdate::Clear => *target = None,
            FieldUpdate::Set(value) => *target = Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_ref_deserializes_bare_id() {
        let r: CourseRef = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(r, CourseRef::Reference("42".to_string()));
    }

    #[test]
    fn test_course_ref_deserializes_id_only_object_as_reference() {
        let r: CourseRef = serde_json::from_str(r#"{ "id": "7" }"#).unwrap();
        assert_eq!(r, CourseRef::Reference("7".to_string()));
    }

    #[test]
    fn test_course_ref_deserializes_embedded_course() {
        let r: CourseRef = serde_json::from_str(
            r#"{ "id": "1", "title": "Data Structures", "code": "CS201", "credits": 3, "instructor": "Dr. Mohamed" }"#,
        )
        .unwrap();
        assert!(r.is_expanded());
        assert_eq!(r.id(), "1");
        assert_eq!(r.into_reference(), CourseRef::Reference("1".to_string()));
    }

    #[test]
    fn test_course_ref_serializes_reference_as_string() {
        let json = serde_json::to_string(&CourseRef::from("3")).unwrap();
        assert_eq!(json, "\"3\"");
    }

    #[test]
    fn test_field_update_optional() {
        let mut major = Some("Physics".to_string());
        FieldUpdate::Keep.apply_optional(&mut major);
        assert_eq!(major.as_deref(), Some("Physics"));
        FieldUpdate::Set("Math".to_string()).apply_optional(&mut major);
        assert_eq!(major.as_deref(), Some("Math"));
        FieldUpdate::Clear.apply_optional(&mut major);
        assert_eq!(major, None);
    }

    #[test]
    fn test_field_update_required_rejects_clear() {
        let mut name = "A".to_string();
        let err = FieldUpdate::<String>::Clear
            .apply_required("name", &mut name)
            .unwrap_err();
        assert!(matches!(err, CampusError::MissingField("name")));
        assert_eq!(name, "A");
    }
}
