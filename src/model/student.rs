use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{CourseRef, FieldUpdate};
use crate::error::Result;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,

    #[serde(default)]
    pub courses: Vec<CourseRef>,

    #[serde(default)]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn new(id: String, input: NewStudent) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
            major: input.major,
            courses: input.courses,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: StudentPatch) -> Result<()> {
        patch.name.apply_required("name", &mut self.name)?;
        patch.email.apply_required("email", &mut self.email)?;
        patch.age.apply_required("age", &mut self.age)?;
        patch.major.apply_optional(&mut self.major);
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id() == course_id)
    }

    /// Case-insensitive exact comparison; a student without a major never matches.
    pub fn has_major(&self, major: &str) -> bool {
        match self.major.as_deref() {
            Some(own) if !own.is_empty() => own.to_lowercase() == major.to_lowercase(),
            _ => false,
        }
    }

    /// Removes every reference to `course_id`, returning whether any was present.
    pub fn drop_course(&mut self, course_id: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| c.id() != course_id);
        before != self.courses.len()
    }
}

/// Attributes of a student about to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i32,

    #[serde(default)]
    pub major: Option<String>,

    #[serde(default)]
    pub courses: Vec<CourseRef>,
}

impl NewStudent {
    pub fn validate(&self) -> Result<()> {
        validation::validate_required("name", &self.name)?;
        validation::validate_email(&self.email)?;
        validation::validate_non_negative("age", self.age)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub name: FieldUpdate<String>,
    pub email: FieldUpdate<String>,
    pub age: FieldUpdate<i32>,
    pub major: FieldUpdate<String>,
}

impl StudentPatch {
    pub fn validate(&self) -> Result<()> {
        self.name.require("name")?;
        self.email.require("email")?;
        self.age.require("age")?;

        if let Some(name) = self.name.as_set() {
            validation::validate_required("name", name)?;
        }
        if let Some(email) = self.email.as_set() {
            validation::validate_email(email)?;
        }
        if let Some(age) = self.age.as_set() {
            validation::validate_non_negative("age", *age)?;
        }
        Ok(())
    }
}

/// Filter applied by a student scan. Empty filter matches everyone.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub major: Option<String>,
    pub enrolled_in: Option<String>,
}

impl StudentFilter {
    pub fn by_major(major: impl Into<String>) -> Self {
        Self {
            major: Some(major.into()),
            ..Default::default()
        }
    }

    pub fn enrolled_in(course_id: impl Into<String>) -> Self {
        Self {
            enrolled_in: Some(course_id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        let major_ok = self
            .major
            .as_deref()
            .is_none_or(|major| student.has_major(major));
        let course_ok = self
            .enrolled_in
            .as_deref()
            .is_none_or(|course_id| student.is_enrolled_in(course_id));
        major_ok && course_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampusError;

    fn student(major: Option<&str>) -> Student {
        Student::new(
            "1".to_string(),
            NewStudent {
                name: "A".to_string(),
                email: "a@b.co".to_string(),
                age: 30,
                major: major.map(String::from),
                courses: vec!["1".into(), "2".into(), "1".into()],
            },
        )
    }

    #[test]
    fn test_partial_update_keeps_absent_fields() {
        let mut s = student(None);
        s.apply(StudentPatch {
            age: FieldUpdate::Set(31),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.name, "A");
        assert_eq!(s.age, 31);
    }

    #[test]
    fn test_explicit_null_clears_major() {
        let mut s = student(Some("Physics"));
        s.apply(StudentPatch {
            major: FieldUpdate::Clear,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(s.major, None);
    }

    #[test]
    fn test_has_major_is_case_insensitive_exact() {
        let s = student(Some("Computer Science"));
        assert!(s.has_major("computer science"));
        assert!(s.has_major("COMPUTER SCIENCE"));
        assert!(!s.has_major("computer"));
        assert!(!student(Some("Computer")).has_major("computer science"));
        assert!(!student(None).has_major(""));
        assert!(!student(Some("")).has_major(""));
    }

    #[test]
    fn test_drop_course_removes_duplicates() {
        let mut s = student(None);
        assert!(s.drop_course("1"));
        assert_eq!(s.courses, vec![CourseRef::from("2")]);
        assert!(!s.drop_course("1"));
    }

    #[test]
    fn test_filter_combines_conditions() {
        let s = student(Some("Math"));
        assert!(StudentFilter::default().matches(&s));
        assert!(StudentFilter::by_major("math").matches(&s));
        assert!(StudentFilter::enrolled_in("2").matches(&s));
        assert!(!StudentFilter::enrolled_in("9").matches(&s));
    }

    #[test]
    fn test_patch_validation() {
        let bad_email = StudentPatch {
            email: FieldUpdate::Set("a@b".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_email.validate(),
            Err(CampusError::Validation(_))
        ));

        let cleared_name = StudentPatch {
            name: FieldUpdate::Clear,
            ..Default::default()
        };
        assert!(matches!(
            cleared_name.validate(),
            Err(CampusError::MissingField("name"))
        ));
    }
}
