use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::FieldUpdate;
use crate::error::Result;
use crate::validation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub code: String,
    pub credits: i32,
    pub instructor: String,

    #[serde(default)]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(id: String, input: NewCourse) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: input.title,
            code: input.code,
            credits: input.credits,
            instructor: input.instructor,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CoursePatch) -> Result<()> {
        patch.title.apply_required("title", &mut self.title)?;
        patch.code.apply_required("code", &mut self.code)?;
        patch.credits.apply_required("credits", &mut self.credits)?;
        patch
            .instructor
            .apply_required("instructor", &mut self.instructor)?;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Attributes of a course about to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub code: String,
    pub credits: i32,
    pub instructor: String,
}

impl NewCourse {
    pub fn validate(&self) -> Result<()> {
        validation::validate_required("title", &self.title)?;
        validation::validate_required("code", &self.code)?;
        validation::validate_required("instructor", &self.instructor)?;
        validation::validate_non_negative("credits", self.credits)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: FieldUpdate<String>,
    pub code: FieldUpdate<String>,
    pub credits: FieldUpdate<i32>,
    pub instructor: FieldUpdate<String>,
}

impl CoursePatch {
    pub fn validate(&self) -> Result<()> {
        self.title.require("title")?;
        self.code.require("code")?;
        self.credits.require("credits")?;
        self.instructor.require("instructor")?;

        if let Some(title) = self.title.as_set() {
            validation::validate_required("title", title)?;
        }
        if let Some(code) = self.code.as_set() {
            validation::validate_required("code", code)?;
        }
        if let Some(instructor) = self.instructor.as_set() {
            validation::validate_required("instructor", instructor)?;
        }
        if let Some(credits) = self.credits.as_set() {
            validation::validate_non_negative("credits", *credits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampusError;

    fn databases() -> NewCourse {
        NewCourse {
            title: "Database Systems".to_string(),
            code: "CS301".to_string(),
            credits: 4,
            instructor: "Dr. Sarah".to_string(),
        }
    }

    #[test]
    fn test_new_course_validation() {
        assert!(databases().validate().is_ok());

        let mut missing_code = databases();
        missing_code.code = String::new();
        assert!(matches!(
            missing_code.validate(),
            Err(CampusError::MissingField("code"))
        ));
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut course = Course::new("1".to_string(), databases());
        let before = course.updated_at;
        course
            .apply(CoursePatch {
                credits: FieldUpdate::Set(3),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(course.credits, 3);
        assert_eq!(course.title, "Database Systems");
        assert_eq!(course.instructor, "Dr. Sarah");
        assert!(course.updated_at >= before);
    }

    #[test]
    fn test_patch_rejects_clearing_instructor() {
        let patch = CoursePatch {
            instructor: FieldUpdate::Clear,
            ..Default::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(CampusError::MissingField("instructor"))
        ));
    }
}
