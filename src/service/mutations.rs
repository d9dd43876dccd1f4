use super::CampusService;
use crate::error::{CampusError, Result};
use crate::model::{Course, CoursePatch, NewCourse, NewStudent, Student, StudentPatch};

impl CampusService {
    pub async fn add_student(&self, input: NewStudent) -> Result<Student> {
        input.validate()?;
        self.ensure_email_available(&input.email, None).await?;
        self.store.insert_student(input).await
    }

    /// Applies only the fields present in `patch`. Unknown IDs fail with `NotFound`.
    pub async fn update_student(&self, id: &str, patch: StudentPatch) -> Result<Student> {
        if self.store.find_student(id).await?.is_none() {
            return Err(CampusError::student_not_found(id));
        }
        patch.validate()?;
        if let Some(email) = patch.email.as_set() {
            self.ensure_email_available(email, Some(id)).await?;
        }
        self.store
            .update_student(id, patch)
            .await?
            .ok_or_else(|| CampusError::student_not_found(id))
    }

    pub async fn delete_student(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_student(id).await?;
        if !deleted {
            tracing::debug!(id = %id, "Student to delete does not exist");
        }
        Ok(deleted)
    }

    pub async fn add_course(&self, input: NewCourse) -> Result<Course> {
        input.validate()?;
        self.store.insert_course(input).await
    }

    /// Applies only the fields present in `patch`. Unknown IDs fail with `NotFound`.
    pub async fn update_course(&self, id: &str, patch: CoursePatch) -> Result<Course> {
        if self.store.find_course(id).await?.is_none() {
            return Err(CampusError::course_not_found(id));
        }
        patch.validate()?;
        self.store
            .update_course(id, patch)
            .await?
            .ok_or_else(|| CampusError::course_not_found(id))
    }

    /// Deletes the course, then strips its ID from every student.
    ///
    /// The two steps are separate store calls; a failure in between leaves
    /// dangling references, which reads drop silently.
    pub async fn delete_course(&self, id: &str) -> Result<bool> {
        if !self.store.delete_course(id).await? {
            return Ok(false);
        }
        let touched = self.store.pull_course_references(id).await?;
        tracing::info!(id = %id, students = touched, "Removed course from enrollments");
        Ok(true)
    }

    pub async fn enroll_student(&self, student_id: &str, course_id: &str) -> Result<Student> {
        if self.store.find_course(course_id).await?.is_none() {
            return Err(CampusError::course_not_found(course_id));
        }
        let student = self
            .store
            .push_course_reference(student_id, course_id)
            .await?
            .ok_or_else(|| CampusError::student_not_found(student_id))?;
        tracing::info!(student = %student_id, course = %course_id, "Enrolled student");
        Ok(student)
    }

    pub async fn unenroll_student(&self, student_id: &str, course_id: &str) -> Result<Student> {
        let student = self
            .store
            .remove_course_reference(student_id, course_id)
            .await?
            .ok_or_else(|| CampusError::student_not_found(student_id))?;
        tracing::info!(student = %student_id, course = %course_id, "Unenrolled student");
        Ok(student)
    }

    async fn ensure_email_available(&self, email: &str, except_id: Option<&str>) -> Result<()> {
        if self.store.email_taken(email, except_id).await? {
            return Err(CampusError::Validation(format!(
                "Email already in use: {}",
                email
            )));
        }
        Ok(())
    }
}
