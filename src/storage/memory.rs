use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::EntityStore;
use crate::error::{CampusError, Result};
use crate::model::{
    Course, CoursePatch, CourseRef, NewCourse, NewStudent, Student, StudentFilter, StudentPatch,
};

#[derive(Default)]
struct Collections {
    students: Vec<Student>,
    courses: Vec<Course>,
    /// Last issued IDs. Never decremented, so deleted IDs are not reused.
    last_student_id: u64,
    last_course_id: u64,
}

/// In-process store keeping records in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| CampusError::StoreUnavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| CampusError::StoreUnavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        Ok(self
            .read()?
            .students
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>> {
        Ok(self.read()?.students.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_student(&self, mut input: NewStudent) -> Result<Student> {
        // Only IDs are kept so reads always see the current course.
        input.courses = input
            .courses
            .into_iter()
            .map(CourseRef::into_reference)
            .collect();
        let mut data = self.write()?;
        data.last_student_id += 1;
        let student = Student::new(data.last_student_id.to_string(), input);
        tracing::info!(id = %student.id, email = %student.email, "Inserting student");
        data.students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: &str, patch: StudentPatch) -> Result<Option<Student>> {
        let mut data = self.write()?;
        let Some(student) = data.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.apply(patch)?;
        tracing::info!(id = %id, "Updated student");
        Ok(Some(student.clone()))
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        let mut data = self.write()?;
        let Some(index) = data.students.iter().position(|s| s.id == id) else {
            return Ok(false);
        };
        data.students.remove(index);
        tracing::info!(id = %id, "Deleted student");
        Ok(true)
    }

    async fn push_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>> {
        let mut data = self.write()?;
        let Some(student) = data.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        student.courses.push(CourseRef::from(course_id));
        student.touch();
        Ok(Some(student.clone()))
    }

    async fn remove_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>> {
        let mut data = self.write()?;
        let Some(student) = data.students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(None);
        };
        if student.drop_course(course_id) {
            student.touch();
        }
        Ok(Some(student.clone()))
    }

    async fn pull_course_references(&self, course_id: &str) -> Result<usize> {
        let mut data = self.write()?;
        let mut touched = 0;
        for student in data.students.iter_mut() {
            if student.drop_course(course_id) {
                student.touch();
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn find_courses(&self) -> Result<Vec<Course>> {
        Ok(self.read()?.courses.clone())
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>> {
        Ok(self.read()?.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_courses_by_ids(&self, ids: &[String]) -> Result<Vec<Course>> {
        Ok(self
            .read()?
            .courses
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn insert_course(&self, input: NewCourse) -> Result<Course> {
        let mut data = self.write()?;
        data.last_course_id += 1;
        let course = Course::new(data.last_course_id.to_string(), input);
        tracing::info!(id = %course.id, code = %course.code, "Inserting course");
        data.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>> {
        let mut data = self.write()?;
        let Some(course) = data.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        course.apply(patch)?;
        tracing::info!(id = %id, "Updated course");
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: &str) -> Result<bool> {
        let mut data = self.write()?;
        let Some(index) = data.courses.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        data.courses.remove(index);
        tracing::info!(id = %id, "Deleted course");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldUpdate;
    use crate::storage::test_support::{new_course, new_student};

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let a = store
            .insert_student(new_student("A", "a@b.co", None))
            .await
            .unwrap();
        let b = store
            .insert_student(new_student("B", "b@b.co", None))
            .await
            .unwrap();
        assert!(store.delete_student(&a.id).await.unwrap());

        let c = store
            .insert_student(new_student("C", "c@b.co", None))
            .await
            .unwrap();
        assert_ne!(c.id, b.id);
        assert_eq!(c.id, "3");
    }

    #[tokio::test]
    async fn test_find_students_preserves_insertion_order() {
        let store = MemoryStore::new();
        for (name, email) in [("A", "a@b.co"), ("B", "b@b.co"), ("C", "c@b.co")] {
            store
                .insert_student(new_student(name, email, None))
                .await
                .unwrap();
        }
        let names: Vec<_> = store
            .find_students(&StudentFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::new();
        let patch = StudentPatch {
            age: FieldUpdate::Set(40),
            ..Default::default()
        };
        assert!(store.update_student("9", patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pull_course_references_touches_every_student() {
        let store = MemoryStore::new();
        let course = store
            .insert_course(new_course("Data Structures", "CS201"))
            .await
            .unwrap();
        let other = store
            .insert_course(new_course("Database Systems", "CS301"))
            .await
            .unwrap();
        for (name, email) in [("A", "a@b.co"), ("B", "b@b.co"), ("C", "c@b.co")] {
            store
                .insert_student(new_student(name, email, None))
                .await
                .unwrap();
        }
        store.push_course_reference("1", &course.id).await.unwrap();
        store.push_course_reference("1", &other.id).await.unwrap();
        store.push_course_reference("2", &course.id).await.unwrap();
        store.push_course_reference("2", &course.id).await.unwrap();

        assert_eq!(store.pull_course_references(&course.id).await.unwrap(), 2);

        let enrolled = store
            .find_students(&StudentFilter::enrolled_in(course.id.clone()))
            .await
            .unwrap();
        assert!(enrolled.is_empty());
        let first = store.find_student("1").await.unwrap().unwrap();
        assert_eq!(first.courses, vec![CourseRef::from(other.id.as_str())]);
    }

    #[tokio::test]
    async fn test_find_courses_by_ids_skips_missing() {
        let store = MemoryStore::new();
        let course = store
            .insert_course(new_course("Data Structures", "CS201"))
            .await
            .unwrap();
        let found = store
            .find_courses_by_ids(&[course.id.clone(), "404".to_string()])
            .await
            .unwrap();
        assert_eq!(found, vec![course]);
    }

    #[tokio::test]
    async fn test_email_taken_ignores_own_record() {
        let store = MemoryStore::new();
        let a = store
            .insert_student(new_student("A", "a@b.co", None))
            .await
            .unwrap();
        assert!(store.email_taken("a@b.co", None).await.unwrap());
        assert!(!store.email_taken("a@b.co", Some(&a.id)).await.unwrap());
        assert!(!store.email_taken("z@b.co", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_embedded_courses_are_stored_as_references() {
        let store = MemoryStore::new();
        let course = store
            .insert_course(new_course("Data Structures", "CS201"))
            .await
            .unwrap();
        let mut input = new_student("A", "a@b.co", None);
        input.courses = vec![CourseRef::Expanded(course.clone())];

        let student = store.insert_student(input).await.unwrap();
        assert_eq!(student.courses, vec![CourseRef::from(course.id.as_str())]);
    }
}
