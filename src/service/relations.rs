use std::collections::HashMap;

use super::CampusService;
use crate::error::Result;
use crate::model::{Course, CourseRef, Student, StudentFilter};

impl CampusService {
    /// Courses a student is enrolled in, in the order the student lists them.
    ///
    /// Expanded entries are returned as carried. References are resolved with
    /// one batched lookup and those pointing at deleted courses are dropped.
    pub async fn resolve_courses_for_student(&self, student: &Student) -> Result<Vec<Course>> {
        if student.courses.is_empty() {
            return Ok(Vec::new());
        }
        if student.courses.iter().all(CourseRef::is_expanded) {
            return Ok(student
                .courses
                .iter()
                .filter_map(|r| match r {
                    CourseRef::Expanded(course) => Some(course.clone()),
                    CourseRef::Reference(_) => None,
                })
                .collect());
        }

        let ids: Vec<String> = student
            .courses
            .iter()
            .filter(|r| !r.is_expanded())
            .map(|r| r.id().to_string())
            .collect();
        let found: HashMap<String, Course> = self
            .store
            .find_courses_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(student
            .courses
            .iter()
            .filter_map(|r| match r {
                CourseRef::Expanded(course) => Some(course.clone()),
                CourseRef::Reference(id) => found.get(id).cloned(),
            })
            .collect())
    }

    /// Every student whose course list refers to `course`.
    pub async fn resolve_students_for_course(&self, course: &Course) -> Result<Vec<Student>> {
        self.store
            .find_students(&StudentFilter::enrolled_in(course.id.clone()))
            .await
    }
}
