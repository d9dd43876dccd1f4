use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use super::EntityStore;
use crate::error::{CampusError, Result};
use crate::model::{
    Course, CoursePatch, CourseRef, NewCourse, NewStudent, Student, StudentFilter, StudentPatch,
};
use crate::validation;

const ID_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];
const ID_LENGTH: usize = 24;
const DOCUMENT_EXTENSION: &str = "json";

/// Persistent store keeping one JSON document per record.
///
/// ```text
/// <root>/
///   students/<id>.json
///   courses/<id>.json
/// ```
///
/// Students only ever hold bare course IDs on disk.
pub struct DocumentStore {
    root: PathBuf,
    students_path: PathBuf,
    courses_path: PathBuf,
}

impl DocumentStore {
    /// Open (and create if needed) a document store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let students_path = root.join("students");
        let courses_path = root.join("courses");

        for dir in [&students_path, &courses_path] {
            std::fs::create_dir_all(dir).map_err(|e| {
                CampusError::StoreUnavailable(format!(
                    "cannot create data directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        tracing::debug!(root = %root.display(), "Opened document store");
        Ok(Self {
            root,
            students_path,
            courses_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn generate_id(&self, dir: &Path) -> String {
        loop {
            let id = nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LENGTH);
            if !document_path(dir, &id).is_some_and(|p| p.exists()) {
                return id;
            }
        }
    }

    fn load_student(&self, id: &str) -> Result<Option<Student>> {
        match document_path(&self.students_path, id) {
            Some(path) => read_document(&path),
            None => Ok(None),
        }
    }

    fn save_student(&self, student: &Student) -> Result<()> {
        let path = document_path(&self.students_path, &student.id)
            .ok_or_else(|| CampusError::Validation(format!("Invalid student id: {}", student.id)))?;
        let mut stored = student.clone();
        stored.courses = stored
            .courses
            .into_iter()
            .map(CourseRef::into_reference)
            .collect();
        write_document(&path, &stored)
    }

    fn load_course(&self, id: &str) -> Result<Option<Course>> {
        match document_path(&self.courses_path, id) {
            Some(path) => read_document(&path),
            None => Ok(None),
        }
    }

    fn save_course(&self, course: &Course) -> Result<()> {
        let path = document_path(&self.courses_path, &course.id)
            .ok_or_else(|| CampusError::Validation(format!("Invalid course id: {}", course.id)))?;
        write_document(&path, course)
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        let mut students: Vec<Student> = list_documents(&self.students_path)?;
        students.sort_by_key(|s| s.created_at);
        Ok(students)
    }

    fn list_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = list_documents(&self.courses_path)?;
        courses.sort_by_key(|c| c.created_at);
        Ok(courses)
    }

    fn modify_student<F>(&self, id: &str, change: F) -> Result<Option<Student>>
    where
        F: FnOnce(&mut Student) -> Result<()>,
    {
        let Some(mut student) = self.load_student(id)? else {
            return Ok(None);
        };
        change(&mut student)?;
        self.save_student(&student)?;
        Ok(Some(student))
    }
}

/// Path of a document, or `None` when the ID could escape the collection directory.
fn document_path(dir: &Path, id: &str) -> Option<PathBuf> {
    validation::validate_id(id).ok()?;
    Some(dir.join(format!("{}.{}", id, DOCUMENT_EXTENSION)))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(unavailable)?;
    Ok(Some(serde_json::from_str(&content)?))
}

fn remove_document(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(unavailable(e)),
    }
}

fn list_documents<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unavailable)? {
        let path = entry.map_err(unavailable)?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != DOCUMENT_EXTENSION) {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse document"
                ),
            },
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read document"
            ),
        }
    }
    Ok(documents)
}

/// Write through a temp file in the same directory, then rename over the target.
fn write_document<T: Serialize>(target_path: &Path, document: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    let target_dir = target_path
        .parent()
        .ok_or_else(|| CampusError::StoreUnavailable("document path has no parent".to_string()))?;

    let mut temp_file = NamedTempFile::new_in(target_dir).map_err(unavailable)?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(unavailable)?;
    temp_file.as_file().sync_all().map_err(unavailable)?;
    temp_file
        .persist(target_path)
        .map_err(|e| unavailable(e.error))?;
    Ok(())
}

fn unavailable(e: std::io::Error) -> CampusError {
    CampusError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl EntityStore for DocumentStore {
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let mut students = self.list_students()?;
        students.retain(|s| filter.matches(s));
        Ok(students)
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>> {
        self.load_student(id)
    }

    async fn insert_student(&self, input: NewStudent) -> Result<Student> {
        let id = self.generate_id(&self.students_path);
        let student = Student::new(id, input);
        tracing::info!(id = %student.id, email = %student.email, "Inserting student");
        self.save_student(&student)?;
        // Reload so the caller sees the normalized course references.
        self.load_student(&student.id)?
            .ok_or_else(|| CampusError::StoreUnavailable("inserted student vanished".to_string()))
    }

    async fn update_student(&self, id: &str, patch: StudentPatch) -> Result<Option<Student>> {
        let updated = self.modify_student(id, |s| s.apply(patch))?;
        if updated.is_some() {
            tracing::info!(id = %id, "Updated student");
        }
        Ok(updated)
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        let Some(path) = document_path(&self.students_path, id) else {
            return Ok(false);
        };
        let removed = remove_document(&path)?;
        if removed {
            tracing::info!(id = %id, "Deleted student");
        }
        Ok(removed)
    }

    async fn push_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>> {
        self.modify_student(student_id, |s| {
            s.courses.push(CourseRef::from(course_id));
            s.touch();
            Ok(())
        })
    }

    async fn remove_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>> {
        self.modify_student(student_id, |s| {
            if s.drop_course(course_id) {
                s.touch();
            }
            Ok(())
        })
    }

    async fn pull_course_references(&self, course_id: &str) -> Result<usize> {
        let mut touched = 0;
        for mut student in self.list_students()? {
            if student.drop_course(course_id) {
                student.touch();
                self.save_student(&student)?;
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn find_courses(&self) -> Result<Vec<Course>> {
        self.list_courses()
    }

    async fn find_course(&self, id: &str) -> Result<Option<Course>> {
        self.load_course(id)
    }

    async fn find_courses_by_ids(&self, ids: &[String]) -> Result<Vec<Course>> {
        let mut courses = Vec::new();
        for id in ids {
            if courses.iter().any(|c: &Course| &c.id == id) {
                continue;
            }
            if let Some(course) = self.load_course(id)? {
                courses.push(course);
            }
        }
        courses.sort_by_key(|c| c.created_at);
        Ok(courses)
    }

    async fn insert_course(&self, input: NewCourse) -> Result<Course> {
        let id = self.generate_id(&self.courses_path);
        let course = Course::new(id, input);
        tracing::info!(id = %course.id, code = %course.code, "Inserting course");
        self.save_course(&course)?;
        Ok(course)
    }

    async fn update_course(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>> {
        let Some(mut course) = self.load_course(id)? else {
            return Ok(None);
        };
        course.apply(patch)?;
        self.save_course(&course)?;
        tracing::info!(id = %id, "Updated course");
        Ok(Some(course))
    }

    async fn delete_course(&self, id: &str) -> Result<bool> {
        let Some(path) = document_path(&self.courses_path, id) else {
            return Ok(false);
        };
        let removed = remove_document(&path)?;
        if removed {
            tracing::info!(id = %id, "Deleted course");
        }
        Ok(removed)
    }
}
