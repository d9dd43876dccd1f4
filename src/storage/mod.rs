//! Storage layer for students and courses.
//!
//! Every backend implements [`EntityStore`], an async CRUD contract shared as
//! `Arc<dyn EntityStore>` by the service and the GraphQL schema.
//!
//! ## Components
//!
//! - [`MemoryStore`]: ordered in-process collections, lost on exit
//! - [`DocumentStore`]: one JSON document per record under a data directory
//! - [`SeedData`]: YAML fixtures loaded into any store at startup

mod document;
mod memory;
mod seed;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{CampusConfig, StoreBackend};
use crate::error::Result;
use crate::model::{Course, CoursePatch, NewCourse, NewStudent, Student, StudentFilter, StudentPatch};

pub use document::DocumentStore;
pub use memory::MemoryStore;
pub use seed::{DEMO_SEED, SeedData, SeedSummary};

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Scan students in storage order, keeping those matching `filter`.
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>>;

    async fn find_student(&self, id: &str) -> Result<Option<Student>>;

    /// Insert a student under a freshly generated ID.
    async fn insert_student(&self, input: NewStudent) -> Result<Student>;

    async fn update_student(&self, id: &str, patch: StudentPatch) -> Result<Option<Student>>;

    async fn delete_student(&self, id: &str) -> Result<bool>;

    /// Append a course reference to a student. Duplicates are allowed.
    async fn push_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>>;

    /// Remove every reference to a course from one student.
    async fn remove_course_reference(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Student>>;

    /// Remove every reference to a course from all students, returning how many changed.
    async fn pull_course_references(&self, course_id: &str) -> Result<usize>;

    async fn find_courses(&self) -> Result<Vec<Course>>;

    async fn find_course(&self, id: &str) -> Result<Option<Course>>;

    /// Batched lookup. IDs with no matching course are left out of the result.
    async fn find_courses_by_ids(&self, ids: &[String]) -> Result<Vec<Course>>;

    /// Insert a course under a freshly generated ID.
    async fn insert_course(&self, input: NewCourse) -> Result<Course>;

    async fn update_course(&self, id: &str, patch: CoursePatch) -> Result<Option<Course>>;

    async fn delete_course(&self, id: &str) -> Result<bool>;

    /// Whether any student other than `except_id` already uses `email`.
    async fn email_taken(&self, email: &str, except_id: Option<&str>) -> Result<bool> {
        let students = self.find_students(&StudentFilter::default()).await?;
        Ok(students
            .iter()
            .any(|s| s.email == email && Some(s.id.as_str()) != except_id))
    }
}

/// Open the backend selected by the configuration.
pub fn open(config: &CampusConfig, project_root: &Path) -> Result<Arc<dyn EntityStore>> {
    match config.store.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Document => Ok(Arc::new(DocumentStore::open(
            config.data_path(project_root),
        )?)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_document_backend_under_project_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = CampusConfig::default();
        config.store.backend = StoreBackend::Document;

        let store = open(&config, temp_dir.path()).unwrap();
        store
            .insert_course(test_support::new_course("Data Structures", "CS201"))
            .await
            .unwrap();
        assert!(temp_dir.path().join(".campus").join("courses").is_dir());
    }

    #[tokio::test]
    async fn test_open_memory_backend_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&CampusConfig::default(), temp_dir.path()).unwrap();
        assert!(store.find_courses().await.unwrap().is_empty());
        assert!(!temp_dir.path().join(".campus").exists());
    }
}
