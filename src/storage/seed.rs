use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::EntityStore;
use crate::error::Result;
use crate::model::{CourseRef, NewCourse, NewStudent};

/// Demo fixture: two courses, two students and their enrollments.
pub const DEMO_SEED: &str = r#"
courses:
  - id: "1"
    title: Data Structures
    code: CS201
    credits: 3
    instructor: Dr. Mohamed
  - id: "2"
    title: Database Systems
    code: CS301
    credits: 4
    instructor: Dr. Sarah
students:
  - name: Ali Saeed
    email: ahmed@iti.edu
    age: 22
    major: Computer Science
    courses: ["1", "2"]
  - name: Fatma Ali
    email: fatma@iti.edu
    age: 21
    major: Information Systems
    courses: ["2"]
"#;

/// Records to load into a store at startup.
///
/// Course IDs in the fixture are local to the file; students refer to them (or
/// embed whole courses) and are rewired to the IDs the store generates.
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub courses: Vec<SeedCourse>,

    #[serde(default)]
    pub students: Vec<NewStudent>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCourse {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub code: String,
    pub credits: i32,
    pub instructor: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub courses: usize,
    pub students: usize,
}

impl SeedData {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn demo() -> Result<Self> {
        Self::from_yaml(DEMO_SEED)
    }

    /// Insert every record, courses first.
    pub async fn apply(self, store: &dyn EntityStore) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();
        let mut id_map: HashMap<String, String> = HashMap::new();

        for seed in self.courses {
            let input = NewCourse {
                title: seed.title,
                code: seed.code,
                credits: seed.credits,
                instructor: seed.instructor,
            };
            input.validate()?;
            let course = store.insert_course(input).await?;
            if let Some(seed_id) = seed.id {
                id_map.insert(seed_id, course.id.clone());
            }
            summary.courses += 1;
        }

        for mut input in self.students {
            input.validate()?;
            input.courses = input
                .courses
                .into_iter()
                .filter_map(|reference| rewire(reference, &id_map))
                .collect();
            store.insert_student(input).await?;
            summary.students += 1;
        }

        tracing::info!(
            courses = summary.courses,
            students = summary.students,
            "Seeded store"
        );
        Ok(summary)
    }
}

fn rewire(reference: CourseRef, id_map: &HashMap<String, String>) -> Option<CourseRef> {
    match id_map.get(reference.id()) {
        Some(new_id) => Some(CourseRef::Reference(new_id.clone())),
        None => {
            tracing::warn!(course = %reference.id(), "Seed references an unknown course, skipping");
            None
        }
    }
}
