use super::CampusService;
use crate::error::Result;
use crate::model::{Course, Student, StudentFilter};

impl CampusService {
    pub async fn get_all_students(&self) -> Result<Vec<Student>> {
        self.store.find_students(&StudentFilter::default()).await
    }

    /// Missing IDs yield `None`, never an error.
    pub async fn get_student(&self, id: &str) -> Result<Option<Student>> {
        tracing::debug!(id = %id, "Looking up student");
        self.store.find_student(id).await
    }

    pub async fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.store.find_courses().await
    }

    pub async fn get_course(&self, id: &str) -> Result<Option<Course>> {
        tracing::debug!(id = %id, "Looking up course");
        self.store.find_course(id).await
    }

    /// Students whose major equals `major` ignoring case. Not a substring match.
    pub async fn search_students_by_major(&self, major: &str) -> Result<Vec<Student>> {
        self.store
            .find_students(&StudentFilter::by_major(major))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::NewStudent;
    use crate::service::test_support::{add_course, add_student, service};

    #[tokio::test]
    async fn test_lookup_missing_is_none() {
        let service = service();
        assert!(service.get_student("1").await.unwrap().is_none());
        assert!(service.get_course("1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_in_insertion_order() {
        let service = service();
        add_course(&service, "Data Structures", "CS201").await;
        add_course(&service, "Database Systems", "CS301").await;
        let codes: Vec<_> = service
            .get_all_courses()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["CS201", "CS301"]);
    }

    #[tokio::test]
    async fn test_search_by_major_is_case_insensitive_exact() {
        let service = service();
        for (name, email, major) in [
            ("Ali", "ali@iti.edu", Some("Computer Science")),
            ("Omar", "omar@iti.edu", Some("Computer")),
            ("Fatma", "fatma@iti.edu", None),
        ] {
            service
                .add_student(NewStudent {
                    name: name.to_string(),
                    email: email.to_string(),
                    age: 20,
                    major: major.map(String::from),
                    courses: Vec::new(),
                })
                .await
                .unwrap();
        }

        let found = service
            .search_students_by_major("computer science")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ali");

        assert!(service.search_students_by_major("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_student_returns_stored_values() {
        let service = service();
        let created = add_student(&service, "A", "a@b.co").await;
        let loaded = service.get_student(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
    }
}
