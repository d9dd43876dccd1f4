use async_graphql::{ComplexObject, Context, ID, MaybeUndefined, ResultExt, SimpleObject};

use super::schema::service;
use crate::model::{self, FieldUpdate};

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Student {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub major: Option<String>,
    pub created_at: String,
    pub updated_at: String,

    #[graphql(skip)]
    pub record: model::Student,
}

#[ComplexObject]
impl Student {
    /// Courses this student is enrolled in. References to deleted courses are omitted.
    async fn courses(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Course>> {
        let courses = service(ctx)?
            .resolve_courses_for_student(&self.record)
            .await
            .extend()?;
        Ok(courses.into_iter().map(Course::from).collect())
    }
}

impl From<model::Student> for Student {
    fn from(s: model::Student) -> Self {
        Self {
            id: ID(s.id.clone()),
            name: s.name.clone(),
            email: s.email.clone(),
            age: s.age,
            major: s.major.clone(),
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
            record: s,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Course {
    pub id: ID,
    pub title: String,
    pub code: String,
    pub credits: i32,
    pub instructor: String,
    pub created_at: String,
    pub updated_at: String,

    #[graphql(skip)]
    pub record: model::Course,
}

#[ComplexObject]
impl Course {
    /// Students whose course list refers to this course.
    async fn students(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Student>> {
        let students = service(ctx)?
            .resolve_students_for_course(&self.record)
            .await
            .extend()?;
        Ok(students.into_iter().map(Student::from).collect())
    }
}

impl From<model::Course> for Course {
    fn from(c: model::Course) -> Self {
        Self {
            id: ID(c.id.clone()),
            title: c.title.clone(),
            code: c.code.clone(),
            credits: c.credits,
            instructor: c.instructor.clone(),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            record: c,
        }
    }
}

/// An omitted argument keeps the field, an explicit `null` clears it.
pub(super) fn field_update<T>(value: MaybeUndefined<T>) -> FieldUpdate<T> {
    match value {
        MaybeUndefined::Undefined => FieldUpdate::Keep,
        MaybeUndefined::Null => FieldUpdate::Clear,
        MaybeUndefined::Value(value) => FieldUpdate::Set(value),
    }
}
