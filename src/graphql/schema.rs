use async_graphql::{Context, EmptySubscription, ID, MaybeUndefined, Object, ResultExt, Schema};

use crate::model::{CoursePatch, NewCourse, NewStudent, StudentPatch};
use crate::service::CampusService;

use super::types::*;

pub type CampusSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: CampusService) -> CampusSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

pub(super) fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a CampusService> {
    ctx.data::<CampusService>()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All students in storage order
    async fn get_all_students(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Student>> {
        let students = service(ctx)?.get_all_students().await.extend()?;
        Ok(students.into_iter().map(Student::from).collect())
    }

    /// A single student, or null when the ID is unknown
    async fn get_student(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<Student>> {
        let student = service(ctx)?.get_student(&id).await.extend()?;
        Ok(student.map(Student::from))
    }

    /// All courses in storage order
    async fn get_all_courses(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Course>> {
        let courses = service(ctx)?.get_all_courses().await.extend()?;
        Ok(courses.into_iter().map(Course::from).collect())
    }

    /// A single course, or null when the ID is unknown
    async fn get_course(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Course>> {
        let course = service(ctx)?.get_course(&id).await.extend()?;
        Ok(course.map(Course::from))
    }

    /// Students whose major matches exactly, ignoring case
    async fn search_students_by_major(
        &self,
        ctx: &Context<'_>,
        major: String,
    ) -> async_graphql::Result<Vec<Student>> {
        let students = service(ctx)?
            .search_students_by_major(&major)
            .await
            .extend()?;
        Ok(students.into_iter().map(Student::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a student with no enrollments
    async fn add_student(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        age: i32,
        major: Option<String>,
    ) -> async_graphql::Result<Student> {
        let input = NewStudent {
            name,
            email,
            age,
            major,
            courses: Vec::new(),
        };
        let student = service(ctx)?.add_student(input).await.extend()?;
        Ok(student.into())
    }

    /// Change only the supplied fields of a student
    async fn update_student(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: MaybeUndefined<String>,
        email: MaybeUndefined<String>,
        age: MaybeUndefined<i32>,
        major: MaybeUndefined<String>,
    ) -> async_graphql::Result<Student> {
        let patch = StudentPatch {
            name: field_update(name),
            email: field_update(email),
            age: field_update(age),
            major: field_update(major),
        };
        let student = service(ctx)?.update_student(&id, patch).await.extend()?;
        Ok(student.into())
    }

    /// Delete a student. Returns false if it did not exist
    async fn delete_student(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        service(ctx)?.delete_student(&id).await.extend()
    }

    /// Create a course
    async fn add_course(
        &self,
        ctx: &Context<'_>,
        title: String,
        code: String,
        credits: i32,
        instructor: String,
    ) -> async_graphql::Result<Course> {
        let input = NewCourse {
            title,
            code,
            credits,
            instructor,
        };
        let course = service(ctx)?.add_course(input).await.extend()?;
        Ok(course.into())
    }

    /// Change only the supplied fields of a course
    async fn update_course(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: MaybeUndefined<String>,
        code: MaybeUndefined<String>,
        credits: MaybeUndefined<i32>,
        instructor: MaybeUndefined<String>,
    ) -> async_graphql::Result<Course> {
        let patch = CoursePatch {
            title: field_update(title),
            code: field_update(code),
            credits: field_update(credits),
            instructor: field_update(instructor),
        };
        let course = service(ctx)?.update_course(&id, patch).await.extend()?;
        Ok(course.into())
    }

    /// Delete a course and remove it from every student's enrollments
    async fn delete_course(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        service(ctx)?.delete_course(&id).await.extend()
    }

    /// Enroll a student in a course
    async fn enroll_student(
        &self,
        ctx: &Context<'_>,
        student_id: ID,
        course_id: ID,
    ) -> async_graphql::Result<Student> {
        let student = service(ctx)?
            .enroll_student(&student_id, &course_id)
            .await
            .extend()?;
        Ok(student.into())
    }

    /// Remove a course from a student's enrollments
    async fn unenroll_student(
        &self,
        ctx: &Context<'_>,
        student_id: ID,
        course_id: ID,
    ) -> async_graphql::Result<Student> {
        let student = service(ctx)?
            .unenroll_student(&student_id, &course_id)
            .await
            .extend()?;
        Ok(student.into())
    }
}
