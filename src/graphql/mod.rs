//! GraphQL schema, resolvers and HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! campus serve --port 5000 --demo
//!
//! # Execute a query from CLI
//! campus query '{ getAllStudents { name courses { title } } }'
//!
//! # Execute a mutation from CLI
//! campus mutate 'addCourse(title: "Compilers", code: "CS401", credits: 3, instructor: "Dr. Sarah") { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `getAllStudents`, `getStudent`, `getAllCourses`, `getCourse`,
//!   `searchStudentsByMajor`
//! - **Mutations**: `addStudent`, `updateStudent`, `deleteStudent`, `addCourse`,
//!   `updateCourse`, `deleteCourse`, `enrollStudent`, `unenrollStudent`
//!
//! Failed operations carry an `extensions.code` of `VALIDATION`, `MISSING_FIELD`,
//! `NOT_FOUND`, `STORE_UNAVAILABLE` or `INTERNAL`.

mod schema;
mod server;
mod types;

pub use schema::{CampusSchema, MutationRoot, QueryRoot, build_schema};
pub use server::{GRAPHQL_PATH, create_router, run_server};
pub use types::{Course, Student};
