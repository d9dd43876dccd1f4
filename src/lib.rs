//! # Campus - students, courses and enrollments over GraphQL
//!
//! Campus exposes CRUD operations over two related entities, students and
//! courses, through a GraphQL API. Records live either in memory or in a
//! directory of JSON documents.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve an in-memory store preloaded with demo data
//! campus serve --demo
//!
//! # Create a persistent project and query it from the CLI
//! campus init
//! campus mutate 'addCourse(title: "Compilers", code: "CS401", credits: 3, instructor: "Dr. Sarah") { id }'
//! campus query '{ getAllCourses { title students { name } } }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`logging`]: Tracing subscriber setup
//! - [`model`]: Data models (Student, Course, CourseRef, FieldUpdate)
//! - [`service`]: Query and mutation handlers, relationship resolution
//! - [`storage`]: Entity store trait with memory and document backends
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `campus.yml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `CampusError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides an async-graphql schema served over axum.
pub mod graphql;

/// Data models for students and courses.
pub mod model;

/// Query and mutation handlers.
pub mod service;

/// Entity storage backends.
pub mod storage;

/// Input validation utilities.
///
/// Validates emails, required text fields and IDs.
pub mod validation;

/// Logging setup.
///
/// Compact stderr output plus an optional daily-rotated JSON log file.
pub mod logging;
