//! Query and mutation handlers over an [`EntityStore`].
//!
//! [`CampusService`] is what the GraphQL resolvers call. It owns no records; it
//! validates input, issues store calls and stitches students and courses
//! together.
//!
//! - [`queries`]: read-only lookups
//! - [`mutations`]: create, partial update and delete (with the course cascade)
//! - [`relations`]: resolving `Student.courses` and `Course.students`

mod mutations;
mod queries;
mod relations;

use std::sync::Arc;

use crate::storage::EntityStore;

#[derive(Clone)]
pub struct CampusService {
    store: Arc<dyn EntityStore>,
}

impl CampusService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }
}
