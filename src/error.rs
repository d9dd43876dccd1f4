use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{entity} with id \"{id}\" not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project not initialized. Run 'campus init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

impl CampusError {
    pub fn student_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Student",
            id: id.into(),
        }
    }

    pub fn course_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Course",
            id: id.into(),
        }
    }

    /// Machine-readable code reported in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            _ => "INTERNAL",
        }
    }
}

impl ErrorExtensions for CampusError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;
