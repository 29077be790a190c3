use axum::http::StatusCode;

/// Failure reported by a backing store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Error raised by the job and application registries.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Access denied")]
    Forbidden,
    #[error("You have already applied for this job")]
    Duplicate,
    #[error("This job is no longer accepting applications")]
    Inactive,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RegistryError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) | RegistryError::Duplicate | RegistryError::Inactive => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Forbidden => StatusCode::FORBIDDEN,
            RegistryError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure is the caller's to fix rather than the service's.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RegistryError::Repository(_))
    }
}
