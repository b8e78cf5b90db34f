use thiserror::Error;

/// Errors raised by the task store, validation and seed loading.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Malformed, missing or mistyped input.
    #[error("{message}")]
    Validation { message: String },

    /// Well-formed id that names no stored task.
    #[error("Task with id '{id}' not found.")]
    NotFound { id: u64 },

    #[error("Seed data error: {0}")]
    Seed(String),

    #[error("no task ids left to assign")]
    IdsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(id: u64) -> Self {
        Self::NotFound { id }
    }

    /// Error kind reported in the `error` field of JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::NotFound { .. } => "NotFoundError",
            Self::Seed(_) | Self::IdsExhausted | Self::Io(_) | Self::Json(_) => "Unknown",
        }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Seed(_) | Self::IdsExhausted | Self::Io(_) | Self::Json(_) => 500,
        }
    }

    /// Whether the message may be shown to API clients verbatim.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_id() {
        let err = TaskError::not_found(42);
        assert_eq!(err.to_string(), "Task with id '42' not found.");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.kind(), "NotFoundError");
    }

    #[test]
    fn validation_is_a_client_error() {
        let err = TaskError::validation("title is a required field");
        assert_eq!(err.to_string(), "title is a required field");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());
    }

    #[test]
    fn seed_errors_are_internal() {
        let err = TaskError::Seed("duplicate id 3".into());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.kind(), "Unknown");
        assert!(!err.is_client_error());
    }
}
