use thiserror::Error;

/// Coarse classification of a [`CoreError`], stable across storage backends.
///
/// Callers that translate errors into a transport (HTTP status, exit code)
/// should match on this rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidInput,
    /// Plan or usage limits. Nothing in the core raises it today.
    Conflict,
    Internal,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Store-level lookup miss. The engine rewraps it before returning.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store-level ownership mismatch. The engine rewraps it before returning.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Column not found")]
    ColumnNotFound,

    #[error("Can not update the column")]
    ColumnForbidden,

    #[error("Date format is invalid: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Task not found")]
    TaskNotFound,

    #[error("Recurring task status not found")]
    OccurrenceNotFound,

    #[error("Recurring task status not valid")]
    OccurrenceNotValid,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Database(_) | CoreError::Migration(_) | CoreError::Io(_) => {
                ErrorKind::Internal
            }
            CoreError::NotFound(_)
            | CoreError::ColumnNotFound
            | CoreError::TaskNotFound
            | CoreError::OccurrenceNotFound => ErrorKind::NotFound,
            CoreError::Forbidden(_) | CoreError::ColumnForbidden | CoreError::OccurrenceNotValid => {
                ErrorKind::Forbidden
            }
            CoreError::InvalidDateFormat(_)
            | CoreError::InvalidDateRange(_)
            | CoreError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Stable machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Database(_) | CoreError::Migration(_) | CoreError::Io(_) => "Internal",
            CoreError::NotFound(_) => "NotFound",
            CoreError::Forbidden(_) => "Forbidden",
            CoreError::ColumnNotFound => "ColumnNotFound",
            CoreError::ColumnForbidden => "ColumnForbidden",
            CoreError::InvalidDateFormat(_) => "InvalidDateFormat",
            CoreError::InvalidDateRange(_) => "InvalidDateRange",
            CoreError::TaskNotFound => "TaskNotFound",
            CoreError::OccurrenceNotFound => "RTSNotFound",
            CoreError::OccurrenceNotValid => "RTSNotValid",
            CoreError::InvalidInput(_) => "InvalidInput",
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_hide_storage_text() {
        let err = CoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "Database error");
        assert_eq!(err.code(), "Internal");
    }

    #[test]
    fn test_occurrence_codes_match_legacy_names() {
        assert_eq!(CoreError::OccurrenceNotFound.code(), "RTSNotFound");
        assert_eq!(CoreError::OccurrenceNotValid.code(), "RTSNotValid");
        assert_eq!(CoreError::OccurrenceNotValid.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_engine_errors_classify() {
        assert_eq!(CoreError::TaskNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(CoreError::ColumnForbidden.kind(), ErrorKind::Forbidden);
        assert!(CoreError::ColumnNotFound.is_not_found());
        assert_eq!(
            CoreError::InvalidDateFormat("2024/01/01".into()).kind(),
            ErrorKind::InvalidInput
        );
    }
}
