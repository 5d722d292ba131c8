use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors surfaced by the object store and the CRUD facade.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A lookup condition matched no rows.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A write violated a uniqueness constraint. The write was rolled back.
    #[error("{entity} already exists: {detail}")]
    DuplicateObject { entity: &'static str, detail: String },

    #[error("Invalid sort field: {0}")]
    InvalidSort(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl ApiError {
    pub fn not_found(entity: &'static str) -> Self {
        ApiError::NotFound { entity }
    }

    /// Classify a driver error raised while writing rows of `entity`.
    pub fn from_write(entity: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ApiError::DuplicateObject { entity, detail }
            }
            _ => match err {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => ApiError::not_found(entity),
                other => ApiError::Database(other),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::DuplicateObject { .. })
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        ApiError::from_write("object", err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_updated_is_not_found() {
        let err = ApiError::from_write("recording", DbErr::RecordNotUpdated);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "recording not found");
    }

    #[test]
    fn other_errors_are_wrapped() {
        let err: ApiError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ApiError::Database(_)));
    }
}
