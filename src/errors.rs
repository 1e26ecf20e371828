use sea_orm::error::DbErr;
use serde::Serialize;

/// Broad classification of a [`ServiceError`], used by callers that only care
/// whether a render failed on missing data, the store, or a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Query,
    Template,
    Internal,
}

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        sea_orm::error::DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(
        #[from]
        #[serde(skip)]
        std::io::Error,
    ),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Other error: {0}")]
    Other(
        #[from]
        #[serde(skip)]
        anyhow::Error,
    ),
}

impl From<handlebars::RenderError> for ServiceError {
    fn from(err: handlebars::RenderError) -> Self {
        ServiceError::TemplateError(err.to_string())
    }
}

impl From<handlebars::TemplateError> for ServiceError {
    fn from(err: handlebars::TemplateError) -> Self {
        ServiceError::TemplateError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ConfigError(err.to_string())
    }
}

pub trait IntoDbErr {
    fn into_db_err(self) -> DbErr;
}

impl IntoDbErr for DbErr {
    fn into_db_err(self) -> DbErr {
        self
    }
}

impl IntoDbErr for String {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self)
    }
}

impl IntoDbErr for &str {
    fn into_db_err(self) -> DbErr {
        DbErr::Custom(self.to_string())
    }
}

impl ServiceError {
    /// Generic constructor that normalizes any supported database error input.
    pub fn db_error<E: IntoDbErr>(error: E) -> Self {
        ServiceError::DatabaseError(error.into_db_err())
    }

    /// Not-found error naming the entity and the key that failed to resolve.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ServiceError::NotFound(format!("{} with id {} not found", entity, id))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DatabaseError(_) => ErrorKind::Query,
            Self::TemplateError(_) => ErrorKind::Template,
            Self::InvalidInput(_)
            | Self::ConfigError(_)
            | Self::ImageError(_)
            | Self::IoError(_)
            | Self::SerializationError(_)
            | Self::Other(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn service_error_kind_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ServiceError::db_error("connection reset").kind(),
            ErrorKind::Query
        );
        assert_eq!(
            ServiceError::TemplateError("x".into()).kind(),
            ErrorKind::Template
        );
        assert_eq!(
            ServiceError::ImageError("x".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn not_found_names_entity_and_key() {
        let err = ServiceError::not_found("Warehouse", 7);
        assert_eq!(err.to_string(), "Not found: Warehouse with id 7 not found");
    }

    #[test]
    fn db_error_wraps_strings_as_custom() {
        let err = ServiceError::db_error("boom");
        assert_matches!(err, ServiceError::DatabaseError(DbErr::Custom(msg)) if msg == "boom");
    }

    #[test]
    fn db_errors_convert_with_question_mark() {
        fn lookup() -> Result<(), ServiceError> {
            Err::<(), _>(DbErr::RecordNotFound("supply_order".into()))?;
            Ok(())
        }
        assert_matches!(lookup(), Err(ServiceError::DatabaseError(_)));
    }
}
