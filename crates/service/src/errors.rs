use thiserror::Error;

/// Errors surfaced by the service layer. Each variant carries the HTTP status
/// the web layer should answer with, see [`ServiceError::status_code`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("missing required field '{}'", field))
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::Db(_) => 500,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 400,
            ServiceError::Model(models::errors::ModelError::Db(_)) => 500,
        }
    }
}

pub(crate) fn db_err(e: sea_orm::DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }
