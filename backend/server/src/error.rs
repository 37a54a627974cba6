use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(#[source] CatalogError),

    #[error("Failed to render page: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write session: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound { .. } => AppError::NotFound(e),
            other => AppError::InternalError(Box::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Template { .. } | AppError::Session { .. } | AppError::InternalError { .. } => {
                error!("{self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} is not set")]
    Missing { key: &'static str },

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("{key} must be at least {min} bytes")]
    WeakSecret { key: &'static str, min: usize },
}
