use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersonError {
    #[error("invalid person id {id:?}: {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: oid::Error,
    },

    #[error("no person found with id {0}")]
    NotFound(String),

    #[error("malformed request body: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("database error: {0:#}")]
    Store(anyhow::Error),
}

impl From<mongodb::error::Error> for PersonError {
    fn from(err: mongodb::error::Error) -> Self {
        PersonError::Store(anyhow::Error::new(err))
    }
}

impl From<PersonError> for AppError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::InvalidIdentifier { .. } | PersonError::MalformedInput(_) => {
                AppError::BadRequest(anyhow::anyhow!(err.to_string()))
            }
            PersonError::NotFound(_) => AppError::NotFound(anyhow::anyhow!(err.to_string())),
            PersonError::Store(source) => AppError::DatabaseError(source),
        }
    }
}

/// How failed requests are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Every failure is a 500 with the error message as a plain-text body.
    #[default]
    Compatible,
    /// Client errors get 400/404 with the JSON body of [`AppError`].
    Strict,
}

impl ErrorMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ErrorMode::Strict
        } else {
            ErrorMode::Compatible
        }
    }
}

/// A [`PersonError`] bound to the rendering mode of the running service.
#[derive(Debug)]
pub struct ApiError {
    error: PersonError,
    mode: ErrorMode,
}

impl ApiError {
    pub fn new(error: PersonError, mode: ErrorMode) -> Self {
        Self { error, mode }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.error, "Request failed");

        match self.mode {
            ErrorMode::Compatible => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.error.to_string()).into_response()
            }
            ErrorMode::Strict => AppError::from(self.error).into_response(),
        }
    }
}
