use axum::{http::StatusCode, response::{IntoResponse, Redirect, Response}};
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(String),

    // Every problem found with the input, in the order they were found.
    #[error("invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("admin token missing or wrong")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    // Turn a list of problems into an error, or nothing if the list is empty.
    pub fn check(errors: Vec<String>) -> Result<()> {
        match errors.is_empty() {
            true => Ok(()),
            false => Err(Self::Validation(errors)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                let messages = [format!("{what} not found.")];
                (StatusCode::NOT_FOUND, pages::error_page("Not found", &messages)).into_response()
            },
            AppError::Validation(messages) => {
                tracing::debug!(?messages, "rejected input");
                (StatusCode::UNPROCESSABLE_ENTITY, pages::error_page("Invalid input", &messages)).into_response()
            },
            AppError::Unauthorized => Redirect::to("/admin/login").into_response(),
            other => {
                // The cause stays in the log.
                tracing::error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, pages::error_page("Something went wrong", &[])).into_response()
            },
        }
    }
}
