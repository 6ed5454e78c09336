use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InnerApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    NotConfigured(&'static str),
    #[error("Failed to analyze text")]
    Upstream(anyhow::Error),
    #[error("Failed to load history")]
    Storage(anyhow::Error),
}

impl InnerApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotConfigured(_) | Self::Upstream(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
