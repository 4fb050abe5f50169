use axum::http::StatusCode;
use std::fmt;

pub const TRANSPORT_MESSAGE: &str = "could not reach the server";
pub const UNAUTHORIZED_MESSAGE: &str = "admin session was rejected by the server";

/// Failure of a single backend action. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The backend reported the code or resource as unknown; message is verbatim.
    NotFound(String),
    Unauthorized,
    /// Network or decode failure. Carries no backend detail.
    Transport,
    /// Required user input was empty; raised before any request is made.
    Validation(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Transport => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(message) | Self::Validation(message) => f.write_str(message),
            Self::Unauthorized => f.write_str(UNAUTHORIZED_MESSAGE),
            Self::Transport => f.write_str(TRANSPORT_MESSAGE),
        }
    }
}

impl std::error::Error for ClientError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
