use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

pub(crate) fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) | AppError::Parse(_) => StatusCode::BAD_REQUEST,
        AppError::Auth(_) => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Errors leave the server as plain-text bodies carrying just the message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (status_for(&self), self.message().to_string()).into_response()
    }
}
