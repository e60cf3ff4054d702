//! Error types for the server

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::InferenceError;

use super::schema::FieldError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Request validation failed: {} invalid field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
}

impl From<BytesRejection> for ServerError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(rejection.body_text())
        } else {
            ServerError::Validation(vec![FieldError::new("body", rejection.body_text())])
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": true,
                    "message": "Request validation failed",
                    "detail": errors,
                }),
            ),
            ServerError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({
                    "error": true,
                    "message": msg,
                }),
            ),
            ServerError::Inference(e) => {
                tracing::error!(detail = %e, "Inference error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": true,
                        "message": "Prediction failed",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
