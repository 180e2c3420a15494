use axum::{ http::StatusCode, response::{ IntoResponse, Response }, Json };
use log::error;
use thiserror::Error;

use crate::llm::chat::ProviderError;
use crate::models::api::ErrorBody;

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Message is required")]
    MessageRequired,

    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("completion provider failed: {0}")]
    Provider(#[from] ProviderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MessageRequired => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) | ApiError::Provider(_) =>
                StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the caller. Parse and provider details stay in the server log.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MessageRequired => MESSAGE_REQUIRED,
            ApiError::MalformedBody(_) | ApiError::Provider(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(ref e) => error!("Unreadable chat request body: {}", e),
            ApiError::Provider(ref e) => error!("Chat completion failed: {:?}", e),
            ApiError::MessageRequired => {}
        }

        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            message: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::MessageRequired;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Message is required");
    }

    #[test]
    fn provider_failure_hides_detail() {
        let err = ApiError::Provider(ProviderError::MissingApiKey("Groq"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().contains("Groq API key is required"));
    }

    #[test]
    fn malformed_body_is_an_internal_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::from(parse_err);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal Server Error");
    }
}
