use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients for every 500-class failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invite already used")]
    AlreadyUsed,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::AlreadyUsed => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::AlreadyUsed => self.to_string(),
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (self.status(), Json(ErrorResponse { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn get_response_body(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        let body_str = String::from_utf8(bytes.to_vec()).unwrap();
        (status, body_str)
    }

    #[tokio::test]
    async fn test_invalid_input_error() {
        let error = AppError::InvalidInput("Missing userId".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Missing userId"));
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let error = AppError::NotFound("Invite not found".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Invite not found"));
    }

    #[tokio::test]
    async fn test_already_used_error() {
        let (status, body) = get_response_body(AppError::AlreadyUsed.into_response()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invite already used"));
    }

    #[tokio::test]
    async fn test_conflict_error() {
        let error = AppError::Conflict("Invite already used".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.contains("Invite already used"));
    }

    #[tokio::test]
    async fn test_store_unavailable_hides_detail() {
        let error = AppError::StoreUnavailable("connection refused on 10.0.0.3".to_string());
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("10.0.0.3"));
        assert!(body.contains(INTERNAL_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let error: AppError = sea_orm::DbErr::Custom("secret table layout".to_string()).into();
        let (status, body) = get_response_body(error.into_response()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret"));
    }

    #[tokio::test]
    async fn test_json_error_response_format() {
        let error = AppError::NotFound("Not found".to_string());
        let (_, body) = get_response_body(error.into_response()).await;

        // Response should be a single JSON object with an "error" field
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, serde_json::json!({"error": "Not found"}));
    }

    #[test]
    fn test_error_display_impl() {
        assert_eq!(
            AppError::InvalidInput("test".to_string()).to_string(),
            "Invalid input: test"
        );
        assert_eq!(
            AppError::NotFound("test".to_string()).to_string(),
            "Not found: test"
        );
        assert_eq!(AppError::AlreadyUsed.to_string(), "Invite already used");
        assert_eq!(
            AppError::Conflict("test".to_string()).to_string(),
            "Conflict: test"
        );
        assert_eq!(
            AppError::StoreUnavailable("test".to_string()).to_string(),
            "Store unavailable: test"
        );
    }

    #[test]
    fn test_db_error_from_conversion() {
        let app_error: AppError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(app_error, AppError::Database(_)));
        assert_eq!(app_error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
