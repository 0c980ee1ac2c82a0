use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされたスロットが存在しない
            BookingApplicationError::SlotNotFound => (
                StatusCode::NOT_FOUND,
                "SLOT_NOT_FOUND",
                "Slot not found".to_string(),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反（利用者にそのまま表示する）
            BookingApplicationError::Rejected(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                rejection.code(),
                rejection.to_string(),
            ),
            BookingApplicationError::InvalidSlot(ref e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_SLOT",
                e.to_string(),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::StoreError(ref e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to access booking store".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    InternalError(String),
}

impl From<BookingApplicationError> for QueryError {
    fn from(err: BookingApplicationError) -> Self {
        match err {
            BookingApplicationError::SlotNotFound => QueryError::NotFound(err.to_string()),
            BookingApplicationError::StoreError(ref e) => {
                QueryError::InternalError(format!("{}: {}", err, e))
            }
            other => QueryError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "SLOT_NOT_FOUND", msg),
            QueryError::InternalError(msg) => {
                tracing::error!("Internal error in query handler: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
