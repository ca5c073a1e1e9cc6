use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard API response envelope.
///
/// `status` duplicates the HTTP status code so clients that only look at
/// the body still see it. `data` is omitted when there is nothing to return.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response carrying a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 200 response with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    /// Error response with the given status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Payload carrying just an account email.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmailData {
    #[schema(example = "alice@example.com")]
    pub email: String,
}
