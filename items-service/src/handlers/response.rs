//! Uniform response envelope
//!
//! Every endpoint answers with `{success, data?, error?}`. The constructors
//! are the only way to build an [`ApiResponse`], so `data` and `error` are
//! never both present.
//!
//! # Example
//!
//! ```rust
//! use items_service::handlers::ApiResponse;
//!
//! let ok = ApiResponse::success("hello");
//! let json = serde_json::to_value(&ok).unwrap();
//! assert_eq!(json["success"], true);
//! assert_eq!(json["data"], "hello");
//! assert!(json.get("error").is_none());
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::{ErrorCode, ErrorType};
use crate::models::Item;
use crate::repository::ListPage;

/// Client-facing error description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error category
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional elaboration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// True for successful responses
    pub success: bool,
    /// Payload, only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    /// Error, only on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
    #[serde(skip)]
    status: Option<StatusCode>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: None,
        }
    }

    /// Failed response carrying `error`
    pub fn failure(error: ErrorInfo) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            status: None,
        }
    }

    /// Override the HTTP status (200 for success and 500 for failure otherwise)
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Payload, if this is a success
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error, if this is a failure
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = self.status.unwrap_or(if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        });
        (status, Json(self)).into_response()
    }
}

/// Payload of `GET /items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItemsData {
    /// Items on this page
    pub items: Vec<Item>,
    /// Whether more items follow
    pub has_more: bool,
    /// Number of items on this page
    pub count: usize,
    /// Token to pass back as `next_token` for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl From<ListPage> for ListItemsData {
    fn from(page: ListPage) -> Self {
        let has_more = page.has_more();
        Self {
            count: page.items.len(),
            has_more,
            next_token: page.next_token.map(|token| token.as_str().to_owned()),
            items: page.items,
        }
    }
}

/// Payload of `DELETE /items/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    /// Confirmation message
    pub message: String,
    /// Id of the removed item
    pub deleted_id: String,
}

impl DeleteAck {
    /// Acknowledge deletion of `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            message: "Item deleted successfully".to_string(),
            deleted_id: id.into(),
        }
    }
}

/// Payload of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `healthy`; failed checks answer with an error envelope
    pub status: String,
    /// Service name
    pub service: String,
    /// Backing table, reported by the storage check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Storage check outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    /// Healthy status for the named service
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            service: service.into(),
            table: None,
            message: None,
        }
    }
}
