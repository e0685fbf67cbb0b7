//! API error taxonomy
//!
//! Every failure a handler can produce becomes an [`ApiError`]: an
//! [`ErrorType`] category, a stable [`ErrorCode`], a client-facing message and
//! optional details. The HTTP status is derived from type and code, never
//! stored separately, so the two cannot disagree.
//!
//! # Example
//!
//! ```rust
//! use axum::http::StatusCode;
//! use items_service::handlers::{ApiError, ErrorCode, ErrorType};
//! use items_service::repository::{RepositoryError, RepositoryOperation};
//!
//! let error = ApiError::from(RepositoryError::not_found(RepositoryOperation::Get, "item-1"));
//! assert_eq!(error.error_type, ErrorType::NotFound);
//! assert_eq!(error.code, ErrorCode::NotFound);
//! assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
//! ```

use std::fmt;

use axum::{
    extract::rejection::{BytesRejection, PathRejection, QueryRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::response::{ApiResponse, ErrorInfo};
use crate::models::{ValidationError, ValidationErrorKind};
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `POST /items`
    Create,
    /// `GET /items/{id}`
    Get,
    /// `GET /items`
    List,
    /// `PUT /items/{id}`
    Update,
    /// `DELETE /items/{id}`
    Delete,
    /// `GET /health/db`
    HealthCheck,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Get => write!(f, "get"),
            Self::List => write!(f, "list"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
            Self::HealthCheck => write!(f, "health_check"),
        }
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::Create => Self::Create,
            RepositoryOperation::Get => Self::Get,
            RepositoryOperation::List => Self::List,
            RepositoryOperation::Update => Self::Update,
            RepositoryOperation::Delete => Self::Delete,
            RepositoryOperation::HealthCheck => Self::HealthCheck,
        }
    }
}

/// Broad category of an API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The request was malformed or violated a rule
    Validation,
    /// The addressed item does not exist
    NotFound,
    /// The request conflicts with stored state
    Conflict,
    /// The key-value store failed
    Database,
    /// Anything else that went wrong inside the service
    System,
    /// Reserved for authentication failures
    Authentication,
    /// Reserved for client rate limiting
    RateLimit,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Database => write!(f, "database"),
            Self::System => write!(f, "system"),
            Self::Authentication => write!(f, "authentication"),
            Self::RateLimit => write!(f, "rate_limit"),
        }
    }
}

/// Stable machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request could not be processed as sent
    InvalidRequest,
    /// A required field or parameter is missing or blank
    MissingField,
    /// A value could not be parsed
    InvalidFormat,
    /// A value exceeds its length limit
    ValueTooLong,
    /// A value is outside its accepted set or range
    InvalidValue,
    /// The request body is larger than the configured limit
    PayloadTooLarge,
    /// The path exists but does not accept the method
    MethodNotAllowed,
    /// No item with the given id
    NotFound,
    /// An item with the given id already exists
    AlreadyExists,
    /// The store failed to execute the request
    DatabaseError,
    /// The store could not be reached
    ConnectionError,
    /// Generic store operation failure
    OperationFailed,
    /// The store throttled the request
    ThroughputExceeded,
    /// Unexpected internal failure
    InternalError,
    /// The service cannot take requests right now
    ServiceUnavailable,
    /// The request took too long
    Timeout,
    /// Credentials are missing or invalid
    Unauthorized,
    /// Credentials are valid but insufficient
    Forbidden,
    /// The client sent too many requests
    RateLimitExceeded,
}

impl ErrorCode {
    /// Wire spelling of the code
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::ValueTooLong => "VALUE_TOO_LONG",
            Self::InvalidValue => "INVALID_VALUE",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::OperationFailed => "OPERATION_FAILED",
            Self::ThroughputExceeded => "THROUGHPUT_EXCEEDED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }

    /// Pick a validation code from a free-text message
    ///
    /// Only used for messages that arrive without a typed kind, such as
    /// input rejections reported by the store. Keywords are matched
    /// case-insensitively, first rule wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::handlers::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_validation_message("item id is required"), ErrorCode::MissingField);
    /// assert_eq!(ErrorCode::from_validation_message("something odd"), ErrorCode::InvalidRequest);
    /// ```
    #[must_use]
    pub fn from_validation_message(message: &str) -> Self {
        const RULES: &[(&[&str], ErrorCode)] = &[
            (&["empty", "required"], ErrorCode::MissingField),
            (&["too long", "exceed"], ErrorCode::ValueTooLong),
            (&["invalid", "format"], ErrorCode::InvalidFormat),
            (&["status", "one of"], ErrorCode::InvalidValue),
        ];

        let message = message.to_lowercase();
        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| message.contains(k)))
            .map_or(ErrorCode::InvalidRequest, |(_, code)| *code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValidationErrorKind> for ErrorCode {
    fn from(kind: ValidationErrorKind) -> Self {
        match kind {
            ValidationErrorKind::EmptyName | ValidationErrorKind::EmptyDescription => {
                Self::MissingField
            }
            ValidationErrorKind::NameTooLong | ValidationErrorKind::DescriptionTooLong => {
                Self::ValueTooLong
            }
            ValidationErrorKind::InvalidStatus | ValidationErrorKind::InvalidId => {
                Self::InvalidValue
            }
        }
    }
}

/// Structured API error
///
/// `cause` holds internal detail for logs only; it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Category
    pub error_type: ErrorType,
    /// Stable code
    pub code: ErrorCode,
    /// Client-facing message
    pub message: String,
    /// Optional client-facing elaboration
    pub details: Option<String>,
    /// Operation during which the error occurred
    pub operation: Option<ApiOperation>,
    /// Internal cause, logged but not returned
    pub cause: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(error_type: ErrorType, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_type,
            code,
            message: message.into(),
            details: None,
            operation: None,
            cause: None,
        }
    }

    /// Create a validation error with the given code
    pub fn validation(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, code, message)
    }

    /// Create a "missing parameter" error
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::handlers::{ApiError, ErrorCode};
    ///
    /// let error = ApiError::missing_parameter("Item ID");
    /// assert_eq!(error.code, ErrorCode::MissingField);
    /// assert_eq!(error.message, "Item ID is required");
    /// ```
    pub fn missing_parameter(parameter: &str) -> Self {
        Self::validation(ErrorCode::MissingField, format!("{parameter} is required")).with_details(
            format!("The required parameter '{parameter}' is missing from the request"),
        )
    }

    /// Create an error for a request body that is not valid JSON
    pub fn invalid_json(cause: impl fmt::Display) -> Self {
        Self::validation(ErrorCode::InvalidFormat, "Invalid JSON format")
            .with_details("Request body contains malformed JSON")
            .with_cause(cause.to_string())
    }

    /// Create a "not found" error for an item id
    pub fn not_found(id: &str) -> Self {
        Self::new(ErrorType::NotFound, ErrorCode::NotFound, "Item not found")
            .with_details(format!("No item found with ID: {id}"))
    }

    /// Create an "already exists" error for an item id
    pub fn already_exists(id: &str) -> Self {
        Self::new(
            ErrorType::Conflict,
            ErrorCode::AlreadyExists,
            "Item already exists",
        )
        .with_details(format!("An item with ID {id} already exists"))
    }

    /// Create an internal error; the cause is logged, not returned
    pub fn internal(cause: impl fmt::Display) -> Self {
        Self::new(
            ErrorType::System,
            ErrorCode::InternalError,
            "An unexpected error occurred",
        )
        .with_details("Please try again later")
        .with_cause(cause.to_string())
    }

    /// Create a service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorType::System, ErrorCode::ServiceUnavailable, message)
    }

    /// Create an error for a request body over the size limit
    pub fn payload_too_large(cause: impl fmt::Display) -> Self {
        Self::validation(ErrorCode::PayloadTooLarge, "Request body too large")
            .with_details("The request body exceeds the configured size limit")
            .with_cause(cause.to_string())
    }

    /// Create an error for a path no route matches
    pub fn route_not_found(method: &Method, uri: &Uri) -> Self {
        Self::new(ErrorType::NotFound, ErrorCode::NotFound, "Route not found")
            .with_details(format!("No route for {method} {}", uri.path()))
    }

    /// Create an error for a known path called with the wrong method
    pub fn method_not_allowed(method: &Method, uri: &Uri) -> Self {
        Self::validation(ErrorCode::MethodNotAllowed, "Method not allowed")
            .with_details(format!("{} does not accept {method}", uri.path()))
    }

    /// Attach client-facing details
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach an internal cause
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// HTTP status for this error
    ///
    /// # Example
    ///
    /// ```rust
    /// use axum::http::StatusCode;
    /// use items_service::handlers::{ApiError, ErrorCode, ErrorType};
    ///
    /// let throttled = ApiError::new(ErrorType::Database, ErrorCode::ThroughputExceeded, "slow down");
    /// assert_eq!(throttled.status_code(), StatusCode::TOO_MANY_REQUESTS);
    /// ```
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match (self.error_type, self.code) {
            (ErrorType::Validation, ErrorCode::PayloadTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            (ErrorType::Validation, ErrorCode::MethodNotAllowed) => StatusCode::METHOD_NOT_ALLOWED,
            (ErrorType::Validation, _) => StatusCode::BAD_REQUEST,
            (ErrorType::NotFound, _) => StatusCode::NOT_FOUND,
            (ErrorType::Conflict, _) => StatusCode::CONFLICT,
            (ErrorType::Database, ErrorCode::ConnectionError) => StatusCode::SERVICE_UNAVAILABLE,
            (ErrorType::Database, ErrorCode::ThroughputExceeded) => StatusCode::TOO_MANY_REQUESTS,
            (ErrorType::Database, _) => StatusCode::INTERNAL_SERVER_ERROR,
            (ErrorType::System, ErrorCode::ServiceUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            (ErrorType::System, ErrorCode::Timeout) => StatusCode::REQUEST_TIMEOUT,
            (ErrorType::System, _) => StatusCode::INTERNAL_SERVER_ERROR,
            (ErrorType::Authentication, ErrorCode::Forbidden) => StatusCode::FORBIDDEN,
            (ErrorType::Authentication, _) => StatusCode::UNAUTHORIZED,
            (ErrorType::RateLimit, _) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Client-facing part of the error
    #[must_use]
    pub fn to_info(&self) -> ErrorInfo {
        ErrorInfo {
            error_type: self.error_type,
            code: self.code,
            message: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, " (caused by: {})", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let operation = self
            .operation
            .map(|op| op.to_string())
            .unwrap_or_else(|| "-".to_string());

        if status.is_server_error() {
            tracing::error!(
                operation = %operation,
                error_type = %self.error_type,
                code = %self.code,
                status = status.as_u16(),
                cause = ?self.cause,
                "API error: {}", self.message
            );
        } else {
            tracing::warn!(
                operation = %operation,
                error_type = %self.error_type,
                code = %self.code,
                status = status.as_u16(),
                cause = ?self.cause,
                "API error: {}", self.message
            );
        }

        ApiResponse::<()>::failure(self.to_info())
            .with_status(status)
            .into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.kind.into(), err.message())
            .with_details(format!("field: {}", err.kind.field()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(ErrorCode::InvalidFormat, "Invalid path parameter")
            .with_details(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(ErrorCode::InvalidFormat, "Invalid query parameters")
            .with_details(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::payload_too_large(rejection.body_text());
        }
        Self::validation(ErrorCode::InvalidFormat, "Unreadable request body")
            .with_details("The request body could not be read")
            .with_cause(rejection.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = ApiOperation::from(err.operation);
        let id = err.entity_id.clone().unwrap_or_default();
        let cause = err.to_string();
        let throttled = err.is_throughput_exceeded();

        tracing::debug!(
            operation = %err.operation,
            kind = %err.kind,
            retriable = err.is_retriable(),
            "Mapping storage error"
        );

        let error = match err.kind {
            RepositoryErrorKind::NotFound => Self::not_found(&id),
            RepositoryErrorKind::AlreadyExists => Self::already_exists(&id),
            RepositoryErrorKind::InvalidInput => Self::validation(
                ErrorCode::from_validation_message(&err.message),
                "Invalid input provided",
            )
            .with_details(err.message),
            RepositoryErrorKind::ConnectionFailed => Self::new(
                ErrorType::Database,
                ErrorCode::ConnectionError,
                "Database connection failed",
            )
            .with_details("Unable to connect to the database"),
            RepositoryErrorKind::OperationFailed if throttled => Self::new(
                ErrorType::Database,
                ErrorCode::ThroughputExceeded,
                "Database throughput exceeded",
            )
            .with_details("Please retry your request after a brief delay"),
            RepositoryErrorKind::OperationFailed => Self::new(
                ErrorType::Database,
                ErrorCode::DatabaseError,
                "Database operation failed",
            ),
        };

        error.with_operation(operation).with_cause(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (ErrorType::Validation, ErrorCode::InvalidValue, 400),
            (ErrorType::Validation, ErrorCode::MissingField, 400),
            (ErrorType::Validation, ErrorCode::PayloadTooLarge, 413),
            (ErrorType::Validation, ErrorCode::MethodNotAllowed, 405),
            (ErrorType::NotFound, ErrorCode::NotFound, 404),
            (ErrorType::Conflict, ErrorCode::AlreadyExists, 409),
            (ErrorType::Database, ErrorCode::ConnectionError, 503),
            (ErrorType::Database, ErrorCode::ThroughputExceeded, 429),
            (ErrorType::Database, ErrorCode::DatabaseError, 500),
            (ErrorType::Database, ErrorCode::OperationFailed, 500),
            (ErrorType::System, ErrorCode::ServiceUnavailable, 503),
            (ErrorType::System, ErrorCode::Timeout, 408),
            (ErrorType::System, ErrorCode::InternalError, 500),
            (ErrorType::Authentication, ErrorCode::Unauthorized, 401),
            (ErrorType::Authentication, ErrorCode::Forbidden, 403),
            (ErrorType::RateLimit, ErrorCode::RateLimitExceeded, 429),
        ];
        for (error_type, code, status) in cases {
            let error = ApiError::new(error_type, code, "x");
            assert_eq!(error.status_code().as_u16(), status, "{error_type}/{code}");
        }
    }

    #[test]
    fn test_validation_kind_codes() {
        let cases = [
            (ValidationErrorKind::EmptyName, ErrorCode::MissingField),
            (ValidationErrorKind::EmptyDescription, ErrorCode::MissingField),
            (ValidationErrorKind::NameTooLong, ErrorCode::ValueTooLong),
            (ValidationErrorKind::DescriptionTooLong, ErrorCode::ValueTooLong),
            (ValidationErrorKind::InvalidStatus, ErrorCode::InvalidValue),
            (ValidationErrorKind::InvalidId, ErrorCode::InvalidValue),
        ];
        for (kind, code) in cases {
            let error = ApiError::from(ValidationError::new(kind));
            assert_eq!(error.error_type, ErrorType::Validation);
            assert_eq!(error.code, code, "{kind}");
            assert_eq!(error.message, kind.message());
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_message_classifier_precedence() {
        assert_eq!(
            ErrorCode::from_validation_message("name cannot be empty"),
            ErrorCode::MissingField
        );
        assert_eq!(
            ErrorCode::from_validation_message("description cannot exceed 500 characters"),
            ErrorCode::ValueTooLong
        );
        assert_eq!(
            ErrorCode::from_validation_message("Invalid continuation token"),
            ErrorCode::InvalidFormat
        );
        assert_eq!(
            ErrorCode::from_validation_message("status must be one of: active, inactive, pending"),
            ErrorCode::InvalidValue
        );
        // "empty" outranks "invalid"
        assert_eq!(
            ErrorCode::from_validation_message("invalid: value is empty"),
            ErrorCode::MissingField
        );
        assert_eq!(
            ErrorCode::from_validation_message("unexpected"),
            ErrorCode::InvalidRequest
        );
    }

    #[test]
    fn test_repository_mapping() {
        let not_found = ApiError::from(RepositoryError::not_found(RepositoryOperation::Get, "abc"));
        assert_eq!(not_found.code, ErrorCode::NotFound);
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.operation, Some(ApiOperation::Get));
        assert!(not_found.details.as_deref().unwrap().contains("abc"));

        let conflict = ApiError::from(RepositoryError::already_exists("abc"));
        assert_eq!(conflict.error_type, ErrorType::Conflict);
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let invalid = ApiError::from(RepositoryError::invalid_input(
            RepositoryOperation::List,
            "invalid continuation token",
        ));
        assert_eq!(invalid.error_type, ErrorType::Validation);
        assert_eq!(invalid.code, ErrorCode::InvalidFormat);

        let unclassified = ApiError::from(RepositoryError::invalid_input(
            RepositoryOperation::Update,
            "unsupported attribute",
        ));
        assert_eq!(unclassified.code, ErrorCode::InvalidRequest);

        let connection = ApiError::from(RepositoryError::connection_failed(
            RepositoryOperation::Create,
            "dispatch failure",
        ));
        assert_eq!(connection.code, ErrorCode::ConnectionError);
        assert_eq!(connection.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let throttled = ApiError::from(RepositoryError::throughput_exceeded(
            RepositoryOperation::List,
        ));
        assert_eq!(throttled.code, ErrorCode::ThroughputExceeded);
        assert_eq!(throttled.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let failed = ApiError::from(RepositoryError::operation_failed(
            RepositoryOperation::Delete,
            "SomethingElse: secret internals",
        ));
        assert_eq!(failed.code, ErrorCode::DatabaseError);
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(failed.details.is_none());
        assert!(failed.cause.as_deref().unwrap().contains("secret internals"));
    }

    #[test]
    fn test_routing_errors() {
        let uri: Uri = "/nowhere?x=1".parse().unwrap();

        let missing = ApiError::route_not_found(&Method::GET, &uri);
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.details.as_deref(), Some("No route for GET /nowhere"));

        let wrong_method = ApiError::method_not_allowed(&Method::PATCH, &uri);
        assert_eq!(wrong_method.code.as_str(), "METHOD_NOT_ALLOWED");
        assert_eq!(wrong_method.status_code(), StatusCode::METHOD_NOT_ALLOWED);

        let too_large = ApiError::payload_too_large("length limit exceeded");
        assert_eq!(too_large.code.as_str(), "PAYLOAD_TOO_LARGE");
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(too_large.to_info().details.is_some());
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let error = ApiError::internal("panic in serializer");
        assert_eq!(error.message, "An unexpected error occurred");
        let info = serde_json::to_value(error.to_info()).unwrap();
        assert!(!info.to_string().contains("serializer"));
    }

    #[test]
    fn test_codes_serialize_in_wire_form() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::ThroughputExceeded).unwrap(),
            "\"THROUGHPUT_EXCEEDED\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorType::RateLimit).unwrap(),
            "\"rate_limit\""
        );
        assert_eq!(ErrorCode::RateLimitExceeded.to_string(), "RATE_LIMIT_EXCEEDED");
    }
}
