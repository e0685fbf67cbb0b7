//! Repository error types
//!
//! Storage adapters translate every backend failure into one of five
//! [`RepositoryErrorKind`]s so handlers never see backend-specific errors.
//!
//! # Example
//!
//! ```rust
//! use items_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::Get, "item-123");
//! assert!(error.is_not_found());
//! assert_eq!(error.entity_id.as_deref(), Some("item-123"));
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Writing a new item
    Create,
    /// Reading a single item by id
    Get,
    /// Scanning a page of items
    List,
    /// Conditionally updating an existing item
    Update,
    /// Conditionally deleting an existing item
    Delete,
    /// Probing the backing store
    HealthCheck,
}

impl fmt::Display for RepositoryOperation {
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

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No item with the requested id
    NotFound,
    /// An item with the id already exists
    AlreadyExists,
    /// The store rejected the request as malformed
    InvalidInput,
    /// The store could not be reached, or the deadline passed
    ConnectionFailed,
    /// The store accepted the request but failed to execute it
    OperationFailed,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::OperationFailed => write!(f, "operation_failed"),
        }
    }
}

/// Message carried by operation failures caused by provisioned-throughput throttling
pub const THROUGHPUT_EXCEEDED_MESSAGE: &str = "throughput exceeded";

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The id of the item involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_id: None,
        }
    }

    /// Create a "not found" error for an item id
    pub fn not_found(operation: RepositoryOperation, id: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::NotFound, "item not found").with_entity(id)
    }

    /// Create an "already exists" error for an item id
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Create,
            RepositoryErrorKind::AlreadyExists,
            "item already exists",
        )
        .with_entity(id)
    }

    /// Create an invalid input error
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::repository::{RepositoryError, RepositoryOperation};
    ///
    /// let error = RepositoryError::invalid_input(RepositoryOperation::Get, "item id is required");
    /// assert!(error.is_validation());
    /// ```
    pub fn invalid_input(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::InvalidInput, message)
    }

    /// Create a connection failed error
    pub fn connection_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::ConnectionFailed, message)
    }

    /// Create an operation failed error
    pub fn operation_failed(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::OperationFailed, message)
    }

    /// Create an operation failed error for a throttled request
    pub fn throughput_exceeded(operation: RepositoryOperation) -> Self {
        Self::operation_failed(operation, THROUGHPUT_EXCEEDED_MESSAGE)
    }

    /// Add the item id to an existing error
    #[must_use]
    pub fn with_entity(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// The item does not exist
    pub fn is_not_found(&self) -> bool {
        self.kind == RepositoryErrorKind::NotFound
    }

    /// A conditional create found an existing item
    pub fn is_conflict(&self) -> bool {
        self.kind == RepositoryErrorKind::AlreadyExists
    }

    /// The request was rejected as malformed
    pub fn is_validation(&self) -> bool {
        self.kind == RepositoryErrorKind::InvalidInput
    }

    /// The store was unreachable
    pub fn is_connection(&self) -> bool {
        self.kind == RepositoryErrorKind::ConnectionFailed
    }

    /// The store failed while executing the request
    pub fn is_operation(&self) -> bool {
        self.kind == RepositoryErrorKind::OperationFailed
    }

    /// The failure was throttling rather than a hard fault
    pub fn is_throughput_exceeded(&self) -> bool {
        self.is_operation() && mentions_throughput(&self.message)
    }

    /// Check if this error is transient and may succeed if the client retries
    ///
    /// The service itself never retries.
    ///
    /// # Example
    ///
    /// ```rust
    /// use items_service::repository::{RepositoryError, RepositoryOperation};
    ///
    /// assert!(RepositoryError::throughput_exceeded(RepositoryOperation::List).is_retriable());
    /// assert!(!RepositoryError::not_found(RepositoryOperation::Get, "123").is_retriable());
    /// ```
    pub fn is_retriable(&self) -> bool {
        self.is_connection() || self.is_throughput_exceeded()
    }
}

/// Whether a failure message describes throttling
///
/// Keywords must appear as whole words, so "rate" does not match
/// "generated" or "separate".
pub fn mentions_throughput(message: &str) -> bool {
    const KEYWORDS: [&str; 5] = ["throughput", "capacity", "throttling", "throttled", "rate"];

    message
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| KEYWORDS.iter().any(|keyword| word.eq_ignore_ascii_case(keyword)))
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let Some(ref entity_id) = self.entity_id {
            write!(f, " [item: {}]", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
