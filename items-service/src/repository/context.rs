//! Per-request context passed to every storage call

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use super::error::{RepositoryError, RepositoryOperation};
use super::traits::RepositoryResult;

/// Request-scoped values threaded through the storage port
///
/// Carries the request id for log correlation and an optional deadline.
/// Dropping the future that owns a storage call cancels it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id of the inbound request
    pub request_id: Option<String>,
    /// Instant after which storage calls fail with `ConnectionFailed`
    pub deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no request id and no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request id
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set a deadline relative to now
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Request id, or `-` when none was assigned
    pub fn request_id(&self) -> &str {
        self.request_id.as_deref().unwrap_or("-")
    }

    /// Run a storage future under this context's deadline
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use items_service::repository::{RepositoryOperation, RequestContext};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let ctx = RequestContext::new().with_timeout(Duration::from_millis(10));
    /// let result: Result<(), _> = ctx
    ///     .run(RepositoryOperation::Get, async {
    ///         tokio::time::sleep(Duration::from_secs(5)).await;
    ///         Ok(())
    ///     })
    ///     .await;
    /// assert!(result.unwrap_err().is_connection());
    /// # }
    /// ```
    pub async fn run<T, F>(&self, operation: RepositoryOperation, fut: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        match self.deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        operation = %operation,
                        request_id = self.request_id(),
                        "storage call exceeded request deadline"
                    );
                    Err(RepositoryError::connection_failed(
                        operation,
                        "deadline exceeded",
                    ))
                }
            },
            None => fut.await,
        }
    }
}
