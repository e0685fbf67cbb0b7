//! Query parameters for `GET /items`
//!
//! # Example
//!
//! ```rust
//! use items_service::handlers::{ErrorCode, ListQuery};
//!
//! let query = ListQuery::default().with_limit("25");
//! assert_eq!(query.to_options().unwrap().limit, 25);
//!
//! let query = ListQuery::default().with_limit("abc");
//! assert_eq!(query.to_options().unwrap_err().code, ErrorCode::InvalidFormat);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ErrorCode};
use crate::repository::{ContinuationToken, ListOptions, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

/// Raw list query as received
///
/// `limit` stays a string so malformed values can be reported with a
/// dedicated error instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Page size, 1 to 100
    #[serde(default)]
    pub limit: Option<String>,
    /// Continuation token from a previous page
    #[serde(default)]
    pub next_token: Option<String>,
}

impl ListQuery {
    /// Set the raw limit
    #[must_use]
    pub fn with_limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Set the continuation token
    #[must_use]
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Validate and convert into storage list options
    ///
    /// An absent or empty limit means the default of 50. A non-integer is
    /// `INVALID_FORMAT`; an integer outside `1..=100` is `INVALID_VALUE`.
    pub fn to_options(&self) -> Result<ListOptions, ApiError> {
        let limit = match self.limit.as_deref().filter(|raw| !raw.is_empty()) {
            None => DEFAULT_LIST_LIMIT,
            Some(raw) => parse_limit(raw)?,
        };

        let options = ListOptions::new(limit);
        Ok(match self.next_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => options.with_continuation(ContinuationToken::new(token)),
            None => options,
        })
    }
}

fn parse_limit(raw: &str) -> Result<u32, ApiError> {
    let limit: i64 = raw.parse().map_err(|_| {
        ApiError::validation(ErrorCode::InvalidFormat, "Invalid limit parameter")
            .with_details("Limit must be a valid integer")
    })?;

    if !(1..=i64::from(MAX_LIST_LIMIT)).contains(&limit) {
        return Err(
            ApiError::validation(ErrorCode::InvalidValue, "Invalid limit value")
                .with_details(format!("Limit must be between 1 and {MAX_LIST_LIMIT}")),
        );
    }

    // in range 1..=100, so the narrowing cannot fail
    u32::try_from(limit).map_err(ApiError::internal)
}
