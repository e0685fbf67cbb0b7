//! Page size limits and continuation tokens for list queries
//!
//! # Example
//!
//! ```rust
//! use items_service::repository::{ListOptions, DEFAULT_LIST_LIMIT};
//!
//! let options = ListOptions::default();
//! assert_eq!(options.effective_limit(), DEFAULT_LIST_LIMIT);
//!
//! let options = ListOptions::new(1_000);
//! assert_eq!(options.effective_limit(), 100);
//! ```

use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use super::error::{RepositoryError, RepositoryOperation};
use crate::models::Item;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Largest page a single list call returns
pub const MAX_LIST_LIMIT: u32 = 100;

/// Opaque position marker returned by a list call
///
/// Handlers pass it through untouched; only the adapter that issued a token
/// knows how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a token received from a client
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token that resumes a scan after the given item id
    pub fn after_key(id: &str) -> Self {
        Self(URL_SAFE_NO_PAD.encode(id.as_bytes()))
    }

    /// Recover the item id this token resumes after
    ///
    /// A token that was not issued by [`after_key`](Self::after_key) is
    /// rejected as invalid input.
    pub fn decode_key(&self) -> Result<String, RepositoryError> {
        URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                RepositoryError::invalid_input(
                    RepositoryOperation::List,
                    "invalid continuation token",
                )
            })
    }

    /// Token as sent on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameters of a list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Requested page size
    pub limit: u32,
    /// Where to resume, if continuing a previous listing
    pub continuation: Option<ContinuationToken>,
}

impl ListOptions {
    /// List with the given page size from the start of the table
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            continuation: None,
        }
    }

    /// Resume from a previously returned token
    #[must_use]
    pub fn with_continuation(mut self, token: ContinuationToken) -> Self {
        self.continuation = Some(token);
        self
    }

    /// Page size clamped to `1..=MAX_LIST_LIMIT`, zero meaning the default
    pub fn effective_limit(&self) -> u32 {
        match self.limit {
            0 => DEFAULT_LIST_LIMIT,
            limit => limit.min(MAX_LIST_LIMIT),
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_LIMIT)
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    /// Items in store order
    pub items: Vec<Item>,
    /// Present when the store has more items after this page
    pub next_token: Option<ContinuationToken>,
}

impl ListPage {
    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}
