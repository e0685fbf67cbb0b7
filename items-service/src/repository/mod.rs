//! Storage port and adapters
//!
//! - [`ItemRepository`]: the async trait handlers depend on
//! - [`RepositoryError`]: backend-neutral failure taxonomy
//! - [`RequestContext`]: request id and deadline for each call
//! - [`ListOptions`] / [`ListPage`] / [`ContinuationToken`]: paging
//! - [`InMemoryItemRepository`]: ordered in-process store
//! - `DynamoDbItemRepository`: DynamoDB table store (feature `dynamodb`)

mod context;
#[cfg(feature = "dynamodb")]
mod dynamodb;
mod error;
mod memory;
mod pagination;
mod traits;

pub use context::RequestContext;
#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbItemRepository;
pub use error::{
    mentions_throughput, RepositoryError, RepositoryErrorKind, RepositoryOperation,
    THROUGHPUT_EXCEEDED_MESSAGE,
};
pub use memory::InMemoryItemRepository;
pub use pagination::{
    ContinuationToken, ListOptions, ListPage, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
pub use traits::{ItemRepository, RepositoryResult};
