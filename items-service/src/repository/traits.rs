//! Storage port for items
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) so adapters can be
//! written with plain `async fn` and no `async_trait`.
//!
//! # Example
//!
//! ```rust
//! use items_service::models::Item;
//! use items_service::repository::{InMemoryItemRepository, ItemRepository, RequestContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repo = InMemoryItemRepository::new();
//! let ctx = RequestContext::new();
//!
//! let created = repo.create(&ctx, Item::new("Widget", "")).await.unwrap();
//! let fetched = repo.get(&ctx, &created.id).await.unwrap();
//! assert_eq!(created, fetched);
//! # }
//! ```

use std::future::Future;

use super::context::RequestContext;
use super::error::RepositoryError;
use super::pagination::{ListOptions, ListPage};
use crate::models::{Item, ItemPatch};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Single-item operations against a key-value store
///
/// Every write is conditioned on existence, so concurrent requests never
/// overwrite each other: create fails with `AlreadyExists` if the id is
/// taken, update and delete fail with `NotFound` if it is absent.
pub trait ItemRepository: Send + Sync + 'static {
    /// Store a new item
    ///
    /// Assigns a UUIDv4 when `item.id` is empty, validates the item, and
    /// writes it only if no item with that id exists.
    fn create(
        &self,
        ctx: &RequestContext,
        item: Item,
    ) -> impl Future<Output = RepositoryResult<Item>> + Send;

    /// Fetch one item by id
    fn get(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> impl Future<Output = RepositoryResult<Item>> + Send;

    /// Fetch one page of items
    ///
    /// The limit is clamped to `1..=100`. `next_token` is set whenever the
    /// store reports more data.
    fn list(
        &self,
        ctx: &RequestContext,
        options: &ListOptions,
    ) -> impl Future<Output = RepositoryResult<ListPage>> + Send;

    /// Apply a patch to an existing item and return the stored result
    ///
    /// `updated_at` is refreshed even when the patch is empty.
    fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: &ItemPatch,
    ) -> impl Future<Output = RepositoryResult<Item>> + Send;

    /// Remove an existing item
    fn delete(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Check that the backing store is reachable
    fn health_check(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// Reject blank ids before they reach the store
pub(crate) fn require_id(
    operation: super::error::RepositoryOperation,
    id: &str,
) -> RepositoryResult<()> {
    if id.trim().is_empty() {
        return Err(RepositoryError::invalid_input(
            operation,
            "item id is required",
        ));
    }
    Ok(())
}
