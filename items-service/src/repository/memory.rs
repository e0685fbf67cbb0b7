//! In-process item store
//!
//! Used by tests and by local runs without a DynamoDB table. Items are kept
//! in id order; every check-then-write happens under one write lock, which
//! gives the same conditional semantics as the DynamoDB adapter.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::context::RequestContext;
use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{ContinuationToken, ListOptions, ListPage};
use super::traits::{require_id, ItemRepository, RepositoryResult};
use crate::models::{Item, ItemPatch};

/// Item store backed by an ordered map
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl InMemoryItemRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, ctx: &RequestContext, mut item: Item) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Create, async move {
            if item.id.is_empty() {
                item.id = Uuid::new_v4().to_string();
            }
            item.validate().map_err(|e| {
                RepositoryError::invalid_input(RepositoryOperation::Create, e.message())
                    .with_entity(item.id.clone())
            })?;

            let mut items = self.items.write().await;
            match items.entry(item.id.clone()) {
                Entry::Occupied(_) => Err(RepositoryError::already_exists(item.id)),
                Entry::Vacant(slot) => {
                    slot.insert(item.clone());
                    Ok(item)
                }
            }
        })
        .await
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Get, async {
            require_id(RepositoryOperation::Get, id)?;
            self.items
                .read()
                .await
                .get(id)
                .cloned()
                .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Get, id))
        })
        .await
    }

    async fn list(&self, ctx: &RequestContext, options: &ListOptions) -> RepositoryResult<ListPage> {
        ctx.run(RepositoryOperation::List, async {
            let start = match &options.continuation {
                Some(token) => Bound::Excluded(token.decode_key()?),
                None => Bound::Unbounded,
            };
            let limit = options.effective_limit() as usize;

            let items = self.items.read().await;
            let mut page: Vec<Item> = items
                .range::<String, _>((start, Bound::Unbounded))
                .map(|(_, item)| item.clone())
                .take(limit + 1)
                .collect();

            let next_token = if page.len() > limit {
                page.truncate(limit);
                page.last().map(|item| ContinuationToken::after_key(&item.id))
            } else {
                None
            };

            Ok(ListPage {
                items: page,
                next_token,
            })
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: &ItemPatch,
    ) -> RepositoryResult<Item> {
        ctx.run(RepositoryOperation::Update, async {
            require_id(RepositoryOperation::Update, id)?;
            let mut items = self.items.write().await;
            let item = items
                .get_mut(id)
                .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Update, id))?;
            item.apply(patch);
            Ok(item.clone())
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> RepositoryResult<()> {
        ctx.run(RepositoryOperation::Delete, async {
            require_id(RepositoryOperation::Delete, id)?;
            self.items
                .write()
                .await
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Delete, id))
        })
        .await
    }

    async fn health_check(&self, _ctx: &RequestContext) -> RepositoryResult<()> {
        Ok(())
    }
}
