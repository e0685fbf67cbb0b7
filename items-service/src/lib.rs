//! # items-service
//!
//! CRUD microservice for items stored in a key-value table.
//!
//! ## Features
//!
//! - **Validation**: name and description limits, status enum, typed errors
//! - **Error taxonomy**: every validation and storage failure maps to a stable
//!   `{type, code, message, details}` payload and HTTP status
//! - **Conditional writes**: create never overwrites, update and delete never
//!   resurrect; concurrency is left to the store
//! - **Storage**: DynamoDB (feature `dynamodb`, on by default) or in-memory
//! - **Middleware stack**: request tracking, panic recovery, body size limits,
//!   timeouts, compression, CORS
//! - **Graceful shutdown**: SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use items_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), InMemoryItemRepository::new());
//!
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

/// Commonly used items
pub mod prelude {
    pub use crate::config::{Config, MiddlewareConfig, ServiceConfig, StorageConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiResponse, ErrorCode, ErrorType};
    pub use crate::models::{CreateItemRequest, Item, ItemStatus, UpdateItemRequest};
    pub use crate::observability::init_tracing;
    #[cfg(feature = "dynamodb")]
    pub use crate::repository::DynamoDbItemRepository;
    pub use crate::repository::{
        InMemoryItemRepository, ItemRepository, RepositoryError, RequestContext,
    };
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
