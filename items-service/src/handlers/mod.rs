//! HTTP handlers for the items API
//!
//! - **Error taxonomy**: [`ApiError`] with [`ErrorType`] and [`ErrorCode`],
//!   mapped from validation and storage failures, status derived from both
//! - **Envelope**: [`ApiResponse`] with `{success, data?, error?}`
//! - **CRUD**: [`create_item`], [`get_item`], [`list_items`],
//!   [`update_item`], [`delete_item`]
//! - **Health**: [`health`] and [`health_db`]
//! - **Fallbacks**: [`route_not_found`] and [`method_not_allowed`] keep
//!   unmatched requests inside the envelope
//!
//! Handlers are generic over [`ItemRepository`](crate::repository::ItemRepository)
//! and take their dependencies from [`AppState`](crate::state::AppState).

mod error;
mod health;
mod items;
mod query;
mod response;

pub use error::{ApiError, ApiOperation, ErrorCode, ErrorType};
pub use health::{health, health_db};
pub use items::{
    create_item, delete_item, get_item, list_items, method_not_allowed, missing_item_id,
    route_not_found, update_item,
};
pub use query::ListQuery;
pub use response::{ApiResponse, DeleteAck, ErrorInfo, HealthStatus, ListItemsData};
