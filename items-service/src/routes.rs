//! Router assembly

use axum::{routing::get, Router};

use crate::handlers::{
    create_item, delete_item, get_item, health, health_db, list_items, method_not_allowed,
    missing_item_id, route_not_found, update_item,
};
use crate::repository::ItemRepository;
use crate::state::AppState;

/// Build the items API router
///
/// Middleware is applied by [`Server`](crate::server::Server), so the bare
/// router can be driven directly in tests. Unknown paths and unsupported
/// methods answer with the error envelope rather than an empty body.
pub fn router<R: ItemRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route("/", get(health::<R>))
        .route("/health", get(health::<R>))
        .route("/health/db", get(health_db::<R>))
        .route("/items", get(list_items::<R>).post(create_item::<R>))
        .route(
            "/items/",
            get(missing_item_id)
                .put(missing_item_id)
                .delete(missing_item_id),
        )
        .route(
            "/items/{id}",
            get(get_item::<R>)
                .put(update_item::<R>)
                .delete(delete_item::<R>),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(state)
}
