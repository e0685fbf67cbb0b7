//! Item CRUD handlers
//!
//! Each handler parses and validates its input, calls the storage port once
//! and answers with the uniform envelope. Extractor rejections and storage
//! failures are both mapped through [`ApiError`]'s `From` impls, so clients
//! never see a plain-text error body.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, Method, StatusCode, Uri},
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiOperation};
use super::query::ListQuery;
use super::response::{ApiResponse, DeleteAck, ListItemsData};
use crate::middleware::REQUEST_ID_HEADER;
use crate::models::{CreateItemRequest, Item, UpdateItemRequest};
use crate::repository::{ItemRepository, RequestContext};
use crate::state::AppState;

/// `POST /items`
pub async fn create_item<R: ItemRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<Item>, ApiError> {
    let ctx = request_context(&state, &headers);

    let body = extracted(body, ApiOperation::Create)?;
    let request: CreateItemRequest = parse_body(&body, ApiOperation::Create)?;
    request
        .validate()
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?;

    let item = state.repository().create(&ctx, request.into_item()).await?;

    tracing::info!(
        item_id = %item.id,
        request_id = %ctx.request_id(),
        "Item created"
    );
    Ok(ApiResponse::success(item).with_status(StatusCode::CREATED))
}

/// `GET /items/{id}`
pub async fn get_item<R: ItemRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<ApiResponse<Item>, ApiError> {
    let ctx = request_context(&state, &headers);
    let Path(id) = extracted(path, ApiOperation::Get)?;
    let id = require_item_id(&id, ApiOperation::Get)?;

    let item = state.repository().get(&ctx, id).await?;

    tracing::info!(item_id = %item.id, request_id = %ctx.request_id(), "Item retrieved");
    Ok(ApiResponse::success(item))
}

/// `GET /items?limit=N&next_token=T`
pub async fn list_items<R: ItemRepository>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<ApiResponse<ListItemsData>, ApiError> {
    let ctx = request_context(&state, &headers);
    let Query(query) = extracted(query, ApiOperation::List)?;
    let options = query
        .to_options()
        .map_err(|e| e.with_operation(ApiOperation::List))?;

    let page = state.repository().list(&ctx, &options).await?;
    let data = ListItemsData::from(page);

    tracing::info!(
        count = data.count,
        has_more = data.has_more,
        request_id = %ctx.request_id(),
        "Items listed"
    );
    Ok(ApiResponse::success(data))
}

/// `PUT /items/{id}`
pub async fn update_item<R: ItemRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<ApiResponse<Item>, ApiError> {
    let ctx = request_context(&state, &headers);
    let Path(id) = extracted(path, ApiOperation::Update)?;
    let id = require_item_id(&id, ApiOperation::Update)?;

    let body = extracted(body, ApiOperation::Update)?;
    let request: UpdateItemRequest = parse_body(&body, ApiOperation::Update)?;
    let patch = request
        .validate()
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;

    let item = state.repository().update(&ctx, id, &patch).await?;

    tracing::info!(item_id = %item.id, request_id = %ctx.request_id(), "Item updated");
    Ok(ApiResponse::success(item))
}

/// `DELETE /items/{id}`
pub async fn delete_item<R: ItemRepository>(
    State(state): State<AppState<R>>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<ApiResponse<DeleteAck>, ApiError> {
    let ctx = request_context(&state, &headers);
    let Path(id) = extracted(path, ApiOperation::Delete)?;
    let id = require_item_id(&id, ApiOperation::Delete)?;

    state.repository().delete(&ctx, id).await?;

    tracing::info!(item_id = %id, request_id = %ctx.request_id(), "Item deleted");
    Ok(ApiResponse::success(DeleteAck::new(id)))
}

/// `/items/` with an empty id segment
pub async fn missing_item_id() -> ApiError {
    ApiError::missing_parameter("Item ID")
}

/// Fallback for paths no route matches
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::route_not_found(&method, &uri)
}

/// Fallback for known paths called with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(&method, &uri)
}

pub(super) fn request_context<R: ItemRepository>(state: &AppState<R>, headers: &HeaderMap) -> RequestContext {
    let ctx = RequestContext::new().with_timeout(state.config().storage.operation_timeout());
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(request_id) => ctx.with_request_id(request_id),
        None => ctx,
    }
}

fn require_item_id(id: &str, operation: ApiOperation) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::missing_parameter("Item ID").with_operation(operation));
    }
    Ok(id)
}

fn extracted<T, E>(extracted: Result<T, E>, operation: ApiOperation) -> Result<T, ApiError>
where
    ApiError: From<E>,
{
    extracted.map_err(|rejection| ApiError::from(rejection).with_operation(operation))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes, operation: ApiOperation) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_json(e).with_operation(operation))
}
