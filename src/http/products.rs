//! Product API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    middleware,
    routing::{post, put},
    Extension, Json, Router,
};
use serde_json::{json, Value};

use crate::admin::auth::require_admin;
use crate::catalog::{validate_product, Product};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::security::Session;
use crate::store::{ProductStore, StoreError};

/// `/api/products` routes. Mutating methods carry the session check; `GET`
/// is added after the layer so the listing stays public.
pub fn product_routes(state: &AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state.clone(), require_admin);
    Router::new()
        .route(
            "/api/products",
            post(create_product)
                .route_layer(auth.clone())
                .get(list_products),
        )
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product).route_layer(auth),
        )
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = with_store(&state, "Failed to load products", |store| store.list()).await?;
    Ok(Json(products))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let draft = validate_product(&parse_body(&body))
        .ok_or(ApiError::InvalidPayload)?
        .without_id();

    let product = with_store(&state, "Failed to create product", move |store| store.save(&draft)).await?;
    tracing::info!(id = product.id, admin = %session.username, "Product created");
    Ok(Json(product))
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id).filter(|id| *id > 0).ok_or(ApiError::InvalidId)?;
    let draft = validate_product(&parse_body(&body))
        .ok_or(ApiError::InvalidPayload)?
        .with_id(id);

    let product = with_store(&state, "Failed to update product", move |store| store.save(&draft)).await?;
    tracing::info!(id, admin = %session.username, "Product updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&raw_id).ok_or(ApiError::InvalidId)?;

    let removed = with_store(&state, "Failed to delete product", move |store| store.delete(id)).await?;
    if !removed {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, admin = %session.username, "Product deleted");
    Ok(Json(json!({ "success": true })))
}

/// Malformed or empty bodies read as `null`, which the validator rejects.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Run a blocking store operation off the async workers.
async fn with_store<T, F>(state: &AppState, failure: &'static str, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&ProductStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ApiError::Internal {
            message: failure,
            detail: e.to_string(),
        })?
        .map_err(|source| ApiError::storage(failure, source))
}
