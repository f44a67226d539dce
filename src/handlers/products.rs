use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::{
    app::AppState,
    error::{AppError, AppResult},
    models::{Product, ProductPayload, ProductQuery},
};

fn not_found(id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("Product with id '{}' was not found.", id))
}

/// Only integer ids name a product; anything else is an unknown resource.
fn product_id(raw: Result<Path<String>, PathRejection>) -> AppResult<i32> {
    let Path(raw) = raw?;
    raw.parse().map_err(|_| not_found(raw))
}

/// Read URL of a single product; used for the `Location` header.
pub fn product_location(id: i32) -> String {
    format!("/products/{}", id)
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let products = state.repo.list(&filter).await?;

    info!(?filter, count = products.len(), "Listed products");

    Ok(Json(products))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body?;
    let payload = ProductPayload::from_json(&body)?;

    let product = state.repo.create(payload).await?;

    info!(id = product.id, name = %product.name, "Created product");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, product_location(product.id))],
        Json(product),
    ))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Product>> {
    let id = product_id(id)?;

    let product = state.repo.find(id).await?.ok_or_else(|| not_found(id))?;

    info!(id, "Fetched product");

    Ok(Json(product))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let id = product_id(id)?;

    // An unknown id outranks a bad body; the lookup only runs on the error path.
    let payload = match body
        .map_err(AppError::from)
        .and_then(|Json(body)| ProductPayload::from_json(&body))
    {
        Ok(payload) => payload,
        Err(err @ AppError::Validation(_)) => {
            if state.repo.find(id).await?.is_none() {
                return Err(not_found(id));
            }
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    let product = state
        .repo
        .update(id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!(id, name = %product.name, "Updated product");

    Ok(Json(product))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = product_id(id)?;

    let existed = state.repo.delete(id).await?;

    info!(id, existed, "Deleted product");

    Ok(StatusCode::NO_CONTENT)
}
