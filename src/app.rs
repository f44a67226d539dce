use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::ProductRepository;
use crate::handlers;

/// Shared application state; cloning only bumps the repository refcount.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(repo: impl ProductRepository + 'static) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Index & health ──────────────────────────────────────────────────
        .route(
            "/",
            get(handlers::index).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )

        // ── Products CRUD ───────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products)
                .post(handlers::products::create_product)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
