//! Product catalog REST service: CRUD over a single `products` table.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;

pub use app::{build_router, AppState};
