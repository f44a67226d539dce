mod memory;
mod postgres;

use async_trait::async_trait;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

use crate::error::AppResult;
use crate::models::{Product, ProductFilter, ProductPayload};

/// Persistence seam for products. Each method is a single store operation.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return it with its assigned id.
    async fn create(&self, payload: ProductPayload) -> AppResult<Product>;

    async fn find(&self, id: i32) -> AppResult<Option<Product>>;

    /// All products matching `filter`, in id order.
    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Overwrite every mutable field. `None` when no product has `id`.
    async fn update(&self, id: i32, payload: ProductPayload) -> AppResult<Option<Product>>;

    /// Remove a product, returning whether one was there.
    async fn delete(&self, id: i32) -> AppResult<bool>;
}
