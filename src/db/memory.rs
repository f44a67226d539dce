use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::error::AppResult;
use crate::models::{Product, ProductFilter, ProductPayload};

#[derive(Debug, Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// In-process product store for tests and database-less runs.
/// Ids start at 1 and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let product = Product::from_payload(table.next_id, payload);
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find(&self, id: i32) -> AppResult<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, payload: ProductPayload) -> AppResult<Option<Product>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|existing| {
            *existing = Product::from_payload(id, payload);
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
