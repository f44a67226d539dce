use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::ProductRepository;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Product, ProductFilter, ProductPayload};

/// Row shape of the `products` table; category is stored as its name.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    available: bool,
    category: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = Category::from_name(&row.category).map_err(|e| {
            AppError::Internal(format!("product {} has a corrupt category: {}", row.id, e))
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            available: row.available,
            category,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, payload: ProductPayload) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, available, category
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.available)
        .bind(payload.category.name())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find(&self, id: i32) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, available, category
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let (name, category, available) = match filter {
            ProductFilter::All => (None, None, None),
            ProductFilter::Name(name) => (Some(name.as_str()), None, None),
            ProductFilter::Category(category) => (None, Some(category.name()), None),
            ProductFilter::Available(available) => (None, None, Some(*available)),
        };

        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, available, category
            FROM products
            WHERE ($1::text IS NULL OR name = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::boolean IS NULL OR available = $3)
            ORDER BY id ASC
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(available)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, id: i32, payload: ProductPayload) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name        = $1,
                description = $2,
                price       = $3,
                available   = $4,
                category    = $5
            WHERE id = $6
            RETURNING id, name, description, price, available, category
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.available)
        .bind(payload.category.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Product::try_from)
        .transpose()
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
