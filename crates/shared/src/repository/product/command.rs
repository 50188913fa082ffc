use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use tracing::{error, info, warn};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        product: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, stock, category, image_url,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING product_id, name, description, price, stock, category, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category.as_deref().map(|c| c.to_lowercase()))
        .bind(product.image_url.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", product.name, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            result.product_id, result.name
        );
        Ok(result)
    }

    async fn update_product(
        &self,
        product: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                stock = $5,
                category = $6,
                image_url = $7,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING product_id, name, description, price, stock, category, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category.as_deref().map(|c| c.to_lowercase()))
        .bind(product.image_url.as_deref())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", result.product_id);
        Ok(result)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to delete product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("✅ Product ID {} deleted", id);
        Ok(())
    }

    async fn decrement_stock(&self, product_id: i32, qty: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        // Conditional form so two concurrent checkouts cannot both take the
        // last units: the row only changes when enough stock remains.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2,
                updated_at = current_timestamp
            WHERE product_id = $1 AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(qty)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to decrease stock product {}: {:?}",
                product_id, e
            );
            RepositoryError::from(e)
        })?;

        if result.rows_affected() == 0 {
            warn!(
                "⚠️ Stock reservation lost for product ID {} (requested {})",
                product_id, qty
            );
            return Ok(false);
        }

        info!("✅ Decreased stock product ID {} by {}", product_id, qty);
        Ok(true)
    }
}
