use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::{
        requests::{NewOrder, NewOrderItem},
        status::OrderStatus,
    },
    errors::RepositoryError,
    model::Order as OrderModel,
};
use async_trait::async_trait;
use tracing::{error, info};

const ORDER_RETURNING: &str = "order_id, user_id, total, status, discount_amount, shipping_cost, \
                               voucher_code, invoice_id, invoice_url, created_at, updated_at";

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            INSERT INTO orders (user_id, total, status, discount_amount, shipping_cost,
                                voucher_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING {ORDER_RETURNING}
            "#
        ))
        .bind(order.user_id)
        .bind(order.total)
        .bind(OrderStatus::Pending.as_str())
        .bind(order.discount_amount)
        .bind(order.shipping_cost)
        .bind(order.voucher_code.as_deref())
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                order.user_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} (user {}, total {})",
            result.order_id, result.user_id, result.total
        );
        Ok(result)
    }

    async fn add_order_items(
        &self,
        order_id: i32,
        items: &[NewOrderItem],
    ) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!(
                    "❌ Failed to add item (product {}) to order {}: {:?}",
                    item.product_id, order_id, e
                );
                RepositoryError::from(e)
            })?;
        }

        info!("✅ Added {} item(s) to order ID {}", items.len(), order_id);
        Ok(())
    }

    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = current_timestamp
            WHERE order_id = $1
            RETURNING {ORDER_RETURNING}
            "#
        ))
        .bind(order_id)
        .bind(status.as_str())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to update status of order {}: {:?}",
                order_id, e
            );
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Order ID {} status set to {}", order_id, status);
        Ok(result)
    }

    async fn update_status_and_invoice(
        &self,
        order_id: i32,
        status: OrderStatus,
        invoice_id: Option<&str>,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                invoice_id = COALESCE($3, invoice_id),
                updated_at = current_timestamp
            WHERE order_id = $1
            RETURNING {ORDER_RETURNING}
            "#
        ))
        .bind(order_id)
        .bind(status.as_str())
        .bind(invoice_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to update status/invoice of order {}: {:?}",
                order_id, e
            );
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Order ID {} status set to {}", order_id, status);
        Ok(result)
    }

    async fn update_invoice(
        &self,
        order_id: i32,
        invoice_id: &str,
        invoice_url: &str,
    ) -> Result<OrderModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            UPDATE orders
            SET invoice_id = $2,
                invoice_url = $3,
                updated_at = current_timestamp
            WHERE order_id = $1
            RETURNING {ORDER_RETURNING}
            "#
        ))
        .bind(order_id)
        .bind(invoice_id)
        .bind(invoice_url)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to attach invoice to order {}: {:?}",
                order_id, e
            );
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!(
            "✅ Attached invoice {} to order ID {}",
            invoice_id, order_id
        );
        Ok(result)
    }
}
