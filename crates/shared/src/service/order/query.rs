use crate::{
    abstract_trait::{
        DynOrderQueryRepository, DynProductQueryRepository, OrderQueryServiceTrait,
    },
    domain::{
        requests::FindAllOrders,
        responses::{
            ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderItemResponse,
            OrderResponse, Pagination,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::{Order as OrderModel, Product as ProductModel},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{error, info};

pub struct OrderQueryService {
    order_query: DynOrderQueryRepository,
    product_query: DynProductQueryRepository,
}

impl OrderQueryService {
    pub fn new(
        order_query: DynOrderQueryRepository,
        product_query: DynProductQueryRepository,
    ) -> Self {
        Self {
            order_query,
            product_query,
        }
    }

    /// Attach product name/image to each line so history entries stay legible
    /// even though order items only store the product id.
    async fn detail(&self, order: OrderModel) -> Result<OrderDetailResponse, ServiceError> {
        let items = self.order_query.find_items(order.order_id).await?;

        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<i32, ProductModel> = self
            .product_query
            .find_by_ids(&product_ids)
            .await
            .unwrap_or_else(|e| {
                error!("❌ Failed to enrich order items with products: {e:?}");
                Vec::new()
            })
            .into_iter()
            .map(|p| (p.product_id, p))
            .collect();

        let items = items
            .into_iter()
            .map(|item| {
                let mut response = OrderItemResponse::from(item);
                if let Some(product) = products.get(&response.product_id) {
                    response.name = Some(product.name.clone());
                    response.image_url = product.image_url.clone();
                }
                response
            })
            .collect();

        Ok(OrderDetailResponse {
            order: OrderResponse::from(order),
            items,
        })
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn order_history(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError> {
        info!("🔍 Fetching order history for user ID {user_id}");

        let orders = self.order_query.find_by_user(user_id).await?;

        let mut history = Vec::with_capacity(orders.len());
        for order in orders {
            history.push(self.detail(order).await?);
        }

        Ok(ApiResponse::success(
            "Order history fetched successfully",
            history,
        ))
    }

    async fn order_detail(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError> {
        let order = self
            .order_query
            .find_by_id_for_user(order_id, user_id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        Ok(ApiResponse::success(
            "Order fetched successfully",
            self.detail(order).await?,
        ))
    }

    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (orders, total) = self.order_query.find_all(req).await?;

        Ok(ApiResponsePagination::success(
            "Orders fetched successfully",
            orders.into_iter().map(OrderResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }
}
