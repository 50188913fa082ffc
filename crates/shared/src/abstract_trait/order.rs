use crate::{
    domain::{
        requests::{FindAllOrders, NewOrder, NewOrderItem, UpdateOrderStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, OrderDetailResponse, OrderResponse},
        status::OrderStatus,
    },
    errors::{RepositoryError, ServiceError},
    model::{Order as OrderModel, OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_id_for_user(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_invoice_id(
        &self,
        invoice_id: &str,
    ) -> Result<Option<OrderModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError>;
    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItemModel>, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError>;
    async fn add_order_items(
        &self,
        order_id: i32,
        items: &[NewOrderItem],
    ) -> Result<(), RepositoryError>;
    async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError>;
    async fn update_status_and_invoice(
        &self,
        order_id: i32,
        status: OrderStatus,
        invoice_id: Option<&str>,
    ) -> Result<OrderModel, RepositoryError>;
    async fn update_invoice(
        &self,
        order_id: i32,
        invoice_id: &str,
        invoice_url: &str,
    ) -> Result<OrderModel, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn order_history(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderDetailResponse>>, ServiceError>;
    async fn order_detail(
        &self,
        order_id: i32,
        user_id: i32,
    ) -> Result<ApiResponse<OrderDetailResponse>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn update_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
