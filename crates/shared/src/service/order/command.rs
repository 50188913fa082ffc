use crate::{
    abstract_trait::{DynOrderCommandRepository, OrderCommandServiceTrait},
    domain::{
        requests::UpdateOrderStatusRequest,
        responses::{ApiResponse, OrderResponse},
        status::OrderStatus,
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use tracing::info;

pub struct OrderCommandService {
    command: DynOrderCommandRepository,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository) -> Self {
        Self { command }
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn update_status(
        &self,
        order_id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let status = OrderStatus::parse(&req.status).ok_or_else(|| {
            ServiceError::Validation(vec![format!("Unknown order status '{}'", req.status)])
        })?;

        let order = self.command.update_status(order_id, status).await?;

        info!("🔄 Order ID {} status set to {} by admin", order_id, status);

        Ok(ApiResponse::success(
            "Order status updated successfully",
            OrderResponse::from(order),
        ))
    }
}
