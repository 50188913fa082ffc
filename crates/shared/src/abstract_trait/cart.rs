use crate::{
    domain::{
        requests::{
            AddCartItemRequest, ApplyVoucherRequest, ShippingInfoRequest, UpdateCartItemRequest,
        },
        responses::{ApiResponse, CartResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[async_trait]
pub trait CartServiceTrait {
    async fn view(&self, session_id: &str) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_item(
        &self,
        session_id: &str,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn update_item(
        &self,
        session_id: &str,
        product_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_item(
        &self,
        session_id: &str,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn apply_voucher(
        &self,
        session_id: &str,
        req: &ApplyVoucherRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn remove_voucher(
        &self,
        session_id: &str,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn save_shipping(
        &self,
        session_id: &str,
        req: &ShippingInfoRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
}
