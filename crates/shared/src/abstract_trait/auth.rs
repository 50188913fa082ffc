use crate::{
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login(
        &self,
        session_id: &str,
        req: &LoginRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn logout(&self, session_id: &str) -> Result<ApiResponse<()>, ServiceError>;
    async fn me(&self, session_id: &str) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
