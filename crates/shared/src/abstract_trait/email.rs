use crate::{domain::requests::EmailRequest, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynEmailService = Arc<dyn EmailServiceTrait + Send + Sync>;

#[async_trait]
pub trait EmailServiceTrait {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError>;
}
