use crate::{errors::RepositoryError, model::User as UserModel};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub provider_user_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub provider: String,
}

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError>;
    async fn find_by_provider_id(
        &self,
        provider_user_id: &str,
    ) -> Result<Option<UserModel>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, user: &NewUser) -> Result<UserModel, RepositoryError>;
}
