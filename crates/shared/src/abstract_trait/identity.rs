use crate::{domain::responses::ProviderUser, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynIdentityProvider = Arc<dyn IdentityProviderTrait + Send + Sync>;

/// The external auth service, reduced to what the storefront needs: an account
/// id and email back from sign-up and password sign-in.
#[async_trait]
pub trait IdentityProviderTrait {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderUser, ServiceError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderUser, ServiceError>;
}
