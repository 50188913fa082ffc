use crate::{domain::session::UserSession, model::User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.user_id,
            email: value.email,
            name: value.name,
            role: value.role,
        }
    }
}

impl From<&UserSession> for UserResponse {
    fn from(value: &UserSession) -> Self {
        UserResponse {
            id: value.id,
            email: value.email.clone(),
            name: value.name.clone(),
            role: value.role.clone(),
        }
    }
}

/// The identity provider's view of an account, all this core ever needs from
/// the auth collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
}
