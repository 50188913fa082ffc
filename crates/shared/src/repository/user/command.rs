use crate::{
    abstract_trait::{NewUser, UserCommandRepositoryTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, user: &NewUser) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, UserModel>(
            r#"
            INSERT INTO users (provider_user_id, name, email, role, provider,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING user_id, provider_user_id, name, email, role, provider,
                      created_at, updated_at
            "#,
        )
        .bind(&user.provider_user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(&user.provider)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {:?}", user.email, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created user ID {} ({})", result.user_id, result.email);
        Ok(result)
    }
}
