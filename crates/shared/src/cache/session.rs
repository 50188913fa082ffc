use crate::{
    abstract_trait::SessionStoreTrait, cache::CacheStore, domain::session::SessionData,
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Duration;

const SESSION_TTL_MINUTES: i64 = 30;

/// Session documents live in Redis under `session:{id}` with a sliding TTL.
#[derive(Clone)]
pub struct SessionStore {
    cache: CacheStore,
}

impl SessionStore {
    pub fn new(cache: CacheStore) -> Self {
        Self { cache }
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }

    fn ttl() -> Duration {
        Duration::minutes(SESSION_TTL_MINUTES)
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn load(&self, session_id: &str) -> Result<SessionData, ServiceError> {
        let key = Self::key(session_id);

        match self.cache.get_from_cache::<SessionData>(&key).await {
            Some(data) => {
                self.cache.refresh_ttl(&key, Self::ttl()).await;
                Ok(data)
            }
            None => Ok(SessionData::default()),
        }
    }

    async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), ServiceError> {
        let key = Self::key(session_id);

        if self.cache.set_to_cache(&key, data, Self::ttl()).await {
            Ok(())
        } else {
            Err(ServiceError::Internal(format!(
                "Failed to persist session {session_id}"
            )))
        }
    }

    async fn delete(&self, session_id: &str) -> Result<(), ServiceError> {
        self.cache.delete_from_cache(&Self::key(session_id)).await;
        Ok(())
    }
}
