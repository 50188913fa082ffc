use crate::{domain::session::SessionData, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

/// Keyed store for the per-browser session document. Loading a key that was
/// never written (or has expired) yields a fresh default document.
#[async_trait]
pub trait SessionStoreTrait {
    async fn load(&self, session_id: &str) -> Result<SessionData, ServiceError>;
    async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), ServiceError>;
    async fn delete(&self, session_id: &str) -> Result<(), ServiceError>;
}
