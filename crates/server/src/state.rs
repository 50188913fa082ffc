use anyhow::{Context, Result};
use shared::{
    abstract_trait::{DynEmailService, DynIdentityProvider, DynSessionStore},
    cache::{CacheStore, SessionStore},
    config::{Config, ConnectionManager, RedisClient},
    di::{DependenciesInject, DependenciesInjectDeps},
    service::{EmailService, HttpIdentityProvider, PaymentGateway},
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub session_store: DynSessionStore,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = ConnectionManager::new_pool(&config.database_url)
            .await
            .context("Failed to connect to the database")?;

        info!("Initializing Redis connection");
        let redis = RedisClient::new(&config.redis)
            .await
            .context("Failed to connect to Redis")?;
        redis.ping().await.context("Failed to ping Redis server")?;

        let cache = CacheStore::new(redis.pool.clone());
        let session_store = Arc::new(SessionStore::new(cache)) as DynSessionStore;

        let gateway = PaymentGateway::from_config(&config.payment)
            .context("Failed to initialize payment gateway client")?;

        let identity = Arc::new(
            HttpIdentityProvider::new(&config.identity)
                .context("Failed to initialize identity provider client")?,
        ) as DynIdentityProvider;

        let email = Arc::new(
            EmailService::new(&config.email).context("Failed to initialize SMTP mailer")?,
        ) as DynEmailService;

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            pool,
            session_store: session_store.clone(),
            gateway,
            identity,
            email,
            public_base_url: config.public_base_url.clone(),
        });

        Ok(Self {
            di_container,
            session_store,
        })
    }
}
