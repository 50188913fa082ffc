use crate::config::app::RedisSettings;
use anyhow::{Context, Result};
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use tracing::info;

#[derive(Clone)]
pub struct RedisClient {
    pub pool: Pool,
}

impl RedisClient {
    pub async fn new(settings: &RedisSettings) -> Result<Self> {
        info!("Creating redis connection pool");

        let url = match &settings.password {
            Some(pw) => format!(
                "redis://:{}@{}:{}/{}",
                pw, settings.host, settings.port, settings.db
            ),
            None => format!(
                "redis://{}:{}/{}",
                settings.host, settings.port, settings.db
            ),
        };

        let pool = PoolConfig::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis pool")?;

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.get().await.context("Failed to get redis connection")?;

        info!("Pinging redis");

        let _: () = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Failed to ping redis server")?;

        info!("Pinged redis");

        Ok(())
    }
}
