mod app;
mod database;
mod redis;

pub use self::app::{Config, EmailConfig, IdentityConfig, PaymentConfig, RedisSettings};
pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::redis::RedisClient;
