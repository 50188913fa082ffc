use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_address: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_user =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_server =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let from_address = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| "no-reply@storefront.local".to_string());

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from_address,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

impl RedisSettings {
    pub fn init() -> Result<Self> {
        let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let password = std::env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty());

        Ok(Self {
            host,
            port,
            db,
            password,
        })
    }
}

/// Hosted-invoice gateway settings. The API key is optional on purpose: without
/// it the checkout flow falls back to the pending-demo path instead of calling
/// out to the gateway.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl PaymentConfig {
    pub fn init() -> Result<Self> {
        let api_key = std::env::var("PAYMENT_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        let base_url = std::env::var("PAYMENT_BASE_URL")
            .unwrap_or_else(|_| "https://api.xendit.co".to_string());

        Ok(Self { api_key, base_url })
    }
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: String,
}

impl IdentityConfig {
    pub fn init() -> Result<Self> {
        let base_url = std::env::var("IDENTITY_BASE_URL")
            .context("Missing environment variable: IDENTITY_BASE_URL")?;
        let api_key = std::env::var("IDENTITY_API_KEY")
            .context("Missing environment variable: IDENTITY_API_KEY")?;

        Ok(Self { base_url, api_key })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Externally reachable base URL, used to build payment redirect targets.
    pub public_base_url: String,
    pub redis: RedisSettings,
    pub email: EmailConfig,
    pub payment: PaymentConfig,
    pub identity: IdentityConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;

        let port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let redis = RedisSettings::init().context("failed redis config")?;
        let email = EmailConfig::init().context("failed email config")?;
        let payment = PaymentConfig::init().context("failed payment config")?;
        let identity = IdentityConfig::init().context("failed identity config")?;

        Ok(Self {
            database_url,
            port,
            public_base_url,
            redis,
            email,
            payment,
            identity,
        })
    }
}
