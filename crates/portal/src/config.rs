use anyhow::{Context, Result, anyhow};
use shared::config::RedisConfig;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// How long a guard waits for the session to settle before answering
    /// with what it has.
    pub resolve_wait: Duration,
    pub partner_code_ttl: Duration,
    pub secure_cookies: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            resolve_wait: Duration::from_millis(400),
            partner_code_ttl: Duration::from_secs(3600),
            secure_cookies: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub redis: RedisConfig,
    pub guard: GuardConfig,
    pub otel_endpoint: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .context("Missing environment variable: AUTH_JWT_SECRET")?;

        let port = std::env::var("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        // redis
        let redis_host =
            std::env::var("REDIS_HOST").context("Missing environment variable: REDIS_HOST")?;
        let redis_port = std::env::var("REDIS_PORT")
            .context("Missing environment variable: REDIS_PORT")?
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let redis_db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let redis_password = std::env::var("REDIS_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        // guards
        let defaults = GuardConfig::default();
        let resolve_wait = match std::env::var("GUARD_RESOLVE_WAIT_MS") {
            Ok(v) => Duration::from_millis(
                v.parse::<u64>()
                    .context("GUARD_RESOLVE_WAIT_MS must be a valid integer")?,
            ),
            Err(_) => defaults.resolve_wait,
        };
        let partner_code_ttl = match std::env::var("PARTNER_CODE_CACHE_TTL_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse::<u64>()
                    .context("PARTNER_CODE_CACHE_TTL_SECS must be a valid integer")?,
            ),
            Err(_) => defaults.partner_code_ttl,
        };
        let secure_cookies = match std::env::var("SECURE_COOKIES") {
            Ok(v) => parse_bool("SECURE_COOKIES", &v)?,
            Err(_) => defaults.secure_cookies,
        };

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            redis: RedisConfig::new(redis_host, redis_port, redis_db, redis_password),
            guard: GuardConfig {
                resolve_wait,
                partner_code_ttl,
                secure_cookies,
            },
            otel_endpoint,
        })
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}
