use crate::{
    config::{Config, GuardConfig},
    di::DependenciesInject,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    config::{ConnectionManager, RedisClient},
    utils::{GuardMetrics, Metrics},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub guard: GuardConfig,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Metrics,
    pub guard_metrics: GuardMetrics,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = ConnectionManager::new_pool(&config.database_url)
            .await
            .context("Failed to connect to database")?;

        info!("Initializing Redis connection for the portal");
        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
        redis.ping().await.context("Failed to ping Redis server")?;

        let di_container = DependenciesInject::new(
            pool,
            redis.pool.clone(),
            &config.jwt_secret,
            config.guard.partner_code_ttl,
        )
        .context("Failed to initialize dependency injection container")?;

        Ok(Self::from_parts(di_container, config.guard.clone()))
    }

    /// Builds the state around an existing container; registers metrics.
    pub fn from_parts(di_container: DependenciesInject, guard: GuardConfig) -> Self {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        let guard_metrics = GuardMetrics::default();

        metrics.register(&mut registry);
        guard_metrics.register(&mut registry);

        Self {
            di_container,
            guard,
            registry: Arc::new(Mutex::new(registry)),
            metrics,
            guard_metrics,
        }
    }
}
