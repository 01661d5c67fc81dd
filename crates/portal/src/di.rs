use anyhow::{Context, Result};
use deadpool_redis::Pool;
use shared::{
    abstract_trait::{
        DynAppUserDirectory, DynAppUserRepository, DynAuthProvider, DynPartnerRepository,
        DynSessionRevocation,
    },
    cache::{CacheStore, SessionRevocationStore},
    config::{ConnectionPool, JwtConfig},
    repository::{AppUserRepository, PartnerRepository},
    service::{DirectoryService, JwtAuthProvider},
};
use std::{sync::Arc, time::Duration};

use crate::session::TenantResolver;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth: DynAuthProvider,
    pub directory: DynAppUserDirectory,
    pub tenants: Arc<TenantResolver>,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth", &"DynAuthProvider")
            .field("directory", &"DynAppUserDirectory")
            .field("tenants", &"TenantResolver")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(
        pool: ConnectionPool,
        redis: Pool,
        jwt_secret: &str,
        partner_code_ttl: Duration,
    ) -> Result<Self> {
        let revocations: DynSessionRevocation =
            Arc::new(SessionRevocationStore::new(redis.clone()));
        let auth: DynAuthProvider =
            Arc::new(JwtAuthProvider::new(JwtConfig::new(jwt_secret), revocations));

        let app_users: DynAppUserRepository = Arc::new(AppUserRepository::new(pool.clone()));
        let partners: DynPartnerRepository = Arc::new(PartnerRepository::new(pool));

        let ttl = chrono::Duration::from_std(partner_code_ttl)
            .context("Partner code cache TTL is out of range")?;
        let directory: DynAppUserDirectory = Arc::new(DirectoryService::new(
            app_users,
            partners,
            Some(CacheStore::new(redis)),
            ttl,
        ));

        Ok(Self::from_services(auth, directory))
    }

    /// Wires the guards over already-built services.
    pub fn from_services(auth: DynAuthProvider, directory: DynAppUserDirectory) -> Self {
        let tenants = Arc::new(TenantResolver::new(directory.clone()));
        Self {
            auth,
            directory,
            tenants,
        }
    }
}
