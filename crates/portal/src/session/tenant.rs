use shared::abstract_trait::DynAppUserDirectory;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OnceCell};
use tracing::{error, info, warn};
use uuid::Uuid;

type PendingLookup = Arc<OnceCell<Option<String>>>;

/// Resolves partner tenant codes, sharing one lookup among concurrent callers.
pub struct TenantResolver {
    directory: DynAppUserDirectory,
    in_flight: Mutex<HashMap<Uuid, PendingLookup>>,
}

impl TenantResolver {
    pub fn new(directory: DynAppUserDirectory) -> Self {
        Self {
            directory,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up the tenant code for `partner_id`.
    ///
    /// A caller that arrives while a lookup for the same partner is pending
    /// waits on that lookup instead of issuing its own. Failures resolve to
    /// `None` and are not remembered, so a later mount retries.
    pub async fn resolve(&self, partner_id: Uuid) -> Option<String> {
        let pending = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight
                .entry(partner_id)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let code = pending
            .get_or_init(|| self.fetch(partner_id))
            .await
            .clone();

        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .get(&partner_id)
            .is_some_and(|current| Arc::ptr_eq(current, &pending))
        {
            in_flight.remove(&partner_id);
        }

        code
    }

    async fn fetch(&self, partner_id: Uuid) -> Option<String> {
        match self.directory.find_partner_code(partner_id).await {
            Ok(Some(code)) => {
                info!("🏷️ Resolved partner code for {partner_id}");
                Some(code)
            }
            Ok(None) => {
                warn!("⚠️ Partner {partner_id} has no tenant code");
                None
            }
            Err(e) => {
                error!("❌ Partner code lookup failed for {partner_id}: {e}");
                None
            }
        }
    }
}
