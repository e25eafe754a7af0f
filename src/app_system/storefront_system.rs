use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use super::error::SystemError;
use super::seed::{product_records, with_table_rules};
use crate::config::StorefrontConfig;
use crate::domain::{Product, ProductDraft};
use crate::entity::RecordEntity;
use crate::notify::Notifier;
use crate::record_store::{HttpRecordStore, RecordStore, RecordStoreActor};
use crate::services::{ServiceSettings, Services};
use crate::shell::StorefrontContext;

const STORE_BUFFER: usize = 32;

/// The running storefront: one record store, the services over it, and the shell.
///
/// Responsible for choosing the store, wiring everything together, and shutdown.
pub struct StorefrontSystem {
    pub context: StorefrontContext,
    pub notifier: Notifier,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Remote store when configured, otherwise an in-memory store holding `catalog`.
    pub fn start(config: &StorefrontConfig, catalog: &[ProductDraft]) -> Result<Self, SystemError> {
        let settings = ServiceSettings::from(config);
        match &config.remote {
            Some(remote) => {
                info!(base_url = %remote.base_url, "Using remote record store");
                let store = HttpRecordStore::new(remote)?;
                Ok(Self::assemble(Arc::new(store), settings, Vec::new()))
            }
            None => Self::in_memory(settings, catalog),
        }
    }

    pub fn in_memory(settings: ServiceSettings, catalog: &[ProductDraft]) -> Result<Self, SystemError> {
        info!(products = catalog.len(), "Using in-memory record store");
        let (actor, client) = RecordStoreActor::new(STORE_BUFFER);
        let actor = with_table_rules(actor).seed(Product::TABLE, product_records(catalog)?);
        let handle = tokio::spawn(actor.run());
        Ok(Self::assemble(Arc::new(client), settings, vec![handle]))
    }

    fn assemble(store: Arc<dyn RecordStore>, settings: ServiceSettings, handles: Vec<JoinHandle<()>>) -> Self {
        let notifier = Notifier::default();
        let services = Services::new(store, notifier.clone(), settings);
        Self {
            context: StorefrontContext::new(services, notifier.clone()),
            notifier,
            handles,
        }
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down storefront...");

        // The in-memory store stops once every client handle is gone.
        drop(self.context);
        drop(self.notifier);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Record store task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
