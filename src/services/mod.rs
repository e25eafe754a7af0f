//! Entity services: the data-access layer between pages and the record store.
//!
//! [`RecordService`] holds the request/partition/notify logic once; the typed
//! services pick queries and translate failures into their entity errors.
//!
//! Failure policy, per call:
//! - the adapter answers `success: false`: log, toast the message, degrade
//! - some records in a batch fail: toast each field and record message,
//!   carry on with whichever succeeded
//! - transport or mapping failure: log and degrade
//!
//! Nothing is retried.

#[macro_use]
mod macros;

pub mod cart_service;
pub mod order_service;
pub mod product_service;
pub mod wishlist_service;

pub use cart_service::CartService;
pub use order_service::OrderService;
pub use product_service::ProductService;
pub use wishlist_service::WishlistService;

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::{LatencyConfig, StorefrontConfig};
use crate::entity::RecordEntity;
use crate::error::{Degraded, MappingError};
use crate::notify::Notifier;
use crate::record_store::{
    DeletePayload, FetchQuery, Record, RecordId, RecordResult, RecordStore, RecordsPayload, StoreResponse, ID_FIELD,
};

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub page_size: usize,
    pub latency: LatencyConfig,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            latency: LatencyConfig::none(),
        }
    }
}

impl From<&StorefrontConfig> for ServiceSettings {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            page_size: config.page_size,
            latency: config.latency,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteKind {
    Create,
    Update,
}

impl WriteKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// Generic CRUD over one record table, mapping rows into `T`.
pub struct RecordService<T: RecordEntity> {
    store: Arc<dyn RecordStore>,
    notifier: Notifier,
    settings: ServiceSettings,
    _entity: PhantomData<fn() -> T>,
}

impl<T: RecordEntity> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: self.notifier.clone(),
            settings: self.settings,
            _entity: PhantomData,
        }
    }
}

impl<T: RecordEntity> RecordService<T> {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Notifier, settings: ServiceSettings) -> Self {
        Self {
            store,
            notifier,
            settings,
            _entity: PhantomData,
        }
    }

    pub fn page_size(&self) -> usize {
        self.settings.page_size
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn rejected(&self, response: &StoreResponse) -> Degraded {
        let message = response.message_or(T::TABLE);
        error!(table = T::TABLE, reason = %message, "Record store rejected request");
        self.notifier.error(message.clone());
        Degraded::Rejected(message)
    }

    fn notify_failures(&self, failed: &[RecordResult], include_field_errors: bool) {
        for record in failed {
            if include_field_errors {
                for field_error in &record.errors {
                    self.notifier.error(field_error.to_string());
                }
            }
            if let Some(message) = &record.message {
                self.notifier.error(message.clone());
            }
        }
    }

    /// Unfiltered listing, paced by the `list` delay.
    pub async fn list(&self, query: FetchQuery) -> Result<Vec<T>, Degraded> {
        self.pause(self.settings.latency.list).await;
        self.fetch(query).await
    }

    /// Filtered lookup, paced by the `query` delay.
    pub async fn search(&self, query: FetchQuery) -> Result<Vec<T>, Degraded> {
        self.pause(self.settings.latency.query).await;
        self.fetch(query).await
    }

    /// Rows that fail to map are dropped with a warning; the rest are kept.
    async fn fetch(&self, query: FetchQuery) -> Result<Vec<T>, Degraded> {
        let response = self.store.fetch_records(T::TABLE, query).await.map_err(|e| {
            error!(table = T::TABLE, error = %e, "Error fetching {} records", T::LABEL);
            e
        })?;
        if !response.success {
            return Err(self.rejected(&response));
        }

        let rows = match response.data {
            Some(Value::Array(rows)) => rows,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                let err = MappingError::InvalidRecord {
                    table: T::TABLE,
                    reason: format!("expected a list of records, got {other}"),
                };
                error!(error = %err, "Error fetching {} records", T::LABEL);
                return Err(err.into());
            }
        };

        let received = rows.len();
        let entities: Vec<T> = rows
            .into_iter()
            .filter_map(|record| match T::decode(record) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    warn!(table = T::TABLE, error = %e, "Skipping unmappable record");
                    None
                }
            })
            .collect();

        debug!(
            table = T::TABLE,
            count = entities.len(),
            skipped = received - entities.len(),
            "Fetched records"
        );
        Ok(entities)
    }

    pub async fn get(&self, id: RecordId) -> Result<T, Degraded> {
        self.pause(self.settings.latency.get).await;

        let response = self
            .store
            .get_record_by_id(T::TABLE, id, T::query())
            .await
            .map_err(|e| {
                error!(table = T::TABLE, id, error = %e, "Error fetching {}", T::LABEL);
                e
            })?;
        if !response.success {
            return Err(self.rejected(&response));
        }

        let record = response.data.ok_or(MappingError::MissingField {
            table: T::TABLE,
            field: ID_FIELD,
        })?;
        T::decode(record).map_err(|e| {
            error!(table = T::TABLE, id, error = %e, "Error mapping {}", T::LABEL);
            e.into()
        })
    }

    pub async fn create(&self, draft: &T::Draft) -> Result<T, Degraded> {
        self.pause(self.settings.latency.create).await;
        let record = T::encode(&T::draft_row(draft)?)?;
        self.write(WriteKind::Create, record).await
    }

    /// Full replacement of the mapped fields of record `id`.
    pub async fn update(&self, id: RecordId, draft: &T::Draft) -> Result<T, Degraded> {
        self.pause(self.settings.latency.update).await;
        let mut record = T::encode(&T::draft_row(draft)?)?;
        record.insert(ID_FIELD.to_string(), Value::from(id));
        self.write(WriteKind::Update, record).await
    }

    /// Partial update touching only the given storage fields.
    pub async fn patch(&self, id: RecordId, mut fields: Record) -> Result<T, Degraded> {
        self.pause(self.settings.latency.update).await;
        fields.insert(ID_FIELD.to_string(), Value::from(id));
        self.write(WriteKind::Update, fields).await
    }

    async fn write(&self, kind: WriteKind, record: Record) -> Result<T, Degraded> {
        let payload = RecordsPayload { records: vec![record] };
        let response = match kind {
            WriteKind::Create => self.store.create_record(T::TABLE, payload).await,
            WriteKind::Update => self.store.update_record(T::TABLE, payload).await,
        }
        .map_err(|e| {
            error!(table = T::TABLE, error = %e, "Error during {} {}", T::LABEL, kind.verb());
            e
        })?;
        if !response.success {
            return Err(self.rejected(&response));
        }

        let (successful, failed): (Vec<RecordResult>, Vec<RecordResult>) = response
            .results
            .unwrap_or_default()
            .into_iter()
            .partition(|result| result.success);

        if !failed.is_empty() {
            error!(
                table = T::TABLE,
                failed = failed.len(),
                "Failed to {} {} {} records",
                kind.verb(),
                failed.len(),
                T::LABEL
            );
            self.notify_failures(&failed, true);
        }

        let Some(data) = successful.into_iter().find_map(|result| result.data) else {
            return Err(Degraded::NoSuccess { failed: failed.len() });
        };
        T::decode(data).map_err(|e| {
            error!(table = T::TABLE, error = %e, "Error mapping written {}", T::LABEL);
            e.into()
        })
    }

    /// Returns the ids the store reports as deleted.
    ///
    /// Per-record results are matched to `ids` by position.
    pub async fn delete(&self, ids: Vec<RecordId>) -> Result<Vec<RecordId>, Degraded> {
        self.pause(self.settings.latency.delete).await;

        let payload = DeletePayload { record_ids: ids.clone() };
        let response = self.store.delete_record(T::TABLE, payload).await.map_err(|e| {
            error!(table = T::TABLE, error = %e, "Error deleting {}", T::LABEL);
            e
        })?;
        if !response.success {
            return Err(self.rejected(&response));
        }

        let Some(results) = response.results else {
            return Ok(Vec::new());
        };
        let (successful, failed): (Vec<(RecordId, RecordResult)>, Vec<(RecordId, RecordResult)>) =
            ids.into_iter().zip(results).partition(|(_, result)| result.success);

        if !failed.is_empty() {
            error!(
                table = T::TABLE,
                failed = failed.len(),
                "Failed to delete {} {} records",
                failed.len(),
                T::LABEL
            );
            let failed: Vec<RecordResult> = failed.into_iter().map(|(_, result)| result).collect();
            self.notify_failures(&failed, false);
        }
        Ok(successful.into_iter().map(|(id, _)| id).collect())
    }
}

/// The four entity services, wired to one store and one notifier.
#[derive(Clone)]
pub struct Services {
    pub products: ProductService,
    pub orders: OrderService,
    pub cart: CartService,
    pub wishlist: WishlistService,
}

impl Services {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Notifier, settings: ServiceSettings) -> Self {
        Self {
            products: ProductService::new(RecordService::new(Arc::clone(&store), notifier.clone(), settings)),
            orders: OrderService::new(RecordService::new(Arc::clone(&store), notifier.clone(), settings)),
            cart: CartService::new(RecordService::new(Arc::clone(&store), notifier.clone(), settings)),
            wishlist: WishlistService::new(RecordService::new(store, notifier, settings)),
        }
    }
}
