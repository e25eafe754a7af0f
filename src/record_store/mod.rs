//! The remote record-storage adapter.
//!
//! [`RecordStore`] is the seam every entity service talks through. Two
//! implementations ship with the crate:
//!
//! - [`HttpRecordStore`] speaks JSON over HTTP to the hosted API.
//! - [`RecordStoreActor`] keeps tables in memory behind an mpsc channel; its
//!   [`RecordStoreClient`] handle implements the trait. Used for local runs
//!   and tests.

pub mod actor;
pub mod error;
pub mod http;
pub mod protocol;

pub use actor::{RecordStoreActor, RecordStoreClient, StoreRequest};
pub use error::StoreError;
pub use http::HttpRecordStore;
pub use protocol::*;

use async_trait::async_trait;

/// Generic access to named record tables.
///
/// Each call is attempted exactly once. Implementations return `Err` only
/// when no response envelope could be obtained.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(&self, table: &str, query: FetchQuery) -> Result<StoreResponse, StoreError>;

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: FetchQuery,
    ) -> Result<StoreResponse, StoreError>;

    async fn create_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError>;

    async fn update_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError>;

    async fn delete_record(&self, table: &str, payload: DeletePayload) -> Result<StoreResponse, StoreError>;
}
