//! # Mock Framework
//!
//! Utilities for testing services without a running record store.
//!
//! Use [`create_mock_store`] to get a store client and the receiver its
//! requests land on. Then use helpers like [`expect_fetch`] or
//! [`expect_create`] to assert what was sent and answer with any
//! [`StoreResponse`], including failures the in-memory actor never produces.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::notify::{Notice, Notifier};
use crate::record_store::{
    DeletePayload, FetchQuery, RecordId, RecordStoreClient, RecordsPayload, StoreRequest, StoreResponse,
};
use crate::services::{ServiceSettings, Services};

pub type Responder = oneshot::Sender<StoreResponse>;

/// Creates a store client whose requests arrive on the returned receiver.
pub fn create_mock_store(buffer_size: usize) -> (RecordStoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordStoreClient::new(sender), receiver)
}

/// Services over a mock store, plus a subscription to their notices.
pub fn create_mock_services(
    buffer_size: usize,
) -> (Services, mpsc::Receiver<StoreRequest>, broadcast::Receiver<Notice>) {
    let (store, receiver) = create_mock_store(buffer_size);
    let notifier = Notifier::default();
    let notices = notifier.subscribe();
    let services = Services::new(Arc::new(store), notifier, ServiceSettings::default());
    (services, receiver, notices)
}

/// Helper to verify that the next message is a Fetch request
pub async fn expect_fetch(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(String, FetchQuery, Responder)> {
    match receiver.recv().await {
        Some(StoreRequest::Fetch { table, query, respond_to }) => Some((table, query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(String, RecordId, Responder)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { table, id, respond_to, .. }) => Some((table, id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(String, RecordsPayload, Responder)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { table, payload, respond_to }) => Some((table, payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(String, RecordsPayload, Responder)> {
    match receiver.recv().await {
        Some(StoreRequest::Update { table, payload, respond_to }) => Some((table, payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete(receiver: &mut mpsc::Receiver<StoreRequest>) -> Option<(String, DeletePayload, Responder)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { table, payload, respond_to }) => Some((table, payload, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::RecordStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store(10);

        let fetch_task = tokio::spawn(async move {
            client
                .fetch_records("product_c", FetchQuery::fields(&["name_c"]))
                .await
        });

        let (table, query, responder) = expect_fetch(&mut receiver).await.expect("Expected Fetch request");
        assert_eq!(table, "product_c");
        assert_eq!(query.fields.len(), 1);
        responder.send(StoreResponse::with_data(json!([]))).unwrap();

        let response = fetch_task.await.unwrap().unwrap();
        assert!(response.success);
    }
}
