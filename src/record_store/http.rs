use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::protocol::{DeletePayload, FetchQuery, RecordId, RecordsPayload, StoreResponse};
use super::{RecordStore, StoreError};
use crate::config::RemoteConfig;

const PROJECT_HEADER: &str = "X-Project-Id";
const PUBLIC_KEY_HEADER: &str = "X-Public-Key";

/// Adapter for the hosted record-storage API.
///
/// Routes:
/// - `POST   {base}/tables/{table}/records/query`
/// - `POST   {base}/tables/{table}/records/{id}/query`
/// - `POST   {base}/tables/{table}/records`
/// - `PUT    {base}/tables/{table}/records`
/// - `DELETE {base}/tables/{table}/records`
#[derive(Clone)]
pub struct HttpRecordStore {
    http: reqwest::Client,
    base_url: Url,
    project_id: String,
    public_key: String,
}

impl HttpRecordStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        // `Url::join` replaces the last segment unless the base ends in '/'.
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            project_id: config.project_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<StoreResponse, StoreError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Sending record store request");

        let response = self.request(method, url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<StoreResponse>(&bytes) {
            Ok(envelope) => Ok(envelope),
            // Error pages rarely carry the envelope; turn them into a rejection.
            Err(_) if !status.is_success() => {
                warn!(%status, "Record store returned a non-envelope error");
                Ok(StoreResponse::failure(format!("Record store returned {status}")))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self, query))]
    async fn fetch_records(&self, table: &str, query: FetchQuery) -> Result<StoreResponse, StoreError> {
        self.send(Method::POST, &format!("tables/{table}/records/query"), &query)
            .await
    }

    #[instrument(skip(self, query))]
    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        query: FetchQuery,
    ) -> Result<StoreResponse, StoreError> {
        self.send(Method::POST, &format!("tables/{table}/records/{id}/query"), &query)
            .await
    }

    #[instrument(skip(self, payload))]
    async fn create_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError> {
        self.send(Method::POST, &format!("tables/{table}/records"), &payload)
            .await
    }

    #[instrument(skip(self, payload))]
    async fn update_record(&self, table: &str, payload: RecordsPayload) -> Result<StoreResponse, StoreError> {
        self.send(Method::PUT, &format!("tables/{table}/records"), &payload)
            .await
    }

    #[instrument(skip(self, payload))]
    async fn delete_record(&self, table: &str, payload: DeletePayload) -> Result<StoreResponse, StoreError> {
        self.send(Method::DELETE, &format!("tables/{table}/records"), &payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: Url::parse(base).unwrap(),
            project_id: "proj".to_string(),
            public_key: "pk".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let store = HttpRecordStore::new(&config("https://api.example.com/v1")).unwrap();
        let url = store.endpoint("tables/product_c/records/query").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/tables/product_c/records/query");
    }

    #[test]
    fn endpoint_with_trailing_slash_base() {
        let store = HttpRecordStore::new(&config("https://api.example.com/")).unwrap();
        let url = store.endpoint("tables/order_c/records/7/query").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/tables/order_c/records/7/query");
    }
}
