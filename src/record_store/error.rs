use thiserror::Error;

/// Failures raised before the record store could answer at all.
///
/// A well-formed `success: false` reply is not an error at this layer; it is
/// returned as a [`StoreResponse`](super::StoreResponse) and judged by the
/// entity services.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Record store closed")]
    ActorClosed,
    #[error("Record store dropped the request")]
    ActorDropped,
}
