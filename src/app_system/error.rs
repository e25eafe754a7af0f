use thiserror::Error;

use crate::config::ConfigError;
use crate::error::MappingError;
use crate::record_store::StoreError;

/// Failures while bringing the storefront up or down.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Record store setup failed: {0}")]
    Store(#[from] StoreError),
    #[error("Seed data could not be mapped: {0}")]
    Seed(#[from] MappingError),
    #[error("Record store task failed: {0}")]
    TaskFailed(String),
}
