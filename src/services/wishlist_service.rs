use tracing::{debug, error, instrument};

use super::RecordService;
use crate::domain::{Product, WishlistDraft, WishlistItem};
use crate::entity::RecordEntity;
use crate::error::Degraded;
use crate::record_store::{RecordId, SortType, ID_FIELD};
use crate::wishlist::WishlistError;

#[derive(Clone)]
pub struct WishlistService {
    inner: RecordService<WishlistItem>,
}

impl_record_service!(WishlistService, WishlistItem, WishlistError);

impl WishlistService {
    pub async fn get_all(&self) -> Vec<WishlistItem> {
        self.try_get_all().await.unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_get_all(&self) -> Result<Vec<WishlistItem>, Degraded> {
        debug!("Sending request");
        let query = WishlistItem::query()
            .order_by(ID_FIELD, SortType::Asc)
            .page(self.inner.page_size(), 0);
        self.inner.list(query).await
    }

    /// Saves `product`. A product already on the list returns its entry.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn add(&self, product: &Product) -> Result<WishlistItem, WishlistError> {
        debug!("Sending request");
        let saved = self.try_find(product.id).await.map_err(|e| {
            error!(error = %e, "Error looking up wishlist entry");
            WishlistError::CreateFailed
        })?;
        if let Some(entry) = saved {
            return Ok(entry);
        }

        self.inner.create(&WishlistDraft::for_product(product)).await.map_err(|e| {
            error!(error = %e, "Error creating wishlist item");
            WishlistError::CreateFailed
        })
    }

    pub async fn remove(&self, id: RecordId) -> bool {
        self.delete(id).await
    }

    /// `false` on any failure.
    pub async fn contains(&self, product_id: RecordId) -> bool {
        matches!(self.try_find(product_id).await, Ok(Some(_)))
    }

    async fn try_find(&self, product_id: RecordId) -> Result<Option<WishlistItem>, Degraded> {
        let query = WishlistItem::query().filter_eq("product_id_c", product_id);
        Ok(self.inner.search(query).await?.into_iter().next())
    }
}
