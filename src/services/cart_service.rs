use serde_json::Value;
use tracing::{debug, error, instrument};

use super::RecordService;
use crate::cart::CartError;
use crate::domain::{CartItem, CartItemDraft, Product};
use crate::entity::RecordEntity;
use crate::error::Degraded;
use crate::record_store::{Record, RecordId, SortType, ID_FIELD};

/// The shopper's cart, one record per product line.
#[derive(Clone)]
pub struct CartService {
    inner: RecordService<CartItem>,
}

impl_record_service!(CartService, CartItem, CartError);

impl CartService {
    /// Lines in the order they were added. Empty on any failure.
    pub async fn get_cart(&self) -> Vec<CartItem> {
        self.try_get_cart().await.unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn try_get_cart(&self) -> Result<Vec<CartItem>, Degraded> {
        debug!("Sending request");
        let query = CartItem::query()
            .order_by(ID_FIELD, SortType::Asc)
            .page(self.inner.page_size(), 0);
        self.inner.list(query).await
    }

    /// Adds `quantity` of `product`, raising the existing line if there is one.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<CartItem, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        debug!("Sending request");

        let query = CartItem::query().filter_eq("product_id_c", product.id);
        let existing = self.inner.search(query).await.map_err(|e| {
            error!(error = %e, "Error looking up cart line");
            CartError::CreateFailed
        })?;

        match existing.into_iter().next() {
            Some(line) => self.set_quantity(line.id, line.quantity.saturating_add(quantity)).await,
            None => {
                let draft = CartItemDraft::for_product(product, quantity);
                self.inner.create(&draft).await.map_err(|e| {
                    error!(error = %e, "Error creating cart item");
                    CartError::CreateFailed
                })
            }
        }
    }

    /// Sets a line's quantity. Zero removes the line and yields `None`.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: RecordId, quantity: u32) -> Result<Option<CartItem>, CartError> {
        if quantity == 0 {
            return if self.remove_item(id).await {
                Ok(None)
            } else {
                Err(CartError::UpdateFailed)
            };
        }
        self.set_quantity(id, quantity).await.map(Some)
    }

    pub async fn remove_item(&self, id: RecordId) -> bool {
        self.delete(id).await
    }

    /// Deletes the lines of one cart page (`page_size` lines); returns how
    /// many went. Zero on any failure.
    pub async fn clear(&self) -> usize {
        self.try_clear().await.map_or(0, |deleted| deleted.len())
    }

    /// Like [`clear`](Self::clear), but returns the deleted line ids.
    #[instrument(skip(self))]
    pub async fn try_clear(&self) -> Result<Vec<RecordId>, Degraded> {
        let lines = self.try_get_cart().await?;
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        self.inner.delete(lines.iter().map(|line| line.id).collect()).await
    }

    async fn set_quantity(&self, id: RecordId, quantity: u32) -> Result<CartItem, CartError> {
        let mut fields = Record::new();
        fields.insert("quantity_c".to_string(), Value::from(quantity));
        self.inner.patch(id, fields).await.map_err(|e| {
            error!(id, error = %e, "Error updating cart item");
            CartError::UpdateFailed
        })
    }
}
