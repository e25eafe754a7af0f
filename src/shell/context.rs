use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::state::{LoadPhase, ShellState};
use crate::cart::CartError;
use crate::domain::{CartItem, Product, WishlistItem};
use crate::error::Degraded;
use crate::notify::Notifier;
use crate::record_store::RecordId;
use crate::services::{CartService, Services, WishlistService};
use crate::wishlist::WishlistError;

/// Shared shell state plus the services pages act through.
///
/// Cheap to clone; clones see the same state.
#[derive(Clone)]
pub struct StorefrontContext {
    services: Services,
    notifier: Notifier,
    state: Arc<RwLock<ShellState>>,
}

impl StorefrontContext {
    pub fn new(services: Services, notifier: Notifier) -> Self {
        Self {
            services,
            notifier,
            state: Arc::new(RwLock::new(ShellState::default())),
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn phase(&self) -> LoadPhase {
        self.state.read().await.phase
    }

    pub async fn snapshot(&self) -> ShellState {
        self.state.read().await.clone()
    }

    /// Loads products, cart and wishlist concurrently, then marks the shell loaded.
    ///
    /// Each load degrades to empty on its own; the shell always ends `Loaded`.
    #[instrument(skip(self))]
    pub async fn load_initial_data(&self) {
        info!("Loading storefront data");
        self.state.write().await.phase = LoadPhase::Loading;

        let (products, cart_items, wishlist) = tokio::join!(
            self.services.products.get_all(),
            self.services.cart.get_cart(),
            self.services.wishlist.get_all(),
        );

        let mut state = self.state.write().await;
        state.set_products(products);
        state.cart_items = cart_items;
        state.wishlist = wishlist;
        state.phase = LoadPhase::Loaded;
        info!(
            products = state.products.len(),
            cart_items = state.cart_items.len(),
            wishlist = state.wishlist.len(),
            "Storefront loaded"
        );
    }

    /// Filters the catalog and returns the new filtered list.
    #[instrument(skip(self))]
    pub async fn handle_search(&self, term: &str) -> Vec<Product> {
        let mut state = self.state.write().await;
        state.apply_search(term);
        debug!(hits = state.filtered_products.len(), "Search applied");
        state.filtered_products.clone()
    }

    pub async fn cart_item_count(&self) -> u32 {
        self.state.read().await.cart_item_count()
    }

    pub async fn cart_subtotal(&self) -> f64 {
        self.state.read().await.cart_subtotal()
    }

    pub fn catalog(&self) -> CatalogView {
        CatalogView {
            state: Arc::clone(&self.state),
        }
    }

    pub fn cart(&self) -> CartView {
        CartView {
            state: Arc::clone(&self.state),
            service: self.services.cart.clone(),
            notifier: self.notifier.clone(),
        }
    }

    pub fn wishlist(&self) -> WishlistView {
        WishlistView {
            state: Arc::clone(&self.state),
            service: self.services.wishlist.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

/// Read-only access to the loaded catalog.
#[derive(Clone)]
pub struct CatalogView {
    state: Arc<RwLock<ShellState>>,
}

impl CatalogView {
    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn filtered_products(&self) -> Vec<Product> {
        self.state.read().await.filtered_products.clone()
    }

    pub async fn search_term(&self) -> String {
        self.state.read().await.search_term.clone()
    }

    pub async fn product(&self, id: RecordId) -> Option<Product> {
        self.state.read().await.products.iter().find(|p| p.id == id).cloned()
    }
}

/// Cart lines, kept in step with the record store.
#[derive(Clone)]
pub struct CartView {
    state: Arc<RwLock<ShellState>>,
    service: CartService,
    notifier: Notifier,
}

impl CartView {
    pub async fn items(&self) -> Vec<CartItem> {
        self.state.read().await.cart_items.clone()
    }

    pub async fn item_count(&self) -> u32 {
        self.state.read().await.cart_item_count()
    }

    pub async fn subtotal(&self) -> f64 {
        self.state.read().await.cart_subtotal()
    }

    pub async fn add(&self, product: &Product, quantity: u32) -> Result<CartItem, CartError> {
        let item = self.service.add_item(product, quantity).await.inspect_err(|e| {
            self.notifier.error(e.to_string());
        })?;
        self.state.write().await.upsert_cart_item(item.clone());
        self.notifier.success(format!("{} added to cart", product.name));
        Ok(item)
    }

    pub async fn set_quantity(&self, id: RecordId, quantity: u32) -> Result<(), CartError> {
        let updated = self.service.update_quantity(id, quantity).await.inspect_err(|e| {
            self.notifier.error(e.to_string());
        })?;
        let mut state = self.state.write().await;
        match updated {
            Some(item) => state.upsert_cart_item(item),
            None => state.cart_items.retain(|line| line.id != id),
        }
        Ok(())
    }

    pub async fn remove(&self, id: RecordId) -> bool {
        let removed = self.service.remove_item(id).await;
        if removed {
            self.state.write().await.cart_items.retain(|line| line.id != id);
        }
        removed
    }

    /// Deletes the cart remotely, then drops the deleted lines locally.
    ///
    /// Lines the store kept stay in the shell. On failure nothing local changes.
    pub async fn clear(&self) -> Result<usize, Degraded> {
        let deleted = self.service.try_clear().await.inspect_err(|e| {
            warn!(error = %e, "Cart could not be cleared");
        })?;
        let mut state = self.state.write().await;
        state.cart_items.retain(|line| !deleted.contains(&line.id));
        if !state.cart_items.is_empty() {
            warn!(remaining = state.cart_items.len(), "Cart only partly cleared");
        }
        Ok(deleted.len())
    }
}

/// Saved products.
#[derive(Clone)]
pub struct WishlistView {
    state: Arc<RwLock<ShellState>>,
    service: WishlistService,
    notifier: Notifier,
}

impl WishlistView {
    pub async fn items(&self) -> Vec<WishlistItem> {
        self.state.read().await.wishlist.clone()
    }

    /// Checks the loaded list only.
    pub async fn contains(&self, product_id: RecordId) -> bool {
        self.state.read().await.wishlist.iter().any(|item| item.product_id == product_id)
    }

    pub async fn add(&self, product: &Product) -> Result<WishlistItem, WishlistError> {
        let item = self.service.add(product).await.inspect_err(|e| {
            self.notifier.error(e.to_string());
        })?;
        let mut state = self.state.write().await;
        if state.wishlist.iter().any(|saved| saved.id == item.id) {
            self.notifier.info(format!("{} is already in your wishlist", product.name));
        } else {
            state.wishlist.push(item.clone());
            self.notifier.success(format!("{} added to wishlist", product.name));
        }
        Ok(item)
    }

    pub async fn remove(&self, id: RecordId) -> bool {
        let removed = self.service.remove(id).await;
        if removed {
            self.state.write().await.wishlist.retain(|item| item.id != id);
        }
        removed
    }
}
