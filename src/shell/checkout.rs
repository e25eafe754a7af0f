use thiserror::Error;
use tracing::{info, instrument, warn};

use super::context::StorefrontContext;
use super::routes::Route;
use crate::domain::{BillingInfo, CartItem, OrderDraft, OrderLineItem, ShippingAddress};
use crate::order::OrderError;

const CART_NOT_CLEARED: &str = "Your order was placed, but some items could not be removed from your cart";

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl StorefrontContext {
    /// Turns the cart into an order, empties the cart and returns the
    /// confirmation page for the new order.
    #[instrument(skip_all)]
    pub async fn checkout(&self, shipping: ShippingAddress, billing: BillingInfo) -> Result<Route, CheckoutError> {
        let cart = self.cart();
        let lines = cart.items().await;
        if lines.is_empty() {
            warn!("Checkout attempted with an empty cart");
            self.notifier().error(CheckoutError::EmptyCart.to_string());
            return Err(CheckoutError::EmptyCart);
        }

        let draft = OrderDraft {
            total: lines.iter().map(CartItem::line_total).sum(),
            items: lines.iter().map(OrderLineItem::from).collect(),
            shipping_address: shipping,
            billing_info: billing,
        };

        let order = self.services().orders.create(&draft).await.inspect_err(|e| {
            self.notifier().error(e.to_string());
        })?;

        info!(order_id = order.id, total = order.total.unwrap_or_default(), "Order placed");
        self.notifier().success("Order placed successfully");

        // The order stands either way; leftover lines stay visible in the cart.
        let cleared = cart.clear().await;
        let remaining = cart.items().await.len();
        match cleared {
            Ok(count) if remaining == 0 => info!(order_id = order.id, cleared = count, "Cart cleared"),
            _ => {
                warn!(order_id = order.id, remaining, "Order placed but cart not cleared");
                self.notifier().error(CART_NOT_CLEARED);
            }
        }
        Ok(Route::OrderConfirmation(order.id))
    }
}
