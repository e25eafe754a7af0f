//! The layout shell: data loaded once per mount, shared with every page.

mod checkout;
mod context;
mod routes;
mod search;
mod state;

pub use checkout::CheckoutError;
pub use context::{CartView, CatalogView, StorefrontContext, WishlistView};
pub use routes::Route;
pub use search::filter_products;
pub use state::{LoadPhase, ShellState};
