pub mod cart;
pub mod order;
pub mod product;
pub mod wishlist;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use wishlist::*;
