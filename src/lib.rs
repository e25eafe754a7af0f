//! Storefront core: entity services over a remote record store, the layout
//! shell that pages read from, and the route surface.

pub mod app_system;
pub mod cart;
pub mod config;
pub mod domain;
pub mod entity;
pub mod error;
pub mod notify;
pub mod order;
pub mod product;
pub mod record_store;
pub mod services;
pub mod shell;
pub mod wishlist;

#[cfg(test)]
mod mock_framework;
