use std::fmt;

use crate::record_store::RecordId;

/// The pages a path can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Cart,
    Checkout,
    OrderConfirmation(RecordId),
    Orders,
    NotFound,
}

impl Route {
    /// Trailing slashes, query strings and fragments are ignored.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["cart"] => Self::Cart,
            ["checkout"] => Self::Checkout,
            ["orders"] => Self::Orders,
            ["order-confirmation", id] => id
                .parse::<RecordId>()
                .ok()
                .filter(|id| *id > 0)
                .map_or(Self::NotFound, Self::OrderConfirmation),
            _ => Self::NotFound,
        }
    }

    /// Canonical path. `NotFound` has none of its own and renders as `/404`.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Cart => "/cart".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::OrderConfirmation(id) => format!("/order-confirmation/{id}"),
            Self::Orders => "/orders".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
