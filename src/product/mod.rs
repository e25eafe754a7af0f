//! Product records: storage row, mapping to [`Product`](crate::domain::Product), errors.

mod entity;
pub mod error;
pub mod row;

pub use error::*;
pub use row::*;
