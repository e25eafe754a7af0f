//! Order records: flattened storage row, line-item blob, mapping, errors.

mod entity;
pub mod error;
pub mod row;

pub use error::*;
pub use row::*;
