//! Cart line records.

mod entity;
pub mod error;
pub mod row;

pub use error::*;
pub use row::*;
