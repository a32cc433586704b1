//! Product catalog source boundary.
//!
//! The deriver only sees `ProductBase` records; where they come from is hidden
//! behind `ProductSource`.

pub mod in_memory;
pub mod mysql;
pub mod r#trait;

pub use in_memory::InMemoryProductSource;
pub use mysql::{MySqlProductSource, PRODUCT_BASE_QUERY};
pub use r#trait::{ProductSource, SourceError};
