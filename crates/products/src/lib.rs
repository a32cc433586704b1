//! Products attribute domain module.
//!
//! This crate contains the product input record, the derived attribute record and
//! the rules that map one to the other, implemented purely as deterministic domain
//! logic (no IO, no SQL, no files).

pub mod attributes;
pub mod derive;
pub mod product;
pub mod rules;

pub use attributes::{
    BrandTier, MarketingSegment, PriceBand, ProductAttributes, Season, SizeCategory,
};
pub use derive::{derive_all, derive_attributes};
pub use product::ProductBase;
