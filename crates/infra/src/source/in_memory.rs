use async_trait::async_trait;

use attrforge_products::ProductBase;

use super::r#trait::{ProductSource, SourceError};

/// In-memory product source.
///
/// Intended for tests/dev. Returns a copy of its records on every fetch.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductSource {
    products: Vec<ProductBase>,
}

impl InMemoryProductSource {
    pub fn new(products: Vec<ProductBase>) -> Self {
        Self { products }
    }
}

impl FromIterator<ProductBase> for InMemoryProductSource {
    fn from_iter<I: IntoIterator<Item = ProductBase>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    async fn fetch_products(&self) -> Result<Vec<ProductBase>, SourceError> {
        Ok(self.products.clone())
    }
}
