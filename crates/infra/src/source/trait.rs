use async_trait::async_trait;
use thiserror::Error;

use attrforge_products::ProductBase;

/// Catalog source operation error.
///
/// These are **infrastructure errors** and are fatal for a run: there is no
/// retry and no partial result.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to connect to {target}")]
    Connect {
        target: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("product query failed")]
    Query(#[source] sqlx::Error),

    #[error("failed to decode column `{column}`: {message}")]
    Decode {
        column: &'static str,
        message: String,
    },
}

/// Read-only source of base product records.
///
/// Implementations must:
/// - return one record per product, in a stable order
/// - release any connection they acquire before returning, on success and failure
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<ProductBase>, SourceError>;
}

