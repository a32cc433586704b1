//! MySQL-backed product source.
//!
//! Runs a single join over the AdventureWorks `product`, `productsubcategory` and
//! `productcategory` tables on one dedicated connection. The connection is closed
//! before results are decoded, whether or not the query succeeded.
//!
//! ## Column Decoding
//!
//! Numeric and date columns are cast in SQL so the wire types are stable across
//! schema ports. A value that still cannot be decoded becomes an absent field for
//! that row (logged at `debug`). Only the identifier is mandatory: failing to
//! decode it is a `SourceError::Decode`.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::mysql::{MySql, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};
use tracing::{debug, info, instrument, warn};

use attrforge_core::ProductId;
use attrforge_products::ProductBase;

use crate::config::SourceConfig;

use super::r#trait::{ProductSource, SourceError};

/// Product base query: one row per product, subcategory and category optional.
pub const PRODUCT_BASE_QUERY: &str = r#"
SELECT
    CAST(p.ProductID AS SIGNED)             AS product_id,
    p.Name                                  AS product_name,
    CAST(p.ListPrice AS DECIMAL(19, 4))     AS list_price,
    CAST(p.StandardCost AS DECIMAL(19, 4))  AS standard_cost,
    p.Size                                  AS size,
    p.SizeUnitMeasureCode                   AS size_unit_code,
    CAST(p.Weight AS DECIMAL(19, 4))        AS weight,
    p.WeightUnitMeasureCode                 AS weight_unit_code,
    CAST(p.SellStartDate AS DATETIME)       AS sell_start_date,
    CAST(p.SellEndDate AS DATETIME)         AS sell_end_date,
    CAST(p.SafetyStockLevel AS SIGNED)      AS safety_stock_level,
    CAST(p.ReorderPoint AS SIGNED)          AS reorder_point,
    sc.Name                                 AS subcategory_name,
    c.Name                                  AS category_name
FROM product p
LEFT JOIN productsubcategory sc ON p.ProductSubcategoryID = sc.ProductSubcategoryID
LEFT JOIN productcategory c ON sc.ProductCategoryID = c.ProductCategoryID
ORDER BY p.ProductID
"#;

/// Product source reading from a MySQL catalog database.
#[derive(Debug, Clone)]
pub struct MySqlProductSource {
    config: SourceConfig,
}

impl MySqlProductSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProductSource for MySqlProductSource {
    #[instrument(skip(self), fields(database = %self.config.target()), err)]
    async fn fetch_products(&self) -> Result<Vec<ProductBase>, SourceError> {
        let mut conn = MySqlConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(|source| SourceError::Connect {
                target: self.config.target(),
                source,
            })?;
        info!("connected to product source");

        let result = sqlx::query(PRODUCT_BASE_QUERY).fetch_all(&mut conn).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close product source connection cleanly");
        }

        let rows = result.map_err(SourceError::Query)?;
        let products = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;

        info!(rows = products.len(), "fetched product base rows");
        Ok(products)
    }
}

fn decode_row(row: &MySqlRow) -> Result<ProductBase, SourceError> {
    let product_id = row
        .try_get::<i64, _>("product_id")
        .map_err(|e| SourceError::Decode {
            column: "product_id",
            message: e.to_string(),
        })?;

    Ok(ProductBase {
        product_id: ProductId::new(product_id),
        name: optional::<String>(row, "product_name"),
        list_price: optional_number(row, "list_price"),
        standard_cost: optional_number(row, "standard_cost"),
        size: optional::<String>(row, "size"),
        size_unit_code: optional::<String>(row, "size_unit_code"),
        weight: optional_number(row, "weight"),
        weight_unit_code: optional::<String>(row, "weight_unit_code"),
        sell_start_date: optional::<NaiveDateTime>(row, "sell_start_date"),
        sell_end_date: optional::<NaiveDateTime>(row, "sell_end_date"),
        safety_stock_level: optional::<i64>(row, "safety_stock_level"),
        reorder_point: optional::<i64>(row, "reorder_point"),
        subcategory_name: optional::<String>(row, "subcategory_name"),
        category_name: optional::<String>(row, "category_name"),
    })
}

/// Decode a nullable column, treating undecodable values as NULL.
fn optional<'r, T>(row: &'r MySqlRow, column: &'static str) -> Option<T>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => value,
        Err(e) => {
            debug!(column, error = %e, "column value not decodable; treating as absent");
            None
        }
    }
}

fn optional_number(row: &MySqlRow, column: &'static str) -> Option<f64> {
    optional::<Decimal>(row, column).and_then(|d| d.to_f64())
}
