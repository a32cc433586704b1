//! Per-product attribute derivation.
//!
//! Derivation is a pure map: each output depends on exactly one input record, so
//! the output sequence has the input's length and order.

use crate::attributes::ProductAttributes;
use crate::product::ProductBase;
use crate::rules;

/// Derive the attribute record for a single product.
pub fn derive_attributes(base: &ProductBase) -> ProductAttributes {
    let category = base.category_name.as_deref();

    ProductAttributes {
        product_id: base.product_id,
        marketing_segment: rules::marketing_segment(category),
        brand_tier: rules::brand_tier(base.list_price),
        price_band: rules::price_band(base.list_price),
        online_only: rules::online_only(category, base.list_price),
        season: rules::season(base.sell_start_date),
        launch_year: rules::launch_year(base.sell_start_date),
        size_category: rules::size_category(base.size.as_deref()),
        weight_kg: rules::weight_kg(base.weight, base.weight_unit_code.as_deref()),
        is_discontinued: rules::is_discontinued(base.sell_end_date),
        safety_stock_level: base.safety_stock_level,
        reorder_point: base.reorder_point,
        msrp_to_cost_ratio: rules::msrp_to_cost_ratio(base.list_price, base.standard_cost),
    }
}

/// Derive attribute records for every product, preserving order.
pub fn derive_all(products: &[ProductBase]) -> Vec<ProductAttributes> {
    products.iter().map(derive_attributes).collect()
}
