use chrono::NaiveDateTime;

use attrforge_core::{Entity, ProductId};

/// Base product record as read from the catalog source.
///
/// Every field except the identifier is optional: the source may hold NULLs or
/// values that could not be decoded, and the attribute rules degrade to an
/// empty result for whatever is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductBase {
    pub product_id: ProductId,
    pub name: Option<String>,
    pub list_price: Option<f64>,
    pub standard_cost: Option<f64>,
    /// Free-form size label ("48", "M", "XL", ...).
    pub size: Option<String>,
    pub size_unit_code: Option<String>,
    pub weight: Option<f64>,
    pub weight_unit_code: Option<String>,
    pub sell_start_date: Option<NaiveDateTime>,
    /// Absence means the product is still sold.
    pub sell_end_date: Option<NaiveDateTime>,
    pub safety_stock_level: Option<i64>,
    pub reorder_point: Option<i64>,
    pub subcategory_name: Option<String>,
    pub category_name: Option<String>,
}

impl ProductBase {
    /// Create a record with only the identifier set.
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            name: None,
            list_price: None,
            standard_cost: None,
            size: None,
            size_unit_code: None,
            weight: None,
            weight_unit_code: None,
            sell_start_date: None,
            sell_end_date: None,
            safety_stock_level: None,
            reorder_point: None,
            subcategory_name: None,
            category_name: None,
        }
    }
}

impl Entity for ProductBase {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_only_the_identifier() {
        let product = ProductBase::new(ProductId::new(680));
        assert_eq!(product.id(), &ProductId::new(680));
        assert_eq!(product.list_price, None);
        assert_eq!(product.category_name, None);
        assert_eq!(product.sell_end_date, None);
    }

    #[test]
    fn struct_update_keeps_identifier() {
        let product = ProductBase {
            list_price: Some(1431.50),
            category_name: Some("Bikes".to_string()),
            ..ProductBase::new(ProductId::new(749))
        };
        assert_eq!(product.product_id.get(), 749);
        assert_eq!(product.list_price, Some(1431.50));
    }
}
