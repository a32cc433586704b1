//! Derived product attributes.
//!
//! Each classification is a small closed enum with a stable text label; the
//! labels are what ends up in the exported file.

use attrforge_core::{Entity, ProductId};

macro_rules! impl_label {
    ($t:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $t {
            /// Stable text label used in exports.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Marketing segment, keyed off the product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketingSegment {
    Performance,
    Components,
    Apparel,
    Accessories,
}

impl_label!(MarketingSegment {
    Performance => "Performance",
    Components => "Components",
    Apparel => "Apparel",
    Accessories => "Accessories",
});

/// Brand tier by list price (upper bounds exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BrandTier {
    Budget,
    Standard,
    Premium,
    Luxury,
}

impl_label!(BrandTier {
    Budget => "Budget",
    Standard => "Standard",
    Premium => "Premium",
    Luxury => "Luxury",
});

/// Price band by list price (upper bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceBand {
    UpTo100,
    UpTo500,
    UpTo1500,
    Above1500,
}

impl_label!(PriceBand {
    UpTo100 => "0-100",
    UpTo500 => "100-500",
    UpTo1500 => "500-1500",
    Above1500 => "1500+",
});

/// Meteorological season of the sell-start month (northern hemisphere).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season for a 1-based month number; `None` outside 1..=12.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Self::Winter),
            3..=5 => Some(Self::Spring),
            6..=8 => Some(Self::Summer),
            9..=11 => Some(Self::Fall),
            _ => None,
        }
    }
}

impl_label!(Season {
    Winter => "Winter",
    Spring => "Spring",
    Summer => "Summer",
    Fall => "Fall",
});

/// Size category for numeric sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl_label!(SizeCategory {
    Small => "Small",
    Medium => "Medium",
    Large => "Large",
});

/// Attribute record derived from one `ProductBase`.
///
/// `None` means the attribute could not be derived from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAttributes {
    pub product_id: ProductId,
    pub marketing_segment: Option<MarketingSegment>,
    pub brand_tier: Option<BrandTier>,
    pub price_band: Option<PriceBand>,
    pub online_only: bool,
    pub season: Option<Season>,
    pub launch_year: Option<i32>,
    pub size_category: Option<SizeCategory>,
    pub weight_kg: Option<f64>,
    pub is_discontinued: bool,
    pub safety_stock_level: Option<i64>,
    pub reorder_point: Option<i64>,
    pub msrp_to_cost_ratio: Option<f64>,
}

impl Entity for ProductAttributes {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_band_labels_match_export_format() {
        assert_eq!(PriceBand::UpTo100.as_str(), "0-100");
        assert_eq!(PriceBand::UpTo500.as_str(), "100-500");
        assert_eq!(PriceBand::UpTo1500.as_str(), "500-1500");
        assert_eq!(PriceBand::Above1500.to_string(), "1500+");
    }

    #[test]
    fn season_covers_every_month() {
        let seasons: Vec<_> = (1..=12).map(Season::from_month).collect();
        assert!(seasons.iter().all(Option::is_some));
        assert_eq!(Season::from_month(12), Some(Season::Winter));
        assert_eq!(Season::from_month(3), Some(Season::Spring));
        assert_eq!(Season::from_month(8), Some(Season::Summer));
        assert_eq!(Season::from_month(11), Some(Season::Fall));
    }

    #[test]
    fn season_rejects_out_of_range_months() {
        assert_eq!(Season::from_month(0), None);
        assert_eq!(Season::from_month(13), None);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(MarketingSegment::Performance.to_string(), "Performance");
        assert_eq!(BrandTier::Luxury.to_string(), "Luxury");
        assert_eq!(SizeCategory::Medium.to_string(), "Medium");
    }
}
