//! Attribute derivation rules.
//!
//! Every rule is a total function of a few `ProductBase` fields. Missing or
//! unusable input yields `None` (or `false` for flags) for that one attribute;
//! no rule can fail or panic.

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::attributes::{BrandTier, MarketingSegment, PriceBand, Season, SizeCategory};

/// Brand tier upper bounds (exclusive).
pub const BUDGET_BELOW: f64 = 100.0;
pub const STANDARD_BELOW: f64 = 500.0;
pub const PREMIUM_BELOW: f64 = 1500.0;

/// Price band upper bounds (inclusive).
pub const BAND_100_MAX: f64 = 100.0;
pub const BAND_500_MAX: f64 = 500.0;
pub const BAND_1500_MAX: f64 = 1500.0;

/// Only this category may be flagged online-only.
pub const ONLINE_ONLY_CATEGORY: &str = "Accessories";
pub const ONLINE_ONLY_MAX_PRICE: f64 = 100.0;

/// Numeric size upper bounds (inclusive).
pub const SMALL_SIZE_MAX: f64 = 48.0;
pub const MEDIUM_SIZE_MAX: f64 = 56.0;

pub const KG_PER_POUND: f64 = 0.453592;
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Round to two decimal places, half to even, on the exact binary value
/// (`2.675` is stored just below the tie and rounds to `2.67`).
///
/// Non-finite or out-of-range values are dropped.
pub fn round2(value: f64) -> Option<f64> {
    let rounded = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    // A single division of exact integers is correctly rounded to the nearest f64.
    let scaled = rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32);
    scaled.is_finite().then_some(scaled)
}

fn usable_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| !p.is_nan())
}

pub fn marketing_segment(category: Option<&str>) -> Option<MarketingSegment> {
    match category? {
        "Bikes" => Some(MarketingSegment::Performance),
        "Components" => Some(MarketingSegment::Components),
        "Clothing" => Some(MarketingSegment::Apparel),
        "Accessories" => Some(MarketingSegment::Accessories),
        _ => None,
    }
}

pub fn brand_tier(list_price: Option<f64>) -> Option<BrandTier> {
    let price = usable_price(list_price)?;
    let tier = if price < BUDGET_BELOW {
        BrandTier::Budget
    } else if price < STANDARD_BELOW {
        BrandTier::Standard
    } else if price < PREMIUM_BELOW {
        BrandTier::Premium
    } else {
        BrandTier::Luxury
    };
    Some(tier)
}

pub fn price_band(list_price: Option<f64>) -> Option<PriceBand> {
    let price = usable_price(list_price)?;
    let band = if price <= BAND_100_MAX {
        PriceBand::UpTo100
    } else if price <= BAND_500_MAX {
        PriceBand::UpTo500
    } else if price <= BAND_1500_MAX {
        PriceBand::UpTo1500
    } else {
        PriceBand::Above1500
    };
    Some(band)
}

pub fn online_only(category: Option<&str>, list_price: Option<f64>) -> bool {
    category == Some(ONLINE_ONLY_CATEGORY)
        && usable_price(list_price).is_some_and(|p| p <= ONLINE_ONLY_MAX_PRICE)
}

pub fn season(sell_start: Option<NaiveDateTime>) -> Option<Season> {
    Season::from_month(sell_start?.month())
}

pub fn launch_year(sell_start: Option<NaiveDateTime>) -> Option<i32> {
    sell_start.map(|d| d.year())
}

/// Parse a free-form size label as a number ("48" -> 48.0, "M" -> None).
pub fn parse_size(size: Option<&str>) -> Option<f64> {
    size?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn size_category(size: Option<&str>) -> Option<SizeCategory> {
    let size = parse_size(size)?;
    let category = if size <= SMALL_SIZE_MAX {
        SizeCategory::Small
    } else if size <= MEDIUM_SIZE_MAX {
        SizeCategory::Medium
    } else {
        SizeCategory::Large
    };
    Some(category)
}

/// Convert a weight to kilograms using its unit code.
///
/// Unit codes match by case-insensitive prefix: `LB*` is pounds, `G*` is grams,
/// anything else (including no unit) is taken as kilograms already.
pub fn weight_kg(weight: Option<f64>, unit_code: Option<&str>) -> Option<f64> {
    let weight = weight.filter(|w| w.is_finite())?;
    let unit = unit_code
        .map(|u| u.trim().to_ascii_uppercase())
        .unwrap_or_default();

    let kg = if unit.starts_with("LB") {
        weight * KG_PER_POUND
    } else if unit.starts_with('G') {
        weight / GRAMS_PER_KG
    } else {
        weight
    };
    round2(kg)
}

/// A product is discontinued once it has any sell-end date, past or future.
pub fn is_discontinued(sell_end: Option<NaiveDateTime>) -> bool {
    sell_end.is_some()
}

pub fn msrp_to_cost_ratio(list_price: Option<f64>, standard_cost: Option<f64>) -> Option<f64> {
    let cost = standard_cost.filter(|c| *c > 0.0)?;
    let price = list_price.filter(|p| p.is_finite())?;
    round2(price / cost)
}
