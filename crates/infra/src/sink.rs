//! CSV output for derived product attributes.
//!
//! Output is all-or-nothing: rows go to a temporary file in the destination
//! directory, which replaces the target only once every row is written and
//! synced. A failed run leaves any previous file untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, instrument};

use attrforge_core::ProductId;
use attrforge_products::ProductAttributes;

/// File name used when no explicit output path is given.
pub const OUTPUT_FILE_NAME: &str = "product_attributes.csv";

/// Header row, in output column order.
pub const COLUMNS: [&str; 13] = [
    "ProductID",
    "MarketingSegment",
    "BrandTier",
    "PriceBand",
    "OnlineOnly",
    "Season",
    "LaunchYear",
    "SizeCategory",
    "WeightKg",
    "IsDiscontinued",
    "SafetyStockLevel",
    "ReorderPoint",
    "MsrpToCostRatio",
];

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode csv")]
    Csv(#[from] csv::Error),

    #[error("failed to move output into place at {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `product_attributes.csv` next to the running executable.
pub fn default_output_path() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(dir.join(OUTPUT_FILE_NAME))
}

/// One serialized output row. Field order matches `COLUMNS`.
#[derive(Debug, Serialize)]
struct CsvRow {
    product_id: ProductId,
    marketing_segment: Option<&'static str>,
    brand_tier: Option<&'static str>,
    price_band: Option<&'static str>,
    online_only: &'static str,
    season: Option<&'static str>,
    launch_year: Option<i32>,
    size_category: Option<&'static str>,
    weight_kg: Option<String>,
    is_discontinued: &'static str,
    safety_stock_level: Option<i64>,
    reorder_point: Option<i64>,
    msrp_to_cost_ratio: Option<String>,
}

impl From<&ProductAttributes> for CsvRow {
    fn from(a: &ProductAttributes) -> Self {
        Self {
            product_id: a.product_id,
            marketing_segment: a.marketing_segment.map(|v| v.as_str()),
            brand_tier: a.brand_tier.map(|v| v.as_str()),
            price_band: a.price_band.map(|v| v.as_str()),
            online_only: format_flag(a.online_only),
            season: a.season.map(|v| v.as_str()),
            launch_year: a.launch_year,
            size_category: a.size_category.map(|v| v.as_str()),
            weight_kg: a.weight_kg.map(format_decimal),
            is_discontinued: format_flag(a.is_discontinued),
            safety_stock_level: a.safety_stock_level,
            reorder_point: a.reorder_point,
            msrp_to_cost_ratio: a.msrp_to_cost_ratio.map(format_decimal),
        }
    }
}

fn format_flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Shortest round-trip form, spelled the way Python's `repr` spells floats:
/// whole numbers keep one decimal place (`5.0`), and magnitudes at or above
/// `1e16` or below `1e-4` switch to a signed, two-digit-minimum exponent
/// (`1e+16`, `1.5e-05`).
fn format_decimal(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((digits, exponent)) => {
                let (sign, exp_digits) = match exponent.strip_prefix('-') {
                    Some(rest) => ('-', rest),
                    None => ('+', exponent),
                };
                format!("{digits}e{sign}{exp_digits:0>2}")
            }
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Write the header and one record per attribute row.
///
/// Missing values become empty fields. The header is written even when there
/// are no rows.
pub fn write_rows<W: Write>(
    writer: &mut csv::Writer<W>,
    rows: &[ProductAttributes],
) -> Result<(), csv::Error> {
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(CsvRow::from(row))?;
    }
    Ok(())
}

/// CSV file sink with atomic replacement of the target path.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self, rows), fields(path = %self.path.display(), rows = rows.len()), err)]
    pub fn write_all(&self, rows: &[ProductAttributes]) -> Result<(), SinkError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source| SinkError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());
            write_rows(&mut writer, rows)?;
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;

        tmp.persist(&self.path).map_err(|e| SinkError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        info!("wrote product attributes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrforge_products::{BrandTier, MarketingSegment, PriceBand, Season, SizeCategory};

    fn full_row() -> ProductAttributes {
        ProductAttributes {
            product_id: ProductId::new(707),
            marketing_segment: Some(MarketingSegment::Accessories),
            brand_tier: Some(BrandTier::Budget),
            price_band: Some(PriceBand::UpTo100),
            online_only: true,
            season: Some(Season::Spring),
            launch_year: Some(2011),
            size_category: Some(SizeCategory::Small),
            weight_kg: Some(4.54),
            is_discontinued: false,
            safety_stock_level: Some(4),
            reorder_point: Some(3),
            msrp_to_cost_ratio: Some(3.0),
        }
    }

    fn empty_row(id: i64) -> ProductAttributes {
        ProductAttributes {
            product_id: ProductId::new(id),
            marketing_segment: None,
            brand_tier: None,
            price_band: None,
            online_only: false,
            season: None,
            launch_year: None,
            size_category: None,
            weight_kg: None,
            is_discontinued: false,
            safety_stock_level: None,
            reorder_point: None,
            msrp_to_cost_ratio: None,
        }
    }

    fn render(rows: &[ProductAttributes]) -> String {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        write_rows(&mut writer, rows).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn header_is_written_for_empty_output() {
        assert_eq!(
            render(&[]),
            "ProductID,MarketingSegment,BrandTier,PriceBand,OnlineOnly,Season,LaunchYear,\
             SizeCategory,WeightKg,IsDiscontinued,SafetyStockLevel,ReorderPoint,MsrpToCostRatio\n"
        );
    }

    #[test]
    fn full_row_renders_labels_and_numbers() {
        let out = render(&[full_row()]);
        let line = out.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "707,Accessories,Budget,0-100,True,Spring,2011,Small,4.54,False,4,3,3.0"
        );
    }

    #[test]
    fn missing_values_render_as_empty_fields() {
        let out = render(&[empty_row(1)]);
        let line = out.lines().nth(1).unwrap();
        assert_eq!(line, "1,,,,False,,,,,False,,,");
    }

    #[test]
    fn decimals_keep_a_fractional_digit() {
        assert_eq!(format_decimal(1.0), "1.0");
        assert_eq!(format_decimal(5.0), "5.0");
        assert_eq!(format_decimal(4.54), "4.54");
        assert_eq!(format_decimal(0.32), "0.32");
    }

    #[test]
    fn extreme_decimals_use_exponent_notation() {
        assert_eq!(format_decimal(1e16), "1e+16");
        assert_eq!(format_decimal(1.5e17), "1.5e+17");
        assert_eq!(format_decimal(-2.5e20), "-2.5e+20");
        assert_eq!(format_decimal(1e300), "1e+300");
        assert_eq!(format_decimal(1.5e-5), "1.5e-05");
        assert_eq!(format_decimal(9999999999999998.0), "9999999999999998.0");
        assert_eq!(format_decimal(0.0001), "0.0001");
        assert_eq!(format_decimal(0.0), "0.0");
    }

    #[test]
    fn write_all_creates_file_with_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join(OUTPUT_FILE_NAME));

        sink.write_all(&[full_row(), empty_row(2)]).unwrap();

        let written = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert_eq!(written, render(&[full_row(), empty_row(2)]));
    }

    #[test]
    fn write_all_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE_NAME);
        std::fs::write(&path, "stale contents\n").unwrap();

        CsvSink::new(&path).write_all(&[empty_row(9)]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("ProductID,"));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn write_all_leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        CsvSink::new(dir.path().join(OUTPUT_FILE_NAME))
            .write_all(&[full_row()])
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_all_into_missing_directory_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(OUTPUT_FILE_NAME);

        let err = CsvSink::new(&path).write_all(&[full_row()]).unwrap_err();
        assert!(matches!(err, SinkError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn default_output_path_uses_fixed_file_name() {
        let path = default_output_path().unwrap();
        assert_eq!(path.file_name().unwrap(), OUTPUT_FILE_NAME);
    }
}
