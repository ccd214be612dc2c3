//! Schema Normalizer
//! Guarantees the expected sales columns exist and coerces the numeric ones.

use super::processor::ProcessorError;
use polars::prelude::*;
use tracing::debug;

pub const PRODUCT_ID: &str = "Product ID";
pub const PRODUCT_POSITION: &str = "Product Position";
pub const PROMOTION: &str = "Promotion";
pub const PRODUCT_CATEGORY: &str = "Product Category";
pub const SALES_VOLUME: &str = "Sales Volume";
pub const NAME: &str = "name";
pub const PRICE: &str = "price";
pub const SEASON: &str = "season";
pub const MATERIAL: &str = "material";
pub const ORIGIN: &str = "origin";
pub const REVENUE: &str = "Revenue";

/// Columns every record carries after normalization.
pub const EXPECTED_COLUMNS: [&str; 17] = [
    PRODUCT_ID,
    PRODUCT_POSITION,
    PROMOTION,
    PRODUCT_CATEGORY,
    "Seasonal",
    SALES_VOLUME,
    "brand",
    "url",
    NAME,
    "description",
    PRICE,
    "currency",
    "terms",
    "section",
    SEASON,
    MATERIAL,
    ORIGIN,
];

/// Columns coerced to `f64`.
pub const NUMERIC_COLUMNS: [&str; 2] = [SALES_VOLUME, PRICE];

/// Parse a raw cell as a number. Missing, unparseable and non-finite values
/// (`NaN`, `inf`, overflowing literals like `1e400`) become `0.0`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub struct SchemaNormalizer;

impl SchemaNormalizer {
    /// Fill missing expected columns with `""` and coerce the numeric columns.
    pub fn normalize(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let mut df = df.clone();
        let height = df.height();

        let mut filled = Vec::new();
        for name in EXPECTED_COLUMNS {
            if df.get_column_index(name).is_none() {
                df.with_column(Series::new(name.into(), vec![""; height]))?;
                filled.push(name);
            }
        }
        if !filled.is_empty() {
            debug!(columns = ?filled, "filled missing columns with empty strings");
        }

        for name in NUMERIC_COLUMNS {
            let coerced = Self::coerce_column(df.column(name)?)?;
            df.with_column(coerced)?;
        }

        Ok(df)
    }

    /// Coerce one column to `f64`, mapping anything non-numeric to `0.0`.
    pub fn coerce_column(column: &Column) -> Result<Series, ProcessorError> {
        let values: Vec<f64> = match column.dtype() {
            DataType::String => column
                .as_materialized_series()
                .str()?
                .into_iter()
                .map(coerce_number)
                .collect(),
            _ => column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| x.is_finite()).unwrap_or(0.0))
                .collect(),
        };

        Ok(Series::new(column.name().clone(), values))
    }
}
