//! Data Processor Module
//! Filters out non-selling rows and derives revenue.

use super::schema::{PRICE, REVENUE, SALES_VOLUME};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles row filtering and derived columns.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows with positive sales volume and price, adding `Revenue = Sales Volume * price`.
    ///
    /// Expects a normalized table. Relative row order is preserved.
    pub fn filter_and_derive(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let clean = df
            .clone()
            .lazy()
            .filter(
                col(SALES_VOLUME)
                    .gt(lit(0.0))
                    .and(col(PRICE).gt(lit(0.0))),
            )
            .with_column((col(SALES_VOLUME) * col(PRICE)).alias(REVENUE))
            .collect()?;

        debug!(
            input_rows = df.height(),
            kept_rows = clean.height(),
            "filtered to selling rows"
        );
        Ok(clean)
    }
}
