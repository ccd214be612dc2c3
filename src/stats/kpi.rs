//! Top-line KPIs over the clean sales rows.

use super::aggregator::StatsError;
use crate::data::schema::{PRICE, PRODUCT_ID, REVENUE, SALES_VOLUME};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// The four scalars shown on the overview page. All zero for an empty dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSet {
    pub total_revenue: f64,
    /// Summed sales volume, truncated to an integer.
    pub total_units: i64,
    pub average_price: f64,
    pub unique_products: usize,
}

impl KpiSet {
    /// Compute the KPIs from clean rows (those carrying a `Revenue` column).
    pub fn from_clean(df: &DataFrame) -> Result<Self, StatsError> {
        if df.height() == 0 {
            return Ok(Self::default());
        }

        let revenue = Self::values(df, REVENUE)?;
        let volumes = Self::values(df, SALES_VOLUME)?;
        let prices = Self::values(df, PRICE)?;

        let unique_products = df
            .column(PRODUCT_ID)?
            .cast(&DataType::String)?
            .as_materialized_series()
            .str()?
            .into_iter()
            .flatten()
            .collect::<HashSet<&str>>()
            .len();

        let finite: Vec<f64> = prices.into_iter().filter(|p| p.is_finite()).collect();
        let average_price = if finite.is_empty() {
            0.0
        } else {
            finite.iter().mean()
        };

        Ok(Self {
            total_revenue: revenue.iter().sum(),
            total_units: volumes.iter().sum::<f64>() as i64,
            average_price,
            unique_products,
        })
    }

    fn values(df: &DataFrame, name: &str) -> Result<Vec<f64>, StatsError> {
        Ok(df
            .column(name)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .collect())
    }
}
