//! Grouped sales aggregation.
//!
//! Every table is keyed by one column and carries the summed `Sales Volume` per distinct
//! key, sorted descending. Groups with equal sums keep the order in which their key first
//! appears in the input: grouping is stable and so is the sort.

use crate::data::schema::SALES_VOLUME;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Internal alias so grouping by `Sales Volume` itself does not clash with the summed column.
const GROUP_KEY: &str = "__group_key";

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One group of an [`AggregateTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub label: String,
    pub sales_volume: f64,
}

/// Key value -> summed sales volume, sorted descending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    pub key_column: String,
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn empty(key_column: &str) -> Self {
        Self {
            key_column: key_column.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Label of the best-selling group, if any.
    pub fn top_label(&self) -> Option<&str> {
        self.rows.first().map(|r| r.label.as_str())
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Group `df` by `key`, sum `Sales Volume` and sort descending.
    ///
    /// Returns the empty table when `df` has no rows or lacks `key`. Null keys are skipped.
    pub fn group_sum(df: &DataFrame, key: &str) -> Result<AggregateTable, StatsError> {
        if df.height() == 0 || df.get_column_index(key).is_none() {
            return Ok(AggregateTable::empty(key));
        }

        let grouped = df
            .clone()
            .lazy()
            .select([
                col(key).cast(DataType::String).alias(GROUP_KEY),
                col(SALES_VOLUME),
            ])
            .filter(col(GROUP_KEY).is_not_null())
            .group_by_stable([col(GROUP_KEY)])
            .agg([col(SALES_VOLUME).sum()])
            .sort(
                [SALES_VOLUME],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .collect()?;

        let labels = grouped.column(GROUP_KEY)?.as_materialized_series().str()?;
        let volumes = grouped.column(SALES_VOLUME)?.f64()?;

        let rows = labels
            .into_iter()
            .zip(volumes.into_iter())
            .filter_map(|(label, volume)| {
                Some(AggregateRow {
                    label: label?.to_string(),
                    sales_volume: volume.unwrap_or(0.0),
                })
            })
            .collect();

        Ok(AggregateTable {
            key_column: key.to_string(),
            rows,
        })
    }

    /// The `n` best-selling groups of `label`. Fewer groups than `n` are returned as-is.
    pub fn top_n(df: &DataFrame, label: &str, n: usize) -> Result<AggregateTable, StatsError> {
        let mut table = Self::group_sum(df, label)?;
        table.rows.truncate(n);
        Ok(table)
    }
}
