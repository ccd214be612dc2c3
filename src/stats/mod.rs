//! Stats module - grouped sums and KPI scalars

mod aggregator;
mod kpi;

pub use aggregator::{AggregateRow, AggregateTable, Aggregator, StatsError};
pub use kpi::KpiSet;
