//! Precomputed page contents.

use super::format::{format_count, format_currency};
use super::page::Page;
use crate::charts::ChartSpec;
use crate::stats::{AggregateTable, KpiSet};
use serde::Serialize;

pub const ICON_REVENUE: &str = "https://i.imgur.com/8Km9tLL.png";
pub const ICON_UNITS: &str = "https://i.imgur.com/sWJYqz0.png";
pub const ICON_PRICE: &str = "https://i.imgur.com/4YQZ8zC.png";
pub const ICON_PRODUCTS: &str = "https://i.imgur.com/AFaH7aV.png";

pub const RECOMMENDATIONS: [&str; 4] = [
    "Increase placement in high-performing product positions.",
    "Review pricing strategy for high-volume items.",
    "Expand sourcing where performance is high.",
    "Boost seasonal campaigns based on strongest seasons.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
    pub icon_url: &'static str,
}

impl KpiCard {
    /// Overview cards in display order.
    pub fn cards(kpis: &KpiSet) -> Vec<KpiCard> {
        vec![
            KpiCard {
                label: "Total Revenue",
                value: format_currency(kpis.total_revenue),
                icon_url: ICON_REVENUE,
            },
            KpiCard {
                label: "Total Units",
                value: format_count(kpis.total_units),
                icon_url: ICON_UNITS,
            },
            KpiCard {
                label: "Average Price",
                value: format_currency(kpis.average_price),
                icon_url: ICON_PRICE,
            },
            KpiCard {
                label: "Unique Products",
                value: kpis.unique_products.to_string(),
                icon_url: ICON_PRODUCTS,
            },
        ]
    }
}

/// Data-derived insight sentences. A sentence is left out when its table is empty.
pub fn insights(
    by_position: &AggregateTable,
    by_season: &AggregateTable,
    by_origin: &AggregateTable,
) -> Vec<String> {
    [
        by_position
            .top_label()
            .map(|p| format!("Most sales come from the '{p}' position.")),
        by_season.top_label().map(|s| format!("Top season: {s}")),
        by_origin.top_label().map(|o| format!("Strongest region: {o}")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Everything one page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub kpis: Vec<KpiCard>,
    pub charts: Vec<ChartSpec>,
    pub insights: Vec<String>,
    pub recommendations: Vec<&'static str>,
}

impl PageView {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            kpis: Vec::new(),
            charts: Vec::new(),
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}
