//! Dashboard context.
//!
//! Built once from the source CSV and read-only afterwards. Every page view is computed
//! up front, so navigation only selects one.

use super::page::{select_page, Page};
use super::view::{insights, KpiCard, PageView, RECOMMENDATIONS};
use crate::charts::{ChartSpec, ScatterPoint};
use crate::config::DashboardConfig;
use crate::data::schema::{
    MATERIAL, NAME, ORIGIN, PRICE, PRODUCT_CATEGORY, PRODUCT_POSITION, PROMOTION, SALES_VOLUME,
    SEASON,
};
use crate::data::{DataLoader, DataProcessor, ProcessorError, SchemaNormalizer};
use crate::stats::{AggregateTable, Aggregator, KpiSet, StatsError};
use polars::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Number of products on the top products chart.
pub const TOP_PRODUCTS: usize = 10;

/// The grouped-sum tables behind the charts and insights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesTables {
    pub by_position: AggregateTable,
    pub by_promotion: AggregateTable,
    pub by_season: AggregateTable,
    pub by_material: AggregateTable,
    pub by_origin: AggregateTable,
    pub by_category: AggregateTable,
    pub top_products: AggregateTable,
}

impl SalesTables {
    fn compute(clean: &DataFrame) -> Self {
        Self {
            by_position: group_or_empty(clean, PRODUCT_POSITION),
            by_promotion: group_or_empty(clean, PROMOTION),
            by_season: group_or_empty(clean, SEASON),
            by_material: group_or_empty(clean, MATERIAL),
            by_origin: group_or_empty(clean, ORIGIN),
            by_category: group_or_empty(clean, PRODUCT_CATEGORY),
            top_products: Aggregator::top_n(clean, NAME, TOP_PRODUCTS)
                .unwrap_or_else(|e| absorb(NAME, e)),
        }
    }
}

fn group_or_empty(clean: &DataFrame, key: &str) -> AggregateTable {
    Aggregator::group_sum(clean, key).unwrap_or_else(|e| absorb(key, e))
}

fn absorb(key: &str, e: StatsError) -> AggregateTable {
    warn!(key, error = %e, "aggregation failed, using an empty table");
    AggregateTable::empty(key)
}

/// Immutable, fully computed dashboard state.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    source: Option<PathBuf>,
    raw_rows: usize,
    clean: DataFrame,
    kpis: KpiSet,
    tables: SalesTables,
    views: [PageView; 4],
}

impl DashboardContext {
    /// Load the configured CSV and compute everything.
    pub fn build(config: &DashboardConfig) -> Self {
        Self::from_path(&config.csv_path)
    }

    pub fn from_path(path: &Path) -> Self {
        let raw = DataLoader::load_csv(path);
        let mut ctx = Self::from_frame(&raw);
        ctx.source = Some(path.to_path_buf());
        ctx
    }

    /// Compute everything from an already loaded raw table.
    pub fn from_frame(raw: &DataFrame) -> Self {
        let clean = Self::clean(raw).unwrap_or_else(|e| {
            warn!(error = %e, "cleaning failed, using an empty table");
            DataFrame::empty()
        });
        let kpis = KpiSet::from_clean(&clean).unwrap_or_else(|e| {
            warn!(error = %e, "KPI computation failed, using zero values");
            KpiSet::default()
        });
        let tables = SalesTables::compute(&clean);
        let views = Self::build_views(&kpis, &tables, Self::price_points(&clean));

        info!(
            raw_rows = raw.height(),
            clean_rows = clean.height(),
            revenue = kpis.total_revenue,
            "dashboard context ready"
        );

        Self {
            source: None,
            raw_rows: raw.height(),
            clean,
            kpis,
            tables,
            views,
        }
    }

    fn clean(raw: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let normalized = SchemaNormalizer::normalize(raw)?;
        DataProcessor::filter_and_derive(&normalized)
    }

    /// One scatter point per clean row, price against sales volume.
    fn price_points(clean: &DataFrame) -> Vec<ScatterPoint> {
        let extract = || -> PolarsResult<Vec<ScatterPoint>> {
            let prices = clean.column(PRICE)?.f64()?;
            let volumes = clean.column(SALES_VOLUME)?.f64()?;
            let names = clean.column(NAME)?.cast(&DataType::String)?;
            let names = names.as_materialized_series().str()?;

            Ok(prices
                .into_iter()
                .zip(volumes.into_iter())
                .zip(names.into_iter())
                .filter_map(|((x, y), label)| {
                    Some(ScatterPoint {
                        x: x?,
                        y: y?,
                        label: label.unwrap_or_default().to_string(),
                    })
                })
                .collect())
        };

        if clean.height() == 0 {
            return Vec::new();
        }
        extract().unwrap_or_else(|e| {
            warn!(error = %e, "scatter extraction failed");
            Vec::new()
        })
    }

    fn build_views(
        kpis: &KpiSet,
        tables: &SalesTables,
        points: Vec<ScatterPoint>,
    ) -> [PageView; 4] {
        let mut overview = PageView::new(Page::Overview);
        overview.kpis = KpiCard::cards(kpis);
        overview.charts = vec![
            ChartSpec::vertical_bar(&tables.by_position, "Sales by Product Position"),
            ChartSpec::vertical_bar(&tables.by_promotion, "Sales: Promotion vs No Promotion"),
            ChartSpec::vertical_bar(&tables.by_origin, "Sales by Region / Origin"),
        ];

        let mut details = PageView::new(Page::Details);
        details.charts = vec![
            ChartSpec::horizontal_bar(&tables.top_products, "Top 10 Products by Sales Volume"),
            ChartSpec::vertical_bar(&tables.by_material, "Sales by Material"),
            ChartSpec::vertical_bar(&tables.by_category, "Sales by Product Category"),
        ];

        let mut advanced = PageView::new(Page::Advanced);
        advanced.charts = vec![
            ChartSpec::vertical_bar(&tables.by_season, "Sales by Season"),
            ChartSpec::scatter(points, "Price vs Sales Volume"),
        ];

        let mut insight_page = PageView::new(Page::Insights);
        insight_page.insights = insights(&tables.by_position, &tables.by_season, &tables.by_origin);
        insight_page.recommendations = RECOMMENDATIONS.to_vec();

        [overview, details, advanced, insight_page]
    }

    /// The precomputed view for a navigation path.
    pub fn view(&self, path: &str) -> &PageView {
        self.page_view(select_page(path))
    }

    pub fn page_view(&self, page: Page) -> &PageView {
        // Indexed in `Page::ALL` order.
        match page {
            Page::Overview => &self.views[0],
            Page::Details => &self.views[1],
            Page::Advanced => &self.views[2],
            Page::Insights => &self.views[3],
        }
    }

    pub fn views(&self) -> &[PageView] {
        &self.views
    }

    pub fn kpis(&self) -> &KpiSet {
        &self.kpis
    }

    pub fn tables(&self) -> &SalesTables {
        &self.tables
    }

    pub fn clean_rows(&self) -> &DataFrame {
        &self.clean
    }

    pub fn raw_row_count(&self) -> usize {
        self.raw_rows
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "Product ID" => ["1", "2", "3", "4"],
            "Product Position" => ["Aisle", "End-cap", "Aisle", "Front"],
            "name" => ["Tee", "Coat", "Tee", "Scarf"],
            "Sales Volume" => ["10", "4", "5", "0"],
            "price" => ["2", "50", "2", "9"],
            "season" => ["Summer", "Winter", "Summer", "Winter"],
            "origin" => ["PT", "ES", "PT", "IT"]
        )
        .unwrap()
    }

    #[test]
    fn empty_dataset_renders_zero_dashboard() {
        let ctx = DashboardContext::from_frame(&DataFrame::empty());

        assert_eq!(*ctx.kpis(), KpiSet::default());
        let overview = ctx.view("/");
        assert_eq!(overview.kpis[0].value, "$0.00");
        assert_eq!(overview.kpis[1].value, "0");
        assert!(overview.charts.iter().all(ChartSpec::is_empty));
        assert!(ctx.view("/advanced").charts.iter().all(ChartSpec::is_empty));
        assert!(ctx.view("/insights").insights.is_empty());
        assert_eq!(ctx.view("/insights").recommendations.len(), 4);
    }

    #[test]
    fn computes_views_once() {
        let ctx = DashboardContext::from_frame(&sample());

        assert_eq!(ctx.raw_row_count(), 4);
        assert_eq!(ctx.clean_rows().height(), 3);
        assert_eq!(ctx.kpis().total_revenue, 230.0);
        assert_eq!(ctx.kpis().total_units, 19);
        assert_eq!(ctx.kpis().unique_products, 3);

        assert_eq!(ctx.tables().by_position.top_label(), Some("Aisle"));
        assert_eq!(ctx.tables().top_products.top_label(), Some("Tee"));
        assert!(ctx.tables().by_material.rows.iter().all(|r| r.label.is_empty()));

        assert_eq!(
            ctx.view("/insights").insights,
            vec![
                "Most sales come from the 'Aisle' position.",
                "Top season: Summer",
                "Strongest region: PT",
            ]
        );
    }

    #[test]
    fn unknown_paths_show_overview() {
        let ctx = DashboardContext::from_frame(&sample());
        assert_eq!(ctx.view("/missing").page, Page::Overview);
        assert_eq!(ctx.view("").page, Page::Overview);
        assert_eq!(ctx.view("/details").page, Page::Details);
        assert_eq!(ctx.views().len(), 4);
    }

    #[test]
    fn scatter_has_one_point_per_clean_row() {
        let ctx = DashboardContext::from_frame(&sample());
        let scatter = &ctx.view("/advanced").charts[1];
        match &scatter.series {
            crate::charts::ChartSeries::Points(points) => {
                assert_eq!(points.len(), 3);
                assert_eq!(points[1].label, "Coat");
                assert_eq!((points[1].x, points[1].y), (50.0, 4.0));
            }
            other => panic!("unexpected series {other:?}"),
        }
    }
}
