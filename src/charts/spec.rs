//! Chart descriptors.
//! Renderer-agnostic description of a chart: what to draw, never how.

use crate::data::schema::{NAME, PRICE, SALES_VOLUME};
use crate::stats::AggregateTable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    VerticalBar,
    HorizontalBar,
    Scatter,
}

/// One labelled bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub label: String,
    pub value: f64,
}

/// One scatter point with its hover label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChartSeries {
    /// Nothing to plot; renderers draw a blank chart.
    Empty,
    /// Bars in display order, largest first.
    Categories(Vec<CategoryBar>),
    Points(Vec<ScatterPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    /// Column bound to the x axis.
    pub x: String,
    /// Column bound to the y axis.
    pub y: String,
    /// Column shown on hover, scatter charts only.
    pub hover: Option<String>,
    pub series: ChartSeries,
}

impl ChartSpec {
    /// Bars rising from the x axis: key on x, sales volume on y.
    pub fn vertical_bar(table: &AggregateTable, title: &str) -> Self {
        Self {
            title: title.to_string(),
            kind: ChartKind::VerticalBar,
            x: table.key_column.clone(),
            y: SALES_VOLUME.to_string(),
            hover: None,
            series: Self::categories(table),
        }
    }

    /// Bars growing to the right: sales volume on x, key on y.
    pub fn horizontal_bar(table: &AggregateTable, title: &str) -> Self {
        Self {
            title: title.to_string(),
            kind: ChartKind::HorizontalBar,
            x: SALES_VOLUME.to_string(),
            y: table.key_column.clone(),
            hover: None,
            series: Self::categories(table),
        }
    }

    /// Price against sales volume, one point per clean row.
    pub fn scatter(points: Vec<ScatterPoint>, title: &str) -> Self {
        let series = if points.is_empty() {
            ChartSeries::Empty
        } else {
            ChartSeries::Points(points)
        };
        Self {
            title: title.to_string(),
            kind: ChartKind::Scatter,
            x: PRICE.to_string(),
            y: SALES_VOLUME.to_string(),
            hover: Some(NAME.to_string()),
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.series, ChartSeries::Empty)
    }

    /// File-name friendly form of the title.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for ch in self.title.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_matches('_').to_string()
    }

    fn categories(table: &AggregateTable) -> ChartSeries {
        if table.is_empty() {
            return ChartSeries::Empty;
        }
        ChartSeries::Categories(
            table
                .rows
                .iter()
                .map(|r| CategoryBar {
                    label: r.label.clone(),
                    value: r.sales_volume,
                })
                .collect(),
        )
    }
}
