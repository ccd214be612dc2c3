//! Dashboard export.
//! Writes every page's charts as PNG files plus a `dashboard.json` of all page views.

use crate::charts::{RenderError, StaticChartRenderer};
use crate::dashboard::{DashboardContext, PageView, SalesTables};
use crate::stats::KpiSet;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const SUMMARY_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Render error for '{title}': {source}")]
    Render {
        title: String,
        #[source]
        source: RenderError,
    },
}

/// Serialized form of the whole dashboard.
#[derive(Serialize)]
struct DashboardSummary<'a> {
    source: Option<String>,
    raw_rows: usize,
    clean_rows: usize,
    kpis: &'a KpiSet,
    tables: &'a SalesTables,
    pages: &'a [PageView],
}

/// Files written by an export.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub summary: Option<PathBuf>,
    pub charts: Vec<PathBuf>,
}

pub struct DashboardExporter;

impl DashboardExporter {
    /// Pretty JSON of the full dashboard.
    pub fn summary_json(ctx: &DashboardContext) -> Result<String, ExportError> {
        let summary = DashboardSummary {
            source: ctx.source().map(|p| p.display().to_string()),
            raw_rows: ctx.raw_row_count(),
            clean_rows: ctx.clean_rows().height(),
            kpis: ctx.kpis(),
            tables: ctx.tables(),
            pages: ctx.views(),
        };
        Ok(serde_json::to_string_pretty(&summary)?)
    }

    /// Pretty JSON of one page view.
    pub fn page_json(view: &PageView) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(view)?)
    }

    /// Write `dashboard.json` into `dir`, creating it if needed.
    pub fn write_summary(ctx: &DashboardContext, dir: &Path) -> Result<PathBuf, ExportError> {
        Self::ensure_dir(dir)?;
        let path = dir.join(SUMMARY_FILE);
        let json = Self::summary_json(ctx)?;
        fs::write(&path, json).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote dashboard summary");
        Ok(path)
    }

    /// Render every chart as `<page>_<n>_<title>.png` into `dir`.
    pub fn write_charts(
        ctx: &DashboardContext,
        dir: &Path,
        size: (u32, u32),
    ) -> Result<Vec<PathBuf>, ExportError> {
        Self::ensure_dir(dir)?;
        let mut written = Vec::new();

        for view in ctx.views() {
            let page = view.page.title().to_lowercase();
            for (idx, spec) in view.charts.iter().enumerate() {
                let bytes = StaticChartRenderer::render_png(spec, size.0, size.1).map_err(
                    |source| ExportError::Render {
                        title: spec.title.clone(),
                        source,
                    },
                )?;
                let path = dir.join(format!("{page}_{}_{}.png", idx + 1, spec.slug()));
                fs::write(&path, bytes).map_err(|source| ExportError::Io {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = %path.display(), "wrote chart");
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Full export: JSON summary plus chart PNGs.
    pub fn export(
        ctx: &DashboardContext,
        dir: &Path,
        size: (u32, u32),
    ) -> Result<ExportReport, ExportError> {
        let summary = Self::write_summary(ctx, dir)?;
        let charts = Self::write_charts(ctx, dir, size)?;
        info!(
            dir = %dir.display(),
            charts = charts.len(),
            "dashboard exported"
        );
        Ok(ExportReport {
            summary: Some(summary),
            charts,
        })
    }

    fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn context() -> DashboardContext {
        let df = df!(
            "Product ID" => ["1", "2"],
            "name" => ["Tee", "Coat"],
            "Sales Volume" => ["10", "3"],
            "price" => ["2", "bad"],
            "season" => ["Summer", "Winter"]
        )
        .unwrap();
        DashboardContext::from_frame(&df)
    }

    #[test]
    fn summary_contains_kpis_and_pages() {
        let json: serde_json::Value =
            serde_json::from_str(&DashboardExporter::summary_json(&context()).unwrap()).unwrap();

        assert_eq!(json["raw_rows"], 2);
        assert_eq!(json["clean_rows"], 1);
        assert_eq!(json["kpis"]["total_revenue"], 20.0);
        assert_eq!(json["kpis"]["total_units"], 10);
        assert_eq!(json["pages"].as_array().unwrap().len(), 4);
        assert_eq!(json["pages"][0]["page"], "overview");
        assert_eq!(json["tables"]["by_season"]["rows"][0]["label"], "Summer");
    }

    #[test]
    fn writes_summary_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let path = DashboardExporter::write_summary(&context(), &target).unwrap();

        assert_eq!(path, target.join(SUMMARY_FILE));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Top season: Summer"));
    }

    #[test]
    fn exports_every_chart_as_png() {
        // No season is known, so "Sales by Season" has nothing to plot.
        let df = df!(
            "Product ID" => ["1", "2", "3"],
            "name" => ["Tee", "Coat", "Scarf"],
            "Sales Volume" => ["10", "3", "7"],
            "price" => ["2", "40", "9.5"],
            "season" => [None::<&str>, None, None]
        )
        .unwrap();
        let ctx = DashboardContext::from_frame(&df);
        let advanced = ctx.page_view(crate::dashboard::Page::Advanced);
        assert!(advanced.charts.iter().any(|c| c.is_empty()));
        let details = ctx.page_view(crate::dashboard::Page::Details);
        assert_eq!(details.charts[0].kind, crate::charts::ChartKind::HorizontalBar);

        let dir = tempfile::tempdir().unwrap();
        let report = DashboardExporter::export(&ctx, dir.path(), (480, 320)).unwrap();

        assert_eq!(report.summary, Some(dir.path().join(SUMMARY_FILE)));
        assert_eq!(report.charts.len(), 8);
        for path in &report.charts {
            let bytes = fs::read(path).unwrap();
            assert!(
                bytes.starts_with(&[0x89, b'P', b'N', b'G']),
                "{} is not a PNG",
                path.display()
            );
        }
        assert!(dir.path().join("advanced_1_sales_by_season.png").is_file());
    }
}
