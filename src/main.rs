//! Sales Dashboard - CSV Sales Analysis & Multi-Page KPI Dashboard
//!
//! Loads the sales CSV once, then either opens the dashboard window or, in headless
//! mode, prints a page as JSON or exports every chart.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::dashboard::DashboardContext;
use sales_dashboard::data::DEFAULT_CSV_NAME;
use sales_dashboard::export::DashboardExporter;
use sales_dashboard::gui::DashboardApp;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Sales CSV analysis with a multi-page KPI dashboard")]
struct Args {
    /// Sales CSV file; a missing file shows an empty dashboard
    #[arg(short, long, default_value = DEFAULT_CSV_NAME)]
    csv: PathBuf,

    /// Page to show first (/, /details, /advanced, /insights)
    #[arg(short, long, default_value = "/")]
    page: String,

    /// Print the selected page as JSON and exit
    #[arg(long)]
    summary: bool,

    /// Export all charts as PNG plus dashboard.json into this directory and exit
    #[arg(long)]
    export: Option<PathBuf>,

    /// Open the export directory when done
    #[arg(long)]
    open: bool,

    /// Width of exported PNG charts
    #[arg(long, default_value = "1200")]
    width: u32,

    /// Height of exported PNG charts
    #[arg(long, default_value = "700")]
    height: u32,

    /// Initial window width
    #[arg(long, default_value = "1400")]
    window_width: f32,

    /// Initial window height
    #[arg(long, default_value = "800")]
    window_height: f32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl From<&Args> for DashboardConfig {
    fn from(args: &Args) -> Self {
        Self {
            csv_path: args.csv.clone(),
            initial_path: args.page.clone(),
            export_dir: args.export.clone(),
            open_export: args.open,
            window_size: [args.window_width, args.window_height],
            chart_size: (args.width, args.height),
        }
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = DashboardConfig::from(&args);
    let context = DashboardContext::build(&config);

    if args.summary {
        let json = DashboardExporter::page_json(context.view(&config.initial_path))?;
        println!("{json}");
        return Ok(());
    }

    if let Some(dir) = &config.export_dir {
        let report = DashboardExporter::export(&context, dir, config.chart_size)
            .with_context(|| format!("exporting dashboard to {}", dir.display()))?;
        info!(charts = report.charts.len(), "export complete");
        if config.open_export {
            open::that(dir).with_context(|| format!("opening {}", dir.display()))?;
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, context)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}
