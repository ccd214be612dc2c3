//! Sales Dashboard Main Application
//! Main window with the navigation bar and the current page.

use crate::config::DashboardConfig;
use crate::dashboard::DashboardContext;
use crate::export::DashboardExporter;
use crate::gui::{NavAction, NavBar, PageViewer};
use std::path::Path;
use tracing::{error, info};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    context: DashboardContext,
    nav: NavBar,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        context: DashboardContext,
    ) -> Self {
        let mut nav = NavBar::new(&config.initial_path);
        nav.source_label = Self::source_label(&context);
        nav.set_status(&Self::loaded_status(&context));
        Self {
            config,
            context,
            nav,
        }
    }

    fn source_label(context: &DashboardContext) -> String {
        context
            .source()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "No file loaded".to_string())
    }

    fn loaded_status(context: &DashboardContext) -> String {
        format!(
            "Loaded {} rows, {} with sales",
            context.raw_row_count(),
            context.clean_rows().height()
        )
    }

    fn navigate(&mut self, path: String) {
        info!(path = %path, page = ?crate::dashboard::select_page(&path), "navigate");
        self.nav.path = path;
    }

    /// Pick a CSV and rebuild the whole context from it.
    fn handle_open_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        self.context = DashboardContext::from_path(&path);
        self.config.csv_path = path;
        self.nav.source_label = Self::source_label(&self.context);
        self.nav.set_status(&Self::loaded_status(&self.context));
    }

    /// Pick a folder and export every chart plus the JSON summary into it.
    fn handle_export_png(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        self.nav.set_status("Rendering charts...");
        match DashboardExporter::export(&self.context, &dir, self.config.chart_size) {
            Ok(report) => {
                self.nav.set_status(&format!(
                    "Exported {} charts to {}",
                    report.charts.len(),
                    dir.display()
                ));
                if self.config.open_export {
                    if let Err(e) = open::that(&dir) {
                        error!(error = %e, "could not open export folder");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.nav.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| match self.nav.show(ui) {
            NavAction::Navigate(path) => self.navigate(path),
            NavAction::OpenCsv => self.handle_open_csv(),
            NavAction::ExportPng => self.handle_export_png(),
            NavAction::None => {}
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            PageViewer::show(ui, self.context.view(&self.nav.path));
        });
    }
}
