//! Runtime configuration.

use crate::data::DEFAULT_CSV_NAME;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Sales CSV; a missing file is shown as an empty dashboard.
    pub csv_path: PathBuf,
    /// Navigation path shown first.
    pub initial_path: String,
    pub window_size: [f32; 2],
    /// Headless export target. When set, no window is opened.
    pub export_dir: Option<PathBuf>,
    pub open_export: bool,
    /// Pixel size of exported PNG charts.
    pub chart_size: (u32, u32),
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_NAME),
            initial_path: "/".to_string(),
            window_size: [1400.0, 800.0],
            export_dir: None,
            open_export: false,
            chart_size: (1200, 700),
        }
    }
}
