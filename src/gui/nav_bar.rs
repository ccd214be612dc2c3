//! Navigation Bar Widget
//! Top bar with page links, data source and export controls.

use crate::dashboard::{select_page, Page};
use egui::{Color32, RichText};

/// Top navigation bar. Holds the current path; the page is always derived from it.
pub struct NavBar {
    pub path: String,
    pub source_label: String,
    pub status: String,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            path: Page::Overview.path().to_string(),
            source_label: "No file loaded".to_string(),
            status: "Ready".to_string(),
        }
    }
}

impl NavBar {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> Page {
        select_page(&self.path)
    }

    /// Draw the navigation bar
    pub fn show(&mut self, ui: &mut egui::Ui) -> NavAction {
        let mut action = NavAction::None;

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("📊 Sales Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.add_space(25.0);

            let current = self.current_page();
            for page in Page::ALL {
                let link = RichText::new(page.title()).size(18.0).strong();
                if ui.selectable_label(current == page, link).clicked() && current != page {
                    action = NavAction::Navigate(page.path().to_string());
                }
                ui.add_space(15.0);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(RichText::new("🖼 Export PNG…").size(14.0)).clicked() {
                    action = NavAction::ExportPng;
                }
                if ui.button(RichText::new("📁 Open CSV…").size(14.0)).clicked() {
                    action = NavAction::OpenCsv;
                }
                ui.label(
                    RichText::new(&self.source_label)
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            });
        });

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        ui.add_space(4.0);

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the navigation bar
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    None,
    Navigate(String),
    OpenCsv,
    ExportPng,
}
