//! Page Viewer Widget
//! Scrollable central area showing one precomputed page: KPI cards, chart cards or
//! the insights list.

use crate::charts::{ChartPlotter, ChartSpec};
use crate::dashboard::{KpiCard, PageView};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 20.0;
const KPI_WIDTH: f32 = 200.0;
const CHART_HEIGHT: f32 = 320.0;

pub struct PageViewer;

impl PageViewer {
    pub fn show(ui: &mut egui::Ui, view: &PageView) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !view.kpis.is_empty() {
                    Self::draw_kpi_row(ui, &view.kpis);
                    ui.add_space(CARD_SPACING);
                }

                for spec in &view.charts {
                    Self::draw_chart_card(ui, spec);
                    ui.add_space(CARD_SPACING);
                }

                if !view.recommendations.is_empty() {
                    Self::draw_insights(ui, view);
                }
            });
    }

    fn card_frame(ui: &egui::Ui) -> egui::Frame {
        egui::Frame::none()
            .rounding(10.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(200)))
            .inner_margin(15.0)
    }

    fn draw_kpi_row(ui: &mut egui::Ui, kpis: &[KpiCard]) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = CARD_SPACING;
            for kpi in kpis {
                Self::card_frame(ui).show(ui, |ui| {
                    ui.set_width(KPI_WIDTH);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("●").size(22.0).color(Color32::from_rgb(99, 110, 250)))
                            .on_hover_text(kpi.icon_url);
                        ui.label(RichText::new(&kpi.value).size(22.0).strong());
                        ui.label(RichText::new(kpi.label).color(Color32::GRAY));
                    });
                });
            }
        });
    }

    fn draw_chart_card(ui: &mut egui::Ui, spec: &ChartSpec) {
        Self::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ChartPlotter::draw_chart(ui, spec, CHART_HEIGHT);
        });
    }

    fn draw_insights(ui: &mut egui::Ui, view: &PageView) {
        Self::card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.heading("Insights");
            for line in &view.insights {
                ui.label(format!("• {line}"));
            }

            ui.add_space(CARD_SPACING);

            ui.heading("Recommendations");
            for line in &view.recommendations {
                ui.label(format!("• {line}"));
            }
        });
    }
}
