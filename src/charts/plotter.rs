//! Chart Plotter Module
//! Draws chart descriptors interactively using egui_plot.

use crate::charts::{ChartKind, ChartSeries, ChartSpec, ScatterPoint};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

pub const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const POINT_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one chart with its title. Empty descriptors draw a blank plot.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        ui.label(RichText::new(&spec.title).size(16.0).strong());
        ui.add_space(6.0);

        match &spec.series {
            ChartSeries::Empty => Self::draw_empty(ui, spec, height),
            ChartSeries::Categories(bars) => {
                let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
                let values: Vec<f64> = bars.iter().map(|b| b.value).collect();
                if spec.kind == ChartKind::HorizontalBar {
                    Self::draw_horizontal_bars(ui, spec, labels, &values, height);
                } else {
                    Self::draw_vertical_bars(ui, spec, labels, &values, height);
                }
            }
            ChartSeries::Points(points) => Self::draw_scatter(ui, spec, points, height),
        }
    }

    fn plot(spec: &ChartSpec, height: f32) -> Plot {
        Plot::new(format!("chart_{}", spec.slug()))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(spec.x.clone())
            .y_axis_label(spec.y.clone())
    }

    fn draw_empty(ui: &mut egui::Ui, spec: &ChartSpec, height: f32) {
        Self::plot(spec, height).show(ui, |_plot_ui| {});
        ui.label(RichText::new("No data").italics().weak());
    }

    /// Label for a tick at `value`, only on whole category positions.
    fn category_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if (value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    fn draw_vertical_bars(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        labels: Vec<String>,
        values: &[f64],
        height: f32,
    ) {
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64, v).name(&labels[i]).width(0.6))
            .collect();
        let chart = BarChart::new(bars).color(BAR_COLOR).name(&spec.y);

        Self::plot(spec, height)
            .x_axis_formatter(move |mark, _range| Self::category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }

    /// Largest bar on top, so positions run in reverse of the table order.
    fn draw_horizontal_bars(
        ui: &mut egui::Ui,
        spec: &ChartSpec,
        labels: Vec<String>,
        values: &[f64],
        height: f32,
    ) {
        let n = values.len();
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new((n - 1 - i) as f64, v).name(&labels[i]).width(0.6))
            .collect();
        let chart = BarChart::new(bars)
            .color(BAR_COLOR)
            .name(&spec.x)
            .horizontal();

        let reversed: Vec<String> = labels.into_iter().rev().collect();
        Self::plot(spec, height)
            .y_axis_formatter(move |mark, _range| Self::category_label(&reversed, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }

    fn draw_scatter(ui: &mut egui::Ui, spec: &ChartSpec, points: &[ScatterPoint], height: f32) {
        let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let hover: Vec<ScatterPoint> = points.to_vec();
        let x_name = spec.x.clone();
        let y_name = spec.y.clone();

        Self::plot(spec, height)
            .allow_zoom(true)
            .allow_drag(true)
            .label_formatter(move |_name, value| {
                let label = Self::nearest(&hover, value.x, value.y)
                    .map(|p| p.label.as_str())
                    .unwrap_or_default();
                format!("{label}\n{x_name}: {:.2}\n{y_name}: {:.0}", value.x, value.y)
            })
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(coords))
                        .radius(3.0)
                        .color(POINT_COLOR),
                );
            });
    }

    fn nearest(points: &[ScatterPoint], x: f64, y: f64) -> Option<&ScatterPoint> {
        points.iter().min_by(|a, b| {
            let da = (a.x - x).powi(2) + (a.y - y).powi(2);
            let db = (b.x - x).powi(2) + (b.y - y).powi(2);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
