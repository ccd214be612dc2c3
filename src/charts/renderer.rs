//! Static Chart Renderer
//! Rasterizes chart descriptors to PNG with plotters.
//!
//! Layout matches the interactive charts: title on top, category labels under vertical
//! bars or left of horizontal bars, largest bar first.

use crate::charts::{CategoryBar, ChartKind, ChartSeries, ChartSpec, ScatterPoint};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

const BAR_COLOR: RGBColor = RGBColor(99, 110, 250);
const POINT_COLOR: RGBColor = RGBColor(239, 85, 59);
const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to in-memory PNG bytes.
    pub fn render_png(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize(width, height));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            match &spec.series {
                ChartSeries::Empty => Self::draw_empty(&root, spec)?,
                ChartSeries::Categories(bars) if spec.kind == ChartKind::HorizontalBar => {
                    Self::draw_horizontal_bars(&root, spec, bars)?
                }
                ChartSeries::Categories(bars) => Self::draw_vertical_bars(&root, spec, bars)?,
                ChartSeries::Points(points) => Self::draw_scatter(&root, spec, points)?,
            }

            root.present().map_err(draw_err)?;
        }

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::InvalidSize(width, height))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Upper bound of a value axis with some headroom; never zero-width and always
    /// finite. Non-finite values are ignored.
    pub fn axis_max<I: IntoIterator<Item = f64>>(values: I) -> f64 {
        let max = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return 1.0;
        }
        let padded = max * 1.1;
        if padded.is_finite() {
            padded
        } else {
            max
        }
    }

    /// Bar positions and values, leaving out bars plotters cannot place.
    fn finite_bars(bars: &[CategoryBar]) -> impl Iterator<Item = (usize, f64)> + '_ {
        bars.iter()
            .enumerate()
            .filter(|(_, b)| b.value.is_finite())
            .map(|(i, b)| (i, b.value))
    }

    fn label_for(bars: &[CategoryBar], segment: &SegmentValue<usize>) -> String {
        match segment {
            SegmentValue::CenterOf(i) => bars.get(*i).map(|b| b.label.clone()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn draw_empty<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
    ) -> Result<(), RenderError> {
        let (w, h) = root.dim_in_pixel();
        root.titled(&spec.title, (FONT, 24)).map_err(draw_err)?;
        root.draw(&Text::new(
            "No data",
            (w as i32 / 2 - 30, h as i32 / 2),
            (FONT, 18).into_font().color(&BLACK.mix(0.5)),
        ))
        .map_err(draw_err)?;
        Ok(())
    }

    fn draw_vertical_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        bars: &[CategoryBar],
    ) -> Result<(), RenderError> {
        let y_max = Self::axis_max(bars.iter().map(|b| b.value));

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d((0..bars.len()).into_segmented(), 0.0..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x.as_str())
            .y_desc(spec.y.as_str())
            .x_labels(bars.len())
            .x_label_formatter(&|v| Self::label_for(bars, v))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(8)
                    .data(Self::finite_bars(bars)),
            )
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_horizontal_bars<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        bars: &[CategoryBar],
    ) -> Result<(), RenderError> {
        let x_max = Self::axis_max(bars.iter().map(|b| b.value));
        // Largest bar on top.
        let reversed: Vec<CategoryBar> = bars.iter().rev().cloned().collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(180)
            .build_cartesian_2d(0.0..x_max, (0..reversed.len()).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(spec.x.as_str())
            .y_desc(spec.y.as_str())
            .y_labels(reversed.len())
            .y_label_formatter(&|v| Self::label_for(&reversed, v))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(6)
                    .data(Self::finite_bars(&reversed)),
            )
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        spec: &ChartSpec,
        points: &[ScatterPoint],
    ) -> Result<(), RenderError> {
        let x_max = Self::axis_max(points.iter().map(|p| p.x));
        let y_max = Self::axis_max(points.iter().map(|p| p.y));

        let mut chart = ChartBuilder::on(root)
            .caption(&spec.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(spec.x.as_str())
            .y_desc(spec.y.as_str())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite())
                    .map(|p| Circle::new((p.x, p.y), 3, POINT_COLOR.mix(0.8).filled())),
            )
            .map_err(draw_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AggregateTable;

    #[test]
    fn axis_max_has_headroom_and_floor() {
        assert_eq!(StaticChartRenderer::axis_max(Vec::<f64>::new()), 1.0);
        assert_eq!(StaticChartRenderer::axis_max([0.0, 0.0]), 1.0);
        assert!((StaticChartRenderer::axis_max([5.0, 10.0]) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn axis_max_ignores_non_finite_values() {
        let max = StaticChartRenderer::axis_max([f64::INFINITY, 4.0, f64::NAN]);
        assert!((max - 4.4).abs() < 1e-9);
        assert_eq!(StaticChartRenderer::axis_max([f64::INFINITY]), 1.0);
        assert_eq!(StaticChartRenderer::axis_max([f64::MAX]), f64::MAX);
    }

    fn is_png(bytes: &[u8]) -> bool {
        bytes.starts_with(&[0x89, b'P', b'N', b'G'])
    }

    fn bars(values: &[(&str, f64)]) -> Vec<CategoryBar> {
        values
            .iter()
            .map(|(label, value)| CategoryBar {
                label: label.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn renders_bars_with_an_infinite_value() {
        for kind in [ChartKind::VerticalBar, ChartKind::HorizontalBar] {
            let spec = ChartSpec {
                title: "Sales by Season".to_string(),
                kind,
                x: "season".to_string(),
                y: "Sales Volume".to_string(),
                hover: None,
                series: ChartSeries::Categories(bars(&[("Summer", f64::INFINITY), ("Winter", 3.0)])),
            };
            let png = StaticChartRenderer::render_png(&spec, 400, 300).unwrap();
            assert!(is_png(&png));
        }
    }

    #[test]
    fn renders_scatter_with_an_infinite_point() {
        let spec = ChartSpec {
            title: "Price vs Sales Volume".to_string(),
            kind: ChartKind::Scatter,
            x: "price".to_string(),
            y: "Sales Volume".to_string(),
            hover: Some("name".to_string()),
            series: ChartSeries::Points(vec![
                ScatterPoint {
                    x: f64::INFINITY,
                    y: 2.0,
                    label: "Coat".to_string(),
                },
                ScatterPoint {
                    x: 5.0,
                    y: 10.0,
                    label: "Tee".to_string(),
                },
            ]),
        };
        let png = StaticChartRenderer::render_png(&spec, 400, 300).unwrap();
        assert!(is_png(&png));
    }

    #[test]
    fn renders_empty_chart_as_png() {
        let spec = ChartSpec::vertical_bar(&AggregateTable::empty("season"), "Sales by Season");
        let png = StaticChartRenderer::render_png(&spec, 400, 300).unwrap();
        assert!(is_png(&png));
    }

    #[test]
    fn rejects_zero_size() {
        let spec = ChartSpec::vertical_bar(&AggregateTable::empty("season"), "Sales by Season");
        assert!(matches!(
            StaticChartRenderer::render_png(&spec, 0, 100),
            Err(RenderError::InvalidSize(0, 100))
        ));
    }

    #[test]
    fn segment_labels() {
        let bars = vec![CategoryBar {
            label: "Wool".to_string(),
            value: 2.0,
        }];
        assert_eq!(
            StaticChartRenderer::label_for(&bars, &SegmentValue::CenterOf(0)),
            "Wool"
        );
        assert_eq!(StaticChartRenderer::label_for(&bars, &SegmentValue::Last), "");
    }
}
