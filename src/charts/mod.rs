//! Charts module - chart descriptors and their renderers

mod plotter;
mod renderer;
mod spec;

pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{CategoryBar, ChartKind, ChartSeries, ChartSpec, ScatterPoint};
