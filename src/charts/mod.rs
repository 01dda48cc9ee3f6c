//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter, DrawingContext};
pub use renderer::StaticChartRenderer;
