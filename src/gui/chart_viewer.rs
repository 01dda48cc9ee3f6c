//! Chart Viewer Widget
//! Right side panel showing the solver result and the interactive chart.

use crate::charts::{ChartData, ChartPlotter, DrawingContext};
use crate::solver::SolverOutput;
use egui::RichText;

const MIN_CHART_HEIGHT: f32 = 300.0;

/// One displayed computation
#[derive(Clone)]
pub struct DisplayedResult {
    pub output: SolverOutput,
    pub chart: ChartData,
    pub ctx: DrawingContext,
}

/// Result display area. Keeps the last successful result until replaced.
#[derive(Default)]
pub struct ChartViewer {
    pub result: Option<DisplayedResult>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&mut self, result: DisplayedResult) {
        self.result = Some(result);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(result) = &self.result else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let input = &result.output.input;
        ui.label(
            RichText::new(format!(
                "U(x, y) = x^{} · y^{}   |   px = {}, py = {}   |   {} = {}",
                input.utility.a,
                input.utility.b,
                input.prices.px,
                input.prices.py,
                input.constraint.kind,
                input.constraint.value,
            ))
            .size(14.0)
            .strong(),
        );
        ui.add_space(8.0);

        ChartPlotter::draw_result_table(ui, &result.output);
        ui.add_space(10.0);

        let height = (ui.available_height() - 10.0).max(MIN_CHART_HEIGHT);
        ChartPlotter::draw_choice_chart(ui, &result.chart, &result.ctx, height);
    }
}
