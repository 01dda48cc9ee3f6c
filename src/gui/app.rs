//! Consumer Choice Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::gui::chart_viewer::DisplayedResult;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, UserSettings};
use crate::solver::{BundleSolver, SolverError};
use egui::SidePanel;
use tracing::{info, warn};

/// Size of exported PNG charts
const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 1000;

/// Main application window.
pub struct ConsumerChoiceApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl ConsumerChoiceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: UserSettings) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::with_settings(settings),
            chart_viewer: ChartViewer::new(),
        };
        app.handle_calculate();
        app
    }

    /// Run the solver on a snapshot of the form.
    pub fn compute(settings: &UserSettings) -> Result<DisplayedResult, SolverError> {
        let input = settings.to_input();
        let ctx = settings.drawing_context()?;
        let output = BundleSolver::solve(&input)?;
        let chart = ChartData::build(&output, &ctx)?;
        Ok(DisplayedResult { output, chart, ctx })
    }

    /// Solve with the current form values. On failure the previous result stays on screen.
    fn handle_calculate(&mut self) {
        match Self::compute(&self.control_panel.settings) {
            Ok(result) => {
                info!(
                    x = result.output.bundle.x,
                    y = result.output.bundle.y,
                    utility = result.output.utility,
                    "Computed optimum"
                );
                self.control_panel.set_status(&format!(
                    "Complete! x = {:.3}, y = {:.3}",
                    result.output.bundle.x, result.output.bundle.y
                ));
                self.control_panel.has_result = true;
                self.chart_viewer.set_result(result);
            }
            Err(e) => {
                warn!(error = %e, "Computation rejected");
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export - render the displayed chart and open it
    fn handle_export_png(&mut self) {
        let Some(result) = &self.chart_viewer.result else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("consumer_choice.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::save_png(
            &result.chart,
            &result.ctx,
            &output_path,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        ) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    warn!(error = %e, "Could not open exported chart");
                }
            }
            Err(e) => {
                self.control_panel
                    .set_status(&format!("Error: export failed: {}", e));
            }
        }
    }
}

impl eframe::App for ConsumerChoiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Calculate => self.handle_calculate(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::ResetDefaults => {
                            self.control_panel.settings = UserSettings::default();
                            self.handle_calculate();
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ConstraintType;
    use approx::assert_relative_eq;

    #[test]
    fn compute_default_form() {
        let result = ConsumerChoiceApp::compute(&UserSettings::default()).unwrap();
        assert_relative_eq!(result.output.bundle.x, 25.0);
        assert_relative_eq!(result.output.cost, 100.0, max_relative = 1e-12);
        assert_eq!(result.chart.optimum, result.output.bundle);
    }

    #[test]
    fn compute_rejects_zero_price() {
        let settings = UserSettings {
            py: 0.0,
            ..Default::default()
        };
        let err = ConsumerChoiceApp::compute(&settings).err().unwrap();
        assert_eq!(
            err,
            SolverError::InvalidParameter {
                name: "py",
                detail: "0 must be greater than zero".to_string(),
            }
        );
    }

    #[test]
    fn compute_utility_form_with_family() {
        let settings = UserSettings {
            constraint: 20.0,
            constraint_type: ConstraintType::Utility,
            extra_levels: "10, 30".to_string(),
            ..Default::default()
        };
        let result = ConsumerChoiceApp::compute(&settings).unwrap();
        assert_relative_eq!(result.output.utility, 20.0, max_relative = 1e-12);
        assert_eq!(result.chart.family.len(), 2);
    }

    #[test]
    fn failed_calculation_keeps_previous_result() {
        let mut app = ConsumerChoiceApp {
            control_panel: ControlPanel::with_settings(UserSettings::default()),
            chart_viewer: ChartViewer::new(),
        };
        app.handle_calculate();
        let first = app.chart_viewer.result.clone().unwrap();
        assert!(app.control_panel.status.starts_with("Complete"));

        app.control_panel.settings.py = 0.0;
        app.handle_calculate();

        let shown = app.chart_viewer.result.as_ref().unwrap();
        assert_eq!(shown.output, first.output);
        assert_eq!(shown.chart, first.chart);
        assert!(app.control_panel.has_result);
        assert!(
            app.control_panel.status.starts_with("Error"),
            "{}",
            app.control_panel.status
        );
        assert!(app.control_panel.status.contains("py"));
    }
}
