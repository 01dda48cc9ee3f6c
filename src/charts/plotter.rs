//! Chart Plotter Module
//! Builds plot datasets from a solver result and draws them with egui_plot.

use crate::solver::{
    AxisLimits, Bundle, ConstraintType, CurveSampler, IndifferenceCurve, SolverError,
    SolverOutput,
};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

/// Curves may run past the top edge by this fraction before being cut.
const Y_OVERSHOOT: f64 = 1.05;

pub const OPTIMUM_CURVE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const BUDGET_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const OPTIMUM_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Drawing settings passed explicitly to every sampling and rendering call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    pub title: String,
    /// Samples per indifference curve
    pub curve_points: usize,
    /// Additional utility levels drawn as a family of curves
    pub extra_levels: Vec<f64>,
    /// Dashed guides from the optimum down to each axis
    pub show_guides: bool,
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self {
            title: "Optimal Consumption Bundle".to_string(),
            curve_points: crate::solver::DEFAULT_CURVE_POINTS,
            extra_levels: Vec::new(),
            show_guides: true,
        }
    }
}

/// Everything needed to draw one consumer-choice chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub optimum: Bundle,
    pub axis: AxisLimits,
    pub optimum_curve: IndifferenceCurve,
    pub family: Vec<IndifferenceCurve>,
    /// Samples from the Y intercept to the X intercept
    pub budget_line: Vec<[f64; 2]>,
    pub budget_label: String,
}

impl ChartData {
    pub fn build(output: &SolverOutput, ctx: &DrawingContext) -> Result<Self, SolverError> {
        let axis = output.axis;
        let num_points = ctx.curve_points.max(2);
        let x_range = (axis.x_max / num_points as f64, axis.x_max);

        let family = CurveSampler::indifference_family(
            output.input.utility,
            &ctx.extra_levels,
            x_range,
            num_points,
        )?;

        let budget_label = match output.input.constraint.kind {
            ConstraintType::Budget => format!("Budget = {:.2}", output.budget_line.budget),
            ConstraintType::Utility => {
                format!("Tangent budget = {:.2}", output.budget_line.budget)
            }
        };

        Ok(Self {
            optimum: output.bundle,
            axis,
            optimum_curve: IndifferenceCurve {
                utility: output.utility,
                label: format!("U = {:.2}", output.utility),
                points: output.indifference_curve.clone(),
            },
            family,
            budget_line: output.budget_line.sample(num_points).collect(),
            budget_label,
        })
    }

    /// Drop points that cannot be drawn inside the axis range.
    pub fn visible_points(&self, points: &[[f64; 2]]) -> Vec<[f64; 2]> {
        let y_cap = self.axis.y_max * Y_OVERSHOOT;
        points
            .iter()
            .copied()
            .filter(|[x, y]| x.is_finite() && y.is_finite() && *y <= y_cap)
            .collect()
    }
}

/// Draws consumer-choice charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the n-th curve of the extra family.
    pub fn get_family_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw indifference curves, budget line and the optimal point.
    pub fn draw_choice_chart(
        ui: &mut egui::Ui,
        data: &ChartData,
        ctx: &DrawingContext,
        height: f32,
    ) {
        let Bundle { x, y } = data.optimum;

        Plot::new("consumer_choice_plot")
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Good X")
            .y_axis_label("Good Y")
            .include_x(0.0)
            .include_x(data.axis.x_max)
            .include_y(0.0)
            .include_y(data.axis.y_max)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, curve) in data.family.iter().enumerate() {
                    let points: PlotPoints = data.visible_points(&curve.points).into();
                    plot_ui.line(
                        Line::new(points)
                            .color(Self::get_family_color(i))
                            .width(1.0)
                            .name(&curve.label),
                    );
                }

                let curve: PlotPoints = data.visible_points(&data.optimum_curve.points).into();
                plot_ui.line(
                    Line::new(curve)
                        .color(OPTIMUM_CURVE_COLOR)
                        .width(2.0)
                        .name(&data.optimum_curve.label),
                );

                let budget: PlotPoints = data.budget_line.clone().into();
                plot_ui.line(
                    Line::new(budget)
                        .color(BUDGET_COLOR)
                        .width(2.0)
                        .name(&data.budget_label),
                );

                if ctx.show_guides {
                    let guides = [[[x, 0.0], [x, y]], [[0.0, y], [x, y]]];
                    for guide in guides {
                        plot_ui.line(
                            Line::new(PlotPoints::from(guide.to_vec()))
                                .color(Color32::GRAY)
                                .style(LineStyle::dashed_dense())
                                .width(1.0),
                        );
                    }
                }

                plot_ui.points(
                    Points::new(vec![[x, y]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(6.0)
                        .color(OPTIMUM_COLOR)
                        .name(format!("Optimum ({:.2}, {:.2})", x, y)),
                );
            });
    }

    /// Draw the result summary table
    pub fn draw_result_table(ui: &mut egui::Ui, output: &SolverOutput) {
        let cost_label = match output.input.constraint.kind {
            ConstraintType::Budget => "Cost",
            ConstraintType::Utility => "Tangent budget",
        };

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("result_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        let rows = [
                            ("Optimal X", output.bundle.x),
                            ("Optimal Y", output.bundle.y),
                            ("Utility", output.utility),
                            (cost_label, output.cost),
                        ];
                        for (label, value) in rows {
                            ui.label(RichText::new(label).strong().size(12.0));
                            ui.label(RichText::new(format!("{:.4}", value)).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
