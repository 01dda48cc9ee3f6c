//! Control Panel Widget
//! Left side panel with the solver inputs and actions.

use crate::charts::DrawingContext;
use crate::solver::{
    BundleSolver, Constraint, ConstraintType, Prices, SolverError, SolverInput, UtilityParams,
    DEFAULT_CURVE_POINTS,
};
use egui::{Color32, DragValue, RichText};

/// Form state for one computation
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub a: f64,
    pub b: f64,
    pub px: f64,
    pub py: f64,
    pub constraint: f64,
    pub constraint_type: ConstraintType,
    pub curve_points: usize,
    /// Comma-separated utility levels, e.g. "10, 20, 30"
    pub extra_levels: String,
    pub show_guides: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            a: 0.5,
            b: 0.5,
            px: 2.0,
            py: 3.0,
            constraint: 100.0,
            constraint_type: ConstraintType::Budget,
            curve_points: DEFAULT_CURVE_POINTS,
            extra_levels: String::new(),
            show_guides: true,
        }
    }
}

impl UserSettings {
    /// Snapshot the form as an immutable solver input.
    pub fn to_input(&self) -> SolverInput {
        SolverInput {
            utility: UtilityParams::new(self.a, self.b),
            prices: Prices::new(self.px, self.py),
            constraint: Constraint {
                value: self.constraint,
                kind: self.constraint_type,
            },
            curve_points: self.curve_points,
        }
    }

    pub fn parse_extra_levels(&self) -> Result<Vec<f64>, SolverError> {
        self.extra_levels
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                let level = s.parse::<f64>().map_err(|_| SolverError::InvalidParameter {
                    name: "utility level",
                    detail: format!("`{}` is not a number", s),
                })?;
                BundleSolver::require_positive("utility level", level)
            })
            .collect()
    }

    pub fn drawing_context(&self) -> Result<DrawingContext, SolverError> {
        Ok(DrawingContext {
            curve_points: self.curve_points,
            extra_levels: self.parse_extra_levels()?,
            show_guides: self.show_guides,
            ..Default::default()
        })
    }
}

/// Left side control panel with parameter inputs and actions.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub has_result: bool,
}

impl ControlPanel {
    pub fn with_settings(settings: UserSettings) -> Self {
        Self {
            settings,
            status: "Ready".to_string(),
            has_result: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Consumer Choice")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Cobb-Douglas U(x, y) = x^a · y^b")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        let label_width = 110.0;

        // ===== Preferences Section =====
        ui.label(RichText::new("⚖ Preferences").size(14.0).strong());
        ui.add_space(5.0);
        Self::number_row(ui, label_width, "Exponent a:", &mut self.settings.a, 0.01);
        Self::number_row(ui, label_width, "Exponent b:", &mut self.settings.b, 0.01);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Prices Section =====
        ui.label(RichText::new("💲 Prices").size(14.0).strong());
        ui.add_space(5.0);
        Self::number_row(ui, label_width, "Price of X:", &mut self.settings.px, 0.1);
        Self::number_row(ui, label_width, "Price of Y:", &mut self.settings.py, 0.1);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Constraint Section =====
        ui.label(RichText::new("🔒 Constraint").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(
                &mut self.settings.constraint_type,
                ConstraintType::Budget,
                "Budget",
            );
            ui.radio_value(
                &mut self.settings.constraint_type,
                ConstraintType::Utility,
                "Target Utility",
            );
        });

        let constraint_label = match self.settings.constraint_type {
            ConstraintType::Budget => "Budget:",
            ConstraintType::Utility => "Utility Level:",
        };
        Self::number_row(
            ui,
            label_width,
            constraint_label,
            &mut self.settings.constraint,
            1.0,
        );

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Chart Section =====
        ui.label(RichText::new("🔧 Chart").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Curve Points:"));
            ui.add(egui::Slider::new(&mut self.settings.curve_points, 10..=500));
        });
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Extra Levels:"));
            ui.add(
                egui::TextEdit::singleline(&mut self.settings.extra_levels)
                    .hint_text("e.g. 10, 20, 30")
                    .desired_width(150.0),
            );
        });
        ui.checkbox(&mut self.settings.show_guides, "Show guide lines");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Compute Optimum").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Calculate;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.has_result, |ui| {
                let png_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });

            ui.add_space(4.0);
            if ui.small_button("Reset Defaults").clicked() {
                action = ControlPanelAction::ResetDefaults;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn number_row(ui: &mut egui::Ui, label_width: f32, label: &str, value: &mut f64, speed: f64) {
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new(label));
            ui.add(DragValue::new(value).speed(speed).max_decimals(4));
        });
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Calculate,
    ExportPng,
    ResetDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_worked_example() {
        let input = UserSettings::default().to_input();
        assert_eq!(input.utility, UtilityParams::new(0.5, 0.5));
        assert_eq!(input.prices, Prices::new(2.0, 3.0));
        assert_eq!(input.constraint, Constraint::budget(100.0));
        assert_eq!(input.curve_points, DEFAULT_CURVE_POINTS);
    }

    #[test]
    fn to_input_carries_constraint_type() {
        let settings = UserSettings {
            constraint: 20.0,
            constraint_type: ConstraintType::Utility,
            ..Default::default()
        };
        assert_eq!(settings.to_input().constraint, Constraint::utility(20.0));
    }

    #[test]
    fn parses_extra_levels() {
        let settings = UserSettings {
            extra_levels: " 10, 20.5 ,,30 ".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.parse_extra_levels().unwrap(), vec![10.0, 20.5, 30.0]);
    }

    #[test]
    fn empty_extra_levels_is_empty() {
        assert!(UserSettings::default().parse_extra_levels().unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_extra_levels() {
        for raw in ["10, abc", "10, -5", "0"] {
            let settings = UserSettings {
                extra_levels: raw.to_string(),
                ..Default::default()
            };
            assert!(settings.parse_extra_levels().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn drawing_context_follows_settings() {
        let settings = UserSettings {
            curve_points: 250,
            extra_levels: "15".to_string(),
            show_guides: false,
            ..Default::default()
        };
        let ctx = settings.drawing_context().unwrap();
        assert_eq!(ctx.curve_points, 250);
        assert_eq!(ctx.extra_levels, vec![15.0]);
        assert!(!ctx.show_guides);
    }
}
