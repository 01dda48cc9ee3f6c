//! Consumer Choice - Cobb-Douglas Bundle Solver & Interactive Chart Viewer
//!
//! A Rust application for finding the utility-maximizing consumption bundle
//! of two goods and charting it against its indifference curve and budget line.

mod charts;
mod cli;
mod gui;
mod solver;

use anyhow::Context as _;
use clap::Parser;
use cli::{Cli, Command, InputArgs};
use eframe::egui;
use gui::{ConsumerChoiceApp, UserSettings};
use solver::{
    BundleSolver, Constraint, ConstraintType, Prices, SolverInput, SolverOutput, UtilityParams,
    DEFAULT_CURVE_POINTS,
};
use std::io::{stdout, Write};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        None => run_gui(UserSettings::default()),
        Some(Command::Gui(input)) => run_gui(UserSettings::from(&input)),
        Some(Command::Example) => run_example(),
        Some(Command::Solve { input, json }) => run_solve(&input, json),
        Some(Command::Render {
            input,
            output,
            width,
            height,
        }) => {
            let result = ConsumerChoiceApp::compute(&UserSettings::from(&input))?;
            charts::StaticChartRenderer::save_png(
                &result.chart,
                &result.ctx,
                &output,
                width,
                height,
            )
            .with_context(|| format!("rendering {}", output.display()))?;
            Ok(())
        }
    }
}

fn run_gui(settings: UserSettings) -> anyhow::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 820.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Consumer Choice"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Consumer Choice",
        options,
        Box::new(|cc| Ok(Box::new(ConsumerChoiceApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {}", e))
}

/// Utility of the worked example under its budget constraint.
fn example_utility() -> anyhow::Result<f64> {
    let output = BundleSolver::solve(&SolverInput {
        utility: UtilityParams::new(0.5, 0.5),
        prices: Prices::new(2.0, 3.0),
        constraint: Constraint::budget(100.0),
        curve_points: DEFAULT_CURVE_POINTS,
    })?;
    Ok(output.utility)
}

fn run_example() -> anyhow::Result<()> {
    println!("{}", example_utility()?);
    Ok(())
}

fn run_solve(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let output = BundleSolver::solve(&UserSettings::from(input).to_input())?;
    write_solve_output(&mut stdout().lock(), &output, json)
}

/// Print a solver result as a short summary, or as pretty JSON.
fn write_solve_output(
    out: &mut impl Write,
    output: &SolverOutput,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, output)?;
        writeln!(out)?;
    } else {
        let cost_label = match output.input.constraint.kind {
            ConstraintType::Budget => "Cost",
            ConstraintType::Utility => "Tangent budget",
        };
        writeln!(out, "Optimal X: {:.4}", output.bundle.x)?;
        writeln!(out, "Optimal Y: {:.4}", output.bundle.y)?;
        writeln!(out, "Utility: {:.4}", output.utility)?;
        writeln!(out, "{}: {:.4}", cost_label, output.cost)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn example_prints_budget_share_utility() {
        let utility = example_utility().unwrap();
        assert_relative_eq!(utility, (25.0_f64 * 100.0 / 6.0).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(utility, 20.41, max_relative = 1e-3);
    }

    fn solve_output(args: &[&str], json: bool) -> String {
        let mut cli_args = vec!["consumer_choice", "solve"];
        cli_args.extend_from_slice(args);
        let Some(Command::Solve { input, .. }) = Cli::parse_from(cli_args).command else {
            panic!("expected solve");
        };
        let output = BundleSolver::solve(&UserSettings::from(&input).to_input()).unwrap();

        let mut buf = Vec::new();
        write_solve_output(&mut buf, &output, json).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn solve_prints_summary() {
        let text = solve_output(&[], false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Optimal X: 25.0000",
                "Optimal Y: 16.6667",
                "Utility: 20.4124",
                "Cost: 100.0000",
            ]
        );
    }

    #[test]
    fn solve_summary_names_tangent_budget() {
        let text = solve_output(&["-t", "utility", "-c", "20"], false);
        assert!(text.contains("Utility: 20.0000"), "{text}");
        assert!(text.lines().any(|l| l.starts_with("Tangent budget: ")), "{text}");
    }

    #[test]
    fn solve_json_carries_result_fields() {
        let text = solve_output(&[], true);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_relative_eq!(value["bundle"]["x"].as_f64().unwrap(), 25.0);
        let y = value["bundle"]["y"].as_f64().unwrap();
        assert_relative_eq!(y, 100.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(value["utility"].as_f64().unwrap(), 20.412, max_relative = 1e-4);
        assert_relative_eq!(value["cost"].as_f64().unwrap(), 100.0, max_relative = 1e-12);
        assert_eq!(value["input"]["constraint"]["kind"], "budget");

        let endpoints = value["budget_endpoints"].as_array().unwrap();
        assert_eq!(endpoints.len(), 2);
        let y_intercept = endpoints[0][1].as_f64().unwrap();
        let x_intercept = endpoints[1][0].as_f64().unwrap();
        assert_relative_eq!(y_intercept, 100.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(x_intercept, 50.0, max_relative = 1e-12);
    }
}
