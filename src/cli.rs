//! Command Line Module
//! Flags for the window and the headless commands.

use crate::gui::UserSettings;
use crate::solver::{ConstraintType, DEFAULT_CURVE_POINTS};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// What to run (opens the window if omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive window, pre-filled with the given values
    Gui(InputArgs),
    /// Print the utility of the worked example (a = b = 0.5, px = 2, py = 3, budget = 100)
    Example,
    /// Solve without a window and print the result
    Solve {
        #[command(flatten)]
        input: InputArgs,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the chart to a PNG file
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// The PNG file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value_t = 1400, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct InputArgs {
    /// Exponent of good X
    #[arg(short = 'a', long = "exp-a", default_value_t = 0.5, allow_negative_numbers = true)]
    pub a: f64,

    /// Exponent of good Y
    #[arg(short = 'b', long = "exp-b", default_value_t = 0.5, allow_negative_numbers = true)]
    pub b: f64,

    /// Price of good X
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub px: f64,

    /// Price of good Y
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub py: f64,

    /// Budget or target utility, depending on --constraint-type
    #[arg(short, long, default_value_t = 100.0, allow_negative_numbers = true)]
    pub constraint: f64,

    /// `budget` or `utility`
    #[arg(short = 't', long, default_value_t = ConstraintType::Budget)]
    pub constraint_type: ConstraintType,

    /// Samples per indifference curve
    #[arg(long, default_value_t = DEFAULT_CURVE_POINTS)]
    pub curve_points: usize,

    /// Extra utility levels to draw, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub levels: Vec<f64>,
}

impl Default for InputArgs {
    fn default() -> Self {
        Self::from(&UserSettings::default())
    }
}

impl From<&UserSettings> for InputArgs {
    fn from(settings: &UserSettings) -> Self {
        Self {
            a: settings.a,
            b: settings.b,
            px: settings.px,
            py: settings.py,
            constraint: settings.constraint,
            constraint_type: settings.constraint_type,
            curve_points: settings.curve_points,
            levels: Vec::new(),
        }
    }
}

impl From<&InputArgs> for UserSettings {
    fn from(args: &InputArgs) -> Self {
        Self {
            a: args.a,
            b: args.b,
            px: args.px,
            py: args.py,
            constraint: args.constraint,
            constraint_type: args.constraint_type,
            curve_points: args.curve_points,
            extra_levels: args
                .levels
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("consumer_choice").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_subcommand_opens_window() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn solve_defaults_match_form_defaults() {
        let Some(Command::Solve { input, json }) = parse(&["solve"]).command else {
            panic!("expected solve");
        };
        assert!(!json);
        assert_eq!(input, InputArgs::default());
        assert_eq!(UserSettings::from(&input), UserSettings::default());
    }

    #[test]
    fn solve_reads_all_flags() {
        let cli = parse(&[
            "solve", "-a", "0.3", "-b", "0.7", "--px", "1", "--py", "4", "-c", "20", "-t",
            "utility", "--levels", "10,30", "--json",
        ]);
        let Some(Command::Solve { input, json }) = cli.command else {
            panic!("expected solve");
        };
        assert!(json);
        assert_eq!(input.a, 0.3);
        assert_eq!(input.b, 0.7);
        assert_eq!(input.px, 1.0);
        assert_eq!(input.py, 4.0);
        assert_eq!(input.constraint, 20.0);
        assert_eq!(input.constraint_type, ConstraintType::Utility);
        assert_eq!(input.levels, vec![10.0, 30.0]);
        assert_eq!(UserSettings::from(&input).extra_levels, "10, 30");
    }

    #[test]
    fn negative_values_reach_the_solver() {
        let Some(Command::Solve { input, .. }) = parse(&["solve", "--px", "-2"]).command else {
            panic!("expected solve");
        };
        assert_eq!(input.px, -2.0);
    }

    #[test]
    fn unknown_constraint_type_is_rejected() {
        let result = Cli::try_parse_from(["consumer_choice", "solve", "-t", "income"]);
        assert!(result.is_err());
    }

    #[test]
    fn render_requires_output() {
        assert!(Cli::try_parse_from(["consumer_choice", "render"]).is_err());
        let Some(Command::Render {
            output,
            width,
            height,
            ..
        }) = parse(&["render", "-o", "chart.png"]).command
        else {
            panic!("expected render");
        };
        assert_eq!(output, PathBuf::from("chart.png"));
        assert_eq!((width, height), (1400, 1000));
    }

    #[test]
    fn render_rejects_zero_size() {
        for flag in ["--width", "--height"] {
            let args = ["consumer_choice", "render", "-o", "x.png", flag, "0"];
            let result = Cli::try_parse_from(args);
            assert!(result.is_err(), "accepted {flag} 0");
        }
        let Some(Command::Render { width, height, .. }) =
            parse(&["render", "-o", "x.png", "--width", "1", "--height", "1"]).command
        else {
            panic!("expected render");
        };
        assert_eq!((width, height), (1, 1));
    }
}
