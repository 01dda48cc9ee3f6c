//! Solver Model Module
//! Plain parameter types passed into and returned from the bundle solver.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::bundle::SolverError;
use super::curves::{AxisLimits, BudgetLine};

/// Exponents of the Cobb-Douglas form `U(x,y) = x^a * y^b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilityParams {
    pub a: f64,
    pub b: f64,
}

impl UtilityParams {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }
}

/// Cost per unit of each good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prices {
    pub px: f64,
    pub py: f64,
}

impl Prices {
    pub fn new(px: f64, py: f64) -> Self {
        Self { px, py }
    }
}

/// How the constraint value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    /// Total spending cap, in currency units
    #[default]
    Budget,
    /// Target utility level to reach at minimal cost
    Utility,
}

impl ConstraintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintType::Budget => "budget",
            ConstraintType::Utility => "utility",
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintType {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(ConstraintType::Budget),
            "utility" => Ok(ConstraintType::Utility),
            _ => Err(SolverError::InvalidParameter {
                name: "constraint_type",
                detail: format!("`{}` is not one of `budget`, `utility`", s),
            }),
        }
    }
}

/// A scalar constraint tagged with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constraint {
    pub value: f64,
    pub kind: ConstraintType,
}

impl Constraint {
    pub fn budget(value: f64) -> Self {
        Self {
            value,
            kind: ConstraintType::Budget,
        }
    }

    pub fn utility(value: f64) -> Self {
        Self {
            value,
            kind: ConstraintType::Utility,
        }
    }
}

/// Quantities of good X and good Y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bundle {
    pub x: f64,
    pub y: f64,
}

impl Bundle {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything one computation needs, built once by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverInput {
    pub utility: UtilityParams,
    pub prices: Prices,
    pub constraint: Constraint,
    /// Number of samples along the optimum's indifference curve
    pub curve_points: usize,
}

/// Result of one computation, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolverOutput {
    pub input: SolverInput,
    pub bundle: Bundle,
    pub utility: f64,
    /// Spending at the optimum. Equals the tangent budget for a utility constraint.
    pub cost: f64,
    pub budget_line: BudgetLine,
    /// Where the budget line meets the Y axis and the X axis
    pub budget_endpoints: [[f64; 2]; 2],
    pub axis: AxisLimits,
    /// Samples of the indifference curve through the optimum
    pub indifference_curve: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("budget", ConstraintType::Budget)]
    #[case("utility", ConstraintType::Utility)]
    #[case("  Budget ", ConstraintType::Budget)]
    #[case("UTILITY", ConstraintType::Utility)]
    fn parses_constraint_type(#[case] raw: &str, #[case] expected: ConstraintType) {
        assert_eq!(raw.parse::<ConstraintType>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("income")]
    #[case("budgets")]
    fn rejects_unknown_constraint_type(#[case] raw: &str) {
        let err = raw.parse::<ConstraintType>().unwrap_err();
        assert!(matches!(
            err,
            SolverError::InvalidParameter {
                name: "constraint_type",
                ..
            }
        ));
    }

    #[test]
    fn constraint_type_serializes_lowercase() {
        let json = serde_json::to_string(&Constraint::utility(20.0)).unwrap();
        assert_eq!(json, r#"{"value":20.0,"kind":"utility"}"#);
        assert_eq!(ConstraintType::Budget.to_string(), "budget");
    }
}
