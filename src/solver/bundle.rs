//! Bundle Solver Module
//! Closed-form optimal consumption bundles for Cobb-Douglas preferences.

use thiserror::Error;
use tracing::{debug, warn};

use super::curves::{AxisLimits, BudgetLine, CurveSampler};
use super::model::{
    Bundle, Constraint, ConstraintType, Prices, SolverInput, SolverOutput, UtilityParams,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid parameter `{name}`: {detail}")]
    InvalidParameter { name: &'static str, detail: String },
}

/// Evaluates the Cobb-Douglas first-order conditions.
pub struct BundleSolver;

impl BundleSolver {
    /// Reject values that would turn the closed forms into NaN.
    ///
    /// `+inf` passes and degrades to floating-point special values.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, SolverError> {
        // Written as a negated comparison so NaN is rejected too.
        if !(value > 0.0) {
            warn!(param = name, value, "Rejected parameter");
            return Err(SolverError::InvalidParameter {
                name,
                detail: format!("{} must be greater than zero", value),
            });
        }
        Ok(value)
    }

    pub fn validate_params(params: UtilityParams) -> Result<(), SolverError> {
        Self::require_positive("a", params.a)?;
        Self::require_positive("b", params.b)?;
        Ok(())
    }

    pub fn validate_prices(prices: Prices) -> Result<(), SolverError> {
        Self::require_positive("px", prices.px)?;
        Self::require_positive("py", prices.py)?;
        Ok(())
    }

    /// Optimal quantities of X and Y under the given constraint.
    ///
    /// A budget constraint spends the share `a/(a+b)` on X and `b/(a+b)` on Y.
    /// A utility constraint finds the cheapest bundle on the target
    /// indifference curve, where the marginal rate of substitution equals
    /// the price ratio.
    pub fn optimal_bundle(
        params: UtilityParams,
        prices: Prices,
        constraint: Constraint,
    ) -> Result<Bundle, SolverError> {
        Self::validate_params(params)?;
        Self::validate_prices(prices)?;
        let value = Self::require_positive("constraint", constraint.value)?;

        let UtilityParams { a, b } = params;
        let Prices { px, py } = prices;
        let sum = a + b;

        let bundle = match constraint.kind {
            ConstraintType::Budget => {
                Bundle::new((a / sum) * (value / px), (b / sum) * (value / py))
            }
            ConstraintType::Utility => {
                let k = value.powf(1.0 / sum);
                Bundle::new(
                    k * (a * py / (b * px)).powf(b / sum),
                    k * (b * px / (a * py)).powf(a / sum),
                )
            }
        };

        debug!(
            kind = %constraint.kind,
            x = bundle.x,
            y = bundle.y,
            "Computed optimal bundle"
        );
        Ok(bundle)
    }

    /// `x^a * y^b`
    pub fn calculate_utility(bundle: Bundle, params: UtilityParams) -> f64 {
        bundle.x.powf(params.a) * bundle.y.powf(params.b)
    }

    /// `x*px + y*py`
    pub fn calculate_cost(bundle: Bundle, prices: Prices) -> f64 {
        bundle.x * prices.px + bundle.y * prices.py
    }

    /// Smallest budget whose line touches the indifference curve at `bundle`.
    ///
    /// `bundle` must be the cost-minimizing point for that curve, so this is
    /// just its cost.
    pub fn calculate_tangent_budget(bundle: Bundle, prices: Prices) -> f64 {
        Self::calculate_cost(bundle, prices)
    }

    /// Run one full computation: bundle, utility, cost and plot data.
    pub fn solve(input: &SolverInput) -> Result<SolverOutput, SolverError> {
        let bundle = Self::optimal_bundle(input.utility, input.prices, input.constraint)?;
        let utility = Self::calculate_utility(bundle, input.utility);
        let cost = match input.constraint.kind {
            ConstraintType::Budget => Self::calculate_cost(bundle, input.prices),
            ConstraintType::Utility => Self::calculate_tangent_budget(bundle, input.prices),
        };

        let axis = AxisLimits::for_bundle(bundle);
        let num_points = input.curve_points.max(2);
        let x_range = (axis.x_max / num_points as f64, axis.x_max);
        let indifference_curve =
            CurveSampler::indifference_points(input.utility, utility, x_range, num_points)
                .collect();

        let budget_line = BudgetLine::new(input.prices, cost);

        debug!(utility, cost, "Solved consumer choice");

        Ok(SolverOutput {
            input: *input,
            bundle,
            utility,
            cost,
            budget_line,
            budget_endpoints: budget_line.endpoints(),
            axis,
            indifference_curve,
        })
    }
}
