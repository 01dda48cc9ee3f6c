//! Curve Sampling Module
//! Indifference curves, budget lines and axis ranges for plotting.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::bundle::{BundleSolver, SolverError};
use super::model::{Bundle, Prices, UtilityParams};

/// Default number of samples per curve
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Multiple of the optimum shown on each axis before damping
const AXIS_HEADROOM: f64 = 3.0;

/// One labelled indifference curve.
#[derive(Debug, Clone, PartialEq)]
pub struct IndifferenceCurve {
    pub utility: f64,
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// The line `px*x + py*y = budget`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetLine {
    pub px: f64,
    pub py: f64,
    pub budget: f64,
}

impl BudgetLine {
    pub fn new(prices: Prices, budget: f64) -> Self {
        Self {
            px: prices.px,
            py: prices.py,
            budget,
        }
    }

    /// Intercepts on the Y axis and the X axis.
    pub fn endpoints(&self) -> [[f64; 2]; 2] {
        [[0.0, self.budget / self.py], [self.budget / self.px, 0.0]]
    }

    /// Evenly spaced points from the Y intercept to the X intercept.
    pub fn sample(&self, num_points: usize) -> impl Iterator<Item = [f64; 2]> + '_ {
        linspace(0.0, self.budget / self.px, num_points)
            .map(move |x| [x, (self.budget - self.px * x) / self.py])
    }
}

/// Display range for both axes, starting at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisLimits {
    pub x_max: f64,
    pub y_max: f64,
}

impl AxisLimits {
    /// Show roughly 2-3x the optimum on each axis, compressing the larger
    /// axis and stretching the smaller one as the bundle gets lopsided.
    pub fn for_bundle(bundle: Bundle) -> Self {
        let Bundle { x, y } = bundle;
        let (max, min) = if x > y { (x, y) } else { (y, x) };
        let ratio = if min == 0.0 { 1.0 } else { max / min };
        let factor = 1.0 + 1.5 * (0.5 * (ratio - 1.0)).tanh();

        if x > y {
            Self {
                x_max: AXIS_HEADROOM * x / factor,
                y_max: AXIS_HEADROOM * y * factor,
            }
        } else {
            Self {
                x_max: AXIS_HEADROOM * x * factor,
                y_max: AXIS_HEADROOM * y / factor,
            }
        }
    }
}

/// `num_points` evenly spaced values over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, num_points: usize) -> impl Iterator<Item = f64> {
    let step = if num_points > 1 {
        (end - start) / (num_points - 1) as f64
    } else {
        0.0
    };
    (0..num_points).map(move |i| {
        // Pin the last sample so rounding never overshoots the range.
        if i + 1 == num_points && num_points > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Samples curves for the chart layer.
pub struct CurveSampler;

impl CurveSampler {
    /// Points on the indifference curve `x^a * y^b = utility`.
    ///
    /// Lazy: nothing is computed until the iterator is consumed.
    pub fn indifference_points(
        params: UtilityParams,
        utility: f64,
        x_range: (f64, f64),
        num_points: usize,
    ) -> impl Iterator<Item = [f64; 2]> {
        linspace(x_range.0, x_range.1, num_points)
            .map(move |x| [x, (utility / x.powf(params.a)).powf(1.0 / params.b)])
    }

    /// Build a labelled curve for each utility level, in input order.
    pub fn indifference_family(
        params: UtilityParams,
        utilities: &[f64],
        x_range: (f64, f64),
        num_points: usize,
    ) -> Result<Vec<IndifferenceCurve>, SolverError> {
        BundleSolver::validate_params(params)?;
        for &u in utilities {
            BundleSolver::require_positive("utility level", u)?;
        }

        debug!(
            levels = utilities.len(),
            num_points, "Sampling indifference curve family"
        );

        Ok(utilities
            .par_iter()
            .map(|&utility| IndifferenceCurve {
                utility,
                label: format!("U = {:.2}", utility),
                points: Self::indifference_points(params, utility, x_range, num_points)
                    .collect(),
            })
            .collect())
    }
}
