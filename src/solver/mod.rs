//! Solver module - Cobb-Douglas bundle optimization and curve sampling

mod bundle;
mod curves;
mod model;

pub use bundle::{BundleSolver, SolverError};
pub use curves::{
    AxisLimits, BudgetLine, CurveSampler, IndifferenceCurve, DEFAULT_CURVE_POINTS,
};
pub use model::{
    Bundle, Constraint, ConstraintType, Prices, SolverInput, SolverOutput, UtilityParams,
};
