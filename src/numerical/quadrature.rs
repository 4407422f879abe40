//! Riemann sums and the trapezoid rule over an injected expression evaluator.
//!
//! Both rules follow the same pattern: compute the (signed) step width, walk a
//! lazy sequence of sample points, ask the evaluator for the value at every
//! point and combine the values with a plain running sum. Reversed bounds give
//! a negative step and therefore a negatively oriented result.
//!
//! # Example
//! ```
//! use RustedQuad::numerical::quadrature::{integrate, QuadratureRule};
//! use RustedQuad::symbolic::symbolic_engine::Expr;
//! use RustedQuad::symbolic::symbolic_evaluator::SymbolicEvaluator;
//! let f = Expr::parse_expression("x^2").unwrap();
//! let evaluator = SymbolicEvaluator::new();
//! let area = integrate(&evaluator, &f, "x", 0.0, 1.0, 100, QuadratureRule::Middle).unwrap();
//! assert!((area - 1.0 / 3.0).abs() < 1e-4);
//! ```
use crate::numerical::ram_errors::IntegrationError;
use crate::symbolic::symbolic_evaluator::ExpressionEvaluator;
use log::{debug, trace};
use strum_macros::{Display, EnumIter};

/// Quadrature rule selected by the index argument: 0 = left, 1 = middle, 2 = right, 3 = trapezoid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum QuadratureRule {
    Left,
    Middle,
    Right,
    Trapezoid,
}

impl QuadratureRule {
    /// every index from 3 upwards selects the trapezoid rule
    pub fn from_index(index: u64) -> Self {
        match index {
            0 => QuadratureRule::Left,
            1 => QuadratureRule::Middle,
            2 => QuadratureRule::Right,
            _ => QuadratureRule::Trapezoid,
        }
    }

    pub fn index(&self) -> u64 {
        match self {
            QuadratureRule::Left => 0,
            QuadratureRule::Middle => 1,
            QuadratureRule::Right => 2,
            QuadratureRule::Trapezoid => 3,
        }
    }

    /// Fraction of a step added to every sample point, None for the trapezoid rule
    pub fn offset(&self) -> Option<f64> {
        match self {
            QuadratureRule::Trapezoid => None,
            rule => Some(rule.index() as f64 / 2.0),
        }
    }
}

/// Value of `expression` at `variable = x`.
pub fn value_at_point<E>(
    evaluator: &E,
    expression: &E::Expression,
    variable: &str,
    x: f64,
) -> Result<f64, IntegrationError>
where
    E: ExpressionEvaluator + ?Sized,
{
    let value = evaluator.evaluate(expression, variable, x)?;
    trace!("f({}) = {}", x, value);
    Ok(value)
}

fn step_width(lower: f64, upper: f64, steps: usize) -> Result<f64, IntegrationError> {
    if steps == 0 {
        return Err(IntegrationError::InvalidArgument(
            "number of steps must be positive".to_string(),
        ));
    }
    Ok((upper - lower) / steps as f64)
}

/// origin + i*step for every i in `indices`
fn sample_points(
    origin: f64,
    step: f64,
    indices: std::ops::Range<usize>,
) -> impl Iterator<Item = f64> {
    indices.map(move |i| origin + i as f64 * step)
}

/// Riemann sum of `expression` over [lower, upper] with `steps` subintervals.
///
/// Every sampling point is shifted by `offset * step` from the left end of its
/// subinterval: 0.0 gives the left sum, 0.5 the middle sum, 1.0 the right sum.
/// The evaluator is called exactly `steps` times.
pub fn riemann_sum<E>(
    evaluator: &E,
    expression: &E::Expression,
    variable: &str,
    lower: f64,
    upper: f64,
    steps: usize,
    offset: f64,
) -> Result<f64, IntegrationError>
where
    E: ExpressionEvaluator + ?Sized,
{
    let step = step_width(lower, upper, steps)?;
    let origin = lower + step * offset;
    debug!(
        "riemann sum on [{}, {}], {} steps of {}, offset {}",
        lower, upper, steps, step, offset
    );
    let mut result = 0.0;
    for x in sample_points(origin, step, 0..steps) {
        result += value_at_point(evaluator, expression, variable, x)?;
    }
    Ok(result * step)
}

/// Trapezoid rule: interior points weigh 2, both ends weigh 1, the total is scaled by step/2.
/// The evaluator is called exactly `steps + 1` times.
pub fn trap_rule<E>(
    evaluator: &E,
    expression: &E::Expression,
    variable: &str,
    lower: f64,
    upper: f64,
    steps: usize,
) -> Result<f64, IntegrationError>
where
    E: ExpressionEvaluator + ?Sized,
{
    let step = step_width(lower, upper, steps)?;
    debug!(
        "trapezoid rule on [{}, {}], {} steps of {}",
        lower, upper, steps, step
    );
    let mut result = 0.0;
    for x in sample_points(lower, step, 1..steps) {
        result += value_at_point(evaluator, expression, variable, x)?;
    }
    result *= 2.0;
    result += value_at_point(evaluator, expression, variable, lower)?;
    result += value_at_point(evaluator, expression, variable, upper)?;
    Ok(result * step / 2.0)
}

/// Dispatches to `riemann_sum` or `trap_rule` according to `rule`.
pub fn integrate<E>(
    evaluator: &E,
    expression: &E::Expression,
    variable: &str,
    lower: f64,
    upper: f64,
    steps: usize,
    rule: QuadratureRule,
) -> Result<f64, IntegrationError>
where
    E: ExpressionEvaluator + ?Sized,
{
    match rule.offset() {
        Some(offset) => riemann_sum(evaluator, expression, variable, lower, upper, steps, offset),
        None => trap_rule(evaluator, expression, variable, lower, upper, steps),
    }
}
