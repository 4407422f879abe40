/// # Quadrature
/// Riemann sums (left, middle, right) and the trapezoid rule
///  Example#1
/// ```
/// use RustedQuad::numerical::quadrature::riemann_sum;
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// use RustedQuad::symbolic::symbolic_evaluator::SymbolicEvaluator;
/// let f = Expr::parse_expression("2*x").unwrap();
/// // right riemann sum: every sample is shifted by a whole step
/// let res = riemann_sum(&SymbolicEvaluator::new(), &f, "x", 0.0, 1.0, 2, 1.0).unwrap();
/// assert_eq!(res, 1.5);
/// ```
pub mod quadrature;
mod quadrature_tests;
/// errors of a quadrature call
pub mod ram_errors;
/// # ramlib
/// the six-argument entry point: ramlib(expression, var, lower_bounds, upper_bounds, number_of_steps, function_index)
///  Example#1
/// ```
/// use RustedQuad::numerical::ramlib::ramlib;
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// use RustedQuad::symbolic::symbolic_evaluator::SymbolicEvaluator;
/// let args = Expr::parse_vector_expression(&["x^2", "x", "0", "3", "3", "1"]).unwrap();
/// let res = ramlib(&args, &SymbolicEvaluator::new()).unwrap();
/// assert!((res - 8.75).abs() < 1e-12);
/// ```
pub mod ramlib;
/// quadrature task read from a task document
pub mod ram_task;
