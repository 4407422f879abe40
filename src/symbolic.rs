#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// let input = "x^2.3* ln(x+1)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.all_arguments_are_variables(), vec!["x".to_string()]);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree
/// 2) substitutes numbers for variables without touching the original tree
/// 3) approximates closed expressions to floats
///# Example#
/// ```
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// let f = Expr::parse_expression("exp(x)+ln(y)").unwrap();
/// // y is still free, so the value is not defined yet
/// assert!(f.set_variable("x", 0.0).approx().is_err());
/// let value = f.set_variable("x", 0.0).set_variable("y", 1.0).approx().unwrap();
/// assert_eq!(value, 1.0);
/// assert!(f.has_different_variable("x"));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// the expression evaluator capability used by numerical quadrature
pub mod symbolic_evaluator;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
