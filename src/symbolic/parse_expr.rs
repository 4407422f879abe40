//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedQuad::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2+sin(x)").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    brackets_balanced, find_char_positions_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets, is_wrapped_in_brackets,
};
use log::trace;
use std::f64::consts::PI;
//                  search recursion diagram
//                "y^2+exp(x)-log(x)/y"             |
//                |  left        | right            |
//                |__________________________________|
//                |     split at rightmost  -        |
//                |__________________________________|
//                |  y^2+exp(x)  | log(x)/y          |
//                |      |       |     |             |
//                |_____\|/______|____\|/____________|
//                | split at +   | split at /        |
//                |  y^2 |exp(x) | log(x) | y        |
//                |_____Ok_______|______Ok___________|
//                  etc...

/// unary functions recognised by name
const FUNCTIONS: [(&str, fn(Box<Expr>) -> Expr); 18] = [
    ("arcsin", Expr::arcsin),
    ("arccos", Expr::arccos),
    ("arctan", Expr::arctg),
    ("arcctg", Expr::arcctg),
    ("arctg", Expr::arctg),
    ("asin", Expr::arcsin),
    ("acos", Expr::arccos),
    ("atan", Expr::arctg),
    ("acot", Expr::arcctg),
    ("exp", Expr::Exp),
    ("log", Expr::Ln),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tg", Expr::tg),
    ("tan", Expr::tg),
    ("ctg", Expr::ctg),
    ("cot", Expr::ctg),
    ("ln", Expr::Ln),
];

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// `name(inner)` where the bracket after the name closes at the very end of the input
fn parse_function_call(input: &str) -> Result<Option<Expr>, String> {
    let name_end = match input.find('(') {
        Some(pos) if pos > 0 => pos,
        _ => return Ok(None),
    };
    let name = input[..name_end].trim_end();
    if find_pair_to_this_bracket(input, name_end) != Some(input.len() - 1) {
        return Ok(None);
    }
    let constructor = match FUNCTIONS.iter().find(|(fname, _)| *fname == name) {
        Some((_, constructor)) => constructor,
        None => return Err(format!("unknown function '{}'", name)),
    };
    let inner = parse_expression_func(&input[name_end + 1..input.len() - 1])?;
    Ok(Some(constructor(inner.boxed())))
}

/// Recursive descent over the string: the lowest-precedence operator found outside
/// brackets splits the input, each side is parsed again.
/// Precedence from lowest: binary + -, unary sign, * /, ^ (right-associative), calls, atoms.
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    trace!("parsing: {}", input);
    if input.is_empty() {
        return Err("empty expression".to_string());
    }
    if !brackets_balanced(input) {
        return Err(format!("unbalanced brackets in '{}'", input));
    }

    // addition and subtraction
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['+', '-']) {
        let left = parse_expression_func(&input[..pos])?;
        let right = parse_expression_func(&input[pos + 1..])?;
        return Ok(match op {
            '+' => Expr::Add(left.boxed(), right.boxed()),
            _ => Expr::Sub(left.boxed(), right.boxed()),
        });
    }

    // unary sign binds looser than * and ^, so -x^2 is -(x^2)
    if let Some(rest) = input.strip_prefix('-') {
        let inner = parse_expression_func(rest)?;
        return Ok(match inner {
            Expr::Const(val) => Expr::Const(-val),
            other => -other,
        });
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression_func(rest);
    }

    // multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = parse_expression_func(&input[..pos])?;
        let right = parse_expression_func(&input[pos + 1..])?;
        return Ok(match op {
            '*' => Expr::Mul(left.boxed(), right.boxed()),
            _ => Expr::Div(left.boxed(), right.boxed()),
        });
    }

    // power, the leftmost '^' splits so that x^y^z is x^(y^z)
    if let Some(pos) = find_char_positions_outside_brackets(input, '^') {
        let base = parse_expression_func(&input[..pos])?;
        let exponent = parse_expression_func(&input[pos + 1..])?;
        return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
    }

    if is_wrapped_in_brackets(input) {
        return parse_expression_func(&input[1..input.len() - 1]);
    }

    if let Some(call) = parse_function_call(input)? {
        return Ok(call);
    }

    // constants and variables
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }
    if input == "pi" {
        return Ok(Expr::Const(PI));
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }
    Err(format!("cannot parse '{}'", input))
}

impl Expr {
    /// EXPRESSION PARSING FROM STRINGS

    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, -2.5, 1e-6, pi
    /// - Operators: +, -, *, /, ^
    /// - Functions: exp, ln/log, sin, cos, tg/tan, ctg/cot, arcsin/asin, arccos/acos,
    ///   arctg/atan/arctan, arcctg/acot
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        parse_expression_func(input)
    }

    /// Parses several expressions, stopping at the first one that fails.
    pub fn parse_vector_expression(input: &[&str]) -> Result<Vec<Expr>, String> {
        input.iter().map(|s| parse_expression_func(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_parse_constant_and_variable() {
        assert_eq!(Expr::parse_expression("2.5").unwrap(), Expr::Const(2.5));
        assert_eq!(Expr::parse_expression(" x ").unwrap(), x());
        assert_eq!(Expr::parse_expression("-3").unwrap(), Expr::Const(-3.0));
        assert_eq!(Expr::parse_expression("1e-3").unwrap(), Expr::Const(1e-3));
    }

    #[test]
    fn test_parse_sum_is_left_associative() {
        let e = Expr::parse_expression("x-1-2").unwrap();
        let expected = Expr::Sub(
            Expr::Sub(x().boxed(), Expr::Const(1.0).boxed()).boxed(),
            Expr::Const(2.0).boxed(),
        );
        assert_eq!(e, expected);
    }

    #[test]
    fn test_parse_precedence() {
        let e = Expr::parse_expression("1+2*x^2").unwrap();
        let expected = Expr::Add(
            Expr::Const(1.0).boxed(),
            Expr::Mul(
                Expr::Const(2.0).boxed(),
                Expr::Pow(x().boxed(), Expr::Const(2.0).boxed()).boxed(),
            )
            .boxed(),
        );
        assert_eq!(e, expected);
    }

    #[test]
    fn test_parse_unary_minus_power() {
        let e = Expr::parse_expression("-x^2").unwrap();
        let value = e.set_variable("x", 3.0).approx().unwrap();
        assert_relative_eq!(value, -9.0);
        let e = Expr::parse_expression("2*-x").unwrap();
        assert_relative_eq!(e.set_variable("x", 3.0).approx().unwrap(), -6.0);
    }

    #[test]
    fn test_parse_functions_and_brackets() {
        let e = Expr::parse_expression("sin(x)^2+cos((x))^2").unwrap();
        let value = e.set_variable("x", 0.7).approx().unwrap();
        assert_relative_eq!(value, 1.0, epsilon = 1e-12);
        let e = Expr::parse_expression("arctg(1)*4").unwrap();
        assert_relative_eq!(e.approx().unwrap(), PI, epsilon = 1e-12);
        let e = Expr::parse_expression("exp(ln(2))").unwrap();
        assert_relative_eq!(e.approx().unwrap(), 2.0, epsilon = 1e-12);
        let e = Expr::parse_expression("tg(pi/4)").unwrap();
        assert_relative_eq!(e.approx().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_space_before_call_bracket() {
        let e = Expr::parse_expression("sin (x)").unwrap();
        assert_eq!(e, Expr::sin(x().boxed()));
        let e = Expr::parse_expression("2 * exp  (x - 1)").unwrap();
        assert_relative_eq!(e.set_variable("x", 1.0).approx().unwrap(), 2.0);
        let err = Expr::parse_expression("foo (x)").unwrap_err();
        assert_eq!(err, "unknown function 'foo'");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Expr::parse_expression("").is_err());
        assert!(Expr::parse_expression("(x+1").is_err());
        assert!(Expr::parse_expression("foo(x)").is_err());
        assert!(Expr::parse_expression("x+").is_err());
        assert!(Expr::parse_expression("2x").is_err());
    }

    #[test]
    fn test_parse_vector_expression() {
        let exprs = Expr::parse_vector_expression(&["x", "1", "x+1"]).unwrap();
        assert_eq!(exprs.len(), 3);
        assert!(Expr::parse_vector_expression(&["x", "(("]).is_err());
    }
}
