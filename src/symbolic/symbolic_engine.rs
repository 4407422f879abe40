//! # Symbolic Engine Module
//!
//! Minimal symbolic expression tree used as the integrand representation.
//! It covers what numeric quadrature needs from a computer-algebra layer:
//!
//! - building expressions (`Expr` variants, operator overloading)
//! - non-destructive substitution of a value for a variable (`set_variable`)
//! - variable detection (`all_arguments_are_variables`, `has_different_variable`)
//! - numerical approximation of a closed expression (`approx`)
//!
//! Parsing from strings lives in `parse_expr`, the evaluator capability used by
//! the quadrature engine lives in `symbolic_evaluator`.

#![allow(non_camel_case_types)]

use crate::symbolic::symbolic_evaluator::EvaluationError;
use std::f64::consts::PI;
use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust, ignore
/// use RustedQuad::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "t")
    Var(String),
    /// Numerical constant value
    Const(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    Exp(Box<Expr>),
    /// Natural logarithm
    Ln(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// Tangent, mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent, mathematical notation 'ctg'
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// Arctangent, mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent, mathematical notation 'arcctg'
    arcctg(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    /// Applies `f` to every direct child and rebuilds the node; leaves are cloned.
    fn map_children<F>(&self, f: F) -> Expr
    where
        F: Fn(&Expr) -> Expr,
    {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(f(lhs).boxed(), f(rhs).boxed()),
            Expr::Pow(base, exp) => Expr::Pow(f(base).boxed(), f(exp).boxed()),
            Expr::Exp(expr) => Expr::Exp(f(expr).boxed()),
            Expr::Ln(expr) => Expr::Ln(f(expr).boxed()),
            Expr::sin(expr) => Expr::sin(f(expr).boxed()),
            Expr::cos(expr) => Expr::cos(f(expr).boxed()),
            Expr::tg(expr) => Expr::tg(f(expr).boxed()),
            Expr::ctg(expr) => Expr::ctg(f(expr).boxed()),
            Expr::arcsin(expr) => Expr::arcsin(f(expr).boxed()),
            Expr::arccos(expr) => Expr::arccos(f(expr).boxed()),
            Expr::arctg(expr) => Expr::arctg(f(expr).boxed()),
            Expr::arcctg(expr) => Expr::arcctg(f(expr).boxed()),
        }
    }

    /// Direct children of the node, in order.
    fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Vec::new(),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr) => vec![expr.as_ref()],
        }
    }

    /// SUBSTITUTION

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Returns a new tree; `self` is left untouched.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            _ => self.map_children(|child| child.set_variable(var, value)),
        }
    }

    /// VARIABLE DETECTION

    /// Extracts all unique variable names from the expression, sorted and deduplicated.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 + y*z + x")?;
    /// assert_eq!(expr.all_arguments_are_variables(), vec!["x", "y", "z"]);
    /// ```
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            _ => {
                for child in self.children() {
                    vars.extend(child.all_arguments_are_variables());
                }
            }
        }
        vars.sort();
        vars.dedup();
        vars
    }

    /// true if the expression holds any free variable other than `var`
    pub fn has_different_variable(&self, var: &str) -> bool {
        self.all_arguments_are_variables()
            .iter()
            .any(|name| name != var)
    }

    /// true for a constant holding an integral value
    pub fn is_integer_const(&self) -> bool {
        match self {
            Expr::Const(val) => val.is_finite() && val.fract() == 0.0,
            _ => false,
        }
    }

    /// NUMERICAL APPROXIMATION

    /// Approximates a closed expression (no free variables) to a float.
    ///
    /// Fails with `FreeVariable` on the first variable met and with `Undefined`
    /// when the value is not finite (division by zero, log of a negative number, ...).
    pub fn approx(&self) -> Result<f64, EvaluationError> {
        let value = self.approx_node()?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::Undefined {
                expression: self.to_string(),
            })
        }
    }

    fn approx_node(&self) -> Result<f64, EvaluationError> {
        let value = match self {
            Expr::Var(name) => return Err(EvaluationError::FreeVariable(name.clone())),
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.approx_node()? + rhs.approx_node()?,
            Expr::Sub(lhs, rhs) => lhs.approx_node()? - rhs.approx_node()?,
            Expr::Mul(lhs, rhs) => lhs.approx_node()? * rhs.approx_node()?,
            Expr::Div(lhs, rhs) => lhs.approx_node()? / rhs.approx_node()?,
            Expr::Pow(base, exp) => base.approx_node()?.powf(exp.approx_node()?),
            Expr::Exp(expr) => expr.approx_node()?.exp(),
            Expr::Ln(expr) => expr.approx_node()?.ln(),
            Expr::sin(expr) => expr.approx_node()?.sin(),
            Expr::cos(expr) => expr.approx_node()?.cos(),
            Expr::tg(expr) => expr.approx_node()?.tan(),
            Expr::ctg(expr) => 1.0 / expr.approx_node()?.tan(),
            Expr::arcsin(expr) => expr.approx_node()?.asin(),
            Expr::arccos(expr) => expr.approx_node()?.acos(),
            Expr::arctg(expr) => expr.approx_node()?.atan(),
            Expr::arcctg(expr) => PI / 2.0 - expr.approx_node()?.atan(),
        };
        Ok(value)
    }
}
