//! Expression evaluator capability consumed by the quadrature engine.
//!
//! The quadrature code never looks inside an expression: it only asks an
//! [`ExpressionEvaluator`] for the value of the expression at a point. This
//! module defines that seam and the [`SymbolicEvaluator`] implementation over
//! [`Expr`].
use crate::symbolic::symbolic_engine::Expr;
use log::trace;
use std::cell::RefCell;
use std::fmt;

/// Failures raised while approximating an expression
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// a symbolic identifier is still free after substitution
    FreeVariable(String),
    /// the value is not a finite number
    Undefined { expression: String },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvaluationError::FreeVariable(name) => {
                write!(f, "cannot evaluate: free variable '{}'", name)
            }
            EvaluationError::Undefined { expression } => {
                write!(f, "cannot evaluate: {} is undefined", expression)
            }
        }
    }
}

impl std::error::Error for EvaluationError {}

/// Numeric view of a symbolic expression engine.
pub trait ExpressionEvaluator {
    type Expression;

    /// Value of `expression` with `variable` bound to `value`.
    /// The expression itself must not be modified.
    fn evaluate(
        &self,
        expression: &Self::Expression,
        variable: &str,
        value: f64,
    ) -> Result<f64, EvaluationError>;

    /// Value of an expression that is expected to be closed (a bound, a step count...).
    fn approximate(&self, expression: &Self::Expression) -> Result<f64, EvaluationError>;

    /// true if `expression` contains a free identifier other than `variable`
    fn has_foreign_variable(&self, expression: &Self::Expression, variable: &str) -> bool;
}

/// Evaluator over [`Expr`] trees.
///
/// Substituted copies are pushed onto a scratch stack while they are approximated
/// and popped again before `evaluate` returns, whatever the outcome, so the stack
/// depth after any number of samples equals the depth before them.
#[derive(Debug, Default)]
pub struct SymbolicEvaluator {
    scratch: RefCell<Vec<Expr>>,
}

/// Restores the scratch stack to a saved depth when dropped.
struct ScratchMark<'a> {
    scratch: &'a RefCell<Vec<Expr>>,
    depth: usize,
}

impl<'a> ScratchMark<'a> {
    fn new(scratch: &'a RefCell<Vec<Expr>>) -> Self {
        let depth = scratch.borrow().len();
        ScratchMark { scratch, depth }
    }
}

impl Drop for ScratchMark<'_> {
    fn drop(&mut self) {
        self.scratch.borrow_mut().truncate(self.depth);
    }
}

impl SymbolicEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of expressions currently held in the scratch stack.
    pub fn scratch_depth(&self) -> usize {
        self.scratch.borrow().len()
    }
}

impl ExpressionEvaluator for SymbolicEvaluator {
    type Expression = Expr;

    fn evaluate(
        &self,
        expression: &Expr,
        variable: &str,
        value: f64,
    ) -> Result<f64, EvaluationError> {
        let _mark = ScratchMark::new(&self.scratch);
        let substituted = expression.set_variable(variable, value);
        self.scratch.borrow_mut().push(substituted);
        let top = self.scratch_depth() - 1;
        let result = self.scratch.borrow()[top].approx();
        trace!("{} at {} = {} -> {:?}", expression, variable, value, result);
        result
    }

    fn approximate(&self, expression: &Expr) -> Result<f64, EvaluationError> {
        expression.approx()
    }

    fn has_foreign_variable(&self, expression: &Expr, variable: &str) -> bool {
        expression.has_different_variable(variable)
    }
}
