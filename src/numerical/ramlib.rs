//! Argument handling for the `ramlib(expression, var, lower_bounds, upper_bounds,
//! number_of_steps, function_index)` call.
//!
//! The arguments arrive as an ordered list of expressions. They are checked and
//! converted one position at a time, in order, and the first failed check aborts
//! the call before any sampling happens.
//!
//! function index: 0 = left riemann sum, 1 = middle riemann sum, 2 = right riemann sum,
//! 3 (and anything larger) = trapezoid rule.
use crate::numerical::quadrature::{QuadratureRule, integrate};
use crate::numerical::ram_errors::IntegrationError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_evaluator::ExpressionEvaluator;
use log::{debug, info};

/// The number of arguments `ramlib` takes.
pub const NUM_ARGS: usize = 6;

/// Checks the argument count against `num_args`.
pub fn check_arg_nums(args: &[Expr], num_args: usize) -> Result<(), IntegrationError> {
    if args.len() > num_args {
        Err(IntegrationError::TooManyArguments)
    } else if args.len() < num_args {
        Err(IntegrationError::TooFewArguments)
    } else {
        Ok(())
    }
}

/// Positional reader over the argument list.
pub struct ArgReader<'a> {
    args: &'a [Expr],
    position: usize,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a [Expr]) -> Self {
        ArgReader { args, position: 0 }
    }

    fn next_arg(&mut self) -> Result<&'a Expr, IntegrationError> {
        let arg = self
            .args
            .get(self.position)
            .ok_or(IntegrationError::TooFewArguments)?;
        self.position += 1;
        Ok(arg)
    }

    /// the next argument as it is
    pub fn get_expr(&mut self) -> Result<&'a Expr, IntegrationError> {
        self.next_arg()
    }

    /// the next argument, which must be a bare variable; returns its name
    pub fn get_var_expr(&mut self) -> Result<&'a str, IntegrationError> {
        match self.next_arg()? {
            Expr::Var(name) => Ok(name.as_str()),
            _ => Err(IntegrationError::ExpectedVariable),
        }
    }

    /// the next argument approximated to a float
    pub fn get_float<E>(&mut self, evaluator: &E) -> Result<f64, IntegrationError>
    where
        E: ExpressionEvaluator<Expression = Expr> + ?Sized,
    {
        let arg = self.next_arg()?;
        evaluator.approximate(arg).map_err(|err| {
            IntegrationError::InvalidArgument(format!("{} cannot be approximated ({})", arg, err))
        })
    }

    /// The next argument as a non-negative integer.
    /// An integral constant is taken as it is; anything else is approximated,
    /// truncated toward zero and made positive: -4 -> 4, 3.9 -> 3, -3.7 -> 3.
    pub fn get_int<E>(&mut self, evaluator: &E) -> Result<u64, IntegrationError>
    where
        E: ExpressionEvaluator<Expression = Expr> + ?Sized,
    {
        let value = match self.args.get(self.position) {
            Some(arg @ Expr::Const(val)) if arg.is_integer_const() => {
                self.position += 1;
                *val
            }
            _ => self.get_float(evaluator)?.trunc(),
        };
        // float to int casts saturate
        Ok((value as i64).unsigned_abs())
    }
}

/// Fails if the expression holds any variable other than `var`.
pub fn check_can_be_evaluated<E>(
    evaluator: &E,
    expression: &Expr,
    var: &str,
) -> Result<(), IntegrationError>
where
    E: ExpressionEvaluator<Expression = Expr> + ?Sized,
{
    if evaluator.has_foreign_variable(expression, var) {
        return Err(IntegrationError::InvalidArgument(format!(
            "{} contains variables other than {}",
            expression, var
        )));
    }
    Ok(())
}

/// Typed form of the six `ramlib` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RamArgs<'a> {
    pub expression: &'a Expr,
    pub var: &'a str,
    pub lower_bounds: f64,
    pub upper_bounds: f64,
    pub numsteps: usize,
    pub rule: QuadratureRule,
}

/// Validates and extracts all arguments in their fixed order.
pub fn extract_args<'a, E>(
    args: &'a [Expr],
    evaluator: &E,
) -> Result<RamArgs<'a>, IntegrationError>
where
    E: ExpressionEvaluator<Expression = Expr> + ?Sized,
{
    check_arg_nums(args, NUM_ARGS)?;
    let mut reader = ArgReader::new(args);
    let expression = reader.get_expr()?;
    let var = reader.get_var_expr()?;
    let lower_bounds = reader.get_float(evaluator)?;
    let upper_bounds = reader.get_float(evaluator)?;
    let numsteps = reader.get_int(evaluator)?;
    let functionindex = reader.get_int(evaluator)?;
    check_can_be_evaluated(evaluator, expression, var)?;
    let numsteps = usize::try_from(numsteps).map_err(|_| {
        IntegrationError::InvalidArgument(format!("{} steps is too many", numsteps))
    })?;
    let ram_args = RamArgs {
        expression,
        var,
        lower_bounds,
        upper_bounds,
        numsteps,
        rule: QuadratureRule::from_index(functionindex),
    };
    debug!("ramlib arguments: {:?}", ram_args);
    Ok(ram_args)
}

/// Entry point: estimates the integral described by the six arguments
/// `expression, var, lower_bounds, upper_bounds, number_of_steps, function_index`.
pub fn ramlib<E>(args: &[Expr], evaluator: &E) -> Result<f64, IntegrationError>
where
    E: ExpressionEvaluator<Expression = Expr> + ?Sized,
{
    let ram_args = extract_args(args, evaluator)?;
    let result = integrate(
        evaluator,
        ram_args.expression,
        ram_args.var,
        ram_args.lower_bounds,
        ram_args.upper_bounds,
        ram_args.numsteps,
        ram_args.rule,
    )?;
    info!(
        "{} rule for {} d{} on [{}, {}] with {} steps = {}",
        ram_args.rule,
        ram_args.expression,
        ram_args.var,
        ram_args.lower_bounds,
        ram_args.upper_bounds,
        ram_args.numsteps,
        result
    );
    Ok(result)
}
