use crate::symbolic::symbolic_evaluator::EvaluationError;
use std::fmt;

/// Error types for a quadrature call. Every one of them aborts the call.
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    TooManyArguments,
    TooFewArguments,
    /// the integration variable argument is not a bare variable
    ExpectedVariable,
    InvalidArgument(String),
    /// the evaluator failed at a sample point, carried unchanged
    Evaluation(EvaluationError),
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegrationError::TooManyArguments => write!(f, "Too many arguments"),
            IntegrationError::TooFewArguments => write!(f, "Too few arguments"),
            IntegrationError::ExpectedVariable => write!(f, "Expected variable"),
            IntegrationError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            IntegrationError::Evaluation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for IntegrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntegrationError::Evaluation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EvaluationError> for IntegrationError {
    fn from(err: EvaluationError) -> Self {
        IntegrationError::Evaluation(err)
    }
}
