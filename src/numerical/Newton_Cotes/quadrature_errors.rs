use super::Reimann_sum::QuadratureRule;
use std::fmt;

/// Error types of the quadrature engine
#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// malformed interval: right bound less than left bound or a half-open point
    InvalidInterval(String),
    /// integration range touches an excluded scope, or the function can't be evaluated at a point
    NotAllowedScope(String),
    /// derivative (or another optional capability) is not defined for the function
    NotImplementedMethod(String),
    /// quadrature rule exists but has no summation implemented
    NotImplementedSolution(QuadratureRule),
    /// rule name or index that doesn't map to any rule
    UnknownRule(String),
    /// adaptive refinement exceeded its guardrails
    NotSolvableIntegral { sections: usize, value: f64 },
}

impl QuadratureError {
    /// true for `NotImplementedMethod` and its specific case `NotImplementedSolution`
    pub fn is_not_implemented_method(&self) -> bool {
        matches!(
            self,
            QuadratureError::NotImplementedMethod(_) | QuadratureError::NotImplementedSolution(_)
        )
    }

    /// message shown to the user of the interactive menu
    pub fn user_message(&self) -> &'static str {
        match self {
            QuadratureError::InvalidInterval(_) => "Invalid interval!",
            QuadratureError::NotAllowedScope(_) => {
                "Can't get integral in case of not allowed scope!"
            }
            QuadratureError::NotImplementedMethod(_) => "This method does not implement yet!",
            QuadratureError::NotImplementedSolution(_) | QuadratureError::UnknownRule(_) => {
                "Solution by this Rule doesn't implement yet!"
            }
            QuadratureError::NotSolvableIntegral { .. } => {
                "Can't count this integral at this bounds!"
            }
        }
    }
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::InvalidInterval(reason) => write!(f, "Invalid interval: {}", reason),
            QuadratureError::NotAllowedScope(reason) => write!(f, "Not allowed scope: {}", reason),
            QuadratureError::NotImplementedMethod(method) => {
                write!(f, "Method '{}' does not implement yet", method)
            }
            QuadratureError::NotImplementedSolution(rule) => {
                write!(f, "Solution by the {} rule does not implement yet", rule)
            }
            QuadratureError::UnknownRule(name) => write!(f, "Unknown quadrature rule '{}'", name),
            QuadratureError::NotSolvableIntegral { sections, value } => write!(
                f,
                "Integral is not solvable: refinement stopped at {} sections with value {}",
                sections, value
            ),
        }
    }
}

impl std::error::Error for QuadratureError {}
