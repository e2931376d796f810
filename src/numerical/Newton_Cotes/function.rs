//! Real function of one variable as seen by the quadrature engine: value, scope where it must not
//! be evaluated and (optionally) its 2nd and 4th derivatives supplied by hand.
use super::interval::{Bounds, Interval};
use super::quadrature_errors::QuadratureError;
use std::sync::{Arc, LazyLock};

/// nudge used to step off a point where the function can't be evaluated
pub const EVALUATION_EPS: f64 = 1e-9;
/// values with greater magnitude are treated as not countable
pub const DOUBLE_MAX_VALUE: f64 = 1e30;
/// sampling density of `get_max_value`, samples per unit of length
pub const SAMPLES_PER_UNIT: f64 = 10_000.0;
pub const MAX_SAMPLES: usize = 1_000_000;

/// shared handle to a function, derivatives are passed around this way
pub type FunctionRef = Arc<dyn Function>;

/// Trait for a function f(x) to be integrated
pub trait Function: Send + Sync {
    /// raw value of the function, may be NaN or infinite
    fn get(&self, x: f64) -> f64;

    /// intervals where the function must not be evaluated (empty if defined everywhere)
    fn not_allowed_scope(&self) -> Vec<Interval> {
        Vec::new()
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Err(QuadratureError::NotImplementedMethod(format!(
            "second derivative of {}",
            self.name()
        )))
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Err(QuadratureError::NotImplementedMethod(format!(
            "fourth derivative of {}",
            self.name()
        )))
    }

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_function"
    }

    /// Value at x. If the raw value is NaN or too large (x is a removable singularity or
    /// lies exactly at the edge of the domain) the function is evaluated around x:
    /// centered average, then left side, then right side.
    fn get_value(&self, x: f64) -> Result<f64, QuadratureError> {
        let value = self.get(x);
        if is_countable_value(value) {
            return Ok(value);
        }

        let left = self.get(x - EVALUATION_EPS);
        let right = self.get(x + EVALUATION_EPS);
        let candidates = [(left + right) / 2.0, left, right];
        candidates
            .into_iter()
            .find(|value| is_countable_value(*value))
            .ok_or_else(|| {
                QuadratureError::NotAllowedScope(format!(
                    "{} can't be evaluated at x = {}",
                    self.name(),
                    x
                ))
            })
    }

    /// Approximate sup |f| over the bounds sampled on a uniform grid.
    fn get_max_value(&self, bounds: &Bounds) -> Result<f64, QuadratureError> {
        let count_of_sections =
            ((bounds.length().abs() * SAMPLES_PER_UNIT) as usize).min(MAX_SAMPLES);
        if count_of_sections == 0 {
            return Ok(0.0);
        }
        let step = bounds.length() / count_of_sections as f64;

        let mut maximum: f64 = 0.0;
        for i in 0..count_of_sections {
            let x = bounds.left() + i as f64 * step;
            maximum = maximum.max(self.get_value(x)?.abs());
        }
        Ok(maximum)
    }
}

pub fn is_countable_value(value: f64) -> bool {
    !value.is_nan() && value.abs() <= DOUBLE_MAX_VALUE
}

/// f(x) = c, every derivative is the zero function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFunction {
    value: f64,
}

impl ConstantFunction {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Function for ConstantFunction {
    fn get(&self, _x: f64) -> f64 {
        self.value
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(zero_function())
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(zero_function())
    }

    fn name(&self) -> &str {
        "y = const"
    }
}

/// the one zero function, reused as a derivative of low degree polynomials
pub static ZERO_FUNCTION: LazyLock<FunctionRef> =
    LazyLock::new(|| Arc::new(ConstantFunction::new(0.0)) as FunctionRef);

pub fn zero_function() -> FunctionRef {
    Arc::clone(&ZERO_FUNCTION)
}

/// Function made of a closure; scope and derivatives are attached with builder methods
pub struct ClosureFunction<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    func: F,
    name: String,
    not_allowed_scope: Vec<Interval>,
    second_derivative: Option<FunctionRef>,
    fourth_derivative: Option<FunctionRef>,
}

impl<F> ClosureFunction<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    pub fn new(func: F, name: &str) -> Self {
        Self {
            func,
            name: name.to_string(),
            not_allowed_scope: Vec::new(),
            second_derivative: None,
            fourth_derivative: None,
        }
    }

    pub fn with_not_allowed_scope(mut self, scope: Vec<Interval>) -> Self {
        self.not_allowed_scope = scope;
        self
    }

    pub fn with_second_derivative(mut self, derivative: FunctionRef) -> Self {
        self.second_derivative = Some(derivative);
        self
    }

    pub fn with_fourth_derivative(mut self, derivative: FunctionRef) -> Self {
        self.fourth_derivative = Some(derivative);
        self
    }
}

impl<F> Function for ClosureFunction<F>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn get(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        self.not_allowed_scope.clone()
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        self.second_derivative.clone().ok_or_else(|| {
            QuadratureError::NotImplementedMethod(format!("second derivative of {}", self.name))
        })
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        self.fourth_derivative.clone().ok_or_else(|| {
            QuadratureError::NotImplementedMethod(format!("fourth derivative of {}", self.name))
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
