//! Catalog of functions with hand-written derivatives offered by the interactive menu and
//! the task files.
use crate::numerical::Newton_Cotes::function::{
    ConstantFunction, EVALUATION_EPS, Function, FunctionRef, zero_function,
};
use crate::numerical::Newton_Cotes::interval::{Bounds, Interval};
use crate::numerical::Newton_Cotes::quadrature_errors::QuadratureError;
use log::error;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

// drops intervals that failed validation, they are constants so this never happens in practice
fn collect_scope(intervals: Vec<Result<Interval, QuadratureError>>) -> Vec<Interval> {
    intervals
        .into_iter()
        .filter_map(|interval| match interval {
            Ok(interval) => Some(interval),
            Err(err) => {
                error!("not allowed scope is skipped: {}", err);
                None
            }
        })
        .collect()
}

fn pole_at(x: f64) -> Vec<Interval> {
    collect_scope(vec![Interval::neighbourhood(x, EVALUATION_EPS)])
}

fn point_at(x: f64) -> Vec<Interval> {
    collect_scope(vec![Interval::point(x)])
}

////////////////////////////////////////////////////////////////////////////////
//                              y = x
////////////////////////////////////////////////////////////////////////////////
pub struct LinearFunction;

impl Function for LinearFunction {
    fn get(&self, x: f64) -> f64 {
        x
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(zero_function())
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(zero_function())
    }

    fn name(&self) -> &str {
        "y = x"
    }
}

////////////////////////////////////////////////////////////////////////////////
//                              y = sqrt(x)
////////////////////////////////////////////////////////////////////////////////
pub struct SqrtFunction;

/// y'' = -1/4 x^(-3/2)
pub struct SqrtSecondDerivative;

/// y'''' = -15/16 x^(-7/2)
pub struct SqrtFourthDerivative;

impl Function for SqrtFunction {
    fn get(&self, x: f64) -> f64 {
        x.sqrt()
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        collect_scope(vec![Interval::new(-1e30, false, 0.0, false)])
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(SqrtSecondDerivative))
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(SqrtFourthDerivative))
    }

    fn name(&self) -> &str {
        "y = sqrt(x)"
    }
}

impl Function for SqrtSecondDerivative {
    fn get(&self, x: f64) -> f64 {
        -0.25 / x.powf(1.5)
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        point_at(0.0)
    }

    fn name(&self) -> &str {
        "y = -1/4 * x^(-3/2)"
    }
}

impl Function for SqrtFourthDerivative {
    fn get(&self, x: f64) -> f64 {
        -15.0 / 16.0 / x.powf(3.5)
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        point_at(0.0)
    }

    fn name(&self) -> &str {
        "y = -15/16 * x^(-7/2)"
    }
}

////////////////////////////////////////////////////////////////////////////////
//                          y = 0.1*x^4 + 0.2*x^2 - 7
////////////////////////////////////////////////////////////////////////////////
pub struct PolynomialFunction;

/// y'' = 1.2 x^2 + 0.4
pub struct PolynomialSecondDerivative;

impl Function for PolynomialFunction {
    fn get(&self, x: f64) -> f64 {
        0.1 * x.powi(4) + 0.2 * x.powi(2) - 7.0
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(PolynomialSecondDerivative))
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(ConstantFunction::new(2.4)))
    }

    fn name(&self) -> &str {
        "y = 0.1*x^4 + 0.2*x^2 - 7"
    }
}

impl Function for PolynomialSecondDerivative {
    fn get(&self, x: f64) -> f64 {
        1.2 * x.powi(2) + 0.4
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(ConstantFunction::new(2.4)))
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(zero_function())
    }

    fn name(&self) -> &str {
        "y = 1.2*x^2 + 0.4"
    }
}

////////////////////////////////////////////////////////////////////////////////
//                              y = 0.01 / x
////////////////////////////////////////////////////////////////////////////////
pub struct HyperbolaFunction;

/// y'' = 0.02 / x^3
pub struct HyperbolaSecondDerivative;

/// y'''' = 0.024 / x^5
pub struct HyperbolaFourthDerivative;

impl Function for HyperbolaFunction {
    fn get(&self, x: f64) -> f64 {
        0.01 / x
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        pole_at(0.0)
    }

    fn second_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(HyperbolaSecondDerivative))
    }

    fn fourth_derivative(&self) -> Result<FunctionRef, QuadratureError> {
        Ok(Arc::new(HyperbolaFourthDerivative))
    }

    fn name(&self) -> &str {
        "y = 0.01/x"
    }
}

impl Function for HyperbolaSecondDerivative {
    fn get(&self, x: f64) -> f64 {
        0.02 / x.powi(3)
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        pole_at(0.0)
    }

    fn name(&self) -> &str {
        "y = 0.02/x^3"
    }
}

impl Function for HyperbolaFourthDerivative {
    fn get(&self, x: f64) -> f64 {
        0.024 / x.powi(5)
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        pole_at(0.0)
    }

    fn name(&self) -> &str {
        "y = 0.024/x^5"
    }
}

////////////////////////////////////////////////////////////////////////////////
//                              y = sin(x) / x
////////////////////////////////////////////////////////////////////////////////
/// removable singularity at 0, derivatives are not supplied
pub struct SinDivXFunction;

impl Function for SinDivXFunction {
    fn get(&self, x: f64) -> f64 {
        x.sin() / x
    }

    fn not_allowed_scope(&self) -> Vec<Interval> {
        point_at(0.0)
    }

    fn name(&self) -> &str {
        "y = sin(x)/x"
    }
}

////////////////////////////////////////////////////////////////////////////////
//                              CATALOG
////////////////////////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum CatalogFunction {
    #[strum(to_string = "linear")]
    Linear,
    #[strum(to_string = "sqrt")]
    Sqrt,
    #[strum(to_string = "polynomial")]
    Polynomial,
    #[strum(to_string = "hyperbola")]
    Hyperbola,
    #[strum(to_string = "sin_div_x")]
    SinDivX,
}

impl CatalogFunction {
    /// number in the menu, starting from 1
    pub fn number(&self) -> usize {
        CatalogFunction::iter()
            .position(|kind| kind == *self)
            .map_or(0, |position| position + 1)
    }

    pub fn from_number(number: usize) -> Option<CatalogFunction> {
        number
            .checked_sub(1)
            .and_then(|index| CatalogFunction::iter().nth(index))
    }

    pub fn from_key(key: &str) -> Option<CatalogFunction> {
        let key = key.trim().to_lowercase();
        CatalogFunction::iter().find(|kind| kind.to_string() == key)
    }

    pub fn build(&self) -> FunctionRef {
        match self {
            CatalogFunction::Linear => Arc::new(LinearFunction),
            CatalogFunction::Sqrt => Arc::new(SqrtFunction),
            CatalogFunction::Polynomial => Arc::new(PolynomialFunction),
            CatalogFunction::Hyperbola => Arc::new(HyperbolaFunction),
            CatalogFunction::SinDivX => Arc::new(SinDivXFunction),
        }
    }

    /// Bounds of the hyperbola that straddle its pole are mirrored: the limit with the
    /// smaller magnitude changes sign. Other functions keep the bounds as they are.
    pub fn adjust_bounds(&self, bounds: Bounds) -> Bounds {
        let (mut left, mut right) = (bounds.left(), bounds.right());
        if *self == CatalogFunction::Hyperbola && left * right < 0.0 {
            if left.abs() < right.abs() {
                left = -left;
            } else {
                right = -right;
            }
        }
        Bounds::new(left, right)
    }
}

/// all catalog functions, built once
pub struct FunctionCatalog {
    entries: Vec<(CatalogFunction, FunctionRef)>,
}

impl FunctionCatalog {
    pub fn new() -> FunctionCatalog {
        let entries = CatalogFunction::iter()
            .map(|kind| (kind, kind.build()))
            .collect();
        FunctionCatalog { entries }
    }

    pub fn get(&self, kind: CatalogFunction) -> FunctionRef {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == kind)
            .map(|(_, function)| Arc::clone(function))
            .unwrap_or_else(|| kind.build())
    }

    pub fn entries(&self) -> &[(CatalogFunction, FunctionRef)] {
        &self.entries
    }

    /// "1)y = x" lines for the help message
    pub fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|(kind, function)| format!("{}){}", kind.number(), function.name()))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Default for FunctionCatalog {
    fn default() -> Self {
        FunctionCatalog::new()
    }
}
