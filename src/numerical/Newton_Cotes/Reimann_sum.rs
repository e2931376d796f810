//! Newton-Cotes quadrature engine.
//! Two ways to reach the requested accuracy:
//! - by formulas: the number of sections is taken from the truncation error of the rule,
//!   which needs max|f''| (or max|f''''| for Simpson's rule), and the sum is computed once;
//! - by Runge: the number of sections is doubled until |S(n) - S(2n)| / C < accuracy,
//!   C = 3 for the rectangle and trapezoidal rules and C = 15 for Simpson's rule.
use super::answer::ReimannSumAnswer;
use super::function::Function;
use super::interval::Bounds;
use super::quadrature_errors::QuadratureError;
use log::{debug, info, warn};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Newton-Cotes rules, Simpson's rule is declared but has no summation yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum QuadratureRule {
    #[strum(to_string = "left")]
    Left,
    #[strum(to_string = "right")]
    Right,
    #[strum(to_string = "midpoint")]
    Midpoint,
    #[strum(to_string = "trapezoidal")]
    Trapezoidal,
    #[strum(to_string = "simpson")]
    Simpson,
}

impl QuadratureRule {
    /// rule by name: left, right, midpoint, trapezoidal, simpson (case insensitive)
    pub fn parse(name: &str) -> Result<QuadratureRule, QuadratureError> {
        let normalized = name.trim().to_lowercase();
        QuadratureRule::iter()
            .find(|rule| rule.to_string() == normalized)
            .ok_or_else(|| QuadratureError::UnknownRule(name.to_string()))
    }

    /// rule by its position in the list above
    pub fn from_index(index: usize) -> Result<QuadratureRule, QuadratureError> {
        QuadratureRule::iter()
            .nth(index)
            .ok_or_else(|| QuadratureError::UnknownRule(index.to_string()))
    }

    pub fn is_implemented(&self) -> bool {
        !matches!(self, QuadratureRule::Simpson)
    }

    /// C in the Runge estimate |S(n) - S(2n)| / C
    pub fn runge_denominator(&self) -> f64 {
        match self {
            QuadratureRule::Left
            | QuadratureRule::Right
            | QuadratureRule::Midpoint
            | QuadratureRule::Trapezoidal => 3.0,
            QuadratureRule::Simpson => 15.0,
        }
    }
}

/// how the number of sections is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum SolutionType {
    #[strum(to_string = "formulas")]
    Formulas,
    #[default]
    #[strum(to_string = "runge")]
    Runge,
}

impl SolutionType {
    pub fn parse(name: &str) -> Option<SolutionType> {
        let normalized = name.trim().to_lowercase();
        SolutionType::iter().find(|solution| solution.to_string() == normalized)
    }
}

/// finest accuracy accepted from the user (menu and task files)
pub const MIN_ACCURACY: f64 = 1e-6;

/// guardrails of the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureSettings {
    /// refinement stops when the number of sections exceeds this value
    pub max_sections: usize,
    /// refinement stops when |sum| reaches this value
    pub max_value: f64,
}

impl Default for QuadratureSettings {
    fn default() -> Self {
        QuadratureSettings {
            max_sections: 100_000_000,
            max_value: 1e30,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReimannSum {
    settings: QuadratureSettings,
}

impl ReimannSum {
    pub fn new() -> ReimannSum {
        ReimannSum::default()
    }

    pub fn with_settings(settings: QuadratureSettings) -> ReimannSum {
        ReimannSum { settings }
    }

    pub fn settings(&self) -> &QuadratureSettings {
        &self.settings
    }

    /// trapezoidal rule refined by Runge estimation
    pub fn integrate(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        accuracy: f64,
    ) -> Result<ReimannSumAnswer, QuadratureError> {
        self.get_reimann_sum(
            function,
            bounds,
            accuracy,
            QuadratureRule::Trapezoidal,
            SolutionType::Runge,
        )
    }

    pub fn get_reimann_sum(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        accuracy: f64,
        rule: QuadratureRule,
        solution_type: SolutionType,
    ) -> Result<ReimannSumAnswer, QuadratureError> {
        if !rule.is_implemented() {
            return Err(QuadratureError::NotImplementedSolution(rule));
        }
        self.check_allowed_scope(function, bounds)?;

        match solution_type {
            SolutionType::Formulas => self.sum_by_formulas(function, bounds, accuracy, rule),
            SolutionType::Runge => self.sum_by_runge(function, bounds, accuracy, rule),
        }
    }

    /// Excluded intervals of positive length must not touch the bounds. Excluded points are
    /// skipped here: a grid node hitting one is handled by `Function::get_value`.
    pub fn check_allowed_scope(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
    ) -> Result<(), QuadratureError> {
        for scope in function.not_allowed_scope() {
            if scope.is_point() {
                continue;
            }
            if scope.intersects_bounds(bounds) {
                return Err(QuadratureError::NotAllowedScope(format!(
                    "{} is not allowed for {}",
                    scope,
                    function.name()
                )));
            }
        }
        Ok(())
    }

    fn sum_by_formulas(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        accuracy: f64,
        rule: QuadratureRule,
    ) -> Result<ReimannSumAnswer, QuadratureError> {
        let n = self.count_of_sections(function, bounds, accuracy, rule)?;
        let value = self.sum_by_rule(function, bounds, rule, n)?;
        info!("{} by the {} rule: n = {} from the error formula", function.name(), rule, n);
        Ok(ReimannSumAnswer::new(value, f64::NAN, n))
    }

    fn sum_by_runge(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        accuracy: f64,
        rule: QuadratureRule,
    ) -> Result<ReimannSumAnswer, QuadratureError> {
        let mut n: usize = 2;
        let mut current = self.sum_by_rule(function, bounds, rule, n)?;

        loop {
            n *= 2;
            if n > self.settings.max_sections {
                warn!(
                    "{}: number of sections exceeded {}, refinement stopped",
                    function.name(),
                    self.settings.max_sections
                );
                return Err(QuadratureError::NotSolvableIntegral {
                    sections: n,
                    value: current,
                });
            }

            let previous = current;
            current = self.sum_by_rule(function, bounds, rule, n)?;
            if !(current.abs() < self.settings.max_value) {
                warn!("{}: sum {} is out of range, refinement stopped", function.name(), current);
                return Err(QuadratureError::NotSolvableIntegral {
                    sections: n,
                    value: current,
                });
            }

            let error = self.measurement_error(previous, current, rule);
            debug!("n = {}, sum = {}, error = {}", n, current, error);
            if error < accuracy {
                info!("{} by the {} rule: converged with n = {}", function.name(), rule, n);
                return Ok(ReimannSumAnswer::new(current, error, n));
            }
        }
    }

    /// Runge estimate of the error of the finer sum
    pub fn measurement_error(&self, previous: f64, current: f64, rule: QuadratureRule) -> f64 {
        (previous - current).abs() / rule.runge_denominator()
    }

    /// Composite rule over n equal sections. A negative length flips the sign of the sum.
    pub fn sum_by_rule(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        rule: QuadratureRule,
        n: usize,
    ) -> Result<f64, QuadratureError> {
        if n == 0 {
            return Ok(0.0);
        }
        let step = bounds.length() / n as f64;
        let left = bounds.left();
        let node = |i: usize| left + i as f64 * step;

        let sum = match rule {
            QuadratureRule::Left => sum_over(n, |i| function.get_value(node(i)))?,
            QuadratureRule::Right => sum_over(n, |i| function.get_value(node(i + 1)))?,
            QuadratureRule::Midpoint => {
                sum_over(n, |i| function.get_value(left + (i as f64 + 0.5) * step))?
            }
            QuadratureRule::Trapezoidal => {
                // inner nodes are shared by two neighbouring trapezoids
                let edges = (function.get_value(node(0))? + function.get_value(node(n))?) / 2.0;
                edges + sum_over(n - 1, |i| function.get_value(node(i + 1)))?
            }
            QuadratureRule::Simpson => return Err(QuadratureError::NotImplementedSolution(rule)),
        };
        Ok(sum * step)
    }

    /// Minimal n from the truncation error of the rule:
    /// rectangles  n = sqrt(L^3 max|f''| / (24 eps)) + 1,
    /// trapezoids  n = sqrt(L^3 max|f''| / (12 eps)) + 1,
    /// Simpson     n = (L^5 max|f''''| / (180 eps))^(1/4) + 1.
    pub fn count_of_sections(
        &self,
        function: &dyn Function,
        bounds: &Bounds,
        accuracy: f64,
        rule: QuadratureRule,
    ) -> Result<usize, QuadratureError> {
        let length = bounds.length().abs();
        let estimate = match rule {
            QuadratureRule::Left | QuadratureRule::Right | QuadratureRule::Midpoint => {
                let max_d2 = function.second_derivative()?.get_max_value(bounds)?;
                (length.powi(3) * max_d2 / 24.0 / accuracy).sqrt()
            }
            QuadratureRule::Trapezoidal => {
                let max_d2 = function.second_derivative()?.get_max_value(bounds)?;
                (length.powi(3) * max_d2 / 12.0 / accuracy).sqrt()
            }
            QuadratureRule::Simpson => {
                let max_d4 = function.fourth_derivative()?.get_max_value(bounds)?;
                (length.powi(5) * max_d4 / 180.0 / accuracy).powf(0.25)
            }
        };
        debug!("{}: section count estimate {}", function.name(), estimate);

        if !estimate.is_finite() || estimate + 1.0 > self.settings.max_sections as f64 {
            warn!("{}: section count estimate {} is too large", function.name(), estimate);
            return Err(QuadratureError::NotSolvableIntegral {
                sections: estimate as usize,
                value: f64::NAN,
            });
        }
        Ok(estimate.ceil() as usize + 1)
    }
}

fn sum_over<G>(count: usize, term: G) -> Result<f64, QuadratureError>
where
    G: Fn(usize) -> Result<f64, QuadratureError>,
{
    (0..count).map(term).sum()
}
