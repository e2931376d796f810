//! Numerical integration of a function of one variable by Newton-Cotes rules with
//! adaptive step refinement.
/// Example#1
/// ```
/// use RustedQuadrature::numerical::Newton_Cotes::Reimann_sum::ReimannSum;
/// use RustedQuadrature::numerical::Newton_Cotes::function::ClosureFunction;
/// use RustedQuadrature::numerical::Newton_Cotes::interval::Bounds;
/// let f = ClosureFunction::new(|x: f64| x * x, "y = x^2");
/// let answer = ReimannSum::new().integrate(&f, &Bounds::new(0.0, 3.0), 1e-4).unwrap();
/// assert!((answer.value() - 9.0).abs() < 1e-3);
/// println!("{}", answer);
/// ```
pub mod Reimann_sum;
/// result of an integration
pub mod answer;
/// function to integrate, its derivatives and not allowed scope
pub mod function;
/// integration limits and intervals
pub mod interval;
pub mod quadrature_errors;
