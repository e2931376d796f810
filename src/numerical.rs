///  Example#1
/// ```
/// // integrate a function from the catalog with the default rule (trapezoidal, Runge refinement)
/// use RustedQuadrature::Examples::quadrature_examples::CatalogFunction;
/// use RustedQuadrature::numerical::Newton_Cotes::Reimann_sum::ReimannSum;
/// use RustedQuadrature::numerical::Newton_Cotes::interval::Bounds;
/// let f = CatalogFunction::SinDivX.build();
/// let answer = ReimannSum::new().integrate(f.as_ref(), &Bounds::new(-1.0, 1.0), 1e-4).unwrap();
/// println!("{}", answer);
/// ```
/// Example#2
/// ```
/// // choose the rule and the way to find the number of sections
/// use RustedQuadrature::numerical::Newton_Cotes::Reimann_sum::{QuadratureRule, ReimannSum, SolutionType};
/// use RustedQuadrature::numerical::Newton_Cotes::function::{ClosureFunction, ConstantFunction};
/// use RustedQuadrature::numerical::Newton_Cotes::interval::Bounds;
/// use std::sync::Arc;
/// let f = ClosureFunction::new(|x: f64| x * x, "y = x^2")
///     .with_second_derivative(Arc::new(ConstantFunction::new(2.0)));
/// let answer = ReimannSum::new()
///     .get_reimann_sum(&f, &Bounds::new(0.0, 1.0), 1e-3, QuadratureRule::Midpoint, SolutionType::Formulas)
///     .unwrap();
/// assert!((answer.value() - 1.0 / 3.0).abs() < 1e-3);
/// ```
pub mod Newton_Cotes;
