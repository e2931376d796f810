//! examples of usage of RustedQuadrature
/// functions with known derivatives to integrate
pub mod quadrature_examples;
/// interactive menu over the function catalog
pub mod quadrature_repl;
