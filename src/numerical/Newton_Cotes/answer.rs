use std::fmt;
use tabled::{builder::Builder, settings::Style};

/// Result of one integration: value, Runge error estimate (NaN if not computed) and
/// the number of sections the range was split into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReimannSumAnswer {
    value: f64,
    measurement_error: f64,
    iterations_count: usize,
}

impl ReimannSumAnswer {
    pub fn new(value: f64, measurement_error: f64, iterations_count: usize) -> Self {
        Self {
            value,
            measurement_error,
            iterations_count,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn measurement_error(&self) -> f64 {
        self.measurement_error
    }

    pub fn iterations_count(&self) -> usize {
        self.iterations_count
    }

    pub fn has_measurement_error(&self) -> bool {
        !self.measurement_error.is_nan()
    }

    /// pretty table for the terminal
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["value of the integral".to_string(), self.value.to_string()]);
        builder.push_record(["count of steps".to_string(), self.iterations_count.to_string()]);
        if self.has_measurement_error() {
            builder.push_record([
                "measurement error".to_string(),
                self.measurement_error.to_string(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

impl fmt::Display for ReimannSumAnswer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let error_line = if self.has_measurement_error() {
            format!("measurement error: {}", self.measurement_error)
        } else {
            String::new()
        };
        write!(
            f,
            "Value of the integral is {}\ncount of steps: {}\n{}\n",
            self.value, self.iterations_count, error_line
        )
    }
}
