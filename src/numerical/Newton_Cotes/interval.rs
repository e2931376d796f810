//! integration limits and intervals of the real line
use super::quadrature_errors::QuadratureError;
use std::fmt;

/// tolerance for comparing endpoints
pub const INTERVAL_EPS: f64 = 1e-14;

/// Integration limits. `left` may be greater than `right`, then the length is negative
/// and so is the sign of the integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64) -> Bounds {
        Bounds { left, right }
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    /// signed length: right - left
    pub fn length(&self) -> f64 {
        self.right - self.left
    }

    pub fn is_point(&self) -> bool {
        self.length().abs() < INTERVAL_EPS
    }

    /// same limits in ascending order
    pub fn ordered(&self) -> (f64, f64) {
        (self.left.min(self.right), self.left.max(self.right))
    }
}

/// Bounded interval or single point with open/closed ends.
/// Invariants: left <= right + eps; a point interval is closed at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    bounds: Bounds,
    is_left_included: bool,
    is_right_included: bool,
}

impl Interval {
    pub fn new(
        left: f64,
        is_left_included: bool,
        right: f64,
        is_right_included: bool,
    ) -> Result<Interval, QuadratureError> {
        let interval = Interval {
            bounds: Bounds::new(left, right),
            is_left_included,
            is_right_included,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// [left; right]
    pub fn closed(left: f64, right: f64) -> Result<Interval, QuadratureError> {
        Interval::new(left, true, right, true)
    }

    /// [x]
    pub fn point(x: f64) -> Result<Interval, QuadratureError> {
        Interval::closed(x, x)
    }

    /// [center - radius; center + radius], the way poles are declared in a not allowed scope
    pub fn neighbourhood(center: f64, radius: f64) -> Result<Interval, QuadratureError> {
        Interval::closed(center - radius.abs(), center + radius.abs())
    }

    fn validate(&self) -> Result<(), QuadratureError> {
        if self.left().is_nan() || self.right().is_nan() {
            return Err(QuadratureError::InvalidInterval(
                "Bound is not a number!".to_string(),
            ));
        }
        if self.left() > self.right() + INTERVAL_EPS {
            return Err(QuadratureError::InvalidInterval(
                "Right bound less than left bound!".to_string(),
            ));
        }
        if self.is_point() && (!self.is_left_included || !self.is_right_included) {
            return Err(QuadratureError::InvalidInterval("Empty Interval".to_string()));
        }
        Ok(())
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn left(&self) -> f64 {
        self.bounds.left()
    }

    pub fn right(&self) -> f64 {
        self.bounds.right()
    }

    pub fn length(&self) -> f64 {
        self.bounds.length()
    }

    pub fn is_left_included(&self) -> bool {
        self.is_left_included
    }

    pub fn is_right_included(&self) -> bool {
        self.is_right_included
    }

    pub fn is_point(&self) -> bool {
        self.bounds.is_point()
    }

    /// Integration limits are treated as an open interval between min and max of the limits.
    /// Degenerate limits intersect nothing.
    pub fn intersects_bounds(&self, bounds: &Bounds) -> bool {
        let (low, high) = bounds.ordered();
        match Interval::new(low, false, high, false) {
            Ok(open) => self.intersects(&open),
            Err(_) => false,
        }
    }

    pub fn intersects(&self, that: &Interval) -> bool {
        if (self.left() - that.left()).abs() < INTERVAL_EPS {
            if self.is_left_included && that.is_left_included {
                return true;
            }
            // one of the left ends is open, so a point (always closed) lies outside the other one
            !self.is_point() && !that.is_point()
        } else if self.left() < that.left() {
            Self::left_one_reaches(self, that)
        } else {
            Self::left_one_reaches(that, self)
        }
    }

    // `first` starts distinctly to the left of `second`
    fn left_one_reaches(first: &Interval, second: &Interval) -> bool {
        if first.right() + INTERVAL_EPS < second.left() {
            return false;
        }
        if (first.right() - second.left()).abs() < INTERVAL_EPS {
            return first.is_right_included && second.is_left_included;
        }
        true
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let left_bracket = if self.is_left_included { "[" } else { "(" };
        let right_bracket = if self.is_right_included { "]" } else { ")" };
        if self.is_point() {
            write!(f, "{} {:10.4} {}", left_bracket, self.left(), right_bracket)
        } else {
            write!(
                f,
                "{} {:10.4}; {:10.4} {}",
                left_bracket,
                self.left(),
                self.right(),
                right_bracket
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flags() -> Vec<(bool, bool)> {
        vec![(true, true), (true, false), (false, true), (false, false)]
    }

    #[test]
    fn test_bounds_point_and_length() {
        for x in [-3.5, 0.0, 1e-3, 42.0] {
            let bounds = Bounds::new(x, x);
            assert!(bounds.is_point());
            assert_eq!(bounds.length(), 0.0);
        }
        let reversed = Bounds::new(2.0, -1.0);
        assert_eq!(reversed.length(), -3.0);
        assert_eq!(reversed.ordered(), (-1.0, 2.0));
        assert!(!reversed.is_point());
    }

    #[test]
    fn test_invalid_intervals() {
        for (l, r) in all_flags() {
            assert!(matches!(
                Interval::new(1.0, l, 0.0, r),
                Err(QuadratureError::InvalidInterval(_))
            ));
            let point = Interval::new(2.0, l, 2.0, r);
            if l && r {
                assert!(point.is_ok());
            } else {
                assert!(matches!(point, Err(QuadratureError::InvalidInterval(_))));
            }
        }
        // noise below tolerance is absorbed
        assert!(Interval::closed(1.0 + 1e-15, 1.0).is_ok());
        assert!(Interval::closed(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_overlapping_and_disjoint() {
        let a = Interval::closed(0.0, 2.0).unwrap();
        let b = Interval::new(1.0, false, 3.0, false).unwrap();
        let c = Interval::closed(5.0, 6.0).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_touching_ends() {
        let closed = Interval::closed(0.0, 1.0).unwrap();
        let closed_next = Interval::closed(1.0, 2.0).unwrap();
        let open_next = Interval::new(1.0, false, 2.0, true).unwrap();
        assert!(closed.intersects(&closed_next));
        assert!(!closed.intersects(&open_next));
        assert!(!open_next.intersects(&closed));
        // shared end within tolerance
        let noisy = Interval::closed(1.0 + 1e-15, 2.0).unwrap();
        assert!(closed.intersects(&noisy));
    }

    #[test]
    fn test_equal_left_ends() {
        let point = Interval::point(0.0).unwrap();
        let open = Interval::new(0.0, false, 1.0, true).unwrap();
        let closed = Interval::closed(0.0, 1.0).unwrap();
        assert!(!point.intersects(&open));
        assert!(!open.intersects(&point));
        assert!(point.intersects(&closed));
        assert!(open.intersects(&closed));
        assert!(point.intersects(&point));
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let ends = [-1.0, 0.0, 0.5, 1.0, 2.0];
        let mut intervals = Vec::new();
        for &l in &ends {
            for &r in &ends {
                for (li, ri) in all_flags() {
                    if let Ok(interval) = Interval::new(l, li, r, ri) {
                        intervals.push(interval);
                    }
                }
            }
        }
        assert!(!intervals.is_empty());
        for a in &intervals {
            for b in &intervals {
                assert_eq!(a.intersects(b), b.intersects(a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_intersects_bounds() {
        let sqrt_scope = Interval::new(-1e30, false, 0.0, false).unwrap();
        assert!(!sqrt_scope.intersects_bounds(&Bounds::new(0.0, 4.0)));
        assert!(!sqrt_scope.intersects_bounds(&Bounds::new(4.0, 0.0)));
        assert!(sqrt_scope.intersects_bounds(&Bounds::new(-1.0, 4.0)));

        let pole = Interval::neighbourhood(0.0, 1e-9).unwrap();
        assert!(pole.intersects_bounds(&Bounds::new(-1.0, 1.0)));
        assert!(pole.intersects_bounds(&Bounds::new(1.0, -1.0)));
        assert!(!pole.intersects_bounds(&Bounds::new(1.0, 2.0)));

        // limits are open, so a point scope at a limit is outside
        let point = Interval::point(1.0).unwrap();
        assert!(!point.intersects_bounds(&Bounds::new(1.0, 2.0)));
        assert!(point.intersects_bounds(&Bounds::new(0.0, 2.0)));
        assert!(!point.intersects_bounds(&Bounds::new(0.5, 0.5)));
    }

    #[test]
    fn test_display() {
        let interval = Interval::new(-1.0, false, 2.5, true).unwrap();
        assert_eq!(interval.to_string(), "(    -1.0000;     2.5000 ]");
        let point = Interval::point(0.0).unwrap();
        assert_eq!(point.to_string(), "[     0.0000 ]");
    }
}
