//! Sample domain construction and series evaluation.
//!
//! The chart samples all three expressions (original, derivative, integral)
//! over one shared evenly spaced grid. Points where a function is
//! mathematically undefined (division by zero, log/sqrt domain errors) are
//! recorded as NaN markers instead of aborting the whole series; the
//! renderer later draws a gap at such points.

use crate::errors::GrapherError;
use crate::symbolic::symbolic_engine::Expr;

/// Default number of sample points.
pub const DEFAULT_NUM_POINTS: usize = 400;
/// Default sampling interval start.
pub const DEFAULT_X_MIN: f64 = -10.0;
/// Default sampling interval end.
pub const DEFAULT_X_MAX: f64 = 10.0;

/// Evenly spaced grid of `num_values` points from `start` to `end` inclusive.
/// A single-point grid is just `[start]`.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 0 {
        return Vec::new();
    }
    if num_values == 1 {
        return vec![start];
    }
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);

    for i in 0..num_values {
        let value = start + (i as f64 * step);
        values.push(value);
    }

    values
}

/// The default grid shared by all three curves: 400 points over [-10, 10].
pub fn default_domain() -> Vec<f64> {
    linspace(DEFAULT_X_MIN, DEFAULT_X_MAX, DEFAULT_NUM_POINTS)
}

/// Lambdifies the expression and evaluates it at every domain point in one
/// pass. Non-finite results become NaN markers; the series always has the
/// same length as the domain.
///
/// Fails only when the expression itself has no numeric lowering (an
/// unevaluated integral) - never because of individual undefined points.
pub fn sample_series(expr: &Expr, domain: &[f64]) -> Result<Vec<f64>, GrapherError> {
    let func = expr.lambdify1D_checked()?;
    let series = domain
        .iter()
        .map(|&x| {
            let y = func(x);
            if y.is_finite() { y } else { f64::NAN }
        })
        .collect();
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_and_length() {
        let grid = linspace(-10.0, 10.0, 400);
        assert_eq!(grid.len(), 400);
        approx::assert_relative_eq!(grid[0], -10.0);
        approx::assert_relative_eq!(grid[399], 10.0, max_relative = 1e-12);
        // even spacing
        let step = grid[1] - grid[0];
        for w in grid.windows(2) {
            approx::assert_relative_eq!(w[1] - w[0], step, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_linspace_degenerate_lengths() {
        assert!(linspace(-10.0, 10.0, 0).is_empty());
        let single = linspace(-10.0, 10.0, 1);
        assert_eq!(single, vec![-10.0]);
    }

    #[test]
    fn test_default_domain_has_no_exact_zero() {
        // 399 intervals over [-10, 10] never hit x = 0 exactly
        let grid = default_domain();
        assert_eq!(grid.len(), DEFAULT_NUM_POINTS);
        assert!(grid.iter().all(|&x| x != 0.0));
    }

    #[test]
    fn test_sample_series_square() {
        let expr = Expr::parse_expression("x**2").unwrap();
        let domain = default_domain();
        let series = sample_series(&expr, &domain).unwrap();
        assert_eq!(series.len(), domain.len());
        assert!(series.iter().all(|y| y.is_finite()));
        for (x, y) in domain.iter().zip(series.iter()) {
            assert_eq!(*y, x * x);
        }
    }

    #[test]
    fn test_sample_series_one_over_x_default_grid() {
        // zero is not a grid point on the default 400-point grid, so the
        // series has no undefined markers
        let expr = Expr::parse_expression("1/x").unwrap();
        let series = sample_series(&expr, &default_domain()).unwrap();
        assert_eq!(series.iter().filter(|y| y.is_nan()).count(), 0);
    }

    #[test]
    fn test_sample_series_one_over_x_grid_containing_zero() {
        // 401 points over [-10, 10] place x = 0 exactly at index 200
        let expr = Expr::parse_expression("1/x").unwrap();
        let domain = linspace(-10.0, 10.0, 401);
        assert_eq!(domain[200], 0.0);
        let series = sample_series(&expr, &domain).unwrap();
        assert_eq!(series.iter().filter(|y| y.is_nan()).count(), 1);
        assert!(series[200].is_nan());
        assert!(series[199].is_finite() && series[201].is_finite());
    }

    #[test]
    fn test_sample_series_log_negative_half_is_nan() {
        let expr = Expr::parse_expression("log(x)").unwrap();
        let domain = linspace(-1.0, 1.0, 5); // -1, -0.5, 0, 0.5, 1
        let series = sample_series(&expr, &domain).unwrap();
        assert!(series[0].is_nan());
        assert!(series[1].is_nan());
        assert!(series[2].is_nan()); // ln(0) = -inf -> marker
        assert!(series[3].is_finite());
        assert!(series[4].is_finite());
    }

    #[test]
    fn test_sample_series_unevaluated_integral_fails() {
        let f = Expr::parse_expression("exp(x**2)").unwrap();
        let integral = f.integrate("x");
        let result = sample_series(&integral, &default_domain());
        assert!(matches!(result, Err(GrapherError::Evaluation(_))));
    }
}
