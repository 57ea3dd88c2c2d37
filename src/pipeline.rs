//! The single function pipeline of the calculator:
//! parse -> differentiate -> integrate -> sample -> plot.
//!
//! Data flows strictly left to right, every invocation owns its expression
//! trees, sample series and chart exclusively, and nothing outlives the
//! call. Parse and evaluation errors propagate to the caller; the batch
//! runner turns them into per-item outcomes instead of aborting the batch.

use crate::Utils::plots::CurvePlot;
use crate::errors::GrapherError;
use crate::numerical::sampling::{default_domain, sample_series};
use crate::symbolic::symbolic_engine::Expr;
use log::info;
use std::collections::HashMap;

/// Required key of the invocation mapping.
pub const INPUT_KEY: &str = "input_0";

pub const LABEL_ORIGINAL: &str = "Original Function f(x)";
pub const LABEL_DERIVATIVE: &str = "Derivative f'(x)";
pub const LABEL_INTEGRAL: &str = "Integral ∫f(x)dx";
pub const CHART_TITLE: &str = "Function, Derivative, and Integral";

/// Terminal artifact of one pipeline invocation: the three symbolic
/// expressions plus the chart holding their three sampled curves.
#[derive(Debug, Clone)]
pub struct CalculusGraph {
    pub expression: Expr,
    pub derivative: Expr,
    pub integral: Expr,
    pub chart: CurvePlot,
}

/// Explicit per-item result of the batch mode: no error crosses the batch
/// boundary.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: String,
    pub result: Result<CalculusGraph, GrapherError>,
}

/// Finds the single free variable of the expression. Constant expressions
/// default to "x"; more than one distinct variable is rejected.
fn free_variable(expr: &Expr) -> Result<String, GrapherError> {
    let vars = expr.all_arguments_are_variables();
    match vars.len() {
        0 => Ok("x".to_string()),
        1 => Ok(vars.into_iter().next().unwrap()),
        _ => Err(GrapherError::Parse(format!(
            "expected one free variable, found {:?}",
            vars
        ))),
    }
}

/// Main calculation function.
///
/// Takes the invocation mapping with the required `input_0` key holding the
/// expression text and runs the whole pipeline; returns the original,
/// derivative and integral expressions together with the chart of their
/// three curves sampled over 400 points of [-10, 10].
pub fn main_pipeline(inputs: &HashMap<String, String>) -> Result<CalculusGraph, GrapherError> {
    let expression_str = inputs
        .get(INPUT_KEY)
        .ok_or_else(|| GrapherError::MissingInput(INPUT_KEY.to_string()))?;
    standalone_calculation(expression_str)
}

/// Standalone version taking the expression text directly.
///
/// # Examples
/// ```rust, ignore
/// let graph = standalone_calculation("x**2").unwrap();
/// println!("Derivative: {}", graph.derivative); // 2 * x
/// ```
pub fn standalone_calculation(expression_str: &str) -> Result<CalculusGraph, GrapherError> {
    let expression = Expr::parse_expression(expression_str)?;
    let var = free_variable(&expression)?;
    info!("parsed '{}' with free variable '{}'", expression_str, var);

    let derivative = expression.diff(&var).simplify_();
    let integral = expression.integrate(&var).simplify_();
    info!("derivative: {}", derivative);
    info!("integral: {}", integral);

    let domain = default_domain();
    let y_values = sample_series(&expression, &domain)?;
    let deriv_values = sample_series(&derivative, &domain)?;
    let integral_values = sample_series(&integral, &domain)?;

    let mut chart = CurvePlot::new(CHART_TITLE);
    chart.add_curve(LABEL_ORIGINAL, domain.clone(), y_values)?;
    chart.add_curve(LABEL_DERIVATIVE, domain.clone(), deriv_values)?;
    chart.add_curve(LABEL_INTEGRAL, domain, integral_values)?;

    Ok(CalculusGraph {
        expression,
        derivative,
        integral,
        chart,
    })
}

/// Runs the pipeline over a list of expression strings, collecting an
/// explicit outcome per item; a failing input never aborts the batch.
pub fn run_batch(inputs: &[&str]) -> Vec<BatchOutcome> {
    inputs
        .iter()
        .map(|&input| BatchOutcome {
            input: input.to_string(),
            result: standalone_calculation(input),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::sampling::DEFAULT_NUM_POINTS;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_end_to_end_sin() {
        let graph = standalone_calculation("sin(x)").unwrap();
        assert_eq!(graph.derivative, Expr::cos(Box::new(x())));
        assert_eq!(
            graph.integral,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::cos(Box::new(x())))
            )
        );
        assert_eq!(graph.chart.curves.len(), 3);
        for curve in &graph.chart.curves {
            assert_eq!(curve.y.len(), DEFAULT_NUM_POINTS);
        }
        assert_eq!(graph.chart.curves[0].label, LABEL_ORIGINAL);
        assert_eq!(graph.chart.curves[1].label, LABEL_DERIVATIVE);
        assert_eq!(graph.chart.curves[2].label, LABEL_INTEGRAL);
    }

    #[test]
    fn test_main_pipeline_requires_input_key() {
        let empty = HashMap::new();
        let result = main_pipeline(&empty);
        assert_eq!(
            result.err(),
            Some(GrapherError::MissingInput("input_0".to_string()))
        );

        let mut inputs = HashMap::new();
        inputs.insert("input_0".to_string(), "x**2".to_string());
        assert!(main_pipeline(&inputs).is_ok());
    }

    #[test]
    fn test_square_series_matches_domain() {
        let graph = standalone_calculation("x**2").unwrap();
        let original = &graph.chart.curves[0];
        assert!(original.y.iter().all(|y| y.is_finite()));
        for (x, y) in original.x.iter().zip(original.y.iter()) {
            assert_eq!(*y, x * x);
        }
        assert_eq!(
            graph.derivative,
            Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(x()))
        );
        assert_eq!(
            graph.integral,
            Expr::Div(
                Box::new(x().pow(Expr::Const(3.0))),
                Box::new(Expr::Const(3.0))
            )
        );
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let first = standalone_calculation("x**3 - 3*x**2 + 2*x").unwrap();
        let second = standalone_calculation("x**3 - 3*x**2 + 2*x").unwrap();
        assert_eq!(first.derivative, second.derivative);
        assert_eq!(first.integral, second.integral);
    }

    #[test]
    fn test_malformed_input_is_parse_error() {
        let result = standalone_calculation("x +");
        assert!(matches!(result, Err(GrapherError::Parse(_))));
    }

    #[test]
    fn test_two_free_variables_rejected() {
        let result = standalone_calculation("x + y");
        assert!(matches!(result, Err(GrapherError::Parse(_))));
    }

    #[test]
    fn test_constant_expression_defaults_to_x() {
        let graph = standalone_calculation("3").unwrap();
        assert_eq!(graph.derivative, Expr::Const(0.0));
        // ∫ 3 dx = 3*x
        assert_eq!(
            graph.integral,
            Expr::Mul(Box::new(Expr::Const(3.0)), Box::new(x()))
        );
    }

    #[test]
    fn test_no_closed_form_integral_is_evaluation_error() {
        let result = standalone_calculation("exp(x**2)");
        assert!(matches!(result, Err(GrapherError::Evaluation(_))));
    }

    #[test]
    fn test_one_over_x_draws_with_gapless_default_grid() {
        // 0 is not a point of the default grid, so no undefined marker
        let graph = standalone_calculation("1/x").unwrap();
        let original = &graph.chart.curves[0];
        assert_eq!(original.y.iter().filter(|y| y.is_nan()).count(), 0);
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let outcomes = run_batch(&["x**2", "x +", "sin(x)"]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
    }
}
