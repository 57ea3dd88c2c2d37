//! LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions
//!
//! Transforms symbolic math into executable Rust closures. The closure is
//! built recursively, one closure per expression node, mirroring the tree;
//! no runtime parsing or interpretation happens at call time.

use crate::errors::GrapherError;
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

impl Expr {
    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// Fails with an evaluation error when the tree contains a node with no
    /// numeric lowering - in this pipeline that is an unevaluated integral
    /// left over from symbolic integration.
    ///
    /// # Returns
    /// Boxed closure that takes f64 input and returns f64 output; points
    /// where the function is mathematically undefined return NaN or an
    /// infinity, which the sampling layer turns into undefined markers.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D_checked().unwrap();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D_checked(
        &self,
    ) -> Result<Box<dyn Fn(f64) -> f64 + Send + Sync>, GrapherError> {
        match self {
            Expr::Var(_) => Ok(Box::new(|x| x)),
            Expr::Const(val) => {
                let val = *val;
                Ok(Box::new(move |_| val))
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_checked()?;
                let rhs_fn = rhs.lambdify1D_checked()?;
                Ok(Box::new(move |x| lhs_fn(x) + rhs_fn(x)))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_checked()?;
                let rhs_fn = rhs.lambdify1D_checked()?;
                Ok(Box::new(move |x| lhs_fn(x) - rhs_fn(x)))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_checked()?;
                let rhs_fn = rhs.lambdify1D_checked()?;
                Ok(Box::new(move |x| lhs_fn(x) * rhs_fn(x)))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D_checked()?;
                let rhs_fn = rhs.lambdify1D_checked()?;
                Ok(Box::new(move |x| lhs_fn(x) / rhs_fn(x)))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D_checked()?;
                let exp_fn = exp.lambdify1D_checked()?;
                Ok(Box::new(move |x| base_fn(x).powf(exp_fn(x))))
            }
            Expr::Exp(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).exp()))
            }
            Expr::Ln(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).ln()))
            }
            Expr::sin(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).sin()))
            }
            Expr::cos(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).cos()))
            }
            Expr::tg(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).tan()))
            }
            Expr::ctg(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| 1.0 / expr_fn(x).tan()))
            }
            Expr::arcsin(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).asin()))
            }
            Expr::arccos(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).acos()))
            }
            Expr::arctg(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| expr_fn(x).atan()))
            }
            Expr::arcctg(expr) => {
                let expr_fn = expr.lambdify1D_checked()?;
                Ok(Box::new(move |x| PI / 2.0 - expr_fn(x).atan()))
            }
            Expr::IntegralOf(expr, var) => Err(GrapherError::Evaluation(format!(
                "unevaluated integral Integral({}, {}) has no numeric lowering",
                expr, var
            ))),
        }
    }
}
