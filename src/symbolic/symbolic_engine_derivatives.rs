//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation and a couple
//! of string/variable utilities.
//!
//! ## Key Methods
//! - `diff(var: &str)` - analytical derivative by structural recursion
//! - `all_arguments_are_variables()` - extract variable names

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// Implements all standard differentiation rules from calculus:
    /// - Power rule: d/dx(x^n) = n*x^(n-1)
    /// - Product rule: d/dx(f*g) = f'*g + f*g'
    /// - Quotient rule: d/dx(f/g) = (f'*g - f*g')/g^2
    /// - Chain rule: d/dx(f(g(x))) = f'(g(x))*g'(x)
    ///
    /// Differentiation is total: every well-formed tree has a derivative,
    /// including the unevaluated-integral node, whose derivative with respect
    /// to its own variable is the integrand.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x"); // 2*x
    /// ```
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            // d/dx f^g: the general case needs ln(f); when g is constant the
            // classic power rule with the chain factor is enough
            Expr::Pow(base, exp) => match exp.as_ref() {
                Expr::Const(n) => Expr::Mul(
                    Box::new(Expr::Mul(
                        Box::new(Expr::Const(*n)),
                        Box::new(Expr::Pow(base.clone(), Box::new(Expr::Const(n - 1.0)))),
                    )),
                    Box::new(base.diff(var)),
                ),
                _ => {
                    // f^g = exp(g*ln(f)), so (f^g)' = f^g * (g'*ln(f) + g*f'/f)
                    let f_pow_g = Expr::Pow(base.clone(), exp.clone());
                    let term1 = Expr::Mul(
                        Box::new(exp.diff(var)),
                        Box::new(Expr::Ln(base.clone())),
                    );
                    let term2 = Expr::Div(
                        Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                        base.clone(),
                    );
                    Expr::Mul(
                        Box::new(f_pow_g),
                        Box::new(Expr::Add(Box::new(term1), Box::new(term2))),
                    )
                }
            },
            Expr::Exp(expr) => Expr::Mul(
                Box::new(Expr::Exp(expr.clone())),
                Box::new(expr.diff(var)),
            ),
            Expr::Ln(expr) => Expr::Mul(
                Box::new(Expr::Div(Box::new(Expr::Const(1.0)), expr.clone())),
                Box::new(expr.diff(var)),
            ),
            Expr::sin(expr) => Expr::Mul(
                Box::new(Expr::cos(expr.clone())),
                Box::new(expr.diff(var)),
            ),
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            // d/dx tg(f) = f' / cos(f)^2
            Expr::tg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::cos(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            // d/dx ctg(f) = -f' / sin(f)^2
            Expr::ctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::sin(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            // d/dx arcsin(f) = f' / (1 - f^2)^0.5
            Expr::arcsin(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            // d/dx arccos(f) = -f' / (1 - f^2)^0.5
            Expr::arccos(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Pow(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Const(1.0)),
                        Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                    )),
                    Box::new(Expr::Const(0.5)),
                )),
            ),
            // d/dx arctg(f) = f' / (1 + f^2)
            Expr::arctg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            // d/dx arcctg(f) = -f' / (1 + f^2)
            Expr::arcctg(expr) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(expr.diff(var)),
                )),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(expr.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
            // fundamental theorem of calculus; with respect to another
            // variable the node is kept wrapped
            Expr::IntegralOf(inner, int_var) => {
                if int_var == var {
                    inner.as_ref().clone()
                } else {
                    Expr::IntegralOf(Box::new(inner.diff(var)), int_var.clone())
                }
            }
        }
    }

    /// Extracts all variable names present in the expression (with repeats
    /// deduplicated, insertion order preserved).
    pub fn all_arguments_are_variables(&self) -> Vec<String> {
        let mut vars: Vec<String> = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => {
                if !vars.contains(name) {
                    vars.push(name.clone());
                }
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::ctg(expr)
            | Expr::arcsin(expr)
            | Expr::arccos(expr)
            | Expr::arctg(expr)
            | Expr::arcctg(expr) => expr.collect_variables(vars),
            Expr::IntegralOf(expr, _) => expr.collect_variables(vars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_diff_constant() {
        assert_eq!(Expr::Const(5.0).diff("x"), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_variable() {
        assert_eq!(x().diff("x"), Expr::Const(1.0));
        assert_eq!(x().diff("y"), Expr::Const(0.0));
    }

    #[test]
    fn test_power_rule() {
        // d/dx x^n = n*x^(n-1) after simplification
        for n in 1..=5 {
            let f = x().pow(Expr::Const(n as f64));
            let expected = if n == 1 {
                Expr::Const(1.0)
            } else if n == 2 {
                Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(x()))
            } else {
                Expr::Mul(
                    Box::new(Expr::Const(n as f64)),
                    Box::new(x().pow(Expr::Const((n - 1) as f64))),
                )
            };
            assert_eq!(f.diff("x").simplify_(), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_diff_sin_is_cos() {
        let f = Expr::sin(Box::new(x()));
        assert_eq!(f.diff("x").simplify_(), Expr::cos(Box::new(x())));
    }

    #[test]
    fn test_diff_exp() {
        let f = Expr::Exp(Box::new(x()));
        assert_eq!(f.diff("x").simplify_(), Expr::Exp(Box::new(x())));
    }

    #[test]
    fn test_product_rule_numeric() {
        // (x*sin(x))' = sin(x) + x*cos(x)
        let f = x() * Expr::sin(Box::new(x()));
        let df = f.diff("x");
        let g = df.lambdify1D_checked().unwrap();
        for &v in &[0.3_f64, 1.0, 2.5] {
            let expected = v.sin() + v * v.cos();
            approx::assert_relative_eq!(g(v), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_quotient_rule_numeric() {
        // (sin(x)/x)' = (x*cos(x) - sin(x)) / x^2
        let f = Expr::sin(Box::new(x())) / x();
        let df = f.diff("x");
        let g = df.lambdify1D_checked().unwrap();
        for &v in &[0.5_f64, 1.7, 3.0] {
            let expected = (v * v.cos() - v.sin()) / (v * v);
            approx::assert_relative_eq!(g(v), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_chain_rule_numeric() {
        // (sin(x^2))' = 2x*cos(x^2)
        let f = Expr::sin(Box::new(x().pow(Expr::Const(2.0))));
        let g = f.diff("x").lambdify1D_checked().unwrap();
        for &v in &[0.2_f64, 1.1, 2.0] {
            let expected = 2.0 * v * (v * v).cos();
            approx::assert_relative_eq!(g(v), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_diff_of_unevaluated_integral_restores_integrand() {
        let integrand = Expr::Exp(Box::new(x().pow(Expr::Const(2.0))));
        let integral = Expr::IntegralOf(Box::new(integrand.clone()), "x".to_string());
        assert_eq!(integral.diff("x"), integrand);
    }

    #[test]
    fn test_all_arguments_are_variables() {
        let expr = Expr::parse_expression("x^2 + sin(x) * y").unwrap();
        assert_eq!(
            expr.all_arguments_are_variables(),
            vec!["x".to_string(), "y".to_string()]
        );
    }
}
