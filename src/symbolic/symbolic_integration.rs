//! Rule-based indefinite integration.
//!
//! `integrate` produces one representative antiderivative (integration
//! constant omitted). The rule set covers constants, variables, linearity,
//! constant factors, powers of linear arguments (including the n = -1
//! logarithm case), c^x, exp/sin/cos/tg/ctg of linear arguments, ln(x),
//! f'/f, inverse trigonometric functions of the bare variable, and
//! x^n * e^(ax) / x^n * ln(x) by parts.
//!
//! Integration never fails: when no rule applies the result is an
//! `Expr::IntegralOf` node - an unevaluated integral that downstream numeric
//! lowering rejects with an evaluation error.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// SYMBOLIC INTEGRATION

    /// Main integration method - integrates with respect to a variable.
    /// Returns the indefinite integral (without constant of integration);
    /// subexpressions with no known closed form are wrapped in
    /// `Expr::IntegralOf` instead of producing an error.
    pub fn integrate(&self, var: &str) -> Expr {
        match self {
            // ∫ c dx = c*x
            Expr::Const(c) => Expr::Const(*c) * Expr::Var(var.to_string()),

            // ∫ x dx = x²/2, ∫ y dx = y*x (if y ≠ x)
            Expr::Var(name) => {
                if name == var {
                    Expr::Pow(
                        Box::new(Expr::Var(var.to_string())),
                        Box::new(Expr::Const(2.0)),
                    ) / Expr::Const(2.0)
                } else {
                    Expr::Var(name.clone()) * Expr::Var(var.to_string())
                }
            }

            // ∫ (f + g) dx = ∫ f dx + ∫ g dx
            Expr::Add(lhs, rhs) => lhs.integrate(var) + rhs.integrate(var),

            // ∫ (f - g) dx = ∫ f dx - ∫ g dx
            Expr::Sub(lhs, rhs) => lhs.integrate(var) - rhs.integrate(var),

            Expr::Mul(lhs, rhs) => self
                .integrate_multiplication(lhs, rhs, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::Div(lhs, rhs) => self
                .integrate_division(lhs, rhs, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::Pow(base, exp) => self
                .integrate_power(base, exp, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::Exp(expr) => self
                .integrate_exponential(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::Ln(expr) => self
                .integrate_logarithm(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::sin(expr) => self
                .integrate_sin(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::cos(expr) => self
                .integrate_cos(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::tg(expr) => self
                .integrate_tan(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::ctg(expr) => self
                .integrate_cot(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::arcsin(expr) => self
                .integrate_arcsin(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::arccos(expr) => self
                .integrate_arccos(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::arctg(expr) => self
                .integrate_arctan(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            Expr::arcctg(expr) => self
                .integrate_arccot(expr, var)
                .unwrap_or_else(|| self.unevaluated(var)),

            // no rule for iterated unevaluated integrals
            Expr::IntegralOf(_, _) => self.unevaluated(var),
        }
    }

    fn unevaluated(&self, var: &str) -> Expr {
        Expr::IntegralOf(Box::new(self.clone()), var.to_string())
    }

    /// Decomposes the expression as a*var + b with constant a ≠ 0, b.
    /// Returns None when the expression is not linear in `var`.
    fn extract_linear(expr: &Expr, var: &str) -> Option<(f64, f64)> {
        match expr {
            Expr::Var(x) if x == var => Some((1.0, 0.0)),
            Expr::Const(b) => Some((0.0, *b)),
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(a), Expr::Var(x)) if x == var => Some((*a, 0.0)),
                (Expr::Var(x), Expr::Const(a)) if x == var => Some((*a, 0.0)),
                _ => None,
            },
            Expr::Add(lhs, rhs) => {
                let (a1, b1) = Self::extract_linear(lhs, var)?;
                let (a2, b2) = Self::extract_linear(rhs, var)?;
                Some((a1 + a2, b1 + b2))
            }
            Expr::Sub(lhs, rhs) => {
                let (a1, b1) = Self::extract_linear(lhs, var)?;
                let (a2, b2) = Self::extract_linear(rhs, var)?;
                Some((a1 - a2, b1 - b2))
            }
            _ => None,
        }
    }

    /// Same as `extract_linear` but rejects the degenerate a = 0 case.
    fn linear_in(expr: &Expr, var: &str) -> Option<f64> {
        match Self::extract_linear(expr, var) {
            Some((a, _)) if a != 0.0 => Some(a),
            _ => None,
        }
    }

    /// Multiplication integration: constant factors first, then the
    /// integration-by-parts patterns.
    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Option<Expr> {
        // Check if one factor is constant
        if !lhs.contains_variable(var) {
            let rhs_int = rhs.integrate(var);
            if rhs_int.contains_unevaluated_integral() {
                return None;
            }
            return Some(lhs.clone() * rhs_int);
        }

        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var);
            if lhs_int.contains_unevaluated_integral() {
                return None;
            }
            return Some(rhs.clone() * lhs_int);
        }

        // Pattern 1: polynomial * exponential
        if let Some(result) = self.integrate_polynomial_times_exponential(lhs, rhs, var) {
            return Some(result);
        }
        if let Some(result) = self.integrate_polynomial_times_exponential(rhs, lhs, var) {
            return Some(result);
        }

        // Pattern 2: polynomial * logarithm
        if let Some(result) = self.integrate_polynomial_times_logarithm(lhs, rhs, var) {
            return Some(result);
        }
        if let Some(result) = self.integrate_polynomial_times_logarithm(rhs, lhs, var) {
            return Some(result);
        }

        None
    }

    /// Handle division in integration
    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Option<Expr> {
        // If denominator is constant: ∫ f(x)/c dx = (1/c) * ∫ f(x) dx
        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var);
            if lhs_int.contains_unevaluated_integral() {
                return None;
            }
            return Some(lhs_int / rhs.clone());
        }

        // ∫ c/(a*x + b) dx = (c/a) * ln(a*x + b)
        if !lhs.contains_variable(var) {
            if let Some(a) = Self::linear_in(rhs, var) {
                return Some(
                    lhs.clone() * Expr::Ln(Box::new(rhs.clone())) / Expr::Const(a),
                );
            }
        }

        // ∫ f'(x)/f(x) dx = ln(f(x))
        if rhs.diff(var).simplify_() == lhs.simplify_() {
            return Some(Expr::Ln(Box::new(rhs.clone())));
        }

        None
    }

    /// Handle power integration
    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Option<Expr> {
        // Case 1: ∫ (a*x + b)^n dx, which includes plain ∫ x^n dx
        if let Expr::Const(n) = exp {
            if let Some(a) = Self::linear_in(base, var) {
                if (*n - (-1.0)).abs() < f64::EPSILON {
                    // ∫ (a*x+b)^(-1) dx = ln(a*x+b)/a
                    return Some(Expr::Ln(Box::new(base.clone())) / Expr::Const(a));
                } else {
                    // ∫ (a*x+b)^n dx = (a*x+b)^(n+1)/(a*(n+1))
                    let new_exp = Expr::Const(n + 1.0);
                    return Some(
                        Expr::Pow(Box::new(base.clone()), Box::new(new_exp))
                            / Expr::Const(a * (n + 1.0)),
                    );
                }
            }
            // Base doesn't contain variable: ∫ c^n dx = c^n * x
            if !base.contains_variable(var) {
                return Some(self.clone() * Expr::Var(var.to_string()));
            }
        }

        // Case 2: ∫ c^x dx = c^x / ln(c) where c is constant
        if let (Expr::Const(c), Expr::Var(x)) = (base, exp) {
            if x == var && *c > 0.0 && (*c - 1.0).abs() > f64::EPSILON {
                return Some(
                    Expr::Pow(
                        Box::new(Expr::Const(*c)),
                        Box::new(Expr::Var(var.to_string())),
                    ) / Expr::Ln(Box::new(Expr::Const(*c))),
                );
            }
        }

        None
    }

    /// Handle exponential integration: ∫ e^(a*x + b) dx = e^(a*x + b) / a
    fn integrate_exponential(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if !expr.contains_variable(var) {
            // constant exponent: ∫ e^c dx = e^c * x
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        let a = Self::linear_in(expr, var)?;
        Some(Expr::Exp(Box::new(expr.clone())) / Expr::Const(a))
    }

    /// Handle logarithm integration using integration by parts:
    /// ∫ ln(x) dx = x*ln(x) - x
    fn integrate_logarithm(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if let Expr::Var(x) = expr {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                return Some(x_var.clone() * Expr::Ln(Box::new(x_var.clone())) - x_var);
            }
        }
        if !expr.contains_variable(var) {
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        None
    }

    /// ∫ sin(a*x + b) dx = -cos(a*x + b)/a
    fn integrate_sin(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if !expr.contains_variable(var) {
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        let a = Self::linear_in(expr, var)?;
        let cos_u = Expr::cos(Box::new(expr.clone()));
        if a == 1.0 {
            Some(-cos_u)
        } else {
            Some(-cos_u / Expr::Const(a))
        }
    }

    /// ∫ cos(a*x + b) dx = sin(a*x + b)/a
    fn integrate_cos(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if !expr.contains_variable(var) {
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        let a = Self::linear_in(expr, var)?;
        let sin_u = Expr::sin(Box::new(expr.clone()));
        if a == 1.0 {
            Some(sin_u)
        } else {
            Some(sin_u / Expr::Const(a))
        }
    }

    /// ∫ tg(a*x + b) dx = -ln(cos(a*x + b))/a
    fn integrate_tan(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if !expr.contains_variable(var) {
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        let a = Self::linear_in(expr, var)?;
        let ln_cos = Expr::cos(Box::new(expr.clone())).ln();
        if a == 1.0 {
            Some(-ln_cos)
        } else {
            Some(-ln_cos / Expr::Const(a))
        }
    }

    /// ∫ ctg(a*x + b) dx = ln(sin(a*x + b))/a
    fn integrate_cot(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if !expr.contains_variable(var) {
            return Some(self.clone() * Expr::Var(var.to_string()));
        }
        let a = Self::linear_in(expr, var)?;
        let ln_sin = Expr::sin(Box::new(expr.clone())).ln();
        if a == 1.0 {
            Some(ln_sin)
        } else {
            Some(ln_sin / Expr::Const(a))
        }
    }

    /// ∫ arcsin(x) dx = x*arcsin(x) + (1 - x²)^0.5
    fn integrate_arcsin(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if let Expr::Var(x) = expr {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                let root = (Expr::Const(1.0) - x_var.clone().pow(Expr::Const(2.0)))
                    .pow(Expr::Const(0.5));
                return Some(x_var.clone() * Expr::arcsin(Box::new(x_var)) + root);
            }
        }
        None
    }

    /// ∫ arccos(x) dx = x*arccos(x) - (1 - x²)^0.5
    fn integrate_arccos(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if let Expr::Var(x) = expr {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                let root = (Expr::Const(1.0) - x_var.clone().pow(Expr::Const(2.0)))
                    .pow(Expr::Const(0.5));
                return Some(x_var.clone() * Expr::arccos(Box::new(x_var)) - root);
            }
        }
        None
    }

    /// ∫ arctg(x) dx = x*arctg(x) - ln(1 + x²)/2
    fn integrate_arctan(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if let Expr::Var(x) = expr {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                let ln_term = (Expr::Const(1.0) + x_var.clone().pow(Expr::Const(2.0))).ln()
                    / Expr::Const(2.0);
                return Some(x_var.clone() * Expr::arctg(Box::new(x_var)) - ln_term);
            }
        }
        None
    }

    /// ∫ arcctg(x) dx = x*arcctg(x) + ln(1 + x²)/2
    fn integrate_arccot(&self, expr: &Expr, var: &str) -> Option<Expr> {
        if let Expr::Var(x) = expr {
            if x == var {
                let x_var = Expr::Var(var.to_string());
                let ln_term = (Expr::Const(1.0) + x_var.clone().pow(Expr::Const(2.0))).ln()
                    / Expr::Const(2.0);
                return Some(x_var.clone() * Expr::arcctg(Box::new(x_var)) + ln_term);
            }
        }
        None
    }

    /// Handle x^n * exp(ax) integration using recursive integration by parts
    fn integrate_polynomial_times_exponential(
        &self,
        poly: &Expr,
        exp: &Expr,
        var: &str,
    ) -> Option<Expr> {
        if let Expr::Exp(exp_inner) = exp {
            if let Some((n, a)) = Self::extract_power_and_exp_coefficient(poly, exp_inner, var) {
                return Some(Self::integrate_xn_times_exp_ax(n, a, var));
            }
        }
        None
    }

    /// Extract n from x^n and a from exp(ax)
    fn extract_power_and_exp_coefficient(
        poly: &Expr,
        exp_inner: &Expr,
        var: &str,
    ) -> Option<(i32, f64)> {
        let n = match poly {
            Expr::Var(x) if x == var => 1,
            Expr::Pow(base, exp) => {
                if let (Expr::Var(x), Expr::Const(power)) = (base.as_ref(), exp.as_ref()) {
                    if x == var && power.fract() == 0.0 && *power >= 0.0 {
                        *power as i32
                    } else {
                        return None;
                    }
                } else {
                    return None;
                }
            }
            _ => return None,
        };

        let a = match exp_inner {
            Expr::Var(x) if x == var => 1.0,
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(coeff), Expr::Var(x)) if x == var => *coeff,
                (Expr::Var(x), Expr::Const(coeff)) if x == var => *coeff,
                _ => return None,
            },
            _ => return None,
        };
        if a == 0.0 {
            return None;
        }

        Some((n, a))
    }

    /// Integrate x^n * exp(ax) using the recursive formula
    /// ∫ x^n * e^(ax) dx = (1/a) * x^n * e^(ax) - (n/a) * ∫ x^(n-1) * e^(ax) dx
    fn integrate_xn_times_exp_ax(n: i32, a: f64, var: &str) -> Expr {
        let x = Expr::Var(var.to_string());
        let exp_ax = if a == 1.0 {
            Expr::Exp(Box::new(x.clone()))
        } else {
            Expr::Exp(Box::new(Expr::Const(a) * x.clone()))
        };
        if n == 0 {
            return exp_ax / Expr::Const(a);
        }
        let leading = x.clone().pow(Expr::Const(n as f64)) * exp_ax / Expr::Const(a);
        let tail = Self::integrate_xn_times_exp_ax(n - 1, a, var);
        leading - Expr::Const(n as f64 / a) * tail
    }

    /// Handle x^n * ln(x) integration using integration by parts
    fn integrate_polynomial_times_logarithm(
        &self,
        poly: &Expr,
        ln_expr: &Expr,
        var: &str,
    ) -> Option<Expr> {
        if let Expr::Ln(ln_inner) = ln_expr {
            if let Expr::Var(x) = ln_inner.as_ref() {
                if x == var {
                    let n = match poly {
                        Expr::Var(p) if p == var => 1.0,
                        Expr::Pow(base, exp) => {
                            if let (Expr::Var(p), Expr::Const(power)) =
                                (base.as_ref(), exp.as_ref())
                            {
                                if p == var && (*power - (-1.0)).abs() > f64::EPSILON {
                                    *power
                                } else {
                                    return None;
                                }
                            } else {
                                return None;
                            }
                        }
                        _ => return None,
                    };
                    // ∫ x^n ln(x) dx = x^(n+1)*ln(x)/(n+1) - x^(n+1)/(n+1)²
                    let x_var = Expr::Var(var.to_string());
                    let xn1 = x_var.clone().pow(Expr::Const(n + 1.0));
                    return Some(
                        xn1.clone() * Expr::Ln(Box::new(x_var)) / Expr::Const(n + 1.0)
                            - xn1 / Expr::Const((n + 1.0) * (n + 1.0)),
                    );
                }
            }
        }
        None
    }
}
