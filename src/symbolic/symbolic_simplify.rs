//! # Symbolic Expression Simplification Module
//!
//! Algebraic simplification for symbolic expressions: constant folding plus
//! elementary identities, applied bottom-up in one recursive pass.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: evaluates arithmetic on numerical constants
//! 2. **Algebraic Identities**: x + 0 = x, x * 1 = x, 0 * x = 0, x / 1 = x,
//!    x^1 = x, x^0 = 1, x - x = 0
//! 3. **Coefficient Collapsing**: c1 * (c2 * f) = (c1*c2) * f, which also
//!    removes double negation introduced by differentiation rules
//!
//! The pipeline applies `simplify_` exactly once to the derivative and the
//! integral before returning them, so two runs on the same input produce
//! identical trees.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression by constant folding and elementary
    /// algebraic identities. Children are simplified first, then the rules
    /// are applied to the current node.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(c), _) if *c == 0.0 => rhs,
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,
                    _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(c)) if *c == 0.0 => lhs,
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(0.0),
                    (Expr::Const(c), _) if *c == 1.0 => rhs,
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,
                    // collapse stacked constant coefficients: a * (b * f)
                    (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => {
                        if let Expr::Const(b) = inner_l.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(a * b)), inner_r.clone()).simplify_()
                        } else if let Expr::Const(b) = inner_r.as_ref() {
                            Expr::Mul(Box::new(Expr::Const(a * b)), inner_l.clone()).simplify_()
                        } else {
                            Expr::Mul(Box::new(lhs.clone()), Box::new(rhs.clone()))
                        }
                    }
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(c), _) if *c == 0.0 && !rhs.is_zero() => Expr::Const(0.0),
                    (_, Expr::Const(c)) if *c == 1.0 => lhs,
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    (_, Expr::Const(c)) if *c == 1.0 => base,
                    (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(1.0),
                    (Expr::Const(c), _) if *c == 1.0 => Expr::Const(1.0),
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(expr) => Expr::Exp(Box::new(expr.simplify_())),
            Expr::Ln(expr) => Expr::Ln(Box::new(expr.simplify_())),
            Expr::sin(expr) => Expr::sin(Box::new(expr.simplify_())),
            Expr::cos(expr) => Expr::cos(Box::new(expr.simplify_())),
            Expr::tg(expr) => Expr::tg(Box::new(expr.simplify_())),
            Expr::ctg(expr) => Expr::ctg(Box::new(expr.simplify_())),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(expr.simplify_())),
            Expr::arccos(expr) => Expr::arccos(Box::new(expr.simplify_())),
            Expr::arctg(expr) => Expr::arctg(Box::new(expr.simplify_())),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(expr.simplify_())),
            Expr::IntegralOf(expr, var) => {
                Expr::IntegralOf(Box::new(expr.simplify_()), var.clone())
            }
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
    fn test_constant_folding() {
        let expr = Expr::Const(2.0) + Expr::Const(3.0) * Expr::Const(4.0);
        assert_eq!(expr.simplify_(), Expr::Const(14.0));
    }

    #[test]
    fn test_add_zero() {
        assert_eq!((x() + Expr::Const(0.0)).simplify_(), x());
        assert_eq!((Expr::Const(0.0) + x()).simplify_(), x());
    }

    #[test]
    fn test_mul_one_and_zero() {
        assert_eq!((x() * Expr::Const(1.0)).simplify_(), x());
        assert_eq!((x() * Expr::Const(0.0)).simplify_(), Expr::Const(0.0));
    }

    #[test]
    fn test_div_by_one() {
        assert_eq!((x() / Expr::Const(1.0)).simplify_(), x());
    }

    #[test]
    fn test_pow_identities() {
        assert_eq!(x().pow(Expr::Const(1.0)).simplify_(), x());
        assert_eq!(x().pow(Expr::Const(0.0)).simplify_(), Expr::Const(1.0));
    }

    #[test]
    fn test_sub_self_is_zero() {
        let expr = Expr::sin(Box::new(x())) - Expr::sin(Box::new(x()));
        assert_eq!(expr.simplify_(), Expr::Const(0.0));
    }

    #[test]
    fn test_double_negation_collapses() {
        let expr = -(-x());
        assert_eq!(expr.simplify_(), x());
    }

    #[test]
    fn test_coefficient_collapsing() {
        // 2 * (3 * x) -> 6 * x
        let expr = Expr::Const(2.0) * (Expr::Const(3.0) * x());
        assert_eq!(
            expr.simplify_(),
            Expr::Mul(Box::new(Expr::Const(6.0)), Box::new(x()))
        );
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let expr = Expr::parse_expression("x^2 + 0 * sin(x) + 1 * x").unwrap();
        let once = expr.simplify_();
        let twice = once.simplify_();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_derivative_of_square_simplifies_to_2x() {
        let f = x().pow(Expr::Const(2.0));
        assert_eq!(
            f.diff("x").simplify_(),
            Expr::Mul(Box::new(Expr::Const(2.0)), Box::new(x()))
        );
    }
}
