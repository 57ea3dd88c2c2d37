#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedCalcGraph::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + sin(x)";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the symbolic expression tree
/// 2) turns a symbolic expression into a Rust function
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedCalcGraph::symbolic::symbolic_engine::Expr;
/// let input = "x^3 - 3*x^2 + 2*x";
/// let f = Expr::parse_expression(input).unwrap();
/// let df_dx = f.diff("x").simplify_();
/// let F = f.integrate("x").simplify_();
/// println!("d/dx = {}, integral = {}", df_dx, F);
/// let func = f.lambdify1D_checked().unwrap();
/// println!("f(2) = {}", func(2.0));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
///________________________________________________________________________________________________________________________________________________
/// rule-based indefinite integration; returns an unevaluated integral node
/// when no closed form is found
pub mod symbolic_integration;
/// turn a symbolic expression into a regular Rust closure of one variable
pub mod symbolic_lambdify;
/// algebraic simplification: constant folding and elementary identities
pub mod symbolic_simplify;
