//! a module turns a String expression into a symbolic expression
//!
//! The text is first cut into tokens (numbers, identifiers, operators,
//! brackets), then consumed by a recursive descent parser with the usual
//! precedence levels:
//!
//! ```text
//!                  parse recursion diagram
//!                expression :=  term (('+'|'-') term)*
//!                term       :=  factor (('*'|'/') factor)*
//!                factor     :=  '-' factor | power
//!                power      :=  atom (('^'|'**') factor)?
//!                atom       :=  number | variable | name '(' expression ')'
//!                               | '(' expression ')'
//! ```
//!
//! Both `^` and sympy-style `**` are accepted for powers. Unknown function
//! names, unbalanced brackets and dangling operators are parse errors.

use crate::errors::GrapherError;
use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, GrapherError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                // "**" is the python/sympy power operator
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    tokens.push(Token::Caret);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            _ if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let num_str: String = chars[start..i].iter().collect();
                let value = num_str.parse::<f64>().map_err(|_| {
                    GrapherError::Parse(format!("invalid number literal '{}'", num_str))
                })?;
                tokens.push(Token::Num(value));
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(name));
            }
            _ => {
                return Err(GrapherError::Parse(format!(
                    "unexpected character '{}' at position {}",
                    c, i
                )));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_rparen(&mut self) -> Result<(), GrapherError> {
        match self.bump() {
            Some(Token::RParen) => Ok(()),
            Some(tok) => Err(GrapherError::Parse(format!(
                "expected ')', found {:?}",
                tok
            ))),
            None => Err(GrapherError::Parse(
                "expected ')', found end of input".to_string(),
            )),
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, GrapherError> {
        let mut lhs = self.parse_term()?;
        while let Some(tok) = self.peek() {
            match tok {
                Token::Plus => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    lhs = Expr::Add(lhs.boxed(), rhs.boxed());
                }
                Token::Minus => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    lhs = Expr::Sub(lhs.boxed(), rhs.boxed());
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, GrapherError> {
        let mut lhs = self.parse_factor()?;
        while let Some(tok) = self.peek() {
            match tok {
                Token::Star => {
                    self.bump();
                    let rhs = self.parse_factor()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                Token::Slash => {
                    self.bump();
                    let rhs = self.parse_factor()?;
                    lhs = Expr::Div(lhs.boxed(), rhs.boxed());
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr, GrapherError> {
        if let Some(Token::Minus) = self.peek() {
            self.bump();
            let inner = self.parse_factor()?;
            // fold the sign into numeric literals, otherwise (-1)*inner
            return Ok(match inner {
                Expr::Const(v) => Expr::Const(-v),
                other => Expr::Mul(Expr::Const(-1.0).boxed(), other.boxed()),
            });
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, GrapherError> {
        let base = self.parse_atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.bump();
            // right-associative: x^2^3 == x^(2^3); unary minus allowed in exponent
            let exponent = self.parse_factor()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, GrapherError> {
        match self.bump() {
            Some(Token::Num(value)) => Ok(Expr::Const(value)),
            Some(Token::LParen) => {
                let inner = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.bump();
                    let arg = self.parse_expression()?;
                    self.expect_rparen()?;
                    function_call(&name, arg)
                } else {
                    match name.as_str() {
                        "pi" => Ok(Expr::Const(PI)),
                        _ => Ok(Expr::Var(name)),
                    }
                }
            }
            Some(tok) => Err(GrapherError::Parse(format!(
                "unexpected token {:?}",
                tok
            ))),
            None => Err(GrapherError::Parse("unexpected end of input".to_string())),
        }
    }
}

/// map a function name to the corresponding expression node; both the
/// mathematical notation (tg, ctg, arctg) and the programming one
/// (tan, cot, atan) are accepted, log is treated as natural logarithm
fn function_call(name: &str, arg: Expr) -> Result<Expr, GrapherError> {
    let expr = match name {
        "exp" => Expr::Exp(arg.boxed()),
        "ln" | "log" => Expr::Ln(arg.boxed()),
        "sqrt" => Expr::Pow(arg.boxed(), Expr::Const(0.5).boxed()),
        "sin" => Expr::sin(arg.boxed()),
        "cos" => Expr::cos(arg.boxed()),
        "tg" | "tan" => Expr::tg(arg.boxed()),
        "ctg" | "cot" => Expr::ctg(arg.boxed()),
        "arcsin" | "asin" => Expr::arcsin(arg.boxed()),
        "arccos" | "acos" => Expr::arccos(arg.boxed()),
        "arctg" | "arctan" | "atan" => Expr::arctg(arg.boxed()),
        "arcctg" | "acot" => Expr::arcctg(arg.boxed()),
        _ => {
            return Err(GrapherError::Parse(format!(
                "unknown function name '{}'",
                name
            )));
        }
    };
    Ok(expr)
}

impl Expr {
    /// Parses a text string into a symbolic expression.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let expr = Expr::parse_expression("x^2 + sin(x)").unwrap();
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, GrapherError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GrapherError::Parse("empty expression".to_string()));
        }
        let tokens = tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.parse_expression()?;
        if let Some(tok) = parser.peek() {
            return Err(GrapherError::Parse(format!(
                "unexpected trailing token {:?}",
                tok
            )));
        }
        Ok(expr)
    }
}
