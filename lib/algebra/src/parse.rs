//! Tokenizer and recursive-descent parser for gain-expression labels.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-'* power
//! power  := atom ('^' '-'? integer)?
//! atom   := number | identifier | '(' expr ')'
//! ```
//!
//! Numbers are exact: decimal literals like `0.5` become the rational
//! `1/2`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use sigflow_core::AlgebraError;

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(BigRational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(r) => format!("number '{r}'"),
            Token::Ident(s) => format!("identifier '{s}'"),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Caret => "'^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, AlgebraError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut integer = String::new();
                let mut fraction = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        integer.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if chars.peek() == Some(&'.') {
                    chars.next();
                    while let Some(&d) = chars.peek() {
                        if d.is_ascii_digit() {
                            fraction.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
                if integer.is_empty() && fraction.is_empty() {
                    return Err(AlgebraError::Parse("bare '.' is not a number".to_string()));
                }
                let digits = format!("{integer}{fraction}");
                let numer = BigInt::parse_bytes(digits.as_bytes(), 10)
                    .ok_or_else(|| AlgebraError::Parse(format!("invalid number '{digits}'")))?;
                let denom = num_traits::pow(BigInt::from(10), fraction.len());
                tokens.push(Token::Number(BigRational::new(numer, denom)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => {
                return Err(AlgebraError::Parse(format!(
                    "unexpected character '{other}'"
                )));
            }
        }
    }

    Ok(tokens)
}

pub fn parse(text: &str) -> Result<Expr, AlgebraError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(AlgebraError::Parse("empty expression".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(AlgebraError::Parse(format!(
            "unexpected {} after expression",
            tok.describe()
        ))),
    }
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

    fn expr(&mut self) -> Result<Expr, AlgebraError> {
        let mut terms = vec![self.term()?];
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.bump();
                    terms.push(self.term()?);
                }
                Some(Token::Minus) => {
                    self.bump();
                    let term = self.term()?;
                    terms.push(Expr::Mul(vec![Expr::int(-1), term]));
                }
                _ => break,
            }
        }
        if terms.len() == 1 {
            Ok(terms.pop().expect("one term"))
        } else {
            Ok(Expr::Add(terms))
        }
    }

    fn term(&mut self) -> Result<Expr, AlgebraError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.bump();
                    let rhs = self.unary()?;
                    acc = Expr::Mul(vec![acc, rhs]);
                }
                Some(Token::Slash) => {
                    self.bump();
                    let rhs = self.unary()?;
                    acc = Expr::Quot(Box::new(acc), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<Expr, AlgebraError> {
        if self.peek() == Some(&Token::Minus) {
            self.bump();
            let inner = self.unary()?;
            Ok(Expr::Mul(vec![Expr::int(-1), inner]))
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<Expr, AlgebraError> {
        let base = self.atom()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.bump();
        let negative = if self.peek() == Some(&Token::Minus) {
            self.bump();
            true
        } else {
            false
        };
        match self.bump() {
            Some(Token::Number(r)) if r.is_integer() => {
                let exp = r
                    .to_integer()
                    .to_i32()
                    .ok_or_else(|| AlgebraError::Parse("exponent out of range".to_string()))?;
                Ok(Expr::Pow(
                    Box::new(base),
                    if negative { -exp } else { exp },
                ))
            }
            Some(tok) => Err(AlgebraError::Parse(format!(
                "expected integer exponent, found {}",
                tok.describe()
            ))),
            None => Err(AlgebraError::Parse(
                "expected integer exponent, found end of input".to_string(),
            )),
        }
    }

    fn atom(&mut self) -> Result<Expr, AlgebraError> {
        match self.bump() {
            Some(Token::Number(r)) => Ok(Expr::Num(r)),
            Some(Token::Ident(name)) => Ok(Expr::Sym(name)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(tok) => Err(AlgebraError::Parse(format!(
                        "expected ')', found {}",
                        tok.describe()
                    ))),
                    None => Err(AlgebraError::Parse(
                        "expected ')', found end of input".to_string(),
                    )),
                }
            }
            Some(tok) => Err(AlgebraError::Parse(format!(
                "unexpected {}",
                tok.describe()
            ))),
            None => Err(AlgebraError::Parse("unexpected end of input".to_string())),
        }
    }
}
