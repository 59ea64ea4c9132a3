//! Abstract Syntax Tree nodes.
use std::fmt::{self, Display};

use crate::span::Span;

use super::Scalar;

#[derive(Debug)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub body: Block,
}

/// A declaration of one or more identifiers sharing a type: `a, b: int;`
#[derive(Debug)]
pub struct Declaration {
    pub ids: Vec<Ident>,
    pub scalar: Scalar,
}
impl Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ids: Vec<_> = self.ids.iter().map(|id| id.name.as_str()).collect();
        write!(f, "{}: {};", ids.join(", "), self.scalar)
    }
}

/// An identifier, along with the place where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}
impl Ident {
    pub fn new<S: Into<String>>(name: S, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}
impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}
impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("{")?;
        for stmt in &self.statements {
            write!(f, " {}", stmt)?;
        }
        f.write_str(" }")
    }
}

#[derive(Debug)]
pub enum Statement {
    Assign(Assign),
    Input(Ident),
    Output(Expr),
    If(Box<If>),
    While(Box<While>),
    Block(Block),
}
impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Assign(assign) => write!(f, "{} = {};", assign.target, assign.value),
            Statement::Input(id) => write!(f, "input({});", id),
            Statement::Output(expr) => write!(f, "output({});", expr),
            Statement::If(if_stmt) => write!(
                f,
                "if ({}) {} else {}",
                if_stmt.condition, if_stmt.then_branch, if_stmt.else_branch
            ),
            Statement::While(while_stmt) => {
                write!(f, "while ({}) {}", while_stmt.condition, while_stmt.body)
            }
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

#[derive(Debug)]
pub struct Assign {
    pub target: Ident,
    pub value: Expr,
}

#[derive(Debug)]
pub struct If {
    pub condition: BoolExpr,
    pub then_branch: Statement,
    pub else_branch: Statement,
}

#[derive(Debug)]
pub struct While {
    pub condition: BoolExpr,
    pub body: Statement,
}

/// A condition, as used by `if` and `while`.
#[derive(Debug)]
pub enum BoolExpr {
    Or(Box<BoolExpr>, Box<BoolExpr>),
    And(Box<BoolExpr>, Box<BoolExpr>),
    Not(Box<BoolExpr>),
    Rel(Box<RelExpr>),
}
impl Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoolExpr::Or(lhs, rhs) => write!(f, "({} || {})", lhs, rhs),
            BoolExpr::And(lhs, rhs) => write!(f, "({} && {})", lhs, rhs),
            BoolExpr::Not(inner) => write!(f, "!({})", inner),
            BoolExpr::Rel(rel) => write!(f, "({} {} {})", rel.lhs, rel.op, rel.rhs),
        }
    }
}

#[derive(Debug)]
pub struct RelExpr {
    pub lhs: Expr,
    pub op: RelOp,
    pub rhs: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
}
impl Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            RelOp::Equal => "==",
            RelOp::NotEqual => "!=",
            RelOp::LessThan => "<",
            RelOp::GreaterThan => ">",
            RelOp::LessThanEqual => "<=",
            RelOp::GreaterThanEqual => ">=",
        })
    }
}

/// An arithmetic expression.
#[derive(Debug)]
pub enum Expr {
    Literal(Literal),
    Identifier(Ident),
    Binary(Box<BinExpr>),
    Cast(Box<CastExpr>),
}
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Identifier(id) => write!(f, "{}", id),
            Expr::Binary(bin) => write!(f, "({} {} {})", bin.lhs, bin.op, bin.rhs),
            Expr::Cast(cast) => match cast.target {
                Scalar::Int => write!(f, "staticcastint({})", cast.expr),
                Scalar::Float => write!(f, "staticcastfloat({})", cast.expr),
            },
        }
    }
}

#[derive(Debug)]
pub struct BinExpr {
    pub lhs: Expr,
    pub op: ArithOp,
    pub rhs: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}
impl Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ArithOp::Add => "+",
            ArithOp::Subtract => "-",
            ArithOp::Multiply => "*",
            ArithOp::Divide => "/",
        })
    }
}

/// An explicit conversion: `staticcastint(expr)` or `staticcastfloat(expr)`.
#[derive(Debug)]
pub struct CastExpr {
    pub target: Scalar,
    pub expr: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Integer(i32),
    Float(f64),
}
impl Literal {
    pub fn scalar(&self) -> Scalar {
        match self {
            Literal::Integer(_) => Scalar::Int,
            Literal::Float(_) => Scalar::Float,
        }
    }
}
impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            // Whole floats keep their decimal point so they never read as integers.
            Literal::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{:.1}", x),
            Literal::Float(x) => write!(f, "{}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Bytes;

    #[test]
    fn float_literals_always_show_a_decimal_point() {
        assert_eq!("3.0", Literal::Float(3.0).to_string());
        assert_eq!("2.5", Literal::Float(2.5).to_string());
        assert_eq!("0.125", Literal::Float(0.125).to_string());
    }

    #[test]
    fn declaration_lists_all_identifiers() {
        let decl = Declaration {
            ids: vec![Ident::new("a", Span::at(Bytes::new(0))), Ident::new("b", Span::at(Bytes::new(3)))],
            scalar: Scalar::Float,
        };

        assert_eq!("a, b: float;", decl.to_string());
    }
}
