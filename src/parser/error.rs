//! Error handling for parsing.
use std::fmt;

use thiserror::Error;

use crate::{
    error::{CompileError, Phase, PositionalError},
    lexer::tokens::Token,
    span::{Bytes, Span},
};

/// A parsing error, indicating both the parsing stage in which the error was encountered
/// and the cause for the error.
#[derive(Debug)]
pub struct ParseError {
    stage: Stage,
    reason: Reason,
}

impl ParseError {
    pub fn new(stage: Stage, reason: Reason) -> Self {
        Self { stage, reason }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

impl PositionalError for ParseError {
    fn range(&self) -> Span {
        match &self.reason {
            Reason::UnexpectedToken(tok) => tok.source,
            Reason::UnexpectedEndOfInput(position) => Span::at(*position),
        }
    }

    fn describe(&self) -> String {
        format!("{} when parsing {}", self.reason(), self.stage())
    }
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        Self::new(Phase::Syntax, error.describe(), error.range())
    }
}

#[derive(Debug, Error)]
pub enum Reason {
    #[error("unexpected {0}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput(Bytes),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Anything following the closing brace of the program.
    ProgramEnd,
    /// A declaration: `a, b: int;`
    Declaration,
    /// The type of a declaration.
    TypeSpec,
    /// The `;` at the end of a statement or declaration.
    StatementEnd,
    /// A `{ ... }` block.
    Block,
    /// The start of a statement.
    Statement,
    /// An assignment statement.
    Assignment,
    /// The argument of `input` or `output`.
    IoArgument,
    /// The parenthesised condition of `if` or `while`.
    Condition,
    /// The `else` keyword of an if-statement.
    IfElse,
    /// The parenthesised operand of `!`.
    Negation,
    /// A relational operator.
    RelOp,
    /// The start of an expression.
    Expr,
    /// The end of a parenthesised expression.
    ParenExprEnd,
    /// The parenthesised operand of a cast.
    Cast,
}
impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::ProgramEnd => "the end of the program",
            Stage::Declaration => "a declaration",
            Stage::TypeSpec => "a type",
            Stage::StatementEnd => "the end of a statement",
            Stage::Block => "a block",
            Stage::Statement => "a statement",
            Stage::Assignment => "an assignment",
            Stage::IoArgument => "an input or output statement",
            Stage::Condition => "a condition",
            Stage::IfElse => "the else branch of an if-statement",
            Stage::Negation => "a negated condition",
            Stage::RelOp => "a relational operator",
            Stage::Expr => "an expression",
            Stage::ParenExprEnd => "the end of a parenthesised expression",
            Stage::Cast => "a cast",
        })
    }
}

pub trait AddStage {
    type Annotated;

    fn add_stage(self, stage: Stage) -> Self::Annotated;
}

impl<O> AddStage for Result<O, Reason> {
    type Annotated = Result<O, ParseError>;

    fn add_stage(self, stage: Stage) -> Self::Annotated {
        self.map_err(|reason| ParseError { stage, reason })
    }
}

pub fn failure<R>(stage: Stage, reason: Reason) -> Result<R, ParseError> {
    Err(ParseError::new(stage, reason))
}
