use thiserror::Error;

use crate::{
    error::{CompileError, Phase, PositionalError},
    span::Span,
};

/// An error found while resolving identifiers against their declarations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct SemanticError {
    kind: SemanticErrorKind,
    span: Span,
}
impl SemanticError {
    pub fn new(kind: SemanticErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
    pub fn kind(&self) -> &SemanticErrorKind {
        &self.kind
    }
}
impl PositionalError for SemanticError {
    fn range(&self) -> Span {
        self.span
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}
impl From<SemanticError> for CompileError {
    fn from(error: SemanticError) -> Self {
        Self::new(Phase::Semantic, error.to_string(), error.span)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticErrorKind {
    #[error("undeclared identifier '{0}'")]
    UndeclaredIdentifier(String),
    #[error("'{0}' is already declared")]
    DuplicateDeclaration(String),
}

pub trait AddSpan {
    type Annotated;

    fn add_span(self, span: Span) -> Self::Annotated;
}

impl<O> AddSpan for Result<O, SemanticErrorKind> {
    type Annotated = Result<O, SemanticError>;

    fn add_span(self, span: Span) -> Self::Annotated {
        self.map_err(|kind| SemanticError::new(kind, span))
    }
}
