//! Tokens, as produced by the lexer.
use std::fmt::{self, Display};

use crate::{
    ast::Literal,
    span::{Bytes, Span},
};

#[derive(Clone, Debug)]
pub struct Token {
    pub source: Span,
    pub kind: TokenKind,
}
impl Token {
    pub fn length(&self) -> Bytes {
        self.source.length()
    }
}
impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Symbol(Symbol),
    Literal(Literal),
}

/// A reserved word of CPL.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    Else,
    Float,
    If,
    Input,
    Int,
    Output,
    While,
    StaticCastInt,
    StaticCastFloat,
}
impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "else" => Keyword::Else,
            "float" => Keyword::Float,
            "if" => Keyword::If,
            "input" => Keyword::Input,
            "int" => Keyword::Int,
            "output" => Keyword::Output,
            "while" => Keyword::While,
            "staticcastint" => Keyword::StaticCastInt,
            "staticcastfloat" => Keyword::StaticCastFloat,
            _ => return None,
        })
    }
}

/// A symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Symbol {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    Semicolon,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Or,
    And,
    Not,
}
