use std::{iter::Peekable, slice::Iter};

use super::error::*;
use crate::{
    ast::Ident,
    lexer::tokens::*,
    span::Bytes,
};

/// A cursor over a token stream, with single-token lookahead.
#[derive(Clone)]
pub struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
    end_of_input: Bytes,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end_of_input = tokens
            .last()
            .map_or(Bytes::new(0), |token| token.source.end());
        Self {
            tokens: tokens.iter().peekable(),
            end_of_input,
        }
    }

    pub fn next(&mut self) -> Result<&'a Token, Reason> {
        self.tokens
            .next()
            .ok_or(Reason::UnexpectedEndOfInput(self.end_of_input))
    }

    pub fn peek(&mut self) -> Option<&'a Token> {
        self.tokens.peek().copied()
    }

    /// Like [`Self::peek`], but running out of tokens is an error.
    pub fn peek_required(&mut self) -> Result<&'a Token, Reason> {
        self.peek()
            .ok_or(Reason::UnexpectedEndOfInput(self.end_of_input))
    }

    /// Returns `true` if the next token is the given symbol. Does not advance the parser.
    pub fn next_is_symbol(&mut self, symbol: Symbol) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Symbol(s), .. }) if *s == symbol)
    }

    /// Consumes the next token if it is the given symbol. Returns whether it was consumed.
    pub fn recognise_symbol(&mut self, symbol: Symbol) -> bool {
        let found = self.next_is_symbol(symbol);
        if found {
            self.tokens.next();
        }
        found
    }

    pub fn expect_symbol(&mut self, symbol: Symbol) -> Result<&'a Token, Reason> {
        let next = self.next()?;

        if next.kind == TokenKind::Symbol(symbol) {
            Ok(next)
        } else {
            Err(Reason::UnexpectedToken(next.clone()))
        }
    }

    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<&'a Token, Reason> {
        let next = self.next()?;

        if next.kind == TokenKind::Keyword(keyword) {
            Ok(next)
        } else {
            Err(Reason::UnexpectedToken(next.clone()))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Ident, Reason> {
        let next = self.next()?;

        match &next.kind {
            TokenKind::Identifier(name) => Ok(Ident::new(name.as_str(), next.source)),
            _ => Err(Reason::UnexpectedToken(next.clone())),
        }
    }
}
