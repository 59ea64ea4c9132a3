//! Lexing functions for constructing a token stream.
use log::trace;

use crate::{ast::Literal, span::*};

use super::{char_ext::*, char_lexer::*, error::*, tokens::*};

type LexResult<T> = Option<Result<T, LexError>>;

struct Lexer<'s> {
    lexer: CharLexer<'s>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

/// Splits CPL source text into tokens. Lexing continues past errors, so that all of them
/// can be reported at once.
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    Lexer::new(source).run()
}

impl<'s> Lexer<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            lexer: CharLexer::new(source),
            tokens: vec![],
            errors: vec![],
        }
    }

    /// Finishes the lexer and consumes it, producing a [`Vec<Token>`]
    /// containing the tokens it read.
    fn run(mut self) -> Result<Vec<Token>, Vec<LexError>> {
        loop {
            self.lexer.consume_while(|ch| ch.is_whitespace());
            if self.lexer.is_finished() {
                break;
            }
            if !self.try_consume_comment() {
                self.consume_token();
            }
        }

        trace!(
            "Lexed {} tokens with {} errors",
            self.tokens.len(),
            self.errors.len()
        );

        if !self.errors.is_empty() {
            Err(self.errors)
        } else {
            Ok(self.tokens)
        }
    }

    /// Consumes a `/* ... */` comment if one starts here. Comments may span multiple lines.
    /// Returns `true` if a comment was found, even if it was not terminated.
    fn try_consume_comment(&mut self) -> bool {
        if !self.lexer.starts_with("/*") {
            return false;
        }
        let opening = self.make_error(2, ErrorType::UnterminatedComment);
        self.lexer.consume(Bytes::new(2));

        loop {
            if self.lexer.starts_with("*/") {
                self.lexer.consume(Bytes::new(2));
                return true;
            }
            if self.lexer.try_next().is_none() {
                self.errors.push(opening);
                return true;
            }
        }
    }

    /// Consumes a single token, or records an error if no valid token starts here.
    fn consume_token(&mut self) {
        let next_token = self
            .word()
            .or_else(|| self.symbol())
            .map(Ok)
            .or_else(|| self.number())
            .unwrap_or_else(|| Err(self.unknown_token()));

        match next_token {
            Ok(token) => {
                self.lexer.consume(token.length());
                self.tokens.push(token);
            }
            Err(error) => {
                self.lexer.consume(error.length());
                self.errors.push(error);
            }
        }
    }

    /// Checks the next token without consuming it. If it's a keyword or an identifier,
    /// returns the token, wrapped in an [`Option`]. If it's something else,
    /// returns [`None`].
    fn word(&self) -> Option<Token> {
        let mut lexer = self.lexer.clone();

        lexer.peek().filter(CharExt::is_identifier_start)?;
        let word = lexer.consume_while(CharExt::is_identifier_continue);

        let kind = match Keyword::from_word(&word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word.clone()),
        };
        Some(self.make_sized_token(word.len(), kind))
    }

    /// Checks the next token without consuming it. If it's a symbol,
    /// returns the token, wrapped in an [`Option`]. If it's something else,
    /// returns [`None`].
    fn symbol(&self) -> Option<Token> {
        let mut iter = self.lexer.clone();

        let first = iter.try_next()?;
        let second = iter.try_next();

        // Try matching two-char symbols first
        match (first, second) {
            ('=', Some('=')) => Some(Symbol::Eq),
            ('!', Some('=')) => Some(Symbol::Neq),
            ('<', Some('=')) => Some(Symbol::Lte),
            ('>', Some('=')) => Some(Symbol::Gte),
            ('|', Some('|')) => Some(Symbol::Or),
            ('&', Some('&')) => Some(Symbol::And),
            _ => None,
        }
        .map(|s| self.make_sized_token(2, TokenKind::Symbol(s)))
        .or_else(|| {
            let one_char = match first {
                '(' => Symbol::OpenParen,
                ')' => Symbol::CloseParen,
                '{' => Symbol::OpenBrace,
                '}' => Symbol::CloseBrace,
                ',' => Symbol::Comma,
                ':' => Symbol::Colon,
                ';' => Symbol::Semicolon,
                '=' => Symbol::Assign,
                '<' => Symbol::Lt,
                '>' => Symbol::Gt,
                '+' => Symbol::Plus,
                '-' => Symbol::Minus,
                '*' => Symbol::Asterisk,
                '/' => Symbol::Slash,
                '!' => Symbol::Not,
                _ => return None,
            };
            Some(self.make_sized_token(1, TokenKind::Symbol(one_char)))
        })
    }

    /// Checks the next token without consuming it.
    /// If it is not a numeric literal, returns [`None`],
    /// If it is an invalid literal, returns an error, wrapped in [`Some(Err())`]
    /// If it is a valid literal, returns it, wrapped in [`Some(Ok())`]
    fn number(&self) -> LexResult<Token> {
        let mut lexer = self.lexer.clone();

        lexer.peek().filter(char::is_ascii_digit)?;
        let mut text = lexer.consume_while(char::is_ascii_digit);

        // A float needs at least one digit after the point.
        let mut after_point = lexer.clone();
        let is_float = after_point.try_next() == Some('.')
            && after_point.peek().is_some_and(|ch| ch.is_ascii_digit());
        if is_float {
            lexer.try_next();
            text.push('.');
            text.push_str(&lexer.consume_while(char::is_ascii_digit));
        }

        let length = text.len();
        let literal = if is_float {
            text.parse::<f64>()
                .map_err(|err| err.to_string())
                .and_then(|value| {
                    // Out-of-range literals parse to infinity rather than failing.
                    if value.is_finite() {
                        Ok(Literal::Float(value))
                    } else {
                        Err("number too large".to_string())
                    }
                })
                .map_err(|reason| self.make_error(length, ErrorType::FloatLiteral(reason)))
        } else {
            text.parse()
                .map(Literal::Integer)
                .map_err(|err: std::num::ParseIntError| {
                    self.make_error(length, ErrorType::IntegerLiteral(err.to_string()))
                })
        };

        Some(literal.map(|lit| self.make_sized_token(length, TokenKind::Literal(lit))))
    }

    fn unknown_token(&self) -> LexError {
        let length = self.lexer.clone().peek().map_or(1, char::len_utf8);
        self.make_error(length, ErrorType::UnknownToken)
    }

    fn make_error(&self, length: usize, error_type: ErrorType) -> LexError {
        let position = self.lexer.byte_position();

        LexError {
            span: Span::new(position, position + length),
            error_type,
        }
    }

    /// Constructs a token of size `length` and [`TokenKind`] `kind`,
    /// starting at the lexer's current position.
    fn make_sized_token(&self, length: usize, kind: TokenKind) -> Token {
        let position = self.lexer.byte_position();

        Token {
            source: Span::new(position, position + length),
            kind,
        }
    }
}
