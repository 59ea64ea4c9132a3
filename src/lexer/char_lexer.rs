use std::{iter::Peekable, str::Chars};

use crate::span::Bytes;

/// Abstraction over a peekable char iterator with position information.
///
/// Since it only holds an iterator and a position, this type is very
/// lightweight, making it easy to clone in order to handle branching
/// and `LL(k)` lookahead.
#[derive(Clone)]
pub struct CharLexer<'a> {
    chars: Peekable<Chars<'a>>,
    byte_position: Bytes,
}

impl<'a> CharLexer<'a> {
    /// Constructs a new [`CharLexer`] for the given source string,
    /// starting at position `0`.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            byte_position: Bytes::new(0),
        }
    }

    /// Tries to advance the lexer by one character.
    /// Returns the character wrapped in an [`Option`] if it was successful,
    /// or [`None`] if the lexer cannot advance any further.
    pub fn try_next(&mut self) -> Option<char> {
        let next = self.chars.next();
        if let Some(ch) = next {
            self.byte_position += ch.len_utf8();
        }
        next
    }

    /// Returns the next character without consuming it.
    /// Returns [`None`] if the lexer cannot advance any further.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Retrieves the byte position of the lexer.
    pub fn byte_position(&self) -> Bytes {
        self.byte_position
    }

    /// Checks whether the remaining input starts with `prefix`, without consuming anything.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut chars = self.chars.clone();
        prefix.chars().all(|expected| chars.next() == Some(expected))
    }

    /// Consumes `count` bytes worth of characters, stopping early at the end of input.
    pub fn consume(&mut self, count: Bytes) {
        let target = self.byte_position + count;
        while self.byte_position < target && self.try_next().is_some() {}
    }

    /// Consumes characters while `P(char)` evaluates to `true`.
    /// Returns a [`String`] containing the consumed characters.
    pub fn consume_while<P>(&mut self, mut predicate: P) -> String
    where
        P: FnMut(&char) -> bool,
    {
        let mut matches = String::new();
        while let Some(ch) = self.chars.peek() {
            if predicate(ch) {
                matches.push(*ch);
                self.try_next();
            } else {
                break;
            }
        }
        matches
    }

    /// Checks if the lexer is finished.
    pub fn is_finished(&mut self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_counts_bytes_not_chars() {
        let mut lexer = CharLexer::new("é;");
        lexer.consume(Bytes::new(2));

        assert_eq!(Some(';'), lexer.peek());
        assert_eq!(Bytes::new(2), lexer.byte_position());
    }

    #[test]
    fn starts_with_does_not_advance() {
        let lexer = CharLexer::new("/* x */");

        assert!(lexer.starts_with("/*"));
        assert!(!lexer.starts_with("*/"));
        assert_eq!(Bytes::new(0), lexer.byte_position());
    }
}
