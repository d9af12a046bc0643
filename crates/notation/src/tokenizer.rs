//! Tokenizer for the compact formula notation.

use std::collections::VecDeque;

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Any character without special meaning, spaces included.
    Char(char),
    Caret,
    Underscore,
    Slash,
    LParen,
    RParen,
    LBrace,
    RBrace,
}

impl TokenKind {
    /// How the token appears in source, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Char(c) => format!("character {c:?}"),
            TokenKind::Caret => "'^'".to_string(),
            TokenKind::Underscore => "'_'".to_string(),
            TokenKind::Slash => "'/'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Splits notation into tokens. Tabs and line breaks are dropped.
pub struct Tokenizer<'a> {
    input: std::iter::Enumerate<std::str::Chars<'a>>,
    peeked: VecDeque<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().enumerate(),
            peeked: VecDeque::new(),
        }
    }

    /// Get next token.
    pub fn next_token(&mut self) -> Option<Token> {
        if let Some(token) = self.peeked.pop_front() {
            return Some(token);
        }
        self.scan_token()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Option<Token> {
        if self.peeked.is_empty() {
            let token = self.scan_token()?;
            self.peeked.push_back(token);
        }
        self.peeked.front().copied()
    }

    fn scan_token(&mut self) -> Option<Token> {
        for (offset, c) in self.input.by_ref() {
            let kind = match c {
                '\t' | '\n' | '\r' => continue,
                '^' => TokenKind::Caret,
                '_' => TokenKind::Underscore,
                '/' => TokenKind::Slash,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                c => TokenKind::Char(c),
            };
            return Some(Token { kind, offset });
        }
        None
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenize a whole string.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
