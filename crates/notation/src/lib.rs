//! Compact formula notation.
//!
//! `x^2/(a_i+b)` style input is tokenized and parsed into a
//! [`layout::Expr`] ready for layout.

pub mod tokenizer;
pub mod parser;

pub use parser::{parse, Parser};
pub use tokenizer::{tokenize, Token, TokenKind, Tokenizer};
