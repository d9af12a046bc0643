//! Recursive-descent parser for the compact notation.
//!
//! ```text
//! expression := expression '/' concat | concat
//! concat     := concat term | term
//! term       := factor [ '^' factor ] [ '_' factor ]   (either order)
//! factor     := '(' expression ')' | '{' expression '}' | CHAR
//! ```
//!
//! Division is left-associative. A run of juxtaposed terms is joined as a
//! balanced tree, which lays out the same as any other grouping. Parentheses
//! are drawn; braces only group. Input nesting deeper than
//! [`layout::MAX_DEPTH`] is rejected.

use crate::tokenizer::{Token, TokenKind, Tokenizer};
use common::error::{FormulaError, FormulaResult};
use layout::{Expr, MAX_DEPTH};
use tracing::debug;

/// An expression with an upper bound on its tree depth.
struct Parsed {
    expr: Expr,
    depth: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Self { expr, depth: 1 }
    }
}

/// Parser over a single input string.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    /// Offset one past the last character, reported for errors at end of input.
    end: usize,
    /// Open delimiters enclosing the current position.
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: Tokenizer::new(input),
            end: input.chars().count(),
            nesting: 0,
        }
    }

    /// Parse the whole input as one expression.
    pub fn parse(mut self) -> FormulaResult<Expr> {
        if self.tokens.peek().is_none() {
            return Err(FormulaError::parse(0, "empty expression"));
        }

        let parsed = self.expression()?;
        match self.tokens.next_token() {
            None => Ok(parsed.expr),
            Some(Token {
                kind: TokenKind::RParen | TokenKind::RBrace,
                offset,
            }) => Err(FormulaError::parse(offset, "unbalanced closing delimiter")),
            Some(token) => Err(unexpected(token)),
        }
    }

    fn expression(&mut self) -> FormulaResult<Parsed> {
        let mut parsed = self.concat()?;
        while let Some(slash) = self.next_if(TokenKind::Slash) {
            let denominator = self.concat()?;
            let depth = 1 + parsed.depth.max(denominator.depth);
            check_depth(depth, slash.offset)?;
            parsed = Parsed {
                expr: Expr::fraction(parsed.expr, denominator.expr),
                depth,
            };
        }
        Ok(parsed)
    }

    fn concat(&mut self) -> FormulaResult<Parsed> {
        let start = self.tokens.peek().map_or(self.end, |t| t.offset);
        let mut terms = vec![self.term()?];
        while self.starts_factor() {
            terms.push(self.term()?);
        }

        // A balanced join adds ceil(log2(n)) levels above the deepest term.
        let joins = terms.len().next_power_of_two().trailing_zeros() as usize;
        let depth = joins + terms.iter().map(|t| t.depth).max().unwrap_or(0);
        check_depth(depth, start)?;

        let exprs = terms.into_iter().map(|t| t.expr).collect();
        let expr = Expr::concat_all(exprs)
            .ok_or_else(|| FormulaError::internal("juxtaposition with no terms"))?;
        Ok(Parsed { expr, depth })
    }

    fn term(&mut self) -> FormulaResult<Parsed> {
        let base = self.factor()?;
        let mut superscript: Option<Parsed> = None;
        let mut subscript: Option<Parsed> = None;
        let mut last_offset = 0;

        while let Some(token) = self.tokens.peek() {
            let slot = match token.kind {
                TokenKind::Caret => &mut superscript,
                TokenKind::Underscore => &mut subscript,
                _ => break,
            };
            if slot.is_some() {
                let which = if token.kind == TokenKind::Caret {
                    "superscript"
                } else {
                    "subscript"
                };
                return Err(FormulaError::parse(
                    token.offset,
                    format!("duplicate {which}; group with braces to nest scripts"),
                ));
            }
            self.tokens.next_token();
            last_offset = token.offset;
            *slot = Some(self.factor()?);
        }

        if superscript.is_none() && subscript.is_none() {
            return Ok(base);
        }

        let depth = 1 + [Some(&base), superscript.as_ref(), subscript.as_ref()]
            .into_iter()
            .flatten()
            .map(|p| p.depth)
            .max()
            .unwrap_or(0);
        check_depth(depth, last_offset)?;
        Ok(Parsed {
            expr: Expr::scripts(
                base.expr,
                superscript.map(|p| p.expr),
                subscript.map(|p| p.expr),
            ),
            depth,
        })
    }

    fn factor(&mut self) -> FormulaResult<Parsed> {
        let token = self.tokens.next_token().ok_or_else(|| {
            FormulaError::parse(self.end, "unexpected end of input, expected a term")
        })?;

        match token.kind {
            TokenKind::Char(c) => Ok(Parsed::leaf(Expr::character(c))),
            TokenKind::LParen => {
                let inner = self.group(token, TokenKind::RParen)?;
                let depth = inner.depth + 1;
                check_depth(depth, token.offset)?;
                Ok(Parsed {
                    expr: Expr::parenthesized(inner.expr),
                    depth,
                })
            }
            TokenKind::LBrace => self.group(token, TokenKind::RBrace),
            _ => Err(unexpected(token)),
        }
    }

    /// Parse the inside of a delimited group and consume its closer.
    fn group(&mut self, open: Token, close: TokenKind) -> FormulaResult<Parsed> {
        if self.nesting >= MAX_DEPTH {
            return Err(FormulaError::parse(
                open.offset,
                format!("delimiters nested more than {MAX_DEPTH} deep"),
            ));
        }
        if let Some(next) = self.tokens.peek() {
            if next.kind == close {
                return Err(FormulaError::parse(next.offset, "empty group"));
            }
        }

        self.nesting += 1;
        let inner = self.expression();
        self.nesting -= 1;
        let inner = inner?;

        match self.tokens.next_token() {
            Some(token) if token.kind == close => Ok(inner),
            Some(token) => Err(FormulaError::parse(
                token.offset,
                format!(
                    "expected {} to close {} at offset {}, found {}",
                    close.describe(),
                    open.kind.describe(),
                    open.offset,
                    token.kind.describe()
                ),
            )),
            None => Err(FormulaError::parse(
                self.end,
                format!(
                    "unbalanced {} at offset {}",
                    open.kind.describe(),
                    open.offset
                ),
            )),
        }
    }

    fn next_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.tokens.peek()?.kind == kind {
            self.tokens.next_token()
        } else {
            None
        }
    }

    fn starts_factor(&mut self) -> bool {
        matches!(
            self.tokens.peek().map(|t| t.kind),
            Some(TokenKind::Char(_) | TokenKind::LParen | TokenKind::LBrace)
        )
    }
}

fn check_depth(depth: usize, offset: usize) -> FormulaResult<()> {
    if depth > MAX_DEPTH {
        return Err(FormulaError::parse(
            offset,
            format!("expression nests deeper than {MAX_DEPTH} levels"),
        ));
    }
    Ok(())
}

fn unexpected(token: Token) -> FormulaError {
    FormulaError::parse(token.offset, format!("unexpected {}", token.kind.describe()))
}

/// Parse notation into an expression tree.
pub fn parse(input: &str) -> FormulaResult<Expr> {
    match Parser::new(input).parse() {
        Ok(expr) => {
            debug!(
                nodes = expr.node_count(),
                depth = expr.depth(),
                "parsed {} characters",
                input.chars().count()
            );
            Ok(expr)
        }
        Err(e) => {
            debug!("failed to parse: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::NodeKind;

    fn ch(c: char) -> Expr {
        Expr::character(c)
    }

    fn error_at(input: &str) -> usize {
        parse(input).unwrap_err().position().unwrap()
    }

    #[test]
    fn test_single_character() {
        assert_eq!(parse("A").unwrap(), ch('A'));
    }

    #[test]
    fn test_concatenation_grouping() {
        let expr = parse("abc").unwrap();
        assert_eq!(expr, Expr::concat(Expr::concat(ch('a'), ch('b')), ch('c')));
        assert_eq!(expr.value(), "abc");

        let expr = parse("abcd").unwrap();
        assert_eq!(
            expr,
            Expr::concat(Expr::concat(ch('a'), ch('b')), Expr::concat(ch('c'), ch('d')))
        );
    }

    #[test]
    fn test_long_run_stays_shallow() {
        let expr = parse(&"x".repeat(50_000)).unwrap();
        assert_eq!(expr.node_count(), 2 * 50_000 - 1);
        assert_eq!(expr.depth(), 17);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let ok = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse(&ok).unwrap().depth(), 101);

        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(matches!(parse(&deep), Err(FormulaError::Parse { .. })));

        let braces = format!("{}x{}", "{".repeat(10_000), "}".repeat(10_000));
        assert_eq!(error_at(&braces), MAX_DEPTH);

        let chain = vec!["x"; 2 * MAX_DEPTH].join("/");
        assert!(matches!(parse(&chain), Err(FormulaError::Parse { .. })));
    }

    #[test]
    fn test_division_is_left_associative() {
        let expr = parse("a/b/c").unwrap();
        assert_eq!(expr, Expr::fraction(Expr::fraction(ch('a'), ch('b')), ch('c')));
    }

    #[test]
    fn test_division_binds_looser_than_juxtaposition() {
        let expr = parse("ab/c").unwrap();
        assert_eq!(
            expr,
            Expr::fraction(Expr::concat(ch('a'), ch('b')), ch('c'))
        );
    }

    #[test]
    fn test_scripts_are_commutative() {
        let a = parse("A^B_C").unwrap();
        let b = parse("A_C^B").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Expr::scripts(ch('A'), Some(ch('B')), Some(ch('C'))));
    }

    #[test]
    fn test_single_scripts() {
        assert_eq!(parse("x^2").unwrap(), Expr::superscript(ch('x'), ch('2')));
        assert_eq!(parse("x_i").unwrap(), Expr::subscript(ch('x'), ch('i')));
    }

    #[test]
    fn test_scripts_bind_to_one_factor() {
        let expr = parse("ab^c").unwrap();
        assert_eq!(
            expr,
            Expr::concat(ch('a'), Expr::superscript(ch('b'), ch('c')))
        );
    }

    #[test]
    fn test_parentheses_are_drawn() {
        let expr = parse("(a/b)").unwrap();
        assert!(matches!(expr.kind(), NodeKind::Parenthesized(_)));
        assert_eq!(expr.count_divisions(), 1);
    }

    #[test]
    fn test_braces_only_group() {
        assert_eq!(parse("{a}").unwrap(), ch('a'));
        assert_eq!(
            parse("x^{ab}").unwrap(),
            Expr::superscript(ch('x'), Expr::concat(ch('a'), ch('b')))
        );
        assert_eq!(
            parse("{a/b}c").unwrap(),
            Expr::concat(Expr::fraction(ch('a'), ch('b')), ch('c'))
        );
    }

    #[test]
    fn test_nested_scripts_through_braces() {
        let expr = parse("x^{y^z}").unwrap();
        assert_eq!(
            expr,
            Expr::superscript(ch('x'), Expr::superscript(ch('y'), ch('z')))
        );
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(parse("a\tb\n").unwrap(), parse("ab").unwrap());
        assert_eq!(parse("a b").unwrap().value(), "a b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(error_at(""), 0);
        assert_eq!(error_at("\t\n"), 0);
    }

    #[test]
    fn test_duplicate_script() {
        assert_eq!(error_at("A^B^C"), 3);
        assert_eq!(error_at("A_B^C_D"), 5);
    }

    #[test]
    fn test_unbalanced_delimiters() {
        assert_eq!(error_at("(a"), 2);
        assert_eq!(error_at("a)"), 1);
        assert_eq!(error_at("{a)"), 2);
        assert_eq!(error_at("()"), 1);
    }

    #[test]
    fn test_unexpected_tokens() {
        assert_eq!(error_at("/a"), 0);
        assert_eq!(error_at("a/"), 2);
        assert_eq!(error_at("a^"), 2);
        assert_eq!(error_at("^a"), 0);
    }

    #[test]
    fn test_error_message() {
        let err = parse("(a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at offset 2: unbalanced '(' at offset 0"
        );
    }
}
