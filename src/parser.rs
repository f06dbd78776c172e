//! sx text parsing.
//!
//! The [`Parser`] turns a byte buffer into a tree (`Vec<Node>`) in a single pass
//! with no backtracking. Parsing is all-or-nothing: the first syntax error aborts
//! the parse and nothing produced before it is returned.
//!
//! Most users should call [`crate::parse`] or [`crate::from_slice`] instead of
//! using the parser directly.
//!
//! ```rust
//! use serde_sx::parser::Parser;
//! use serde_sx::Node;
//!
//! let tree = Parser::new(b"(name \"Alice\") ; comment\n`raw`").parse().unwrap();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree[1], Node::scalar("raw"));
//! ```

use crate::error::SyntaxError;
use crate::{Node, ParseOptions, Result};
use tracing::trace;

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_scalar(b: u8) -> bool {
    !matches!(
        b,
        b' ' | b'\t' | b'\n' | b'\r' | b'"' | b'`' | b'(' | b')' | b';'
    )
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// A single-use parser over an in-memory buffer.
pub struct Parser<'a> {
    input: &'a [u8],
    position: usize,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            input,
            position: 0,
            depth: 0,
            max_depth: None,
        }
    }

    pub fn with_options(input: &'a [u8], options: &ParseOptions) -> Self {
        Parser {
            max_depth: options.max_depth,
            ..Parser::new(input)
        }
    }

    /// Parses the whole buffer into a tree of top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error encountered.
    pub fn parse(mut self) -> Result<Vec<Node>> {
        trace!(len = self.input.len(), "parsing sx document");
        let mut tree = Vec::new();
        while let Some(node) = self.parse_node()? {
            tree.push(node);
        }
        trace!(nodes = tree.len(), "parsed sx document");
        Ok(tree)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.position += 1;
        Some(b)
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.input[self.position..].starts_with(prefix)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if is_space(b)) {
            self.position += 1;
        }
    }

    /// Skips whitespace and `;` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b';') {
                return;
            }
            while !matches!(self.peek(), None | Some(b'\n')) {
                self.position += 1;
            }
        }
    }

    /// Parses the next node, `Ok(None)` at end of input.
    fn parse_node(&mut self) -> Result<Option<Node>> {
        self.skip_trivia();
        let node = match self.peek() {
            None => return Ok(None),
            Some(b'(') => self.parse_list()?,
            Some(b')') => return Err(SyntaxError::UnmatchedParen.into()),
            Some(b'"') => self.parse_string()?,
            Some(b'`') if self.starts_with(b"`\n") || self.starts_with(b"`\r\n") => {
                self.parse_multi_line_string()?
            }
            Some(b'`') => self.parse_raw_string()?,
            Some(_) => self.parse_scalar(),
        };
        Ok(Some(node))
    }

    fn parse_scalar(&mut self) -> Node {
        let start = self.position;
        while matches!(self.peek(), Some(b) if is_scalar(b)) {
            self.position += 1;
        }
        Node::Scalar(self.input[start..self.position].to_vec())
    }

    // Expects the opening '(' and consumes through the closing ')'.
    fn parse_list(&mut self) -> Result<Node> {
        self.position += 1;
        self.depth += 1;
        if let Some(max) = self.max_depth {
            if self.depth > max {
                return Err(SyntaxError::DepthLimitExceeded(max).into());
            }
        }

        let mut children = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(SyntaxError::UnterminatedList.into()),
                Some(b')') => {
                    self.position += 1;
                    self.depth -= 1;
                    return Ok(Node::List(children));
                }
                Some(_) => match self.parse_node()? {
                    Some(node) => children.push(node),
                    None => return Err(SyntaxError::UnterminatedList.into()),
                },
            }
        }
    }

    // Expects the opening '"' and consumes through the closing '"'.
    fn parse_string(&mut self) -> Result<Node> {
        self.position += 1;
        let mut buf = Vec::new();
        loop {
            match self.next_byte() {
                None => return Err(SyntaxError::UnterminatedString.into()),
                Some(b'"') => return Ok(Node::Scalar(buf)),
                Some(b'\n') => return Err(SyntaxError::NewlineInString.into()),
                Some(b'\\') => buf.push(self.parse_escape()?),
                Some(b) => buf.push(b),
            }
        }
    }

    // Every escape sequence decodes to a single byte.
    fn parse_escape(&mut self) -> Result<u8> {
        let decoded = match self.next_byte() {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'r') => b'\r',
            Some(b'n') => b'\n',
            Some(b't') => b'\t',
            Some(b'x') => {
                if self.remaining() < 2 {
                    return Err(SyntaxError::UnterminatedHexEscape.into());
                }
                let hi = self
                    .next_byte()
                    .and_then(hex_value)
                    .ok_or(SyntaxError::InvalidFirstHexDigit)?;
                let lo = self
                    .next_byte()
                    .and_then(hex_value)
                    .ok_or(SyntaxError::InvalidSecondHexDigit)?;
                hi * 16 + lo
            }
            Some(_) => return Err(SyntaxError::InvalidEscape.into()),
            None => return Err(SyntaxError::UnterminatedEscape.into()),
        };
        Ok(decoded)
    }

    // Expects the opening '`' and consumes through the closing '`'.
    fn parse_raw_string(&mut self) -> Result<Node> {
        self.position += 1;
        let start = self.position;
        loop {
            match self.next_byte() {
                None => return Err(SyntaxError::UnterminatedRawString.into()),
                Some(b'`') => {
                    return Ok(Node::Scalar(
                        self.input[start..self.position - 1].to_vec(),
                    ))
                }
                Some(b'\n') => return Err(SyntaxError::NewlineInRawString.into()),
                Some(_) => {}
            }
        }
    }

    // Expects "`\n" or "`\r\n" and consumes through the closing '`'.
    fn parse_multi_line_string(&mut self) -> Result<Node> {
        self.position += if self.starts_with(b"`\r\n") { 3 } else { 2 };

        let mut buf = Vec::new();
        let mut first_line = true;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'`') => {
                    self.position += 1;
                    return Ok(Node::Scalar(buf));
                }
                Some(b'|') => {
                    if !first_line {
                        buf.push(b'\n');
                    }
                    first_line = false;
                    self.parse_raw_line(&mut buf);
                }
                None => return Err(SyntaxError::UnterminatedMultiLineString.into()),
                Some(_) => return Err(SyntaxError::InvalidMultiLineString.into()),
            }
        }
    }

    // Expects the leading '|' and consumes through the line terminator.
    fn parse_raw_line(&mut self, buf: &mut Vec<u8>) {
        self.position += 1;
        if self.peek() == Some(b' ') {
            self.position += 1;
        }
        while let Some(b) = self.next_byte() {
            match b {
                b'\n' => break,
                b'\r' => {}
                _ => buf.push(b),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn scalars(values: &[&str]) -> Vec<Node> {
        values.iter().map(|v| Node::scalar(*v)).collect()
    }

    fn json_tree(json: &str) -> Vec<Node> {
        serde_json::from_str(json).unwrap()
    }

    fn parse(input: &str) -> Result<Vec<Node>> {
        Parser::new(input.as_bytes()).parse()
    }

    fn syntax_error(input: &str) -> SyntaxError {
        match parse(input) {
            Err(Error::Syntax(kind)) => kind,
            other => panic!("expected a syntax error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_scalars_and_comments() {
        assert_eq!(parse("hello world").unwrap(), scalars(&["hello", "world"]));
        assert_eq!(parse(";hello").unwrap(), vec![]);
        assert_eq!(parse(";hello\n;world\n\n\n;xxx").unwrap(), vec![]);
        assert_eq!(
            parse(";hello\n;world\n\n\n;xxx\nabc\ndef").unwrap(),
            scalars(&["abc", "def"])
        );
        assert_eq!(parse("        \n\n\r\n\t").unwrap(), vec![]);
        assert_eq!(parse("").unwrap(), vec![]);
    }

    #[test]
    fn test_unterminated_strings() {
        assert_eq!(syntax_error("\"abc"), SyntaxError::UnterminatedString);
        assert_eq!(syntax_error("\""), SyntaxError::UnterminatedString);
        assert_eq!(syntax_error("\"\n"), SyntaxError::NewlineInString);
        assert_eq!(syntax_error("\"abc\n"), SyntaxError::NewlineInString);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            parse(r#""hello, world" abc"#).unwrap(),
            scalars(&["hello, world", "abc"])
        );
        assert_eq!(parse(r#""\r\n""#).unwrap(), scalars(&["\r\n"]));
        assert_eq!(parse(r#""\"\\\t""#).unwrap(), scalars(&["\"\\\t"]));
        assert_eq!(parse(r#""\xff""#).unwrap(), vec![Node::Scalar(vec![0xff])]);
        assert_eq!(parse(r#""\xaF""#).unwrap(), vec![Node::Scalar(vec![0xaf])]);
        assert_eq!(parse(r#""\xFb""#).unwrap(), vec![Node::Scalar(vec![0xfb])]);
        assert_eq!(parse(r#""\x42""#).unwrap(), scalars(&["B"]));
    }

    #[test]
    fn test_invalid_escapes() {
        assert_eq!(syntax_error(r#""\N""#), SyntaxError::InvalidEscape);
        assert_eq!(syntax_error(r#""\xFX""#), SyntaxError::InvalidSecondHexDigit);
        assert_eq!(syntax_error(r#""\xfX""#), SyntaxError::InvalidSecondHexDigit);
        assert_eq!(syntax_error(r#""\xX0""#), SyntaxError::InvalidFirstHexDigit);
        assert_eq!(syntax_error(r#""\x5"#), SyntaxError::UnterminatedHexEscape);
        assert_eq!(syntax_error("\"\\"), SyntaxError::UnterminatedEscape);
    }

    #[test]
    fn test_raw_strings() {
        assert_eq!(parse(r"`\n`").unwrap(), scalars(&[r"\n"]));
        assert_eq!(
            parse(r"`hello, \xFF`").unwrap(),
            scalars(&[r"hello, \xFF"])
        );
        assert_eq!(parse("``").unwrap(), scalars(&[""]));
        assert_eq!(syntax_error("` \n`"), SyntaxError::NewlineInRawString);
        assert_eq!(syntax_error("`"), SyntaxError::UnterminatedRawString);
        assert_eq!(syntax_error("`abc"), SyntaxError::UnterminatedRawString);
    }

    #[test]
    fn test_multi_line_strings() {
        assert_eq!(parse("`\n|xxx\n`").unwrap(), scalars(&["xxx"]));
        assert_eq!(
            parse("`\r\n|xxx\r\n\r\n\t\t\n  \t|yyy\r\n`").unwrap(),
            scalars(&["xxx\nyyy"])
        );
        assert_eq!(
            parse("`\n  |  indented\n  |\n  | last\n  `").unwrap(),
            scalars(&[" indented\n\nlast"])
        );
        assert_eq!(parse("`\n`").unwrap(), scalars(&[""]));
        assert_eq!(syntax_error("`\n"), SyntaxError::UnterminatedMultiLineString);
        assert_eq!(syntax_error("`\n|xxx`"), SyntaxError::UnterminatedMultiLineString);
        assert_eq!(syntax_error("`\nxxx`"), SyntaxError::InvalidMultiLineString);
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            parse("(hello world)").unwrap(),
            json_tree(r#"[["hello", "world"]]"#)
        );
        assert_eq!(
            parse("(123 (\n\t456 789   ) foo)").unwrap(),
            json_tree(r#"[["123", ["456", "789"], "foo"]]"#)
        );
        assert_eq!(
            parse("(123 (\n\t456 789 ; xxx\n zzz  ) foo)").unwrap(),
            json_tree(r#"[["123", ["456", "789", "zzz"], "foo"]]"#)
        );
        assert_eq!(
            parse("123 (\n\t456 789 ; xxx\n zzz  ) foo").unwrap(),
            json_tree(r#"["123", ["456", "789", "zzz"], "foo"]"#)
        );
        assert_eq!(
            parse("12(34(56`hello`\"world\"))").unwrap(),
            json_tree(r#"["12", ["34", ["56", "hello", "world"]]]"#)
        );
        assert_eq!(parse("()").unwrap(), json_tree("[[]]"));
        assert_eq!(
            parse(r#"hello(iam"John")world"#).unwrap(),
            json_tree(r#"["hello", ["iam", "John"], "world"]"#)
        );
    }

    #[test]
    fn test_comment_before_closing_paren() {
        assert_eq!(
            parse("(a ; trailing\n)").unwrap(),
            json_tree(r#"[["a"]]"#)
        );
        assert_eq!(syntax_error("(a ; trailing"), SyntaxError::UnterminatedList);
    }

    #[test]
    fn test_unbalanced_parens() {
        assert_eq!(syntax_error(")hello"), SyntaxError::UnmatchedParen);
        assert_eq!(syntax_error("(hello) )"), SyntaxError::UnmatchedParen);
        assert_eq!(syntax_error("(hello"), SyntaxError::UnterminatedList);
        assert_eq!(syntax_error("12 (34 (56 (78 (9"), SyntaxError::UnterminatedList);
    }

    #[test]
    fn test_error_discards_partial_tree() {
        assert!(parse("a b c (d e").is_err());
        assert!(parse("a b c \"unterminated").is_err());
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(Parser::with_options(b"(a (b)) (c (d))", &options).parse().is_ok());
        let err = Parser::with_options(b"(a (b (c)))", &options)
            .parse()
            .unwrap_err();
        assert_eq!(err, Error::Syntax(SyntaxError::DepthLimitExceeded(2)));
    }
}
