//! # serde_sx
//!
//! A Serde-compatible parser and deserializer for sx, a small tree-structured text
//! format built from scalars and parenthesized lists.
//!
//! ## What is sx?
//!
//! sx is an s-expression dialect for configuration files and data interchange. A
//! document is a sequence of nodes; a node is either a scalar (bare word, quoted
//! string, raw string or multi-line string) or a list of nodes:
//!
//! ```text
//! ; web service
//! (id web)
//! (cmd `python3 -m http.server 8080`)
//! (ports 8080 8443)
//! (env (LANG C.UTF-8) (MODE production))
//! ```
//!
//! ## Key Features
//!
//! - **Two stages**: [`parse`] turns bytes into a tree of [`Node`]s, and the
//!   [`Deserializer`] binds a tree onto any type implementing `Deserialize`
//! - **Type directed**: the target type decides how a tree is read, the tree never
//!   guesses
//! - **Forward compatible**: unknown struct fields are ignored
//! - **Custom decoding**: the [`Decode`] trait gives a type the raw tree
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sx::from_str;
//! use std::collections::HashMap;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Service {
//!     id: String,
//!     cmd: String,
//!     ports: Vec<u16>,
//!     env: HashMap<String, String>,
//! }
//!
//! let input = "
//!     ; web service
//!     (id web)
//!     (cmd `python3 -m http.server 8080`)
//!     (ports 8080 8443)
//!     (env (LANG C.UTF-8) (MODE production))
//! ";
//!
//! let service: Service = from_str(input).unwrap();
//! assert_eq!(service.ports, vec![8080, 8443]);
//! assert_eq!(service.env["MODE"], "production");
//! ```
//!
//! ### Working with the Tree
//!
//! ```rust
//! use serde_sx::{parse, Node};
//!
//! let tree = parse(b"(ports 8080 8443)").unwrap();
//! let ports = tree[0].as_list().unwrap();
//! assert_eq!(ports[0], Node::scalar("ports"));
//! assert_eq!(ports.len(), 3);
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Parsing is all-or-nothing: an error never comes with a partial tree
//! - Integer binding never wraps; out-of-range values are errors
//!
//! ## Format Reference
//!
//! See the [`syntax`] module for the grammar and the binding rules.

pub mod de;
pub mod decode;
pub mod error;
pub mod macros;
pub mod node;
pub mod options;
pub mod parser;
pub mod syntax;

pub use de::Deserializer;
pub use decode::Decode;
pub use error::{Error, Result, SyntaxError};
pub use node::Node;
pub use options::ParseOptions;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

/// Parse sx text into a tree of top-level nodes.
///
/// Empty input (or input holding only whitespace and comments) yields an empty
/// tree.
///
/// # Examples
///
/// ```rust
/// use serde_sx::{parse, Node};
///
/// let tree = parse(b"hello (a b) ()").unwrap();
/// assert_eq!(tree[0], Node::scalar("hello"));
/// assert_eq!(tree[2], Node::List(vec![]));
///
/// assert!(parse(b"").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for the first syntax error found. No partial tree is
/// returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &[u8]) -> Result<Vec<Node>> {
    parser::Parser::new(input).parse()
}

/// Parse sx text into a tree with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_sx::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(1);
/// assert!(parse_with_options(b"(a) (b)", &options).is_ok());
/// assert!(parse_with_options(b"((a))", &options).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for the first syntax error found.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &[u8], options: &ParseOptions) -> Result<Vec<Node>> {
    parser::Parser::with_options(input, options).parse()
}

/// Deserialize an instance of type `T` from an already parsed tree.
///
/// Borrowed strings (`&str`) in `T` point into the tree.
///
/// # Examples
///
/// ```rust
/// use serde_sx::{from_nodes, parse};
///
/// let tree = parse(b"(1 2 3)").unwrap();
/// let nums: [u8; 4] = from_nodes(&tree).unwrap();
/// assert_eq!(nums, [1, 2, 3, 0]);
/// ```
///
/// # Errors
///
/// Returns the first binding error encountered.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_nodes<'de, T>(tree: &'de [Node]) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(Deserializer::from_nodes(tree))
}

/// Deserialize an instance of type `T` from bytes of sx text.
///
/// The input is parsed completely before any binding happens.
///
/// # Examples
///
/// ```rust
/// use serde_sx::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b"(x 1) (y 2)").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns the syntax error if parsing fails, otherwise the first binding error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(input: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice_with_options(input, &ParseOptions::default())
}

/// Deserialize an instance of type `T` from bytes of sx text with custom parse
/// options.
///
/// # Errors
///
/// Returns the syntax error if parsing fails, otherwise the first binding error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_options<T>(input: &[u8], options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let tree = parse_with_options(input, options)?;
    from_nodes(&tree)
}

/// Deserialize an instance of type `T` from a string of sx text.
///
/// # Examples
///
/// ```rust
/// use serde_sx::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("(x 1) (y 2) (z 3)").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns the syntax error if parsing fails, otherwise the first binding error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from an I/O stream of sx.
///
/// The whole stream is read into memory before parsing.
///
/// # Examples
///
/// ```rust
/// use serde_sx::from_reader;
/// use std::io::Cursor;
///
/// let nums: Vec<i64> = from_reader(Cursor::new(b"1 2 3")).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid sx, or the tree cannot
/// be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_deserialize_point() {
        let point: Point = from_str("(x 1) (y 2)").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_deserialize_user() {
        let user: User =
            from_str("(id 123) (name \"Alice\") (active true) (tags admin user)").unwrap();
        assert_eq!(
            user,
            User {
                id: 123,
                name: "Alice".to_string(),
                active: true,
                tags: vec!["admin".to_string(), "user".to_string()],
            }
        );
    }

    #[test]
    fn test_syntax_error_wins_over_binding() {
        let err = from_str::<Point>("(x 1) (y").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_arrays() {
        let numbers: Vec<i32> = from_str("1 2 3 4 5").unwrap();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        let numbers: Vec<i32> = from_str("(1 2 3 4 5)").unwrap();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_options_apply_to_binding() {
        let options = ParseOptions::new().with_max_depth(1);
        let err = from_slice_with_options::<Vec<Vec<i32>>>(b"((1))", &options).unwrap_err();
        assert_eq!(err, Error::Syntax(SyntaxError::DepthLimitExceeded(1)));
    }

    #[test]
    fn test_reader_errors() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let err = from_reader::<_, Vec<i32>>(Broken).unwrap_err();
        assert!(matches!(err, Error::Io(msg) if msg.contains("disk on fire")));
    }
}
