//! sx Format Reference
//!
//! This module documents the sx text format as implemented by this library.
//!
//! # Overview
//!
//! An sx document is a sequence of *nodes*. A node is either a **scalar** (a
//! string of bytes) or a **list** (a parenthesized sequence of nodes). The document
//! itself is not wrapped in parentheses: its top-level nodes form the *tree*.
//!
//! ```text
//! ; service definition
//! (name web)
//! (ports 80 443)
//! (env (LANG C) (HOME "/srv/web"))
//! ```
//!
//! # Lexical Elements
//!
//! | Element | Syntax | Value |
//! |---------|--------|-------|
//! | Whitespace | space, `\t`, `\n`, `\r` | separates nodes, otherwise ignored |
//! | Comment | `;` to end of line | ignored |
//! | List | `(` nodes `)` | list node, `()` is an empty list |
//! | Bare scalar | run of bytes without whitespace, `"`, `` ` ``, `(`, `)`, `;` | the bytes as written |
//! | Quoted string | `"..."` on one line | content with escapes decoded |
//! | Raw string | `` `...` `` on one line | content as written |
//! | Multi-line string | `` ` `` + newline, `\|` lines, closing `` ` `` | lines joined with `\n` |
//!
//! Nodes need no separator when delimiters make the boundary clear:
//!
//! ```rust
//! let tree = serde_sx::parse(br#"hello(iam"John")world"#).unwrap();
//! assert_eq!(tree.len(), 3);
//! ```
//!
//! ## Quoted Strings
//!
//! Supported escapes are `\"`, `\\`, `\r`, `\n`, `\t` and `\xHH` (two hex digits,
//! any case, producing a single byte). Anything else after `\` is an error, and so
//! is a literal newline: use a multi-line string instead.
//!
//! ```rust
//! use serde_sx::{parse, Node};
//!
//! assert_eq!(parse(br#""a\x42c""#).unwrap(), vec![Node::scalar("aBc")]);
//! assert!(parse(br#""\N""#).is_err());
//! ```
//!
//! ## Raw Strings
//!
//! Backticks quote text without any escape processing, which suits paths and
//! regular expressions:
//!
//! ```rust
//! let path: String = serde_sx::from_str(r"`C:\Program Files\AntiVirus`").unwrap();
//! assert_eq!(path, r"C:\Program Files\AntiVirus");
//! ```
//!
//! ## Multi-line Strings
//!
//! A backtick directly followed by a line break opens a multi-line string. Each
//! content line starts with `|`; one space right after `|` is dropped, as are
//! carriage returns. Blank lines between content lines are ignored and the string
//! ends at the next backtick:
//!
//! ```rust
//! let text: String = serde_sx::from_str("`\n  | first line\n\n  | second line\n`").unwrap();
//! assert_eq!(text, "first line\nsecond line");
//! ```
//!
//! # Binding to Rust Types
//!
//! | Rust type | Expected tree |
//! |-----------|---------------|
//! | integers, floats, `bool`, `char`, `String` | exactly one scalar |
//! | `Vec<T>`, sets | nodes, or one list of nodes |
//! | `[T; N]`, tuples | like `Vec`, truncated or zero-filled to `N` |
//! | maps | `(key value...)` elements |
//! | structs | `(field value...)` elements, unknown fields ignored |
//! | `Option<T>` | same as `T`, one level only |
//! | enums | `Variant` or `(Variant payload...)` |
//! | [`Node`](crate::Node), `Vec<Node>` | anything |
//!
//! A struct field sees everything after its name, so sequences can be written
//! with or without their own parentheses:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     args: Vec<String>,
//! }
//!
//! let a: Config = serde_sx::from_str("(args -v --color)").unwrap();
//! let b: Config = serde_sx::from_str("(args (-v --color))").unwrap();
//! assert_eq!(a.args, b.args);
//! ```
//!
//! A document may also wrap all its fields in one list:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     name: String,
//! }
//!
//! let user: User = serde_sx::from_str("((name nsf))").unwrap();
//! assert_eq!(user.name, "nsf");
//! ```
//!
//! ## Field Names
//!
//! `#[serde(rename = "...")]` sets the key a field is matched against and
//! `#[serde(skip)]` excludes a field from binding. Fields that are missing from the
//! input need `#[serde(default)]` unless they are `Option`s.
//!
//! When a field appears more than once the last occurrence wins. Occurrences are
//! compared by name as written, so a renamed field and its alias cannot both
//! appear in one struct.
//!
//! # Limitations
//!
//! - Errors carry no line or column information.
//! - Nesting depth is unlimited by default; deep input uses stack space
//!   proportional to its depth. See [`ParseOptions`](crate::ParseOptions).
//! - There is no serializer: sx text cannot be produced from Rust values.
