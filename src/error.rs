//! Error types for sx parsing and deserialization.
//!
//! Errors come in two independent tiers:
//!
//! - **Syntax errors** ([`SyntaxError`], wrapped in [`Error::Syntax`]): produced by the
//!   parser. The first one aborts the whole parse and no partial tree is returned.
//!   They carry a message only, there is no line or column information.
//! - **Binding errors**: produced while mapping a parsed tree onto a Rust type,
//!   e.g. [`Error::ScalarExpected`] or [`Error::IntegerOverflow`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_sx::{parse, Error, SyntaxError};
//!
//! let err = parse(b"(hello").unwrap_err();
//! assert_eq!(err, Error::Syntax(SyntaxError::UnterminatedList));
//!
//! let err = serde_sx::from_str::<u8>("300").unwrap_err();
//! assert_eq!(err, Error::UnsignedOverflow);
//! ```

use std::cell::Cell;
use std::fmt;
use thiserror::Error;

/// A syntax error reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unexpected eof, missing terminating '\"' in a string literal")]
    UnterminatedString,

    #[error("unexpected eof, missing terminating '`' in a raw string literal")]
    UnterminatedRawString,

    #[error("unexpected eof when parsing a multi-line string literal")]
    UnterminatedMultiLineString,

    #[error("invalid beginning of a string in a multi-line string literal, '`' or '|' expected")]
    InvalidMultiLineString,

    #[error("unexpected '\\n' in a string literal, allowed in multi-line strings only")]
    NewlineInString,

    #[error("unexpected '\\n' in a raw string literal, allowed in multi-line strings only")]
    NewlineInRawString,

    #[error("invalid escape sequence")]
    InvalidEscape,

    #[error("unexpected eof when parsing a string escape sequence")]
    UnterminatedEscape,

    #[error("unexpected eof when parsing a string escape sequence (hex literal)")]
    UnterminatedHexEscape,

    #[error("invalid first hex digit in string escape sequence")]
    InvalidFirstHexDigit,

    #[error("invalid second hex digit in string escape sequence")]
    InvalidSecondHexDigit,

    #[error("unmatched closing parenthesis ')'")]
    UnmatchedParen,

    #[error("unexpected eof when parsing a list")]
    UnterminatedList,

    /// Only produced when [`ParseOptions::with_max_depth`](crate::ParseOptions::with_max_depth)
    /// is set.
    #[error("list nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),
}

/// Represents all possible errors that can occur while parsing or deserializing sx.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not valid sx
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(String),

    /// A primitive was requested but the tree is not a single scalar node
    #[error("scalar node expected")]
    ScalarExpected,

    #[error("node is not an integer")]
    NotInteger,

    #[error("node is not an unsigned integer")]
    NotUnsigned,

    #[error("node is not a floating point number")]
    NotFloat,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("unsigned integer overflow")]
    UnsignedOverflow,

    #[error("invalid boolean value, use true|false")]
    InvalidBool,

    #[error("node is not a single character")]
    InvalidChar,

    #[error("scalar is not valid UTF-8")]
    InvalidUtf8,

    #[error("map element must be represented via (key value...) list")]
    MapElementNotList,

    #[error("valid map element list must contain at least two items")]
    MapElementTooShort,

    /// Binding a map key failed
    #[error("key unmarshaling failure: {0}")]
    MapKey(Box<Error>),

    /// Binding a map value failed
    #[error("value unmarshaling failure: {0}")]
    MapValue(Box<Error>),

    #[error("struct field must be represented via (name value...) list")]
    FieldNotList,

    #[error("valid struct field list must contain at least two items")]
    FieldTooShort,

    #[error("first element of the struct field list must be scalar")]
    FieldNameNotScalar,

    /// The destination type cannot be bound from sx
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Message reported by a `Deserialize` or [`Decode`](crate::Decode) implementation
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an error with a display message.
    ///
    /// This is the error [`Decode`](crate::Decode) implementations usually return.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sx::Error;
    ///
    /// let err = Error::custom("expected a list of 3 floating point elements");
    /// assert_eq!(err.to_string(), "expected a list of 3 floating point elements");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error was produced by the parser.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }
}

thread_local! {
    // an error on its way through a deserializer's generic error type
    static IN_TRANSIT: Cell<Option<Error>> = Cell::new(None);
}

impl Error {
    /// Converts into a deserializer's error type. When that type is `Error` itself
    /// the value comes out unchanged, otherwise only the message is kept.
    pub(crate) fn into_de_error<E: serde::de::Error>(self) -> E {
        let message = self.to_string();
        IN_TRANSIT.with(|slot| slot.set(Some(self)));
        let err = E::custom(message);
        IN_TRANSIT.with(Cell::take);
        err
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        if let Some(err) = IN_TRANSIT.with(Cell::take) {
            return err;
        }
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
