//! The parsed representation of sx data.
//!
//! This module provides the [`Node`] enum. A parsed document is a *tree*: an
//! ordered sequence of top-level nodes (`Vec<Node>`), not a list node. Every node
//! is either a scalar or a list.
//!
//! ## Scalars and Empty Lists
//!
//! An explicitly empty list `()` is a [`Node::List`] with no children and is never
//! confused with a scalar:
//!
//! ```rust
//! use serde_sx::{parse, Node};
//!
//! let tree = parse(b"() x").unwrap();
//! assert_eq!(tree, vec![Node::List(vec![]), Node::scalar("x")]);
//! assert!(tree[0].is_list());
//! assert!(tree[1].is_scalar());
//! ```
//!
//! ## Byte Strings
//!
//! Scalars hold bytes. Quoted strings can carry any byte through `\xHH`, so a scalar
//! is not necessarily valid UTF-8:
//!
//! ```rust
//! use serde_sx::parse;
//!
//! let tree = parse(br#""\xff""#).unwrap();
//! assert_eq!(tree[0].as_bytes(), Some(&[0xff][..]));
//! assert_eq!(tree[0].as_str(), None);
//! ```
//!
//! ## JSON Projection
//!
//! `Node` implements `Serialize`: scalars become strings and lists become arrays.
//! Bytes that are not valid UTF-8 are replaced with U+FFFD, so such a scalar stays
//! a string but loses its exact bytes.
//!
//! ```rust
//! use serde_sx::parse;
//!
//! let tree = parse(b"(hello world) ()").unwrap();
//! let json = serde_json::to_string(&tree).unwrap();
//! assert_eq!(json, r#"[["hello","world"],[]]"#);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single element of a parsed sx tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A bare token or string literal
    Scalar(Vec<u8>),
    /// A parenthesized sequence of nodes, possibly empty
    List(Vec<Node>),
}

impl Node {
    /// Creates a scalar node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sx::Node;
    ///
    /// let node = Node::scalar("hello");
    /// assert_eq!(node.as_str(), Some("hello"));
    /// ```
    pub fn scalar(value: impl Into<Vec<u8>>) -> Self {
        Node::Scalar(value.into())
    }

    /// Creates a list node.
    pub fn list(children: impl IntoIterator<Item = Node>) -> Self {
        Node::List(children.into_iter().collect())
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Returns the raw bytes of a scalar node.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Scalar(bytes) => Some(bytes),
            Node::List(_) => None,
        }
    }

    /// Returns the value of a scalar node if it is valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_sx::Node;
    ///
    /// assert_eq!(Node::scalar("abc").as_str(), Some("abc"));
    /// assert_eq!(Node::List(vec![]).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the children of a list node.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(children) => Some(children),
            Node::Scalar(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Scalar(value.as_bytes().to_vec())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Scalar(value.into_bytes())
    }
}

impl From<&[u8]> for Node {
    fn from(value: &[u8]) -> Self {
        Node::Scalar(value.to_vec())
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Scalar(value.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_from_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Scalar(bytes) => serializer.serialize_str(&String::from_utf8_lossy(bytes)),
            Node::List(children) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar or a list of nodes")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Node::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Node::Scalar(value.to_vec()))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Node::Scalar(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut children = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(child) = seq.next_element()? {
                    children.push(child);
                }
                Ok(Node::List(children))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}
