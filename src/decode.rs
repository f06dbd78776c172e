//! Custom decoding straight from the parsed tree.
//!
//! Some types are easier to read from the raw nodes than through the built-in
//! rules. Such types implement [`Decode`] and hook it into serde with
//! [`impl_deserialize_via_decode!`](crate::impl_deserialize_via_decode) (or, per
//! field, `#[serde(deserialize_with = "serde_sx::decode::deserialize")]`). Wherever
//! they appear they receive the whole current tree, including behind one `Option`,
//! and the built-in rules are skipped entirely.
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sx::{impl_deserialize_via_decode, Decode, Error, Node};
//!
//! #[derive(Debug, PartialEq)]
//! struct Vec3 {
//!     x: f64,
//!     y: f64,
//!     z: f64,
//! }
//!
//! impl Decode for Vec3 {
//!     fn decode(tree: &[Node]) -> serde_sx::Result<Self> {
//!         let mut coords = [0.0; 3];
//!         if tree.len() != coords.len() {
//!             return Err(Error::custom("expected a list of 3 floating point elements"));
//!         }
//!         for (slot, node) in coords.iter_mut().zip(tree) {
//!             *slot = serde_sx::from_nodes(std::slice::from_ref(node))?;
//!         }
//!         Ok(Vec3 { x: coords[0], y: coords[1], z: coords[2] })
//!     }
//! }
//!
//! impl_deserialize_via_decode!(Vec3);
//!
//! #[derive(Deserialize)]
//! struct Camera {
//!     position: Vec3,
//! }
//!
//! let camera: Camera = serde_sx::from_str("(position 1.5 2.5 3.5)").unwrap();
//! assert_eq!(camera.position, Vec3 { x: 1.5, y: 2.5, z: 3.5 });
//! ```

use crate::{Error, Node, Result};
use serde::de::{self, Deserialize, Visitor};
use std::fmt;

/// Newtype name the deserializer recognises to hand out the raw tree.
pub(crate) const TREE_TOKEN: &str = "$serde_sx::private::Tree";

/// A type that decodes itself from raw sx nodes.
pub trait Decode: Sized {
    /// Builds a value from the tree at the current position.
    ///
    /// For a struct field this is everything after the field name, for a sequence
    /// element it is the single element node.
    ///
    /// # Errors
    ///
    /// The sx deserializer returns any error produced here unchanged. Other
    /// deserializers report it with the same message.
    fn decode(tree: &[Node]) -> Result<Self>;
}

/// Deserializes a [`Decode`] type.
///
/// Usable directly as `#[serde(deserialize_with = "serde_sx::decode::deserialize")]`.
/// With deserializers other than the sx one, the tree is read as a sequence of
/// nodes (see [`Node`]'s `Deserialize` implementation).
///
/// # Errors
///
/// Returns the error produced by [`Decode::decode`], or by the deserializer if the
/// tree cannot be captured. With the sx deserializer the error from `decode` is
/// passed through as is.
pub fn deserialize<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: de::Deserializer<'de>,
    T: Decode,
{
    let tree = deserializer.deserialize_newtype_struct(TREE_TOKEN, TreeVisitor)?;
    T::decode(&tree).map_err(Error::into_de_error)
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = Vec<Node>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an sx tree")
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        Vec::<Node>::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut tree = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(node) = seq.next_element()? {
            tree.push(node);
        }
        Ok(tree)
    }
}
