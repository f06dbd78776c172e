//! sx deserialization.
//!
//! This module provides the [`Deserializer`] implementation that binds a parsed
//! tree onto Rust data structures. Decoding is driven entirely by the target type:
//! the tree is never inspected to guess a shape.
//!
//! ## Overview
//!
//! - **Primitives** (integers, floats, `bool`, `char`, strings) need a tree made of
//!   exactly one scalar node. Integers must fit the target width.
//! - **Sequences** (`Vec<T>`, `[T; N]`, tuples) descend into a single list node, so
//!   `(digits 1 2 3)` and `(digits (1 2 3))` bind the same way. Fixed-size targets
//!   truncate extra nodes and zero-fill missing ones.
//! - **Maps and structs** read `(key value...)` elements. Unknown struct keys are
//!   ignored.
//! - **`Option<T>`** unwraps exactly one level.
//! - **Custom decoding**: types implementing [`Decode`](crate::Decode) receive the raw
//!   tree.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data {
//!     name: String,
//!     digits: Vec<u8>,
//! }
//!
//! let data: Data = serde_sx::from_str("(name pi) (digits 3 1 4)").unwrap();
//! assert_eq!(data, Data { name: "pi".into(), digits: vec![3, 1, 4] });
//! ```
//!
//! A tree that is already parsed can be bound with [`Deserializer::from_nodes`]:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_sx::{parse, Deserializer};
//!
//! let tree = parse(b"(1 2 3)").unwrap();
//! let nums = Vec::<i32>::deserialize(Deserializer::from_nodes(&tree)).unwrap();
//! assert_eq!(nums, vec![1, 2, 3]);
//! ```

use crate::decode::TREE_TOKEN;
use crate::{Error, Node, Result};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::collections::HashSet;
use std::num::{IntErrorKind, ParseIntError};
use std::slice;
use std::str::FromStr;
use tracing::trace;

/// The sx deserializer.
///
/// Binds a borrowed tree (a slice of top-level nodes) onto any type implementing
/// `Deserialize`. Strings are borrowed from the tree where possible.
#[derive(Clone, Copy, Debug)]
pub struct Deserializer<'de> {
    tree: &'de [Node],
    // set once an Option has been unwrapped for this tree
    in_option: bool,
}

impl<'de> Deserializer<'de> {
    pub fn from_nodes(tree: &'de [Node]) -> Self {
        Deserializer {
            tree,
            in_option: false,
        }
    }

    fn one(node: &'de Node) -> Self {
        Deserializer::from_nodes(slice::from_ref(node))
    }

    fn scalar(&self) -> Result<&'de [u8]> {
        match self.tree {
            [Node::Scalar(bytes)] => Ok(bytes),
            _ => Err(Error::ScalarExpected),
        }
    }

    fn scalar_str(&self) -> Result<&'de str> {
        std::str::from_utf8(self.scalar()?).map_err(|_| Error::InvalidUtf8)
    }

    fn parse_int<T>(&self, invalid: Error, overflow: Error) -> Result<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let text = std::str::from_utf8(self.scalar()?).map_err(|_| invalid.clone())?;
        text.parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => overflow,
            _ => invalid,
        })
    }

    fn parse_signed<T>(&self) -> Result<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        self.parse_int(Error::NotInteger, Error::IntegerOverflow)
    }

    fn parse_unsigned<T>(&self) -> Result<T>
    where
        T: FromStr<Err = ParseIntError>,
    {
        self.parse_int(Error::NotUnsigned, Error::UnsignedOverflow)
    }

    fn parse_float<T: FromStr>(&self) -> Result<T> {
        std::str::from_utf8(self.scalar()?)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(Error::NotFloat)
    }

    /// Elements of a sequence: a tree holding a single list stands for its children.
    fn seq_items(&self) -> &'de [Node] {
        match self.tree {
            [Node::List(children)] => {
                trace!(nodes = children.len(), "descending into list for sequence");
                children
            }
            _ => self.tree,
        }
    }

    /// Elements of a map or struct.
    ///
    /// With `[..]` marking the tree, a field value of `(a [(k v)])` is a single
    /// element used as is, `(a [()])` is no elements at all and `(a [((k v))])` is the
    /// single element `(k v)`.
    fn map_items(&self) -> &'de [Node] {
        match self.tree {
            [Node::List(children)] if children.is_empty() => children,
            [Node::List(children)] if children[0].is_list() => {
                trace!(nodes = children.len(), "descending into list for map");
                children
            }
            [Node::List(_)] => self.tree,
            _ => self.tree,
        }
    }
}

impl<'de> de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tree {
            [Node::Scalar(bytes)] => match std::str::from_utf8(bytes) {
                Ok(s) => visitor.visit_borrowed_str(s),
                Err(_) => visitor.visit_borrowed_bytes(bytes),
            },
            _ => visitor.visit_seq(NodeSeq::new(self.seq_items(), 0)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.scalar()? {
            b"true" => visitor.visit_bool(true),
            b"false" => visitor.visit_bool(false),
            _ => Err(Error::InvalidBool),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i8(self.parse_signed()?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i16(self.parse_signed()?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i32(self.parse_signed()?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(self.parse_signed()?)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i128(self.parse_signed()?)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u8(self.parse_unsigned()?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u16(self.parse_unsigned()?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u32(self.parse_unsigned()?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(self.parse_unsigned()?)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u128(self.parse_unsigned()?)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(self.parse_float()?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(self.parse_float()?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.scalar_str()?.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => visitor.visit_char(ch),
            _ => Err(Error::InvalidChar),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.scalar_str()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(self.scalar()?)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.in_option {
            return Err(Error::unsupported_type(
                "nested Option, only one level of indirection is supported",
            ));
        }
        visitor.visit_some(Deserializer {
            tree: self.tree,
            in_option: true,
        })
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.tree {
            [] => visitor.visit_unit(),
            [Node::List(children)] if children.is_empty() => visitor.visit_unit(),
            _ => Err(Error::custom("expected an empty list for a unit value")),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if name == TREE_TOKEN {
            return visitor.visit_newtype_struct(RawTree(self.tree));
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(self.seq_items(), 0))
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let items = self.seq_items();
        let items = &items[..items.len().min(len)];
        visitor.visit_seq(NodeSeq::new(items, len - items.len()))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapEntries::new(self.map_items()))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(StructFields::new(self.map_items()))
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let [Node::Scalar(_)] = self.tree {
            return visitor.visit_enum(self.scalar_str()?.into_deserializer());
        }
        match self.seq_items() {
            [name @ Node::Scalar(_), payload @ ..] => visitor.visit_enum(Variant {
                name: slice::from_ref(name),
                payload,
            }),
            _ => Err(Error::custom(
                "enum must be a variant name or a (variant value...) list",
            )),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let bytes = self.scalar()?;
        match std::str::from_utf8(bytes) {
            Ok(s) => visitor.visit_borrowed_str(s),
            Err(_) => visitor.visit_borrowed_bytes(bytes),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        trace!(nodes = self.tree.len(), "ignoring value");
        visitor.visit_unit()
    }
}

/// Hands the current tree to a [`Decode`](crate::Decode) implementation untouched.
struct RawTree<'de>(&'de [Node]);

impl<'de> de::Deserializer<'de> for RawTree<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(self.0, 0))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

/// Sequence elements, each bound as a one-node tree, followed by `padding`
/// zero values.
struct NodeSeq<'de> {
    iter: slice::Iter<'de, Node>,
    padding: usize,
}

impl<'de> NodeSeq<'de> {
    fn new(nodes: &'de [Node], padding: usize) -> Self {
        NodeSeq {
            iter: nodes.iter(),
            padding,
        }
    }
}

impl<'de> de::SeqAccess<'de> for NodeSeq<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if let Some(node) = self.iter.next() {
            return seed.deserialize(Deserializer::one(node)).map(Some);
        }
        if self.padding > 0 {
            self.padding -= 1;
            return seed.deserialize(Zero).map(Some);
        }
        Ok(None)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len() + self.padding)
    }
}

struct MapEntries<'de> {
    iter: slice::Iter<'de, Node>,
    value: Option<&'de [Node]>,
}

impl<'de> MapEntries<'de> {
    fn new(elements: &'de [Node]) -> Self {
        MapEntries {
            iter: elements.iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapEntries<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some(element) = self.iter.next() else {
            return Ok(None);
        };
        let list = match element {
            Node::List(list) => list,
            Node::Scalar(_) => return Err(Error::MapElementNotList),
        };
        if list.len() < 2 {
            return Err(Error::MapElementTooShort);
        }
        self.value = Some(&list[1..]);
        seed.deserialize(Deserializer::from_nodes(&list[..1]))
            .map(Some)
            .map_err(|e| Error::MapKey(Box::new(e)))
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed
                .deserialize(Deserializer::from_nodes(value))
                .map_err(|e| Error::MapValue(Box::new(e))),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

fn field_name(element: &Node) -> Option<&[u8]> {
    match element {
        Node::List(list) if list.len() >= 2 => list[0].as_bytes(),
        _ => None,
    }
}

/// Struct fields as `(name value...)` elements. When a name repeats, the last
/// element wins.
///
/// Repeats are found by comparing names as written. Two different names that
/// serde resolves to the same field (`rename` plus `alias`) both reach the
/// visitor, which rejects the second one as a duplicate field.
struct StructFields<'de> {
    elements: &'de [Node],
    // elements whose name appears again further on
    overridden: Vec<bool>,
    index: usize,
    value: Option<&'de [Node]>,
}

impl<'de> StructFields<'de> {
    fn new(elements: &'de [Node]) -> Self {
        let mut seen = HashSet::new();
        let mut overridden = vec![false; elements.len()];
        for (i, element) in elements.iter().enumerate().rev() {
            if let Some(name) = field_name(element) {
                overridden[i] = !seen.insert(name);
            }
        }
        StructFields {
            elements,
            overridden,
            index: 0,
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for StructFields<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        while let Some(element) = self.elements.get(self.index) {
            let overridden = self.overridden[self.index];
            self.index += 1;
            let list = match element {
                Node::List(list) => list,
                Node::Scalar(_) => return Err(Error::FieldNotList),
            };
            if list.len() < 2 {
                return Err(Error::FieldTooShort);
            }
            let name = match &list[0] {
                Node::Scalar(name) => name.as_slice(),
                Node::List(_) => return Err(Error::FieldNameNotScalar),
            };
            if overridden {
                trace!(
                    field = %String::from_utf8_lossy(name),
                    "skipping field overridden by a later element"
                );
                continue;
            }
            self.value = Some(&list[1..]);
            return seed.deserialize(Deserializer::from_nodes(&list[..1])).map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::from_nodes(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }
}

struct Variant<'de> {
    name: &'de [Node],
    payload: &'de [Node],
}

impl<'de> de::EnumAccess<'de> for Variant<'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::from_nodes(self.name))?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for Variant<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        if self.payload.is_empty() {
            Ok(())
        } else {
            Err(Error::custom("unexpected value for a unit variant"))
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::from_nodes(self.payload))
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(Deserializer::from_nodes(self.payload), len, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(
            Deserializer::from_nodes(self.payload),
            "",
            fields,
            visitor,
        )
    }
}

/// Produces the zero value of whatever type asks for it: used to fill the tail of
/// fixed-size sequences.
struct Zero;

impl<'de> de::Deserializer<'de> for Zero {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(false)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i8(0)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i16(0)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i32(0)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(0)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i128(0)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u8(0)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u16(0)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u32(0)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(0)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u128(0)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(0.0)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(0.0)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_char('\0')
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(&[])
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_bytes(&[])
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_none()
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if name == TREE_TOKEN {
            return visitor.visit_newtype_struct(RawTree(&[]));
        }
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(&[], 0))
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(&[], len))
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(NodeSeq::new(&[], len))
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapEntries::new(&[]))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(ZeroFields {
            index: 0,
            count: fields.len(),
        })
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match variants.first() {
            Some(first) => visitor.visit_enum(ZeroVariant(first)),
            None => Err(Error::unsupported_type("enum without variants has no zero value")),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// Every field of a struct with a zero value.
///
/// Keys are field indices rather than names: `fields` lists aliases too, and two
/// names of one field would be rejected as a duplicate. `count` is therefore an
/// upper bound. Surplus indices are ignored by the struct, or rejected when it
/// denies unknown fields, which ends the map.
struct ZeroFields {
    index: usize,
    count: usize,
}

impl<'de> de::MapAccess<'de> for ZeroFields {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.index >= self.count {
            return Ok(None);
        }
        let key: de::value::U64Deserializer<Error> = (self.index as u64).into_deserializer();
        self.index += 1;
        Ok(seed.deserialize(key).ok())
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Zero)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.count - self.index)
    }
}

/// The first declared variant of an enum, with a zero payload.
struct ZeroVariant(&'static str);

impl<'de> de::EnumAccess<'de> for ZeroVariant {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: de::value::StrDeserializer<'_, Error> = self.0.into_deserializer();
        let variant = seed.deserialize(name)?;
        Ok((variant, self))
    }
}

impl<'de> de::VariantAccess<'de> for ZeroVariant {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Zero)
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(Zero, len, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(Zero, "", fields, visitor)
    }
}
