/// Builds an sx tree (`Vec<Node>`) from Rust tokens.
///
/// Identifiers and literals become scalars, parenthesized groups become lists.
/// String literals contribute their content, other literals their `Display` form.
/// Tokens the Rust lexer splits (negative numbers, hyphenated words) must be
/// written as string literals.
///
/// # Examples
///
/// ```rust
/// use serde_sx::{parse, sx};
///
/// let tree = sx!((name "Alice Smith") (ports 80 443) (tags));
/// assert_eq!(tree, parse(b"(name `Alice Smith`) (ports 80 443) (tags)").unwrap());
///
/// let empty = sx!(());
/// assert!(empty[0].is_list());
/// ```
#[macro_export]
macro_rules! sx {
    (@node ( $($inner:tt)* )) => {
        $crate::Node::List(vec![$($crate::sx!(@node $inner)),*])
    };

    (@node $lit:literal) => {
        $crate::Node::from($lit)
    };

    (@node $ident:ident) => {
        $crate::Node::scalar(stringify!($ident))
    };

    ($($node:tt)*) => {{
        let tree: ::std::vec::Vec<$crate::Node> = vec![$($crate::sx!(@node $node)),*];
        tree
    }};
}

/// Implements `serde::Deserialize` for types implementing [`Decode`](crate::Decode).
///
/// The generated implementation forwards to [`decode::deserialize`](crate::decode::deserialize),
/// so the type receives the raw tree wherever it is a deserialization target.
///
/// # Examples
///
/// ```rust
/// use serde_sx::{impl_deserialize_via_decode, Decode, Node};
///
/// struct NodeCount(usize);
///
/// impl Decode for NodeCount {
///     fn decode(tree: &[Node]) -> serde_sx::Result<Self> {
///         Ok(NodeCount(tree.len()))
///     }
/// }
///
/// impl_deserialize_via_decode!(NodeCount);
///
/// let count: NodeCount = serde_sx::from_str("a b (c d)").unwrap();
/// assert_eq!(count.0, 3);
/// ```
#[macro_export]
macro_rules! impl_deserialize_via_decode {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: $crate::__private::serde::Deserializer<'de>,
                {
                    $crate::decode::deserialize(deserializer)
                }
            }
        )+
    };
}
