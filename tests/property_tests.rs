//! Property-based tests over generated trees.
//!
//! Trees are printed back to sx text with a small local printer, so these tests
//! check that parsing is deterministic and that the scalar/list shape (including
//! empty lists) survives a trip through text.

use proptest::prelude::*;
use serde_sx::{from_str, parse, Node};

fn print_node(node: &Node, out: &mut String) {
    match node {
        Node::Scalar(bytes) => {
            out.push('"');
            for &b in bytes {
                match b {
                    b'"' => out.push_str("\\\""),
                    b'\\' => out.push_str("\\\\"),
                    b'\n' => out.push_str("\\n"),
                    b'\r' => out.push_str("\\r"),
                    b'\t' => out.push_str("\\t"),
                    0x20..=0x7e => out.push(b as char),
                    _ => out.push_str(&format!("\\x{b:02x}")),
                }
            }
            out.push('"');
        }
        Node::List(children) => {
            out.push('(');
            print_tree(children, out);
            out.push(')');
        }
    }
}

fn print_tree(tree: &[Node], out: &mut String) {
    for (i, node) in tree.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        print_node(node, out);
    }
}

fn to_text(tree: &[Node]) -> String {
    let mut out = String::new();
    print_tree(tree, &mut out);
    out
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop::collection::vec(any::<u8>(), 0..12).prop_map(Node::Scalar);
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Node::List)
    })
}

fn arb_tree() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(arb_node(), 0..6)
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(input in prop::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn prop_printed_tree_reparses(tree in arb_tree()) {
        let text = to_text(&tree);
        prop_assert_eq!(parse(text.as_bytes()).unwrap(), tree);
    }

    #[test]
    fn prop_bare_words_stay_scalars(words in prop::collection::vec("[a-z0-9._-]{1,10}", 0..8)) {
        let tree = parse(words.join(" ").as_bytes()).unwrap();
        prop_assert_eq!(tree.len(), words.len());
        for (node, word) in tree.iter().zip(&words) {
            prop_assert_eq!(node.as_str(), Some(word.as_str()));
        }
    }

    #[test]
    fn prop_list_and_bare_sequences_agree(nums in prop::collection::vec(any::<i64>(), 1..16)) {
        let bare = nums.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let listed = format!("({bare})");
        prop_assert_eq!(from_str::<Vec<i64>>(&bare).unwrap(), nums.clone());
        prop_assert_eq!(from_str::<Vec<i64>>(&listed).unwrap(), nums);
    }

    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert_eq!(from_str::<i32>(&n.to_string()).unwrap(), n);
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert_eq!(from_str::<u64>(&n.to_string()).unwrap(), n);
    }

    #[test]
    fn prop_i8_never_wraps(n in any::<i64>()) {
        let result = from_str::<i8>(&n.to_string());
        match i8::try_from(n) {
            Ok(expected) => prop_assert_eq!(result.unwrap(), expected),
            Err(_) => prop_assert!(result.is_err()),
        }
    }

    #[test]
    fn prop_fixed_arrays_truncate_and_pad(nums in prop::collection::vec(any::<i32>(), 0..8)) {
        let text = nums.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let array: [i32; 4] = from_str(&format!("({text})")).unwrap();
        for (i, value) in array.iter().enumerate() {
            prop_assert_eq!(*value, nums.get(i).copied().unwrap_or(0));
        }
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(from_str::<f64>(&f.to_string()).unwrap(), f);
    }
}
