use serde::Deserialize;
use serde_sx::{from_nodes, impl_deserialize_via_decode, parse, sx, Decode, Error, Node};

#[test]
fn test_sx_macro_empty() {
    let tree = sx!();
    assert!(tree.is_empty());
}

#[test]
fn test_sx_macro_identifiers() {
    let tree = sx!(hello world);
    assert_eq!(tree, vec![Node::scalar("hello"), Node::scalar("world")]);
}

#[test]
fn test_sx_macro_literals() {
    let tree = sx!("hello world" 42 3.5 true 'x');
    assert_eq!(
        tree,
        vec![
            Node::scalar("hello world"),
            Node::scalar("42"),
            Node::scalar("3.5"),
            Node::scalar("true"),
            Node::scalar("x"),
        ]
    );

    let negative = sx!("-123");
    assert_eq!(negative, vec![Node::scalar("-123")]);
}

#[test]
fn test_sx_macro_lists() {
    let tree = sx!(() (a) (a (b ())));
    assert_eq!(tree, parse(b"() (a) (a (b ()))").unwrap());
    assert_eq!(tree[0], Node::List(vec![]));
}

#[test]
fn test_sx_macro_matches_parser() {
    let tree = sx!(
        (name "web server")
        (ports 8080 9000)
        (env (LANG "C.UTF-8") (MODE production))
    );
    let parsed = parse(
        br#"(name "web server") (ports 8080 9000) (env (LANG C.UTF-8) (MODE production))"#,
    )
    .unwrap();
    assert_eq!(tree, parsed);
}

#[test]
fn test_sx_macro_binds() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Server {
        name: String,
        ports: Vec<u16>,
    }

    let tree = sx!((name web) (ports 80 443));
    let server: Server = from_nodes(&tree).unwrap();
    assert_eq!(
        server,
        Server {
            name: "web".to_string(),
            ports: vec![80, 443],
        }
    );
}

/// Counts scalar nodes anywhere in the tree.
struct ScalarCount(usize);

fn count(tree: &[Node]) -> usize {
    tree.iter()
        .map(|node| match node {
            Node::Scalar(_) => 1,
            Node::List(children) => count(children),
        })
        .sum()
}

impl Decode for ScalarCount {
    fn decode(tree: &[Node]) -> serde_sx::Result<Self> {
        Ok(ScalarCount(count(tree)))
    }
}

/// A `key=value` pair written as a single scalar.
#[derive(Debug, PartialEq)]
struct Assignment {
    key: String,
    value: String,
}

impl Decode for Assignment {
    fn decode(tree: &[Node]) -> serde_sx::Result<Self> {
        let text = match tree {
            [node] => node.as_str().ok_or(Error::InvalidUtf8)?,
            _ => return Err(Error::ScalarExpected),
        };
        let (key, value) = text
            .split_once('=')
            .ok_or_else(|| Error::custom(format!("missing '=' in {text:?}")))?;
        Ok(Assignment {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl_deserialize_via_decode!(ScalarCount, Assignment);

#[test]
fn test_decode_macro_whole_tree() {
    let counted: ScalarCount = serde_sx::from_str("a (b c) ((d) ())").unwrap();
    assert_eq!(counted.0, 4);
}

#[test]
fn test_decode_macro_in_containers() {
    let pairs: Vec<Assignment> = serde_sx::from_str("a=1 b=2").unwrap();
    assert_eq!(
        pairs,
        vec![
            Assignment {
                key: "a".into(),
                value: "1".into()
            },
            Assignment {
                key: "b".into(),
                value: "2".into()
            },
        ]
    );

    let err = serde_sx::from_str::<Vec<Assignment>>("a=1 oops").unwrap_err();
    assert_eq!(err.to_string(), "missing '=' in \"oops\"");
}

#[test]
fn test_decode_with_field_attribute() {
    #[derive(Deserialize)]
    struct Job {
        #[serde(deserialize_with = "serde_sx::decode::deserialize")]
        setting: Assignment,
        name: String,
    }

    let job: Job = serde_sx::from_str("(name build) (setting jobs=4)").unwrap();
    assert_eq!(job.name, "build");
    assert_eq!(job.setting.value, "4");
}
