//! Configuration options for sx parsing.
//!
//! By default the parser accepts lists nested to any depth, so deeply nested
//! input is bounded only by the call stack. Callers that parse untrusted input can
//! set a limit:
//!
//! ```rust
//! use serde_sx::{parse_with_options, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(2);
//! assert!(parse_with_options(b"(a (b))", &options).is_ok());
//! assert!(parse_with_options(b"(a (b (c)))", &options).is_err());
//! ```

/// Options that control how sx text is parsed.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Maximum list nesting depth, `None` for unlimited
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Creates options with default settings (no depth limit).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum list nesting depth.
    ///
    /// A top-level list has depth 1. Exceeding the limit is a syntax error.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
