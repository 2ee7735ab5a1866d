//! lexkit-path: an Apache-Ant-style wildcard path pattern compiler and
//! matcher (C5).
//!
//! ```
//! use lexkit_path::PathPattern;
//!
//! let pattern = PathPattern::compile("src/**/*.rs").unwrap();
//! assert!(pattern.matches("src/lexkit/lexer.rs").unwrap());
//! assert!(!pattern.matches("src/lexkit/lexer.txt").unwrap());
//! ```

pub mod error;
pub mod glob;
pub mod node;
pub mod pattern;

pub use error::{PathError, PathResult};
pub use glob::glob_match;
pub use node::Node;
pub use pattern::PathPattern;
