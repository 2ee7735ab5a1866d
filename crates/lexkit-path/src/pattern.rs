//! PathPattern (C5): compiling and matching Apache-style wildcard path patterns.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{PathError, PathResult};
use crate::glob::glob_match;
use crate::node::Node;

/// A compiled, immutable path pattern.
///
/// Equality is structural (same node sequence in order). Hashing sums each
/// node's own hash rather than hashing the sequence, so two patterns that
/// are structurally equal always hash equal even if an implementation were
/// to reorder internally (they currently never do, but the contract is
/// independent of sequence hashing).
#[derive(Clone, Debug)]
pub struct PathPattern {
    nodes: Vec<Node>,
    case_insensitive: bool,
}

impl PathPattern {
    /// Compile `pattern`, splitting on `/`.
    ///
    /// - A segment of exactly `**` becomes [`Node::AnyDirectory`].
    /// - A segment containing `**` but not equal to it is a compile error.
    /// - An empty segment, or a trailing separator, is a compile error.
    /// - If the result is a single [`Node::File`], a synthetic
    ///   [`Node::AnyDirectory`] is prepended.
    pub fn compile(pattern: impl AsRef<str>) -> PathResult<Self> {
        Self::compile_with_case(pattern, false)
    }

    /// As [`Self::compile`], but segments match case-insensitively.
    pub fn compile_case_insensitive(pattern: impl AsRef<str>) -> PathResult<Self> {
        Self::compile_with_case(pattern, true)
    }

    fn compile_with_case(pattern: impl AsRef<str>, case_insensitive: bool) -> PathResult<Self> {
        let pattern = pattern.as_ref();
        if pattern.ends_with('/') {
            return Err(PathError::TrailingSeparator { pattern: pattern.to_string() });
        }
        let segments: Vec<&str> = pattern.split('/').collect();
        let last = segments.len() - 1;
        let mut nodes = Vec::with_capacity(segments.len());
        for (i, seg) in segments.iter().enumerate() {
            if seg.is_empty() {
                return Err(PathError::EmptySegment { pattern: pattern.to_string() });
            }
            if *seg == "**" {
                nodes.push(Node::AnyDirectory);
            } else if seg.contains("**") {
                return Err(PathError::MixedAnyDirectory { segment: seg.to_string() });
            } else if i == last {
                nodes.push(Node::File((*seg).to_string()));
            } else {
                nodes.push(Node::Directory((*seg).to_string()));
            }
        }
        if let [Node::File(_)] = nodes.as_slice() {
            nodes.insert(0, Node::AnyDirectory);
        }
        Ok(Self { nodes, case_insensitive })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Match `path` (no wildcards allowed in the target) against this pattern.
    pub fn matches(&self, path: &str) -> PathResult<bool> {
        let segments: Vec<&str> = path.split('/').collect();
        for seg in &segments {
            if seg.is_empty() {
                return Err(PathError::EmptyTargetSegment { path: path.to_string() });
            }
            if seg.contains('*') || seg.contains('?') {
                return Err(PathError::WildcardInTarget { path: path.to_string() });
            }
        }
        Ok(self.matches_segments(&segments))
    }

    fn node_matches(&self, node: &Node, segment: &str) -> bool {
        match node {
            Node::Directory(raw) | Node::File(raw) => glob_match(raw, segment, self.case_insensitive),
            Node::AnyDirectory => true,
        }
    }

    /// Two-index walk over pattern nodes and path segments (spec §4.4): at
    /// `ANY_DIRECTORY`, try the *next* node against the current segment
    /// before giving up on it - no backtracking beyond that single lookahead.
    fn matches_segments(&self, segments: &[&str]) -> bool {
        let mut ni = 0usize;
        let mut pi = 0usize;
        loop {
            match self.nodes.get(ni) {
                None => return pi == segments.len(),
                Some(Node::AnyDirectory) => match self.nodes.get(ni + 1) {
                    None => return true,
                    Some(next) => {
                        if pi >= segments.len() {
                            return false;
                        }
                        if self.node_matches(next, segments[pi]) {
                            ni += 1;
                        } else {
                            pi += 1;
                        }
                    }
                },
                Some(node) => {
                    if pi >= segments.len() || !self.node_matches(node, segments[pi]) {
                        return false;
                    }
                    ni += 1;
                    pi += 1;
                }
            }
        }
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<&str> = self.nodes.iter().map(Node::raw).collect();
        write!(f, "{}", rendered.join("/"))
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum: u64 = self
            .nodes
            .iter()
            .map(|n| {
                let mut h = DefaultHasher::new();
                n.hash(&mut h);
                h.finish()
            })
            .fold(0u64, u64::wrapping_add);
        state.write_u64(sum);
    }
}
