//! Radix tree node implementation.
//!
//! This module provides the core radix tree (compressed trie) data structure
//! used for efficient path matching.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::params::Params;
use crate::RouterError;

/// Type of path segment in the radix tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Static path segment (e.g., "users", "api")
    Static,
    /// Named parameter (e.g., "{id}", "{userId}")
    Param(String),
    /// Catch-all wildcard (e.g., "*path")
    Wildcard(String),
}

/// A node in the radix tree.
///
/// Each node represents a path segment and may have children for
/// sub-paths. Nodes at route boundaries carry the registered value.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The path segment this node represents
    pub segment: String,

    /// The kind of segment (static, param, or wildcard)
    pub kind: SegmentKind,

    /// Value for this node (if it's a route endpoint)
    pub value: Option<T>,

    /// Static children, sorted by segment for binary search
    pub static_children: Vec<Node<T>>,

    /// Parameter child (at most one per node)
    pub param_child: Option<Box<Node<T>>>,

    /// Wildcard child (at most one per node, must be leaf)
    pub wildcard_child: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn with_kind(segment: String, kind: SegmentKind) -> Self {
        Self {
            segment,
            kind,
            value: None,
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
        }
    }

    /// Creates a new static node.
    #[must_use]
    pub fn new_static(segment: impl Into<String>) -> Self {
        Self::with_kind(segment.into(), SegmentKind::Static)
    }

    /// Creates a new parameter node.
    #[must_use]
    pub fn new_param(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_kind(format!("{{{name}}}"), SegmentKind::Param(name))
    }

    /// Creates a new wildcard node.
    #[must_use]
    pub fn new_wildcard(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_kind(format!("*{name}"), SegmentKind::Wildcard(name))
    }

    /// Creates a root node for the tree.
    #[must_use]
    pub fn root() -> Self {
        Self::new_static("")
    }

    /// Inserts a route into the tree.
    ///
    /// Returns the value previously stored for the same pattern, if any.
    ///
    /// # Errors
    ///
    /// Fails if the pattern puts a wildcard before the last segment or names
    /// a parameter differently from an already registered pattern.
    pub fn insert(&mut self, path: &str, value: T) -> Result<Option<T>, RouterError> {
        let segments = Self::parse_path(path)?;
        self.insert_segments(path, &segments, value)
    }

    /// Parses a path into segments.
    ///
    /// A `{name:constraint}` parameter is registered under `name`; the
    /// constraint is not evaluated by this matcher.
    pub(crate) fn parse_path(path: &str) -> Result<Vec<(String, SegmentKind)>, RouterError> {
        let segments: Vec<(String, SegmentKind)> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(inner) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    let name = inner.split_once(':').map_or(inner, |(name, _)| name);
                    (s.to_string(), SegmentKind::Param(name.to_string()))
                } else if let Some(name) = s.strip_prefix('*') {
                    (s.to_string(), SegmentKind::Wildcard(name.to_string()))
                } else {
                    (s.to_string(), SegmentKind::Static)
                }
            })
            .collect();

        let last = segments.len().saturating_sub(1);
        if segments
            .iter()
            .enumerate()
            .any(|(i, (_, kind))| matches!(kind, SegmentKind::Wildcard(_)) && i != last)
        {
            return Err(RouterError::InvalidWildcard {
                pattern: path.to_string(),
            });
        }

        Ok(segments)
    }

    /// Inserts segments into the tree recursively.
    fn insert_segments(
        &mut self,
        pattern: &str,
        segments: &[(String, SegmentKind)],
        value: T,
    ) -> Result<Option<T>, RouterError> {
        let Some(((segment, kind), remaining)) = segments.split_first() else {
            return Ok(self.value.replace(value));
        };

        match kind {
            SegmentKind::Static => {
                let index = match self
                    .static_children
                    .binary_search_by(|c| c.segment.as_str().cmp(segment))
                {
                    Ok(index) => index,
                    Err(index) => {
                        // Keep sorted for binary search
                        self.static_children.insert(index, Node::new_static(segment));
                        index
                    }
                };
                self.static_children[index].insert_segments(pattern, remaining, value)
            }
            SegmentKind::Param(name) => {
                let child = self
                    .param_child
                    .get_or_insert_with(|| Box::new(Node::new_param(name)));
                if let SegmentKind::Param(existing) = &child.kind {
                    if existing != name {
                        return Err(RouterError::ConflictingParameter {
                            pattern: pattern.to_string(),
                            existing: existing.clone(),
                            new: name.clone(),
                        });
                    }
                }
                child.insert_segments(pattern, remaining, value)
            }
            SegmentKind::Wildcard(name) => {
                let child = self
                    .wildcard_child
                    .get_or_insert_with(|| Box::new(Node::new_wildcard(name)));
                if let SegmentKind::Wildcard(existing) = &child.kind {
                    if existing != name {
                        return Err(RouterError::ConflictingParameter {
                            pattern: pattern.to_string(),
                            existing: existing.clone(),
                            new: name.clone(),
                        });
                    }
                }
                Ok(child.value.replace(value))
            }
        }
    }

    /// Matches a path against the tree.
    ///
    /// Segments are percent-decoded before matching, so static segments and
    /// captured values both see the decoded path. Returns the stored value
    /// and extracted parameters if found.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<(&T, Params)> {
        let decoded: Vec<Cow<'_, str>> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(AsRef::as_ref).collect();
        let mut params = Params::new();
        let value = self.match_segments(&segments, &mut params)?;
        Some((value, params))
    }

    /// Matches segments against the tree recursively.
    fn match_segments<'a>(&'a self, segments: &[&str], params: &mut Params) -> Option<&'a T> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.value.as_ref();
        };

        // Try static match first (highest priority)
        if let Some(child) = self.find_static_child(segment) {
            if let Some(result) = child.match_segments(remaining, params) {
                return Some(result);
            }
        }

        // Try parameter match
        if let Some(child) = &self.param_child {
            if let SegmentKind::Param(name) = &child.kind {
                let mark = params.len();
                params.push(name.clone(), *segment);
                if let Some(result) = child.match_segments(remaining, params) {
                    return Some(result);
                }
                params.truncate(mark);
            }
        }

        // Try wildcard match (lowest priority, catches all remaining)
        if let Some(child) = &self.wildcard_child {
            if let SegmentKind::Wildcard(name) = &child.kind {
                if let Some(value) = child.value.as_ref() {
                    params.push(name.clone(), segments.join("/"));
                    return Some(value);
                }
            }
        }

        None
    }

    /// Finds a static child by segment using binary search.
    fn find_static_child(&self, segment: &str) -> Option<&Node<T>> {
        self.static_children
            .binary_search_by(|c| c.segment.as_str().cmp(segment))
            .ok()
            .map(|i| &self.static_children[i])
    }
}
