//! Segment trie.
//!
//! # Responsibilities
//! - Store payloads keyed by pattern segments
//! - Locate the node that represents a pattern (structural walk)
//! - Resolve a concrete path to the nearest registered payload (value walk)
//! - Remove payloads and prune nodes that no longer carry anything
//!
//! # Design Decisions
//! - Literal children live in a map; the single placeholder child lives on
//!   its own edge so it never collides with a literal of the same text
//! - The structural walk and the value walk are separate functions
//! - The value walk is greedy: literal first, placeholder second, no backtracking
//! - Insert replaces the payload; merging slots is the table's job
//! - Literals compare in encoded form; bound placeholder values are decoded
//! - The payload count is maintained on insert/remove, never recomputed

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::routing::segment::PatternSegment;

/// Placeholder name → concrete segment value, percent-decoded.
pub type Bindings = HashMap<String, String>;

/// Result of a successful value walk.
#[derive(Debug)]
pub struct NearestMatch<'t, T> {
    /// Payload stored at the resolved node.
    pub payload: &'t T,
    /// Placeholder bindings collected along the walk.
    pub bindings: Bindings,
}

#[derive(Debug)]
struct Node<T> {
    payload: Option<T>,
    literals: HashMap<String, Node<T>>,
    placeholder: Option<Box<PlaceholderEdge<T>>>,
}

#[derive(Debug)]
struct PlaceholderEdge<T> {
    name: String,
    node: Node<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            payload: None,
            literals: HashMap::new(),
            placeholder: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.literals.is_empty() && self.placeholder.is_none()
    }

    fn is_prunable(&self) -> bool {
        self.payload.is_none() && self.is_leaf()
    }

    fn pattern_child(&self, segment: PatternSegment<'_>) -> Option<&Node<T>> {
        match segment {
            PatternSegment::Literal(text) => self.literals.get(text),
            PatternSegment::Placeholder(name) => self
                .placeholder
                .as_deref()
                .filter(|edge| edge.name == name)
                .map(|edge| &edge.node),
        }
    }

    fn pattern_child_mut(&mut self, segment: PatternSegment<'_>) -> Option<&mut Node<T>> {
        match segment {
            PatternSegment::Literal(text) => self.literals.get_mut(text),
            PatternSegment::Placeholder(name) => self
                .placeholder
                .as_deref_mut()
                .filter(|edge| edge.name == name)
                .map(|edge| &mut edge.node),
        }
    }

    fn count(&self) -> usize {
        let placeholder = self.placeholder.as_ref().map_or(0, |edge| edge.node.count());
        1 + placeholder + self.literals.values().map(Node::count).sum::<usize>()
    }

    fn collect<'t>(&'t self, prefix: &mut Vec<String>, out: &mut Vec<(String, &'t T)>) {
        if let Some(payload) = &self.payload {
            out.push((format!("/{}", prefix.join("/")), payload));
        }
        for (text, child) in &self.literals {
            prefix.push(text.clone());
            child.collect(prefix, out);
            prefix.pop();
        }
        if let Some(edge) = &self.placeholder {
            prefix.push(PatternSegment::Placeholder(&edge.name).to_string());
            edge.node.collect(prefix, out);
            prefix.pop();
        }
    }
}

/// Prefix tree keyed by URL path segments.
#[derive(Debug)]
pub struct SegmentTrie<T> {
    root: Node<T>,
    payloads: usize,
}

impl<T> Default for SegmentTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SegmentTrie<T> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            payloads: 0,
        }
    }

    /// Store `payload` at the node for `pattern`, creating nodes as needed.
    ///
    /// Returns `false` for an empty pattern, or when a placeholder segment
    /// names a different binding than the placeholder already registered at
    /// that position.
    pub fn insert<S: AsRef<str>>(&mut self, pattern: &[S], payload: T) -> bool {
        if pattern.is_empty() {
            return false;
        }

        // A conflict can only happen on a pre-existing node, so a rejected
        // insert never leaves freshly created nodes behind.
        let mut node = &mut self.root;
        for raw in pattern {
            node = match PatternSegment::parse(raw.as_ref()) {
                PatternSegment::Literal(text) => {
                    node.literals.entry(text.to_owned()).or_insert_with(Node::new)
                }
                PatternSegment::Placeholder(name) => {
                    let edge = node.placeholder.get_or_insert_with(|| {
                        Box::new(PlaceholderEdge {
                            name: name.to_owned(),
                            node: Node::new(),
                        })
                    });
                    if edge.name != name {
                        tracing::warn!(
                            existing = %edge.name,
                            requested = %name,
                            "Placeholder conflict, registration rejected"
                        );
                        return false;
                    }
                    &mut edge.node
                }
            };
        }

        if node.payload.replace(payload).is_none() {
            self.payloads += 1;
        }
        true
    }

    fn pattern_node<S: AsRef<str>>(&self, pattern: &[S]) -> Option<&Node<T>> {
        pattern.iter().try_fold(&self.root, |node, raw| {
            node.pattern_child(PatternSegment::parse(raw.as_ref()))
        })
    }

    fn pattern_node_mut<S: AsRef<str>>(&mut self, pattern: &[S]) -> Option<&mut Node<T>> {
        pattern.iter().try_fold(&mut self.root, |node, raw| {
            node.pattern_child_mut(PatternSegment::parse(raw.as_ref()))
        })
    }

    /// Whether a node exists for `pattern` under the structural walk.
    ///
    /// The node may be an intermediate one without a payload.
    pub fn contains_pattern<S: AsRef<str>>(&self, pattern: &[S]) -> bool {
        self.pattern_node(pattern).is_some()
    }

    /// Payload stored for exactly `pattern`.
    ///
    /// Placeholders are not applied: `:id` only follows a placeholder edge
    /// registered as `:id`, and a literal only follows the literal child.
    pub fn pattern_payload<S: AsRef<str>>(&self, pattern: &[S]) -> Option<&T> {
        self.pattern_node(pattern)?.payload.as_ref()
    }

    /// Mutable access to the payload stored for exactly `pattern`.
    pub fn pattern_payload_mut<S: AsRef<str>>(&mut self, pattern: &[S]) -> Option<&mut T> {
        self.pattern_node_mut(pattern)?.payload.as_mut()
    }

    fn value_walk<S: AsRef<str>>(&self, path: &[S]) -> Option<(&Node<T>, Bindings)> {
        let mut bindings = Bindings::new();
        let mut node = &self.root;
        for raw in path {
            let segment = raw.as_ref();
            node = match node.literals.get(segment) {
                Some(child) => child,
                None => {
                    let edge = node.placeholder.as_deref()?;
                    let value = percent_decode_str(segment).decode_utf8_lossy();
                    bindings.insert(edge.name.clone(), value.into_owned());
                    &edge.node
                }
            };
        }
        Some((node, bindings))
    }

    /// Resolve a concrete path to the nearest registered payload.
    ///
    /// Fails if a segment has neither a literal nor a placeholder child, or if
    /// the node reached has no payload.
    pub fn find_nearest<S: AsRef<str>>(&self, path: &[S]) -> Option<NearestMatch<'_, T>> {
        let (node, bindings) = self.value_walk(path)?;
        let payload = node.payload.as_ref()?;
        Some(NearestMatch { payload, bindings })
    }

    /// Placeholder bindings for a concrete path.
    ///
    /// Empty when the walk cannot consume the whole path.
    pub fn matched_pattern<S: AsRef<str>>(&self, path: &[S]) -> Bindings {
        self.value_walk(path)
            .map(|(_, bindings)| bindings)
            .unwrap_or_default()
    }

    /// Remove the payload for `pattern` and prune nodes left empty.
    pub fn remove<S: AsRef<str>>(&mut self, pattern: &[S]) -> Option<T> {
        let removed = Self::remove_at(&mut self.root, pattern);
        if removed.is_some() {
            self.payloads -= 1;
        }
        removed
    }

    fn remove_at<S: AsRef<str>>(node: &mut Node<T>, pattern: &[S]) -> Option<T> {
        let Some((raw, rest)) = pattern.split_first() else {
            return node.payload.take();
        };

        match PatternSegment::parse(raw.as_ref()) {
            PatternSegment::Literal(text) => {
                let child = node.literals.get_mut(text)?;
                let removed = Self::remove_at(child, rest);
                if child.is_prunable() {
                    node.literals.remove(text);
                }
                removed
            }
            PatternSegment::Placeholder(name) => {
                let edge = node
                    .placeholder
                    .as_deref_mut()
                    .filter(|edge| edge.name == name)?;
                let removed = Self::remove_at(&mut edge.node, rest);
                if edge.node.is_prunable() {
                    node.placeholder = None;
                }
                removed
            }
        }
    }

    /// Number of nodes carrying a payload.
    pub fn len(&self) -> usize {
        self.payloads
    }

    /// Total node count, root included.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// True when the trie holds nothing but an empty root.
    pub fn is_empty(&self) -> bool {
        self.root.is_prunable()
    }

    /// Every stored payload with its pattern, sorted by pattern.
    pub fn entries(&self) -> Vec<(String, &T)> {
        let mut out = Vec::new();
        self.root.collect(&mut Vec::new(), &mut out);
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
