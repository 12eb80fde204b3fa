//! Route table with two independent slots per pattern.
//!
//! # Responsibilities
//! - Register and unregister type handles and callbacks per pattern
//! - Keep the sibling slot intact on every read-modify-write
//! - Prune the trie once both slots of a pattern are empty
//! - Resolve concrete paths and attach url, query and fragment parameters
//!
//! # Design Decisions
//! - One `RwLock` around the whole trie, held for the full operation, so
//!   concurrent writes to sibling slots of one pattern never lose either slot
//! - Lock poisoning is recovered; the trie is never left half-mutated
//! - Explicit instance, shared by reference or `Arc`, no global table

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::error::RouteResult;
use crate::observability::metrics::{self, ResolutionOutcome};
use crate::routing::params::{extract_parameters, Parameters};
use crate::routing::path::{ParseOptions, RoutePath};
use crate::routing::trie::SegmentTrie;

/// Which half of a pattern's payload an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Type,
    Callback,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Type => "type",
            Slot::Callback => "callback",
        }
    }
}

/// Payload stored at a trie node. At least one slot is filled while stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots<H, C> {
    pub type_slot: Option<H>,
    pub callback_slot: Option<C>,
}

impl<H, C> Slots<H, C> {
    fn empty() -> Self {
        Self {
            type_slot: None,
            callback_slot: None,
        }
    }

    fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::Type => self.type_slot = None,
            Slot::Callback => self.callback_slot = None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.type_slot.is_none() && self.callback_slot.is_none()
    }
}

/// Outcome of resolving a concrete path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<T> {
    /// Whether a registered pattern matched the path.
    pub matched: bool,
    /// The requested slot of the matched pattern. May be empty even when
    /// `matched` is true.
    pub target: Option<T>,
    /// Bindings, url, query items and fragment. Present even without a match.
    pub parameters: Parameters,
}

/// A registered pattern and its slots.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry<H, C> {
    pub pattern: String,
    pub slots: Slots<H, C>,
}

/// Thread-safe routing table.
#[derive(Debug)]
pub struct RouteTable<H, C> {
    trie: RwLock<SegmentTrie<Slots<H, C>>>,
    options: ParseOptions,
}

impl<H, C> Default for RouteTable<H, C> {
    fn default() -> Self {
        Self::with_options(ParseOptions::default())
    }
}

impl<H, C> RouteTable<H, C> {
    /// Create an empty table using default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table that parses input with `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            trie: RwLock::new(SegmentTrie::new()),
            options,
        }
    }

    /// Parse input with this table's options.
    pub fn parse(&self, input: &str) -> RouteResult<RoutePath> {
        RoutePath::parse_with(input, &self.options)
    }

    fn read(&self) -> RwLockReadGuard<'_, SegmentTrie<Slots<H, C>>> {
        self.trie.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SegmentTrie<Slots<H, C>>> {
        self.trie.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, path: &RoutePath, slot: Slot, fill: impl FnOnce(&mut Slots<H, C>)) -> bool {
        let mut trie = self.write();
        let accepted = match trie.pattern_payload_mut(path.segments()) {
            Some(slots) => {
                fill(slots);
                true
            }
            None => {
                let mut slots = Slots::empty();
                fill(&mut slots);
                trie.insert(path.segments(), slots)
            }
        };
        let routes = trie.len();
        drop(trie);

        if accepted {
            tracing::debug!(path = %path, slot = slot.as_str(), "Route registered");
        } else {
            tracing::warn!(path = %path, slot = slot.as_str(), "Route registration rejected");
        }
        metrics::record_registration(slot, accepted);
        metrics::record_route_count(routes);
        accepted
    }

    fn unregister(&self, path: &RoutePath, slot: Slot) {
        let mut trie = self.write();
        let Some(slots) = trie.pattern_payload_mut(path.segments()) else {
            tracing::debug!(path = %path, slot = slot.as_str(), "Unregister of unknown route ignored");
            metrics::record_unregistration(slot, false);
            return;
        };

        slots.clear(slot);
        let pruned = slots.is_empty();
        if pruned {
            trie.remove(path.segments());
        }
        let routes = trie.len();
        drop(trie);

        tracing::debug!(path = %path, slot = slot.as_str(), pruned, "Route unregistered");
        metrics::record_unregistration(slot, true);
        metrics::record_route_count(routes);
    }

    fn resolve<T>(
        &self,
        path: &RoutePath,
        slot: Slot,
        pick: impl FnOnce(&Slots<H, C>) -> Option<T>,
    ) -> Resolution<T> {
        let trie = self.read();
        let (matched, target, bindings) = match trie.find_nearest(path.segments()) {
            Some(found) => (true, pick(found.payload), found.bindings),
            None => (false, None, trie.matched_pattern(path.segments())),
        };
        drop(trie);

        let outcome = match (matched, target.is_some()) {
            (true, true) => ResolutionOutcome::Hit,
            (true, false) => ResolutionOutcome::EmptySlot,
            (false, _) => ResolutionOutcome::Miss,
        };
        tracing::trace!(path = %path, slot = slot.as_str(), outcome = outcome.as_str(), "Route resolved");
        metrics::record_resolution(slot, outcome);

        Resolution {
            matched,
            target,
            parameters: extract_parameters(path, bindings),
        }
    }

    /// Whether the structural walk finds a node for `path`.
    pub fn contains_pattern(&self, path: &RoutePath) -> bool {
        self.read().contains_pattern(path.segments())
    }

    /// Number of patterns carrying at least one slot.
    pub fn route_count(&self) -> usize {
        self.read().len()
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.read().node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<H: Clone, C: Clone> RouteTable<H, C> {
    /// Register a type handle at `path`, keeping any registered callback.
    pub fn register_type(&self, path: &RoutePath, handle: H) -> bool {
        self.register(path, Slot::Type, |slots| slots.type_slot = Some(handle))
    }

    /// Register a callback at `path`, keeping any registered type handle.
    pub fn register_callback(&self, path: &RoutePath, callback: C) -> bool {
        self.register(path, Slot::Callback, |slots| slots.callback_slot = Some(callback))
    }

    /// Clear the type slot at `path`. Unknown paths are ignored.
    pub fn unregister_type(&self, path: &RoutePath) {
        self.unregister(path, Slot::Type)
    }

    /// Clear the callback slot at `path`. Unknown paths are ignored.
    pub fn unregister_callback(&self, path: &RoutePath) {
        self.unregister(path, Slot::Callback)
    }

    /// Resolve `path` to the type handle of the nearest matching pattern.
    pub fn resolve_type(&self, path: &RoutePath) -> Resolution<H> {
        self.resolve(path, Slot::Type, |slots| slots.type_slot.clone())
    }

    /// Resolve `path` to the callback of the nearest matching pattern.
    pub fn resolve_callback(&self, path: &RoutePath) -> Resolution<C> {
        self.resolve(path, Slot::Callback, |slots| slots.callback_slot.clone())
    }

    /// Every registered pattern with a copy of its slots, sorted by pattern.
    pub fn routes(&self) -> Vec<RouteEntry<H, C>> {
        self.read()
            .entries()
            .into_iter()
            .map(|(pattern, slots)| RouteEntry {
                pattern,
                slots: slots.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::params::URL_KEY;

    type Table = RouteTable<&'static str, u32>;

    fn path(input: &str) -> RoutePath {
        RoutePath::parse(input).unwrap()
    }

    #[test]
    fn test_slot_independence() {
        let table = Table::new();
        assert!(table.register_type(&path("/user/:id"), "Profile"));
        assert!(table.register_callback(&path("/user/:id"), 7));

        let resolved = table.resolve_type(&path("/user/1"));
        assert_eq!(resolved.target, Some("Profile"));
        assert_eq!(table.resolve_callback(&path("/user/1")).target, Some(7));

        table.unregister_callback(&path("/user/:id"));
        assert_eq!(table.resolve_type(&path("/user/1")).target, Some("Profile"));

        let resolved = table.resolve_callback(&path("/user/1"));
        assert!(resolved.matched);
        assert_eq!(resolved.target, None);
    }

    #[test]
    fn test_prune_on_empty() {
        let table = Table::new();
        table.register_type(&path("/shop"), "Shop");
        table.register_callback(&path("/shop/cart/checkout"), 1);
        assert!(table.contains_pattern(&path("/shop/cart")));

        table.unregister_callback(&path("/shop/cart/checkout"));
        assert!(!table.contains_pattern(&path("/shop/cart/checkout")));
        assert!(!table.contains_pattern(&path("/shop/cart")));
        assert_eq!(table.resolve_type(&path("/shop")).target, Some("Shop"));
        assert_eq!(table.node_count(), 2);
    }

    #[test]
    fn test_unregister_keeps_node_for_sibling_slot() {
        let table = Table::new();
        table.register_type(&path("/a"), "A");
        table.register_callback(&path("/a"), 1);

        table.unregister_type(&path("/a"));
        assert!(table.contains_pattern(&path("/a")));
        assert_eq!(table.resolve_callback(&path("/a")).target, Some(1));
        assert_eq!(table.resolve_type(&path("/a")).target, None);

        table.unregister_callback(&path("/a"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let table = Table::new();
        table.register_type(&path("/user/:id"), "Profile");

        table.unregister_type(&path("/user/42"));
        table.unregister_callback(&path("/nowhere"));
        assert_eq!(table.resolve_type(&path("/user/42")).target, Some("Profile"));
        assert_eq!(table.route_count(), 1);
    }

    #[test]
    fn test_resolution_without_match_keeps_parameters() {
        let table = Table::new();
        let input = path("/missing?x=1#frag");
        let resolved = table.resolve_type(&input);

        assert!(!resolved.matched);
        assert_eq!(resolved.target, None);
        assert_eq!(resolved.parameters.get_str("x"), Some("1"));
        assert_eq!(resolved.parameters.fragment(), Some("frag"));
        assert_eq!(resolved.parameters.url(), Some(input.url()));
        assert!(resolved.parameters.get(URL_KEY).is_some());
    }

    #[test]
    fn test_resolution_at_intermediate_node_is_miss() {
        let table = Table::new();
        table.register_type(&path("/user/:id/posts"), "Posts");

        let resolved = table.resolve_type(&path("/user/5"));
        assert!(!resolved.matched);
        // The walk consumed the whole path, so the binding is still reported.
        assert_eq!(resolved.parameters.get_str("id"), Some("5"));
    }

    #[test]
    fn test_reregistration_overwrites_slot() {
        let table = Table::new();
        assert!(table.register_type(&path("/home"), "Old"));
        assert!(table.register_type(&path("/home"), "New"));
        assert_eq!(table.resolve_type(&path("/home")).target, Some("New"));
        assert_eq!(table.node_count(), 2);
    }

    #[test]
    fn test_empty_path_rejected() {
        let table = Table::new();
        assert!(!table.register_type(&path("/"), "Root"));
        assert!(!table.register_callback(&path(""), 1));
        assert!(table.is_empty());
    }

    #[test]
    fn test_routes_listing() {
        let table = Table::new();
        table.register_type(&path("/b"), "B");
        table.register_callback(&path("/a/:id"), 3);

        let routes = table.routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].pattern, "/a/:id");
        assert_eq!(routes[0].slots.callback_slot, Some(3));
        assert_eq!(routes[1].pattern, "/b");
        assert_eq!(routes[1].slots.type_slot, Some("B"));
    }

    #[test]
    fn test_table_parse_uses_options() {
        let options = ParseOptions::default().with_host_as_segment(true);
        let table: Table = RouteTable::with_options(options);

        let pattern = table.parse("myapp://user/:id").unwrap();
        assert!(table.register_type(&pattern, "Profile"));

        let resolved = table.resolve_type(&table.parse("myapp://user/9").unwrap());
        assert_eq!(resolved.target, Some("Profile"));
        assert_eq!(resolved.parameters.get_str("id"), Some("9"));
    }
}
