//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     pattern string
//!     → path.rs (RoutePath: segments, query, fragment)
//!     → table.rs (structural lookup, read-modify-write of the slot pair)
//!     → trie.rs (insert / prune)
//!
//! Resolution:
//!     concrete link
//!     → path.rs (RoutePath)
//!     → trie.rs (nearest match, placeholder bindings)
//!     → params.rs (merge url, query items, fragment)
//!     → Resolution { matched, target, parameters }
//! ```
//!
//! # Design Decisions
//! - One tree, two independent slots per node (type handle, callback)
//! - Most specific literal match wins over a placeholder; no backtracking
//! - Deterministic: same table and input always resolve the same way
//! - Not found is an empty result, never an error

pub mod manifest;
pub mod params;
pub mod path;
pub mod segment;
pub mod table;
pub mod target;
pub mod trie;

pub use params::{extract_parameters, ParamValue, Parameters, FRAGMENT_KEY, URL_KEY};
pub use path::{ParseOptions, RoutePath, DEFAULT_BASE_URL};
pub use segment::PatternSegment;
pub use table::{Resolution, RouteEntry, RouteTable, Slot, Slots};
pub use target::{Callback, DeepLinkTable, TypeHandle};
pub use trie::{Bindings, NearestMatch, SegmentTrie};
