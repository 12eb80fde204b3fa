//! Pattern segment classification.
//!
//! A registered pattern segment is either literal text or a placeholder
//! written as `:name`. Concrete runtime paths are never classified; only
//! patterns go through [`PatternSegment::parse`].

use std::fmt;

/// Prefix marking a placeholder segment.
pub const PLACEHOLDER_PREFIX: char = ':';

/// One segment of a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSegment<'a> {
    /// Matches only an identical concrete segment.
    Literal(&'a str),
    /// Matches any concrete segment and binds it to the given name.
    Placeholder(&'a str),
}

impl<'a> PatternSegment<'a> {
    /// Classify a raw pattern segment.
    ///
    /// A bare `:` has no binding name and stays literal.
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_prefix(PLACEHOLDER_PREFIX) {
            Some(name) if !name.is_empty() => PatternSegment::Placeholder(name),
            _ => PatternSegment::Literal(raw),
        }
    }
}

impl fmt::Display for PatternSegment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Literal(text) => f.write_str(text),
            PatternSegment::Placeholder(name) => write!(f, "{}{}", PLACEHOLDER_PREFIX, name),
        }
    }
}
