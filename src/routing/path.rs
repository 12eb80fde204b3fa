//! Route path model and URL parsing.
//!
//! # Responsibilities
//! - Split a URL into path segments, query items and fragment
//! - Resolve relative inputs (`/item/9?x=1`) against a base URL
//! - Optionally treat the host of a custom-scheme link as the first segment
//!
//! # Design Decisions
//! - Parsing is delegated to the `url` crate
//! - Empty segments are dropped, so `/a//b/` and `/a/b` are the same path
//! - Segments are kept percent-encoded; patterns and paths go through the
//!   same parser, so both sides compare in the same form. The trie decodes
//!   a segment only when binding it to a placeholder

use std::fmt;

use url::Url;

use crate::error::{RouteError, RouteResult};

/// Base used to resolve inputs that carry no scheme.
pub const DEFAULT_BASE_URL: &str = "route://localhost/";

/// How raw input strings become [`RoutePath`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    base: Option<Url>,
    host_as_segment: bool,
}

impl ParseOptions {
    /// Build options with a custom base URL.
    pub fn new(base_url: &str, host_as_segment: bool) -> RouteResult<Self> {
        let base = Url::parse(base_url).map_err(|e| RouteError::InvalidBaseUrl {
            input: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(RouteError::InvalidBaseUrl {
                input: base_url.to_owned(),
                reason: "cannot be a base".to_owned(),
            });
        }
        Ok(Self {
            base: Some(base),
            host_as_segment,
        })
    }

    /// Treat the host of absolute URLs as the leading path segment.
    pub fn with_host_as_segment(mut self, enabled: bool) -> Self {
        self.host_as_segment = enabled;
        self
    }

    pub fn host_as_segment(&self) -> bool {
        self.host_as_segment
    }

    fn base(&self) -> RouteResult<Url> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => Url::parse(DEFAULT_BASE_URL).map_err(|source| RouteError::InvalidUrl {
                input: DEFAULT_BASE_URL.to_owned(),
                source,
            }),
        }
    }
}

/// A URL broken into the pieces the router works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    url: Url,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    fragment: Option<String>,
}

impl RoutePath {
    /// Assemble a path from parts produced by an external parser.
    pub fn new(
        url: Url,
        segments: Vec<String>,
        query: Vec<(String, String)>,
        fragment: Option<String>,
    ) -> Self {
        Self {
            url,
            segments: segments.into_iter().filter(|s| !s.is_empty()).collect(),
            query,
            fragment,
        }
    }

    /// Parse with default options.
    pub fn parse(input: &str) -> RouteResult<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parse an absolute URL or a path relative to the configured base.
    pub fn parse_with(input: &str, options: &ParseOptions) -> RouteResult<Self> {
        let invalid = |source: url::ParseError| RouteError::InvalidUrl {
            input: input.to_owned(),
            source,
        };

        match Url::parse(input) {
            Ok(url) => Ok(Self::from_url(url, options.host_as_segment)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let url = options.base()?.join(input).map_err(invalid)?;
                // The base host is an implementation detail, never a segment.
                Ok(Self::from_url(url, false))
            }
            Err(e) => Err(invalid(e)),
        }
    }

    /// Split an already parsed URL.
    pub fn from_url(url: Url, host_as_segment: bool) -> Self {
        let mut segments = Vec::new();
        if host_as_segment {
            if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
                segments.push(host.to_owned());
            }
        }
        if let Some(parts) = url.path_segments() {
            segments.extend(parts.filter(|s| !s.is_empty()).map(str::to_owned));
        }

        let query = url
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();
        let fragment = url.fragment().filter(|f| !f.is_empty()).map(str::to_owned);

        Self {
            url,
            segments,
            query,
            fragment,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
