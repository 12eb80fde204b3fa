//! Parameter extraction.
//!
//! Merges placeholder bindings with the URL, query items and fragment.
//! Insertion order is fixed and later writes win:
//! bindings → `url` → query items (left to right) → `fragment`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use url::Url;

use crate::routing::path::RoutePath;
use crate::routing::trie::Bindings;

/// Reserved key holding the URL that was resolved.
pub const URL_KEY: &str = "url";

/// Reserved key holding the fragment.
pub const FRAGMENT_KEY: &str = "fragment";

/// A single resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Url(Url),
}

impl ParamValue {
    pub fn as_str(&self) -> &str {
        match self {
            ParamValue::Text(text) => text,
            ParamValue::Url(url) => url.as_str(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Parameters handed to a destination after resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, ParamValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Value rendered as a string, whatever its kind.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).map(ParamValue::as_str)
    }

    /// The resolved URL, unless a query item overwrote the reserved key.
    pub fn url(&self) -> Option<&Url> {
        match self.get(URL_KEY) {
            Some(ParamValue::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn fragment(&self) -> Option<&str> {
        self.get_str(FRAGMENT_KEY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build the parameter mapping for `path` given the placeholder bindings.
pub fn extract_parameters(path: &RoutePath, bindings: Bindings) -> Parameters {
    let mut params = Parameters::new();

    for (name, value) in bindings {
        params.insert(name, ParamValue::Text(value));
    }

    params.insert(URL_KEY, ParamValue::Url(path.url().clone()));

    for (name, value) in path.query() {
        params.insert(name.clone(), ParamValue::Text(value.clone()));
    }

    if let Some(fragment) = path.fragment() {
        params.insert(FRAGMENT_KEY, ParamValue::Text(fragment.to_owned()));
    }

    params
}
