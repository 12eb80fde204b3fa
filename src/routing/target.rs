//! Destination payloads stored in the route table.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::params::Parameters;
use crate::routing::table::RouteTable;

/// Opaque identifier for a destination type (screen, handler, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeHandle(String);

impl TypeHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Handle named after a Rust type.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_owned())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeHandle {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeHandle {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared callback invoked by the caller with resolved parameters.
///
/// Equality is identity: two callbacks are equal only if they share the
/// same allocation.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn(&Parameters) + Send + Sync>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Parameters) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, params: &Parameters) {
        (self.0)(params)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Route table with the crate's own payload types.
pub type DeepLinkTable = RouteTable<TypeHandle, Callback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ProfileScreen;

    #[test]
    fn test_type_handle_of() {
        let handle = TypeHandle::of::<ProfileScreen>();
        assert!(handle.name().ends_with("ProfileScreen"));
        assert_eq!(TypeHandle::from("Home"), TypeHandle::new("Home"));
    }

    #[test]
    fn test_callback_identity_and_call() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let cb = Callback::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let same = cb.clone();
        let other = Callback::new(|_| {});

        assert_eq!(cb, same);
        assert_ne!(cb, other);

        same.call(&Parameters::new());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
