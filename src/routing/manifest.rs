//! Building a route table from a route manifest.

use crate::config::schema::RouterConfig;
use crate::error::{RouteError, RouteResult};
use crate::routing::table::RouteTable;
use crate::routing::target::TypeHandle;

impl<C: Clone> RouteTable<TypeHandle, C> {
    /// Build a table and register every manifest route in its type slot.
    ///
    /// Fails on the first pattern that cannot be parsed or that the table
    /// rejects (placeholder conflict).
    pub fn from_config(config: &RouterConfig) -> RouteResult<Self> {
        let table = Self::with_options(config.parsing.parse_options()?);

        for route in &config.routes {
            let path = table.parse(&route.pattern)?;
            if !table.register_type(&path, TypeHandle::new(route.target.as_str())) {
                return Err(RouteError::Rejected {
                    pattern: route.pattern.clone(),
                });
            }
        }

        tracing::info!(routes = table.route_count(), "Route table built");
        Ok(table)
    }
}
