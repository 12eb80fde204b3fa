//! Deep-link routing library.
//!
//! Registers URL path patterns (`/user/:id`) against destination type
//! handles and callbacks, and resolves concrete links to the nearest
//! registered pattern together with its parameters.

pub mod config;
pub mod error;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use error::{RouteError, RouteResult};
pub use routing::{
    Callback, DeepLinkTable, Parameters, Resolution, RoutePath, RouteTable, TypeHandle,
};
