//! Route table, guards and the router that applies them.
//!
//! Guards are a UX convenience; real access control lives on the API.

pub mod guards;
pub mod routes;
mod router;

pub use guards::{Guard, GuardOutcome};
pub use routes::{app_routes, Route, RouteTarget};
pub use router::{Resolution, Router, MAX_REDIRECTS};

use thiserror::Error;

/// Something that can move the application to a view path.
pub trait Navigate: Send + Sync {
    fn navigate_to(&self, path: &str);
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum NavigationError {
    #[error("No route matches {0}")]
    NotFound(String),
    #[error("Too many redirects while resolving {0}")]
    RedirectLoop(String),
}
