//! Application route table and path matching.

use crate::config::{LANDING_PATH, LOGIN_PATH};
use crate::navigation::Guard;
use std::collections::BTreeMap;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_SUPERVISOR: &str = "ROLE_SUPERVISOR";

/// What a matched route does once its guards allow it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouteTarget {
    /// Renders a named view.
    View(&'static str),
    /// Unconditionally sends the user elsewhere.
    Redirect(&'static str),
}

#[derive(Clone, Debug)]
pub struct Route {
    pub pattern: &'static str,
    pub target: RouteTarget,
    pub guards: Vec<Guard>,
}

impl Route {
    #[must_use]
    pub fn view(pattern: &'static str, name: &'static str) -> Self {
        Self {
            pattern,
            target: RouteTarget::View(name),
            guards: Vec::new(),
        }
    }

    #[must_use]
    pub fn redirect(pattern: &'static str, to: &'static str) -> Self {
        Self {
            pattern,
            target: RouteTarget::Redirect(to),
            guards: Vec::new(),
        }
    }

    #[must_use]
    pub fn guarded(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Matches a normalized path, returning captured `:name` segments.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let pattern: Vec<&str> = segments(self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, segment) in pattern.iter().zip(&actual) {
            if let Some(name) = expected.strip_prefix(':') {
                params.insert(name.to_string(), (*segment).to_string());
            } else if expected != segment {
                return None;
            }
        }
        Some(params)
    }
}

/// Routes of the application, in match order.
#[must_use]
pub fn app_routes() -> Vec<Route> {
    let editors = Guard::any_role(&[ROLE_SUPERVISOR, ROLE_ADMIN]);
    vec![
        Route::view(LOGIN_PATH, "login"),
        Route::view(LANDING_PATH, "products").guarded(Guard::Authenticated),
        Route::view("/products/new", "product-create")
            .guarded(Guard::Authenticated)
            .guarded(editors.clone()),
        Route::view("/products/:id/edit", "product-edit")
            .guarded(Guard::Authenticated)
            .guarded(editors),
        Route::redirect("/", LANDING_PATH),
    ]
}

/// Strips query, fragment and surrounding slashes; the root becomes `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
