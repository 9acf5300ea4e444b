use crate::navigation::{
    guards::GuardOutcome,
    routes::{normalize_path, Route, RouteTarget},
    Navigate, NavigationError,
};
use crate::session::SessionStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Upper bound on guard and route redirects followed for one navigation.
pub const MAX_REDIRECTS: usize = 8;

/// A path that passed every guard on its route.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub path: String,
    pub view: &'static str,
    pub params: BTreeMap<String, String>,
}

/// Resolves paths against the route table, applying guards and following
/// redirects, and remembers the last committed path.
pub struct Router {
    store: Arc<SessionStore>,
    routes: Vec<Route>,
    current: RwLock<Option<String>>,
}

impl Router {
    #[must_use]
    pub fn new(store: Arc<SessionStore>, routes: Vec<Route>) -> Self {
        Self {
            store,
            routes,
            current: RwLock::new(None),
        }
    }

    /// Last committed path, `None` before the first navigation.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Works out where a navigation to `path` ends without committing it.
    ///
    /// # Errors
    /// `NotFound` if a path along the way matches no route, `RedirectLoop` if
    /// more than [`MAX_REDIRECTS`] redirects are followed.
    pub fn resolve(&self, path: &str) -> Result<Resolution, NavigationError> {
        let mut path = normalize_path(path);

        for _ in 0..=MAX_REDIRECTS {
            let (route, params) = self
                .routes
                .iter()
                .find_map(|route| route.matches(&path).map(|params| (route, params)))
                .ok_or_else(|| NavigationError::NotFound(path.clone()))?;

            let view = match route.target {
                RouteTarget::Redirect(to) => {
                    debug!(from = %path, to, "route redirect");
                    path = normalize_path(to);
                    continue;
                }
                RouteTarget::View(view) => view,
            };

            let denied = route
                .guards
                .iter()
                .map(|guard| guard.check(&self.store, &path))
                .find_map(|outcome| match outcome {
                    GuardOutcome::Allow => None,
                    GuardOutcome::RedirectTo(to) => Some(to),
                });

            match denied {
                Some(to) => {
                    debug!(from = %path, to = %to, "guard redirect");
                    path = normalize_path(&to);
                }
                None => return Ok(Resolution { path, view, params }),
            }
        }

        Err(NavigationError::RedirectLoop(path))
    }

    /// Resolves `path` and commits the final destination.
    ///
    /// # Errors
    /// See [`Router::resolve`]. The current path is unchanged on error.
    pub fn navigate(&self, path: &str) -> Result<Resolution, NavigationError> {
        let resolution = self.resolve(path)?;
        *self.current.write() = Some(resolution.path.clone());
        info!(requested = path, path = %resolution.path, view = resolution.view, "navigated");
        Ok(resolution)
    }
}

impl Navigate for Router {
    fn navigate_to(&self, path: &str) {
        if let Err(err) = self.navigate(path) {
            warn!("navigation to {path} failed: {err}");
        }
    }
}
