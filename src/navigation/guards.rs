//! Authentication and role checks evaluated before a route is committed.
//!
//! Each guard reads one snapshot of the session store and answers
//! synchronously. `Unknown` is treated as not authenticated.

use crate::config::{LANDING_PATH, LOGIN_PATH};
use crate::session::SessionStore;
use tracing::{debug, error, warn};

/// Result of evaluating a guard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GuardOutcome {
    Allow,
    RedirectTo(String),
}

impl GuardOutcome {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

/// Guard attached to a route; evaluated in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Guard {
    Authenticated,
    AnyRole(Vec<String>),
}

impl Guard {
    /// Convenience for building a role guard from string literals.
    #[must_use]
    pub fn any_role(roles: &[&str]) -> Self {
        Guard::AnyRole(roles.iter().map(ToString::to_string).collect())
    }

    #[must_use]
    pub fn check(&self, store: &SessionStore, target: &str) -> GuardOutcome {
        match self {
            Guard::Authenticated => require_authenticated(store, target),
            Guard::AnyRole(required) => require_roles(store, target, required),
        }
    }
}

/// Allows only an authenticated session; everyone else goes to the login view.
#[must_use]
pub fn require_authenticated(store: &SessionStore, target: &str) -> GuardOutcome {
    if store.is_authenticated() {
        GuardOutcome::Allow
    } else {
        debug!(target_path = target, "not authenticated, redirecting to login");
        GuardOutcome::RedirectTo(LOGIN_PATH.to_string())
    }
}

/// Allows an authenticated session holding at least one of `required`.
///
/// An empty `required` list is a route misconfiguration and denies access. The
/// intended destination is not preserved on redirect.
#[must_use]
pub fn require_roles<S: AsRef<str>>(
    store: &SessionStore,
    target: &str,
    required: &[S],
) -> GuardOutcome {
    if required.is_empty() {
        error!(
            target_path = target,
            "role guard configured without required roles"
        );
        return GuardOutcome::RedirectTo(LANDING_PATH.to_string());
    }

    let state = store.current_state();
    let Some(credential) = state.credential() else {
        return GuardOutcome::RedirectTo(LOGIN_PATH.to_string());
    };

    if credential.has_any_role(required) {
        GuardOutcome::Allow
    } else {
        warn!(
            target_path = target,
            username = %credential.username,
            "access denied: missing required role"
        );
        GuardOutcome::RedirectTo(LANDING_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credential, SessionState};
    use secrecy::SecretString;

    fn store_with(state: SessionState) -> SessionStore {
        let store = SessionStore::new();
        store.set(state);
        store
    }

    fn signed_in(roles: &[&str]) -> SessionStore {
        store_with(SessionState::Authenticated(Credential::new(
            SecretString::from("t".to_string()),
            "ana".to_string(),
            "ana@example.com".to_string(),
            roles.iter().copied(),
        )))
    }

    fn login() -> GuardOutcome {
        GuardOutcome::RedirectTo("/login".to_string())
    }

    fn landing() -> GuardOutcome {
        GuardOutcome::RedirectTo("/products".to_string())
    }

    #[test]
    fn authentication_guard() {
        assert_eq!(require_authenticated(&SessionStore::new(), "/products"), login());
        assert_eq!(
            require_authenticated(&store_with(SessionState::Anonymous), "/products"),
            login()
        );
        assert_eq!(
            require_authenticated(&signed_in(&[]), "/products"),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn role_guard_needs_any_matching_role() {
        let required = ["ROLE_ADMIN"];
        assert_eq!(
            require_roles(&signed_in(&["ROLE_ADMIN"]), "/products/new", &required),
            GuardOutcome::Allow
        );
        assert_eq!(
            require_roles(&signed_in(&["ROLE_SUPERVISOR"]), "/products/new", &required),
            landing()
        );
        assert_eq!(
            require_roles(
                &signed_in(&["ROLE_SUPERVISOR"]),
                "/products/new",
                &["ROLE_SUPERVISOR", "ROLE_ADMIN"]
            ),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn role_guard_sends_anonymous_to_login() {
        assert_eq!(
            require_roles(&SessionStore::new(), "/products/new", &["ROLE_ADMIN"]),
            login()
        );
    }

    #[test]
    fn empty_role_list_denies_even_admins() {
        let none: [&str; 0] = [];
        assert_eq!(
            require_roles(&signed_in(&["ROLE_ADMIN"]), "/products/new", &none),
            landing()
        );
        // Misconfiguration is reported before the session is consulted.
        assert_eq!(require_roles(&SessionStore::new(), "/x", &none), landing());
    }

    #[test]
    fn guard_enum_dispatches() {
        let store = signed_in(&["ROLE_USER"]);
        assert!(Guard::Authenticated.check(&store, "/products").is_allowed());
        assert_eq!(
            Guard::any_role(&["ROLE_ADMIN"]).check(&store, "/products/new"),
            landing()
        );
    }
}
