//! Network-backed session transitions: login, logout and silent refresh.
//!
//! This is the only writer of [`SessionStore`]. Login failures surface to the
//! caller and leave the session untouched; logout and refresh failures are
//! absorbed, because both mean "there is no session", which is a normal
//! outcome. A logout is final: a refresh that was already in flight when it
//! happened is discarded instead of signing the user back in. Tokens and
//! passwords must never reach the logs.

use crate::config::{LANDING_PATH, LOGIN_PATH};
use crate::error::AuthError;
use crate::navigation::Navigate;
use crate::session::state::{AuthResponse, Credential, LoginRequest, SessionState};
use crate::session::store::SessionStore;
use crate::transport::{AccessTokenSource, ApiClient};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tracing::{debug, info, instrument, warn};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_CHARS: usize = 3;

pub struct SessionClient {
    api: ApiClient,
    store: Arc<SessionStore>,
    navigator: Arc<dyn Navigate>,
    refresh_in_flight: AtomicBool,
}

/// Clears the in-flight flag when the refresh settles, including when the
/// future is dropped mid-flight.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionClient {
    #[must_use]
    pub fn new(api: ApiClient, store: Arc<SessionStore>, navigator: Arc<dyn Navigate>) -> Self {
        Self {
            api,
            store,
            navigator,
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Authenticates with username and password.
    ///
    /// On success the session becomes `Authenticated` and the navigator is sent
    /// to the landing view. On failure the current session is kept as is.
    ///
    /// # Errors
    /// `Validation` for blank usernames or short passwords (no request is
    /// sent), `InvalidCredentials` for 4xx, `Server` for 5xx or an unusable
    /// token, and `Network` when no response arrives.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Credential, AuthError> {
        validate_login(username, password)?;
        let request = LoginRequest {
            username,
            password: password.expose_secret(),
        };

        let response: AuthResponse = self
            .api
            .post_json(LOGIN_ENDPOINT, &request)
            .await
            .map_err(|err| {
                let err = AuthError::from(err);
                warn!(kind = ?err.kind(), "login failed: {err}");
                err
            })?;

        let credential = Credential::try_from(response).map_err(|err| {
            warn!("login response rejected: {err}");
            err
        })?;
        self.store
            .set(SessionState::Authenticated(credential.clone()));
        info!(roles = ?credential.roles, "login succeeded");

        self.navigator.navigate_to(LANDING_PATH);
        Ok(credential)
    }

    /// Ends the session. The backend call invalidates the refresh cookie; its
    /// outcome is ignored and the local session is always cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        match self.api.post_empty(LOGOUT_ENDPOINT).await {
            Ok(()) => debug!("backend session invalidated"),
            Err(err) => warn!("logout call failed, clearing local session anyway: {err}"),
        }

        self.store.clear();
        info!("logged out");
        self.navigator.navigate_to(LOGIN_PATH);
    }

    /// Renews the access token using only the refresh cookie.
    ///
    /// Returns `false` without a network call if a refresh is already in
    /// flight. Any failure leaves the session `Anonymous` and returns `false`.
    /// If a logout happens while the call is outstanding, its result is
    /// dropped and `false` is returned.
    #[instrument(skip(self))]
    pub async fn silent_refresh(&self) -> bool {
        if self
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("refresh already in flight");
            return false;
        }
        let _in_flight = InFlight(&self.refresh_in_flight);
        let epoch = self.store.logout_epoch();

        let refreshed = self
            .api
            .post_json::<_, AuthResponse>(REFRESH_ENDPOINT, &serde_json::Map::new())
            .await
            .map_err(AuthError::from)
            .and_then(Credential::try_from);

        let (next, refreshed) = match refreshed {
            Ok(credential) => {
                debug!(username = %credential.username, "session refreshed");
                (SessionState::Authenticated(credential), true)
            }
            Err(err) => {
                debug!("no session to refresh: {err}");
                (SessionState::Anonymous, false)
            }
        };

        if self.store.set_unless_logged_out(epoch, next) {
            refreshed
        } else {
            debug!("logged out while refreshing, result discarded");
            false
        }
    }

    /// The bearer token, only while `Authenticated`.
    #[must_use]
    pub fn current_access_token(&self) -> Option<SecretString> {
        self.store.current_access_token()
    }
}

/// Client-side form checks run before any network call. The username is
/// checked after trimming but sent as entered.
fn validate_login(username: &str, password: &SecretString) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::Validation("Username is required.".to_string()));
    }
    if password.expose_secret().chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters."
        )));
    }
    Ok(())
}
