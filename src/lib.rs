//! # Gatekeeper (session-aware API client)
//!
//! `gatekeeper` authenticates a user against a remote API, keeps the short-lived
//! access token in memory only, renews it silently through the server-held
//! refresh cookie, and gates navigation by authentication and role.
//!
//! ## Components
//!
//! - **Session store** ([`session::SessionStore`]): the single source of truth
//!   for the session state, observable by any number of subscribers.
//! - **Session client** ([`session::SessionClient`]): login, logout and silent
//!   refresh. It is the only writer of the store and guarantees that at most one
//!   refresh call is outstanding.
//! - **Request authorizer** ([`transport::RequestAuthorizer`]): stamps every
//!   outgoing request with the cookie jar's credentials and, while a token is
//!   held, an `Authorization: Bearer` header.
//! - **Navigation guards** ([`navigation::guards`]): authentication and role
//!   checks evaluated by the [`navigation::Router`] before committing a path.
//! - **Bootstrapper** ([`session::Bootstrapper`]): one silent refresh at startup
//!   so a returning user is re-authenticated before the first navigation.
//!
//! ## Token policy
//!
//! The bearer token never leaves process memory. Persistence across restarts is
//! provided solely by the backend's `HttpOnly` refresh cookie.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod navigation;
pub mod session;
pub mod transport;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
