//! Client-side session management: the observable state, the client that
//! mutates it, and the startup bootstrap.

mod bootstrap;
mod client;
mod state;
mod store;

pub use bootstrap::Bootstrapper;
pub use client::{
    SessionClient, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, MIN_PASSWORD_CHARS, REFRESH_ENDPOINT,
};
pub use state::{Credential, SessionState};
pub use store::{SessionStore, Subscription};
