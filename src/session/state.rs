//! Session state and the credential it carries, plus the wire payloads the auth
//! endpoints exchange. The access token is wrapped in `SecretString` and
//! redacted from `Debug` output; it must never be logged or persisted.

use crate::error::AuthError;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Access token plus the identity claims returned with it.
#[derive(Clone)]
pub struct Credential {
    access_token: SecretString,
    pub username: String,
    pub email: String,
    pub roles: BTreeSet<String>,
}

impl Credential {
    #[must_use]
    pub fn new<I, S>(access_token: SecretString, username: String, email: String, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            access_token,
            username,
            email,
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// True when at least one of `required` is among this identity's roles.
    #[must_use]
    pub fn has_any_role<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .any(|role| self.roles.contains(role.as_ref()))
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.access_token.expose_secret() == other.access_token.expose_secret()
            && self.username == other.username
            && self.email == other.email
            && self.roles == other.roles
    }
}

impl Eq for Credential {}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish()
    }
}

/// Rejects tokens that could not be sent back as a bearer header, so a held
/// credential always authorizes requests.
impl TryFrom<AuthResponse> for Credential {
    type Error = AuthError;

    fn try_from(response: AuthResponse) -> Result<Self, Self::Error> {
        let usable = !response.access_token.is_empty()
            && HeaderValue::from_str(&format!("Bearer {}", response.access_token)).is_ok();
        if !usable {
            return Err(AuthError::Server {
                status: 200,
                message: "Server returned an unusable access token.".to_string(),
            });
        }

        Ok(Credential::new(
            SecretString::from(response.access_token),
            response.username,
            response.email,
            response.roles,
        ))
    }
}

/// Current authentication state. `Unknown` only exists until the startup
/// refresh settles; guards treat it like `Anonymous`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SessionState {
    #[default]
    Unknown,
    Authenticated(Credential),
    Anonymous,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            SessionState::Authenticated(credential) => Some(credential),
            SessionState::Unknown | SessionState::Anonymous => None,
        }
    }

    #[must_use]
    pub fn has_any_role<S: AsRef<str>>(&self, required: &[S]) -> bool {
        self.credential()
            .is_some_and(|credential| credential.has_any_role(required))
    }

    /// Short label for logs; never includes identity data.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unknown => "unknown",
            SessionState::Authenticated(_) => "authenticated",
            SessionState::Anonymous => "anonymous",
        }
    }
}

/// Body of `POST /auth/login`. Built per call from the caller's secret and
/// dropped right after serialization.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body returned by `/auth/login` and `/auth/refresh`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub access_token: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
