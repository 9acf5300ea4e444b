//! Session plumbing shared by every command: build the context, watch the
//! store, bootstrap, and sign in when credentials were given.

use crate::app::AppContext;
use crate::cli::globals::GlobalArgs;
use crate::session::{Credential, SessionState, SessionStore};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Builds the application context and runs the startup refresh.
///
/// # Errors
/// Returns an error if the configuration or HTTP client is invalid.
pub async fn open(globals: &GlobalArgs) -> Result<AppContext> {
    let config = globals.config().context("invalid API configuration")?;
    let ctx = AppContext::new(config).context("failed to build HTTP client")?;

    spawn_observer(&ctx.store);
    ctx.bootstrapper.run().await;

    Ok(ctx)
}

/// Logs every session transition, the way a navbar tracks the current user.
pub fn spawn_observer(store: &Arc<SessionStore>) -> JoinHandle<()> {
    let mut subscription = store.observe();
    tokio::spawn(async move {
        while let Some(state) = subscription.recv().await {
            match &state {
                SessionState::Authenticated(credential) => info!(
                    username = %credential.username,
                    roles = ?credential.roles,
                    "session authenticated"
                ),
                other => info!(state = other.label(), "session changed"),
            }
        }
    })
}

/// Signs in when both `--username` and `--password` were given.
///
/// # Errors
/// Returns the user-facing login message on failure.
pub async fn sign_in_if_configured(ctx: &AppContext, globals: &GlobalArgs) -> Result<()> {
    if let Some((username, password)) = globals.credentials() {
        sign_in(ctx, username, password).await?;
    }
    Ok(())
}

async fn sign_in(ctx: &AppContext, username: &str, password: &SecretString) -> Result<Credential> {
    ctx.session
        .login(username, password)
        .await
        .map_err(|err| anyhow!(err.user_message()))
}

/// One-line summary of a session state; never includes the token.
#[must_use]
pub fn describe(state: &SessionState) -> String {
    match state {
        SessionState::Authenticated(credential) => {
            let roles: Vec<&str> = credential.roles.iter().map(String::as_str).collect();
            format!(
                "authenticated as {} <{}> roles: [{}]",
                credential.username,
                credential.email,
                roles.join(", ")
            )
        }
        other => other.label().to_string(),
    }
}

/// # Errors
/// Returns an error if the context cannot be built.
pub async fn whoami(globals: &GlobalArgs) -> Result<()> {
    let ctx = open(globals).await?;
    println!("{}", describe(&ctx.store.current_state()));
    Ok(())
}

/// # Errors
/// Returns an error if credentials are missing or rejected.
pub async fn login(globals: &GlobalArgs) -> Result<()> {
    let (username, password) = globals
        .credentials()
        .context("login requires --username and --password")?;

    let ctx = open(globals).await?;
    let credential = sign_in(&ctx, username, password).await?;

    println!("{}", describe(&SessionState::Authenticated(credential)));
    if let Some(path) = ctx.router.current() {
        println!("now at {path}");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the context cannot be built; the logout itself never fails.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let ctx = open(globals).await?;
    sign_in_if_configured(&ctx, globals).await?;
    ctx.session.logout().await;
    println!("{}", describe(&ctx.store.current_state()));
    Ok(())
}
