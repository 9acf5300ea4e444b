use crate::cli::actions::{navigate, products, session, Action};
use anyhow::Result;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Whoami(globals) => session::whoami(&globals).await,
        Action::Login(globals) => session::login(&globals).await,
        Action::Logout(globals) => session::logout(&globals).await,
        Action::Navigate { globals, path } => navigate::execute(&globals, &path).await,
        Action::Products { globals, command } => products::execute(&globals, command).await,
    }
}
