use crate::cli::actions::session;
use crate::cli::globals::GlobalArgs;
use anyhow::Result;

/// Resolves `path` through the route guards and prints where it landed.
///
/// # Errors
/// Returns an error if login fails or no route matches.
pub async fn execute(globals: &GlobalArgs, path: &str) -> Result<()> {
    let ctx = session::open(globals).await?;
    session::sign_in_if_configured(&ctx, globals).await?;

    let resolution = ctx.router.navigate(path)?;
    println!("{} ({})", resolution.path, resolution.view);
    Ok(())
}
