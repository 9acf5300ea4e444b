pub mod navigate;
pub mod products;
pub mod session;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Whoami(GlobalArgs),
    Login(GlobalArgs),
    Logout(GlobalArgs),
    Navigate {
        globals: GlobalArgs,
        path: String,
    },
    Products {
        globals: GlobalArgs,
        command: products::ProductCommand,
    },
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
