use crate::cli::actions::session;
use crate::cli::globals::GlobalArgs;
use crate::features::products::ProductRequest;
use crate::navigation::routes::{normalize_path, ROLE_ADMIN, ROLE_SUPERVISOR};
use crate::session::SessionState;
use anyhow::{bail, Result};
use serde::Serialize;

const EDITORS: &[&str] = &[ROLE_SUPERVISOR, ROLE_ADMIN];
const ADMINS: &[&str] = &[ROLE_ADMIN];

#[derive(Clone, Debug, PartialEq)]
pub enum ProductCommand {
    List,
    Get { id: i64 },
    Create(ProductRequest),
    Update { id: i64, request: ProductRequest },
    Delete { id: i64 },
}

impl ProductCommand {
    /// View the command runs from; its guards apply before any API call.
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            ProductCommand::List | ProductCommand::Get { .. } | ProductCommand::Delete { .. } => {
                "/products".to_string()
            }
            ProductCommand::Create(_) => "/products/new".to_string(),
            ProductCommand::Update { id, .. } => format!("/products/{id}/edit"),
        }
    }

    /// Roles the backend requires, any one of which is enough. Empty means
    /// any signed-in user.
    #[must_use]
    pub fn required_roles(&self) -> &'static [&'static str] {
        match self {
            ProductCommand::List | ProductCommand::Get { .. } => &[],
            ProductCommand::Create(_) | ProductCommand::Update { .. } => EDITORS,
            ProductCommand::Delete { .. } => ADMINS,
        }
    }

    /// Whether the session may run this command. The backend stays
    /// authoritative; this only avoids calls that are bound to be refused.
    #[must_use]
    pub fn permitted(&self, state: &SessionState) -> bool {
        let required = self.required_roles();
        state.is_authenticated() && (required.is_empty() || state.has_any_role(required))
    }
}

/// # Errors
/// Returns an error if the route is guarded away, the role check fails or the
/// API call fails.
pub async fn execute(globals: &GlobalArgs, command: ProductCommand) -> Result<()> {
    let ctx = session::open(globals).await?;
    session::sign_in_if_configured(&ctx, globals).await?;

    let route = command.route();
    let resolution = ctx.router.navigate(&route)?;
    if resolution.path != normalize_path(&route) {
        bail!("{route} is not available to this session (redirected to {})", resolution.path);
    }

    if !command.permitted(&ctx.store.current_state()) {
        bail!(
            "this command requires one of: {}",
            command.required_roles().join(", ")
        );
    }

    let products = &ctx.products;
    match command {
        ProductCommand::List => print_json(&products.list().await?),
        ProductCommand::Get { id } => print_json(&products.get(id).await?),
        ProductCommand::Create(request) => print_json(&products.create(&request).await?),
        ProductCommand::Update { id, request } => {
            print_json(&products.update(id, &request).await?)
        }
        ProductCommand::Delete { id } => {
            products.delete(id).await?;
            println!("deleted product {id}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Credential;
    use secrecy::SecretString;

    fn signed_in(roles: &[&str]) -> SessionState {
        SessionState::Authenticated(Credential::new(
            SecretString::from("t".to_string()),
            "ana".to_string(),
            String::new(),
            roles.iter().copied(),
        ))
    }

    fn request() -> ProductRequest {
        ProductRequest {
            name: "Lamp".to_string(),
            description: String::new(),
            price: 10.0,
        }
    }

    #[test]
    fn routes_follow_the_view_table() {
        assert_eq!(ProductCommand::List.route(), "/products");
        assert_eq!(ProductCommand::Create(request()).route(), "/products/new");
        assert_eq!(
            ProductCommand::Update {
                id: 4,
                request: request()
            }
            .route(),
            "/products/4/edit"
        );
    }

    #[test]
    fn delete_is_admin_only() {
        let delete = ProductCommand::Delete { id: 1 };
        assert!(delete.permitted(&signed_in(&["ROLE_ADMIN"])));
        assert!(!delete.permitted(&signed_in(&["ROLE_SUPERVISOR"])));
    }

    #[test]
    fn edits_need_supervisor_or_admin() {
        let create = ProductCommand::Create(request());
        assert!(create.permitted(&signed_in(&["ROLE_SUPERVISOR"])));
        assert!(!create.permitted(&signed_in(&["ROLE_USER"])));
    }

    #[test]
    fn reads_need_a_session() {
        assert!(ProductCommand::List.permitted(&signed_in(&[])));
        assert!(!ProductCommand::Get { id: 1 }.permitted(&SessionState::Anonymous));
        assert!(!ProductCommand::List.permitted(&SessionState::Unknown));
    }
}
