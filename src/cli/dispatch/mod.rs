use crate::cli::{
    actions::{products::ProductCommand, Action},
    commands::{self, api, products},
    globals::GlobalArgs,
};
use crate::config::DEFAULT_TIMEOUT_SECONDS;
use crate::features::products::ProductRequest;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some((commands::CMD_WHOAMI, _)) => Ok(Action::Whoami(globals)),
        Some((commands::CMD_LOGIN, _)) => Ok(Action::Login(globals)),
        Some((commands::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((commands::CMD_NAVIGATE, sub)) => {
            let path = sub
                .get_one::<String>(commands::ARG_PATH)
                .cloned()
                .context("missing required argument: <path>")?;
            Ok(Action::Navigate { globals, path })
        }
        Some((products::CMD_PRODUCTS, sub)) => Ok(Action::Products {
            globals,
            command: product_command(sub)?,
        }),
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given, see --help"),
    }
}

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_base_url = matches
        .get_one::<String>(api::ARG_API_BASE_URL)
        .cloned()
        .context("missing required argument: --api-base-url")?;
    let timeout_seconds = matches
        .get_one::<u64>(api::ARG_TIMEOUT)
        .copied()
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    let mut globals = GlobalArgs::new(api_base_url, timeout_seconds);
    globals.username = matches
        .get_one::<String>(api::ARG_USERNAME)
        .map(|username| username.trim().to_string())
        .filter(|username| !username.is_empty());
    globals.password = matches
        .get_one::<String>(api::ARG_PASSWORD)
        .map(|password| SecretString::from(password.clone()));

    Ok(globals)
}

fn product_command(matches: &ArgMatches) -> Result<ProductCommand> {
    let id = |sub: &ArgMatches| {
        sub.get_one::<i64>(products::ARG_ID)
            .copied()
            .context("missing required argument: <id>")
    };

    match matches.subcommand() {
        Some(("list", _)) => Ok(ProductCommand::List),
        Some(("get", sub)) => Ok(ProductCommand::Get { id: id(sub)? }),
        Some(("create", sub)) => Ok(ProductCommand::Create(product_request(sub)?)),
        Some(("update", sub)) => Ok(ProductCommand::Update {
            id: id(sub)?,
            request: product_request(sub)?,
        }),
        Some(("delete", sub)) => Ok(ProductCommand::Delete { id: id(sub)? }),
        Some((other, _)) => bail!("unknown products command: {other}"),
        None => bail!("missing products command, see --help"),
    }
}

fn product_request(matches: &ArgMatches) -> Result<ProductRequest> {
    Ok(ProductRequest {
        name: matches
            .get_one::<String>(products::ARG_NAME)
            .cloned()
            .context("missing required argument: --name")?,
        description: matches
            .get_one::<String>(products::ARG_DESCRIPTION)
            .cloned()
            .unwrap_or_default(),
        price: matches
            .get_one::<f64>(products::ARG_PRICE)
            .copied()
            .context("missing required argument: --price")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn parse(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("GATEKEEPER_API_BASE_URL", None::<&str>),
                ("GATEKEEPER_USERNAME", None),
                ("GATEKEEPER_PASSWORD", None),
            ],
            || {
                let mut argv = vec!["gatekeeper"];
                argv.extend_from_slice(args);
                handler(&commands::new().get_matches_from(argv))
            },
        )
    }

    #[test]
    fn test_whoami_uses_defaults() -> Result<()> {
        let Action::Whoami(globals) = parse(&["whoami"])? else {
            bail!("expected whoami");
        };
        assert_eq!(globals.api_base_url, "http://localhost:5454/api");
        assert_eq!(globals.timeout_seconds, 10);
        assert!(globals.credentials().is_none());
        Ok(())
    }

    #[test]
    fn test_login_collects_credentials() -> Result<()> {
        let Action::Login(globals) = parse(&[
            "login",
            "--username",
            " ana ",
            "--password",
            "secret",
        ])?
        else {
            bail!("expected login");
        };
        let Some((username, password)) = globals.credentials() else {
            bail!("expected credentials");
        };
        assert_eq!(username, "ana");
        assert_eq!(password.expose_secret(), "secret");
        Ok(())
    }

    #[test]
    fn test_navigate_path() -> Result<()> {
        let Action::Navigate { path, .. } = parse(&["navigate", "/products/new"])? else {
            bail!("expected navigate");
        };
        assert_eq!(path, "/products/new");
        Ok(())
    }

    #[test]
    fn test_products_update() -> Result<()> {
        let Action::Products { command, .. } = parse(&[
            "products",
            "update",
            "3",
            "--name",
            "Lamp",
            "--description",
            "Desk lamp",
            "--price",
            "12.5",
        ])?
        else {
            bail!("expected products");
        };
        assert_eq!(
            command,
            ProductCommand::Update {
                id: 3,
                request: ProductRequest {
                    name: "Lamp".to_string(),
                    description: "Desk lamp".to_string(),
                    price: 12.5,
                },
            }
        );
        Ok(())
    }

    #[test]
    fn test_products_delete() -> Result<()> {
        let Action::Products { command, .. } = parse(&["products", "delete", "9"])? else {
            bail!("expected products");
        };
        assert_eq!(command, ProductCommand::Delete { id: 9 });
        Ok(())
    }
}
